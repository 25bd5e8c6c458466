//! In-memory model of a JUnit report and its XML codec.
//!
//! Only the parts of the JUnit schema the merge needs are modelled. Everything
//! else is dropped on decode and never re-emitted.

pub mod errors;

mod decode;
mod encode;

#[cfg(test)]
mod decode_tests;

use std::fmt::Formatter;

pub use decode::decode_report;
pub use encode::{encode_report, write_report};

pub type Result<R> = std::result::Result<R, errors::Error>;

pub(crate) const TEST_SUITES: &str = "testsuites";
pub(crate) const TEST_SUITE: &str = "testsuite";
pub(crate) const TEST_CASE: &str = "testcase";
pub(crate) const SYSTEM_OUT: &str = "system-out";
pub(crate) const FAILURE: &str = "failure";
pub(crate) const SKIPPED: &str = "skipped";
pub(crate) const NAME: &str = "name";
pub(crate) const TIME: &str = "time";

/// A decoded report file: the suites in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDocument {
    pub suites: Vec<Suite>,
}

impl ReportDocument {
    /// Every case of every suite, suite boundaries flattened.
    pub fn into_cases(self) -> impl Iterator<Item = Case> {
        self.suites.into_iter().flat_map(|suite| suite.cases)
    }

    #[cfg(test)]
    pub(crate) fn cases(&self) -> impl Iterator<Item = &Case> {
        self.suites.iter().flat_map(|suite| suite.cases.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suite {
    pub name: Option<String>,
    pub cases: Vec<Case>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Case {
    pub name: String,
    /// The `time` attribute, passed through untouched.
    pub elapsed: String,
    pub stdout: Option<String>,
    pub failure: Option<String>,
    pub skip: SkipState,
}

impl Case {
    pub fn is_skipped(&self) -> bool {
        self.skip.is_skipped()
    }

    pub(crate) fn has_children(&self) -> bool {
        self.stdout.is_some() || self.failure.is_some() || self.is_skipped()
    }
}

/// Whether a case carried a `<skipped>` element, and what was inside it.
///
/// `PresentEmpty` and `PresentWithText` both mean the test did not run; they
/// only differ in how the element is written back out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SkipState {
    #[default]
    Absent,
    PresentEmpty,
    PresentWithText(String),
}

impl SkipState {
    pub fn is_skipped(&self) -> bool {
        !matches!(self, SkipState::Absent)
    }

    pub(crate) fn from_text(text: String) -> Self {
        if text.is_empty() {
            SkipState::PresentEmpty
        } else {
            SkipState::PresentWithText(text)
        }
    }
}

impl std::fmt::Display for SkipState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipState::Absent => f.write_str("executed"),
            SkipState::PresentEmpty => f.write_str("skipped"),
            SkipState::PresentWithText(reason) => write!(f, "skipped ({reason})"),
        }
    }
}
