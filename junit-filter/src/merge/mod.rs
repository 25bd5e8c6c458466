//! Merging sharded JUnit reports into one.
//!
//! The pipeline is strictly sequential: scan every source directory, decode
//! and fold every report file, write the result, then remove the sources if
//! (and only if) every directory could be read. Parse, read and write
//! failures abort with an [`Error`]; unreadable directories and failed
//! removals are collected in [`MergeIssues`] and returned with the outcome.

pub mod config;
pub mod dedup;
pub mod filter;
pub mod issues;
pub mod scan;

mod cleanup;

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;

use crate::report::errors::{DecodeError, Error};
use crate::report::{decode_report, write_report, ReportDocument, Result};
use config::MergeConfig;
use dedup::{DedupMerger, MergeStats};
use filter::TestFilter;
use issues::MergeIssues;
use scan::{read_file_bytes, scan_directories};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStatus {
    Success,
    /// The report was written, but some directories could not be read or
    /// some sources could not be removed.
    PartialSuccess,
}

impl Display for MergeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeStatus::Success => f.write_str("SUCCESS"),
            MergeStatus::PartialSuccess => f.write_str("PARTIAL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "state")]
pub enum CleanupStatus {
    Performed { removed: Vec<PathBuf> },
    /// Sources are kept when any directory failed to be read.
    SkippedAfterScanErrors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MergeOutcome {
    pub destination: PathBuf,
    pub cases_written: usize,
    pub files_merged: Vec<PathBuf>,
    pub stats: MergeStats,
    pub cleanup: CleanupStatus,
    pub issues: MergeIssues,
}

impl MergeOutcome {
    pub fn status(&self) -> MergeStatus {
        match self.issues.is_empty() {
            true => MergeStatus::Success,
            false => MergeStatus::PartialSuccess,
        }
    }

    pub fn is_partial(&self) -> bool {
        self.status() == MergeStatus::PartialSuccess
    }

    /// The joined partial-merge message, if there is anything to report.
    pub fn partial_merge_message(&self) -> Option<String> {
        self.issues.summary()
    }
}

/// Merges every JUnit file found in `source_directories` into `destination`,
/// keeping only test cases whose name matches `test_filter`. Skipped test
/// cases duplicated across runs are stored once, and a real run of a test
/// supersedes its skips. The originals are removed when nothing went wrong.
pub fn merge_junit<P: AsRef<Path>>(
    test_filter: &str,
    source_directories: &[P],
    destination: &Path,
) -> Result<MergeOutcome> {
    merge_reports(&MergeConfig::new(
        test_filter,
        source_directories,
        destination,
    ))
}

pub fn merge_reports(config: &MergeConfig) -> Result<MergeOutcome> {
    config.validate()?;
    let filter = TestFilter::new(&config.filter)?;
    let mut issues = MergeIssues::default();

    let scan = scan_directories(&config.sources, config.order, &config.destination);
    for error in scan.errors {
        issues.record_directory_read(error);
    }

    let mut merger = DedupMerger::new(filter);
    for path in &scan.files {
        debug!("Merging junit file {}", path.display());
        merger.add_document(read_report(path)?)?;
    }

    let (suite, stats) = merger.into_suite(config.keep_encounter_order);
    write_report(&suite, &config.destination)?;
    info!(
        "Wrote {} test cases from {} files to {}",
        suite.cases.len(),
        stats.files,
        config.destination.display()
    );

    let cleanup = match issues.has_directory_errors() {
        true => {
            warn!("Keeping original junit files, not every source directory could be read");
            CleanupStatus::SkippedAfterScanErrors
        }
        false => CleanupStatus::Performed {
            removed: cleanup::remove_sources(&scan.files, &mut issues),
        },
    };

    Ok(MergeOutcome {
        destination: config.destination.clone(),
        cases_written: suite.cases.len(),
        files_merged: scan.files,
        stats,
        cleanup,
        issues,
    })
}

fn read_report(path: &Path) -> Result<ReportDocument> {
    let content = File::open(path)
        .and_then(read_file_bytes)
        .map_err(|source| Error::FileReadError {
            path: path.to_path_buf(),
            source,
        })?;

    std::str::from_utf8(&content)
        .map_err(DecodeError::from)
        .and_then(decode_report)
        .map_err(|source| Error::FileParseError {
            path: path.to_path_buf(),
            source,
        })
}
