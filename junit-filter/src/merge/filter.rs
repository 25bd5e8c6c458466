use fancy_regex::Regex;

use crate::report::errors::Error;
use crate::report::Result;

/// Selects test cases by name. The pattern is searched for anywhere in the
/// name; anchor it to match a prefix.
#[derive(Debug, Clone)]
pub struct TestFilter {
    pattern: String,
    regex: Regex,
}

impl TestFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidFilter {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(TestFilter {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn matches(&self, name: &str) -> Result<bool> {
        self.regex
            .is_match(name)
            .map_err(|source| Error::FilterError {
                pattern: self.pattern.clone(),
                name: name.to_string(),
                source,
            })
    }
}
