use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::merge::scan::{read_file_content, ScanOrder};
use crate::report::errors::Error;
use crate::report::Result;

pub const DEFAULT_FILTER: &str = ".*";

/// Everything one merge needs. Can be read from a YAML or JSON file:
///
/// ```yaml
/// sources:
///   - /artifacts/shard-1
///   - /artifacts/shard-2
/// filter: "^\\[It\\] \\[lustre\\]"
/// destination: /artifacts/junit_runner.xml
/// order: alphabetical
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MergeConfig {
    pub sources: Vec<PathBuf>,
    #[serde(default = "default_filter")]
    pub filter: String,
    pub destination: PathBuf,
    #[serde(default)]
    pub order: ScanOrder,
    #[serde(default)]
    pub keep_encounter_order: bool,
}

fn default_filter() -> String {
    String::from(DEFAULT_FILTER)
}

impl MergeConfig {
    pub fn new<P: AsRef<Path>>(filter: &str, sources: &[P], destination: &Path) -> Self {
        MergeConfig {
            sources: sources.iter().map(|s| s.as_ref().to_path_buf()).collect(),
            filter: filter.to_string(),
            destination: destination.to_path_buf(),
            order: ScanOrder::default(),
            keep_encounter_order: false,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = read_file_content(File::open(path)?)?;
        Self::from_yaml(&content)
    }

    /// Parses a configuration document. YAML is a superset of JSON, so both
    /// are accepted.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: MergeConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.destination.file_name().is_none() {
            return Err(Error::ConfigError(format!(
                "destination `{}` does not name a file",
                self.destination.display()
            )));
        }
        Ok(())
    }
}
