use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use log::error;
use serde::Serialize;

/// A source directory that could not be listed. Its files are left out of the
/// merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryReadError {
    pub directory: PathBuf,
    pub message: String,
}

impl Display for DirectoryReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to read junit directory {}: {}",
            self.directory.display(),
            self.message
        )
    }
}

/// A source file that was merged but could not be removed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDeleteError {
    pub path: PathBuf,
    pub message: String,
}

impl Display for FileDeleteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to remove {}: {}", self.path.display(), self.message)
    }
}

/// Non-fatal problems collected over one merge, kept per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MergeIssues {
    pub directory_reads: Vec<DirectoryReadError>,
    pub deletions: Vec<FileDeleteError>,
}

impl MergeIssues {
    pub fn record_directory_read(&mut self, issue: DirectoryReadError) {
        error!("{issue}");
        self.directory_reads.push(issue);
    }

    pub fn record_deletion(&mut self, issue: FileDeleteError) {
        error!("{issue}");
        self.deletions.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.directory_reads.is_empty() && self.deletions.is_empty()
    }

    pub fn has_directory_errors(&self) -> bool {
        !self.directory_reads.is_empty()
    }

    /// One line per category, or `None` when nothing went wrong.
    pub fn summary(&self) -> Option<String> {
        let mut lines = vec![];
        if !self.directory_reads.is_empty() {
            lines.push(format!(
                "problems reading junit files; partial merge has been performed: {}",
                join(&self.directory_reads)
            ));
        }
        if !self.deletions.is_empty() {
            lines.push(format!(
                "problem removing original junit results: {}",
                join(&self.deletions)
            ));
        }

        match lines.is_empty() {
            true => None,
            false => Some(lines.join("\n")),
        }
    }
}

fn join<T: Display>(issues: &[T]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_issues_have_no_summary() {
        let issues = MergeIssues::default();
        assert!(issues.is_empty());
        assert_eq!(issues.summary(), None);
    }

    #[test]
    fn summary_joins_each_category() {
        let mut issues = MergeIssues::default();
        issues.record_directory_read(DirectoryReadError {
            directory: PathBuf::from("/artifacts/shard-1"),
            message: String::from("permission denied"),
        });
        issues.record_directory_read(DirectoryReadError {
            directory: PathBuf::from("/artifacts/shard-2"),
            message: String::from("no such file or directory"),
        });

        assert!(issues.has_directory_errors());
        assert_eq!(
            issues.summary().unwrap(),
            "problems reading junit files; partial merge has been performed: \
             failed to read junit directory /artifacts/shard-1: permission denied \
             failed to read junit directory /artifacts/shard-2: no such file or directory"
        );
    }

    #[test]
    fn deletion_issues_are_reported_separately() {
        let mut issues = MergeIssues::default();
        issues.record_deletion(FileDeleteError {
            path: PathBuf::from("/artifacts/junit_01.xml"),
            message: String::from("read-only file system"),
        });

        assert!(!issues.has_directory_errors());
        assert_eq!(
            issues.summary().unwrap(),
            "problem removing original junit results: \
             failed to remove /artifacts/junit_01.xml: read-only file system"
        );
    }
}
