use std::path::PathBuf;

use log::debug;

use crate::merge::issues::{FileDeleteError, MergeIssues};

/// Removes merged source files. Returns the ones actually removed; every
/// failure is recorded in `issues` and does not stop the remaining removals.
pub(crate) fn remove_sources(files: &[PathBuf], issues: &mut MergeIssues) -> Vec<PathBuf> {
    files.iter().fold(vec![], |mut removed, file| {
        match std::fs::remove_file(file) {
            Ok(()) => {
                debug!("Removed original junit file {}", file.display());
                removed.push(file.clone());
            }
            Err(e) => issues.record_deletion(FileDeleteError {
                path: file.clone(),
                message: e.to_string(),
            }),
        }
        removed
    })
}
