use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use crate::merge::issues::DirectoryReadError;

pub const REPORT_FILE_SUFFIX: &str = ".xml";
/// Name a previous merge writes its output under. Never read back in.
pub const RESERVED_OUTPUT_NAME: &str = "junit_runner.xml";

/// Order in which report files inside one directory are visited. Only the
/// first-seen tie break of the merge depends on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanOrder {
    /// Whatever order the filesystem lists entries in. Not guaranteed stable.
    #[default]
    Listing,
    Alphabetical,
    LastModified,
}

impl ScanOrder {
    fn comparator(self) -> fn(&DirEntry, &DirEntry) -> Ordering {
        match self {
            ScanOrder::Listing => regular_ordering,
            ScanOrder::Alphabetical => alphabetical,
            ScanOrder::LastModified => last_modified,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanResult {
    /// Selected report files, directories in the order given.
    pub files: Vec<PathBuf>,
    pub errors: Vec<DirectoryReadError>,
}

/// Lists the report files of every source directory.
///
/// A directory that cannot be listed contributes no files and one
/// [`DirectoryReadError`]; the remaining directories are still scanned.
pub fn scan_directories<P: AsRef<Path>>(
    sources: &[P],
    order: ScanOrder,
    destination: &Path,
) -> ScanResult {
    let destination = resolve(destination);
    sources
        .iter()
        .fold(ScanResult::default(), |mut result, directory| {
            let directory = directory.as_ref();
            match scan_directory(directory, order, &destination) {
                Ok(mut files) => result.files.append(&mut files),
                Err(message) => result.errors.push(DirectoryReadError {
                    directory: directory.to_path_buf(),
                    message,
                }),
            }
            result
        })
}

fn scan_directory(
    directory: &Path,
    order: ScanOrder,
    destination: &Path,
) -> Result<Vec<PathBuf>, String> {
    // walkdir quietly yields nothing for a plain file as root
    if directory.is_file() {
        return Err(String::from("not a directory"));
    }

    let resolved = std::fs::canonicalize(directory).unwrap_or_else(|_| directory.to_path_buf());
    let walker = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by(order.comparator());

    let mut selected = Vec::with_capacity(10);
    for entry in walker {
        let entry = entry.map_err(|e| e.to_string())?;
        if is_report_file(&entry)
            && resolved.join(entry.file_name()) != destination
        {
            selected.push(entry.into_path());
        }
    }

    Ok(selected)
}

fn is_report_file(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.ends_with(REPORT_FILE_SUFFIX) && name != RESERVED_OUTPUT_NAME
}

// Canonical parent joined with the file name; the destination itself usually
// does not exist yet.
fn resolve(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (std::fs::canonicalize(parent), path.file_name()) {
        (Ok(parent), Some(name)) => parent.join(name),
        _ => path.to_path_buf(),
    }
}

pub(crate) fn read_file_content(file: File) -> Result<String, std::io::Error> {
    let mut file_content = String::new();
    let mut buf_reader = BufReader::new(file);
    buf_reader.read_to_string(&mut file_content)?;
    Ok(file_content)
}

pub(crate) fn read_file_bytes(file: File) -> Result<Vec<u8>, std::io::Error> {
    let mut file_content = Vec::new();
    let mut buf_reader = BufReader::new(file);
    buf_reader.read_to_end(&mut file_content)?;
    Ok(file_content)
}

pub(crate) fn alphabetical(first: &DirEntry, second: &DirEntry) -> Ordering {
    first.file_name().cmp(second.file_name())
}

pub(crate) fn last_modified(first: &DirEntry, second: &DirEntry) -> Ordering {
    if let Ok(first) = first.metadata() {
        if let Ok(second) = second.metadata() {
            if let Ok(first) = first.modified() {
                if let Ok(second) = second.modified() {
                    return first.cmp(&second);
                }
            }
        }
    }

    Ordering::Equal
}

pub(crate) fn regular_ordering(_first: &DirEntry, _second: &DirEntry) -> Ordering {
    Ordering::Equal
}
