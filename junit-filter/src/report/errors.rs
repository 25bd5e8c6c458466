use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors. Any of these aborts the merge before the destination is
/// written or, for `WriteError`, before any source file is removed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to unmarshal XML file {}: {source}", .path.display())]
    FileParseError {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
    #[error("failed to read JUnit file {}: {source}", .path.display())]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write merged JUnit report {}: {source}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid test filter `{pattern}`: {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: fancy_regex::Error,
    },
    #[error("test filter `{pattern}` could not be evaluated against `{name}`: {source}")]
    FilterError {
        pattern: String,
        name: String,
        #[source]
        source: fancy_regex::Error,
    },
    #[error("invalid configuration: {0}")]
    ConfigError(String),
    #[error("failed to marshal junit data: {0}")]
    EncodeError(#[from] quick_xml::Error),
    #[error("error parsing configuration file {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("error writing JSON summary {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("I/O error {0}")]
    IoError(#[from] std::io::Error),
}

/// Why a report file could not be turned into a [`ReportDocument`].
///
/// [`ReportDocument`]: crate::report::ReportDocument
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },
    #[error("content is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("document has no root element")]
    MissingRoot,
    #[error("unexpected root element <{0}>, expected <testsuites>")]
    UnexpectedRoot(String),
    #[error("document ended inside <{0}>")]
    UnexpectedEof(String),
}
