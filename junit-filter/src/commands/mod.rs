pub mod completions;
pub mod merge;

//
// Constants
//
// Application metadata
pub const APP_NAME: &str = "junit-filter";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
// Commands
pub const MERGE: &str = "merge";
pub const COMPLETIONS: &str = "completions";
// Arguments for merge
pub const SOURCE: (&str, char) = ("source", 's');
pub const FILTER: (&str, char) = ("filter", 'f');
pub const OUTPUT: (&str, char) = ("output", 'o');
pub const CONFIG: (&str, char) = ("config", 'c');
pub const ALPHABETICAL: (&str, char) = ("alphabetical", 'a');
pub const LAST_MODIFIED: (&str, char) = ("last-modified", 'm');
pub const KEEP_ORDER: (&str, char) = ("keep-order", 'k');
pub const PRINT_JSON: (&str, char) = ("print-json", 'p');
pub const VERBOSE: (&str, char) = ("verbose", 'v');
// Arguments for completions
pub const SHELL: (&str, char) = ("shell", 's');
pub const LOCATION: (&str, char) = ("location", 'l');

pub const SUCCESS_STATUS_CODE: i32 = 0;
pub const PARTIAL_MERGE_STATUS_CODE: i32 = 2;
pub const ERROR_STATUS_CODE: i32 = 5;
