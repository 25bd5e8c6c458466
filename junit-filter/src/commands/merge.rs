use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Arg, ArgAction, ArgMatches};
use colored::{ColoredString, Colorize};

use crate::command::Command;
use crate::commands::{
    ALPHABETICAL, CONFIG, ERROR_STATUS_CODE, FILTER, KEEP_ORDER, LAST_MODIFIED, MERGE, OUTPUT,
    PARTIAL_MERGE_STATUS_CODE, PRINT_JSON, SOURCE, SUCCESS_STATUS_CODE, VERBOSE,
};
use crate::merge::config::{MergeConfig, DEFAULT_FILTER};
use crate::merge::scan::{ScanOrder, RESERVED_OUTPUT_NAME};
use crate::merge::{merge_reports, CleanupStatus, MergeOutcome, MergeStatus};
use crate::report::errors::Error;
use crate::report::Result;
use crate::utils::writer::Writer;

#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Merge {}

#[allow(clippy::new_without_default)]
impl Merge {
    pub fn new() -> Self {
        Merge {}
    }
}

impl Command for Merge {
    fn name(&self) -> &'static str {
        MERGE
    }

    fn command(&self) -> clap::Command {
        clap::Command::new(MERGE)
            .about(format!(
                r#"Merges every JUnit XML file found in the source directories into one report.
Only files ending in .xml directly inside each directory are read; a previous merge
output named {RESERVED_OUTPUT_NAME} is ignored. The original files are removed
once the merged report is written, unless a source directory could not be read.
"#
            ))
            .arg(
                Arg::new(SOURCE.0)
                    .long(SOURCE.0)
                    .short(SOURCE.1)
                    .action(ArgAction::Append)
                    .required_unless_present(CONFIG.0)
                    .conflicts_with(CONFIG.0)
                    .help("Provide a directory of JUnit XML files. Supports passing multiple values by using this option repeatedly.\
                          \nExample:\n --source ./shard-1 --source ./shard-2"),
            )
            .arg(
                Arg::new(FILTER.0)
                    .long(FILTER.0)
                    .short(FILTER.1)
                    .action(ArgAction::Set)
                    .default_value(DEFAULT_FILTER)
                    .conflicts_with(CONFIG.0)
                    .help("Regular expression a test case name must contain a match for to be kept"),
            )
            .arg(
                Arg::new(OUTPUT.0)
                    .long(OUTPUT.0)
                    .short(OUTPUT.1)
                    .action(ArgAction::Set)
                    .required_unless_present(CONFIG.0)
                    .conflicts_with(CONFIG.0)
                    .help("Write the merged report to this file, replacing it if it exists"),
            )
            .arg(
                Arg::new(CONFIG.0)
                    .long(CONFIG.0)
                    .short(CONFIG.1)
                    .action(ArgAction::Set)
                    .help("Read sources, filter, output and ordering from a YAML or JSON file"),
            )
            .arg(
                Arg::new(ALPHABETICAL.0)
                    .long(ALPHABETICAL.0)
                    .short(ALPHABETICAL.1)
                    .action(ArgAction::SetTrue)
                    .conflicts_with(CONFIG.0)
                    .help("Read files in a directory ordered alphabetically"),
            )
            .arg(
                Arg::new(LAST_MODIFIED.0)
                    .long(LAST_MODIFIED.0)
                    .short(LAST_MODIFIED.1)
                    .action(ArgAction::SetTrue)
                    .conflicts_with_all([ALPHABETICAL.0, CONFIG.0])
                    .help("Read files in a directory ordered by last modified times"),
            )
            .arg(
                Arg::new(KEEP_ORDER.0)
                    .long(KEEP_ORDER.0)
                    .short(KEEP_ORDER.1)
                    .action(ArgAction::SetTrue)
                    .conflicts_with(CONFIG.0)
                    .help("Write test cases in the order they were first seen instead of sorted by name"),
            )
            .arg(
                Arg::new(PRINT_JSON.0)
                    .long(PRINT_JSON.0)
                    .short(PRINT_JSON.1)
                    .action(ArgAction::SetTrue)
                    .help("Print the merge summary in JSON format"),
            )
            .arg(
                Arg::new(VERBOSE.0)
                    .long(VERBOSE.0)
                    .short(VERBOSE.1)
                    .action(ArgAction::SetTrue)
                    .help("Verbose logging"),
            )
            .arg_required_else_help(true)
    }

    fn execute(&self, args: &ArgMatches, writer: &mut Writer) -> Result<i32> {
        let config = match args.get_one::<String>(CONFIG.0) {
            Some(file) => MergeConfig::from_file(Path::new(file)),
            None => config_from_args(args),
        };

        let outcome = match config.and_then(|config| merge_reports(&config)) {
            Ok(outcome) => outcome,
            Err(e) => {
                writer.write_err(format!(
                    "Merge aborted, no report written and no files removed: {e}"
                ))?;
                return Ok(ERROR_STATUS_CODE);
            }
        };

        match args.get_flag(PRINT_JSON.0) {
            true => {
                serde_json::to_writer_pretty(&mut *writer, &outcome)?;
                writeln!(writer)?;
            }
            false => print_summary(&outcome, writer)?,
        }

        if let Some(message) = outcome.partial_merge_message() {
            writer.write_err(message)?;
        }

        Ok(match outcome.status() {
            MergeStatus::Success => SUCCESS_STATUS_CODE,
            MergeStatus::PartialSuccess => PARTIAL_MERGE_STATUS_CODE,
        })
    }
}

fn config_from_args(args: &ArgMatches) -> Result<MergeConfig> {
    let sources = args
        .get_many::<String>(SOURCE.0)
        .map(|values| values.map(PathBuf::from).collect::<Vec<PathBuf>>())
        .unwrap_or_default();
    let destination = args
        .get_one::<String>(OUTPUT.0)
        .map(PathBuf::from)
        .ok_or_else(|| Error::ConfigError(String::from("no output file given")))?;
    let filter = args
        .get_one::<String>(FILTER.0)
        .map_or(DEFAULT_FILTER, String::as_str);

    let mut config = MergeConfig::new(filter, &sources, &destination);
    config.order = if args.get_flag(LAST_MODIFIED.0) {
        ScanOrder::LastModified
    } else if args.get_flag(ALPHABETICAL.0) {
        ScanOrder::Alphabetical
    } else {
        ScanOrder::Listing
    };
    config.keep_encounter_order = args.get_flag(KEEP_ORDER.0);
    config.validate()?;

    Ok(config)
}

fn print_summary(outcome: &MergeOutcome, writer: &mut Writer) -> Result<()> {
    writeln!(
        writer,
        "{} merged {} test cases from {} files into {}",
        colored_status(outcome.status()),
        outcome.cases_written,
        outcome.files_merged.len(),
        outcome.destination.display()
    )?;

    match &outcome.cleanup {
        CleanupStatus::Performed { removed } => {
            writeln!(writer, "Removed {} original files", removed.len())?
        }
        CleanupStatus::SkippedAfterScanErrors => writeln!(
            writer,
            "Kept original files, not every source directory could be read"
        )?,
    }

    Ok(())
}

fn colored_status(status: MergeStatus) -> ColoredString {
    match status {
        MergeStatus::Success => status.to_string().green(),
        MergeStatus::PartialSuccess => status.to_string().yellow(),
    }
}
