use crate::command::Command;
use crate::commands::{self, APP_NAME, APP_VERSION};

pub mod writer;

pub fn get_commands() -> Vec<Box<dyn Command>> {
    vec![
        Box::new(commands::merge::Merge::new()),
        Box::new(commands::completions::Completions::new()),
    ]
}

/// The top level clap command with every subcommand registered.
pub fn build_app() -> clap::Command {
    let app = clap::Command::new(APP_NAME)
        .version(APP_VERSION)
        .about(
            r#"
  Merges the JUnit XML reports written by parallel or sharded test runs into a
  single report. Test cases are filtered by name, and a test that was skipped
  in one shard but executed in another is reported once, as executed. The
  original reports are removed once the merged report has been written and
  every source directory could be read."#,
        )
        .arg_required_else_help(true);

    get_commands()
        .iter()
        .fold(app, |app, each| app.subcommand(each.command()))
}
