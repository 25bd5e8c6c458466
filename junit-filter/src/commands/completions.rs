use std::fs::File;
use std::io::Write;
use std::path::Path;

use clap::{value_parser, Arg, ArgAction, ArgMatches, ValueEnum};

use crate::command::Command;
use crate::commands::{APP_NAME, COMPLETIONS, LOCATION, SHELL, SUCCESS_STATUS_CODE};
use crate::report::errors::Error;
use crate::report::Result;
use crate::utils::writer::Writer;

#[derive(Copy, Clone, ValueEnum, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Completions {}

#[allow(clippy::new_without_default)]
impl Completions {
    pub fn new() -> Self {
        Completions {}
    }
}

impl Command for Completions {
    fn name(&self) -> &'static str {
        COMPLETIONS
    }

    fn command(&self) -> clap::Command {
        clap::Command::new(COMPLETIONS)
            .about("Generates a shell completions script for junit-filter")
            .arg(
                Arg::new(SHELL.0)
                    .long(SHELL.0)
                    .short(SHELL.1)
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(Shell))
                    .required(true)
                    .help("the shell you are currently running"),
            )
            .arg(
                Arg::new(LOCATION.0)
                    .long(LOCATION.0)
                    .short(LOCATION.1)
                    .action(ArgAction::Set)
                    .help("the directory the completions script is written to, if no value is present the script will be written to stdout"),
            )
    }

    fn execute(&self, args: &ArgMatches, writer: &mut Writer) -> Result<i32> {
        let shell = args
            .get_one::<Shell>(SHELL.0)
            .copied()
            .ok_or_else(|| Error::ConfigError(String::from("no shell given")))?;

        let mut output: Box<dyn Write + '_> = match args.get_one::<String>(LOCATION.0) {
            Some(location) => {
                let path = Path::new(location);
                if !path.is_dir() {
                    return Err(Error::ConfigError(format!(
                        "completions location `{location}` is not a directory"
                    )));
                }
                Box::new(File::create(path.join(format!("{APP_NAME}.sh")))?)
            }
            None => Box::new(&mut *writer),
        };

        let mut app = crate::utils::build_app();
        match shell {
            Shell::Bash => {
                clap_complete::generate(clap_complete::shells::Bash, &mut app, APP_NAME, &mut output)
            }
            Shell::Zsh => {
                clap_complete::generate(clap_complete::shells::Zsh, &mut app, APP_NAME, &mut output)
            }
            Shell::Fish => {
                clap_complete::generate(clap_complete::shells::Fish, &mut app, APP_NAME, &mut output)
            }
            Shell::PowerShell => clap_complete::generate(
                clap_complete::shells::PowerShell,
                &mut app,
                APP_NAME,
                &mut output,
            ),
        }

        Ok(SUCCESS_STATUS_CODE)
    }
}
