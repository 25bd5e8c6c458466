// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::process::exit;

use clap::ArgMatches;
use junit_filter::commands::{PRINT_JSON, VERBOSE};
use junit_filter::utils::writer::WriteBuffer::{Stderr, Stdout};
use junit_filter::utils::writer::Writer;
use junit_filter::utils::{build_app, get_commands};
use log::LevelFilter;
use simple_logger::SimpleLogger;

fn main() {
    let commands = get_commands();
    let mappings = commands.iter().map(|s| (s.name(), s)).fold(
        HashMap::with_capacity(commands.len()),
        |mut map, entry| {
            map.insert(entry.0, entry.1.as_ref());
            map
        },
    );

    let mut app = build_app();
    let help = app.render_usage();
    let app = app.get_matches();

    match app.subcommand() {
        Some((name, value)) => {
            if let Some(command) = mappings.get(name) {
                init_logging(value);
                let mut output_writer =
                    Writer::new(Stdout(std::io::stdout()), Stderr(std::io::stderr()));

                match (*command).execute(value, &mut output_writer) {
                    Err(e) => {
                        output_writer
                            .write_err(format!("Error occurred {e}"))
                            .expect("failed to write to stderr");

                        exit(-1);
                    }
                    Ok(code) => exit(code),
                }
            } else {
                println!("{help}");
            }
        }
        None => {
            println!("{help}");
        }
    }
}

// The JSON summary goes to stdout, which the logger shares.
fn init_logging(args: &ArgMatches) {
    let flag = |id: &str| matches!(args.try_get_one::<bool>(id), Ok(Some(true)));
    let level = if flag(PRINT_JSON.0) {
        LevelFilter::Off
    } else if flag(VERBOSE.0) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("failed to initialise logging: {e}");
    }
}
