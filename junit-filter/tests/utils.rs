// Copyright Amazon Web Services, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use junit_filter::utils;
use junit_filter::utils::writer::WriteBuffer::Vec as WBVec;
use junit_filter::utils::writer::Writer;

#[non_exhaustive]
pub struct StatusCode;

const JUNIT_FILTER_TEST_APP_NAME: &str = "junit-filter-test";

#[allow(dead_code)]
impl StatusCode {
    pub const SUCCESS: i32 = 0;
    pub const INTERNAL_FAILURE: i32 = -1;
    pub const PREPROCESSOR_ERROR: i32 = -3;
    pub const PARTIAL_MERGE: i32 = 2;
    pub const MERGE_ABORTED: i32 = 5;
}

pub fn get_full_path_for_resource_file(path: &str) -> PathBuf {
    let mut resource = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    resource.push(path);
    resource
}

#[allow(dead_code)]
pub fn read_from_resource_file(path: &str) -> String {
    fs::read_to_string(get_full_path_for_resource_file(path)).unwrap()
}

/// Copies a resource file into `dir`, keeping its file name, and returns the
/// copy. Merges remove their sources, so tests never point at `resources/`
/// directly.
pub fn stage(resource: &str, dir: &Path) -> PathBuf {
    let source = get_full_path_for_resource_file(resource);
    let target = dir.join(source.file_name().unwrap());
    fs::copy(&source, &target).unwrap();
    target
}

/// Writes `content` as `name` into `dir`.
#[allow(dead_code)]
pub fn stage_content(dir: &Path, name: &str, content: &str) -> PathBuf {
    let target = dir.join(name);
    fs::write(&target, content).unwrap();
    target
}

pub fn new_writer() -> Writer {
    Writer::new(WBVec(vec![]), WBVec(vec![]))
}

pub trait CommandTestRunner {
    fn build_args(&self) -> Vec<String>;

    fn run(&self, writer: &mut Writer) -> i32 {
        let args = self.build_args();

        let command_options =
            args.iter()
                .fold(vec![String::from(JUNIT_FILTER_TEST_APP_NAME)], |mut res, arg| {
                    res.push(arg.to_string());
                    res
                });

        let commands = utils::get_commands();

        let mappings = commands.iter().map(|s| (s.name(), s)).fold(
            HashMap::with_capacity(commands.len()),
            |mut map, entry| {
                map.insert(entry.0, entry.1.as_ref());
                map
            },
        );

        let app = utils::build_app().get_matches_from(command_options);

        match app.subcommand() {
            Some((name, value)) => {
                if let Some(command) = mappings.get(name) {
                    match (*command).execute(value, writer) {
                        Err(e) => {
                            writer
                                .write_err(format!("Error occurred {e}"))
                                .expect("failed to write to stderr");

                            StatusCode::INTERNAL_FAILURE
                        }
                        Ok(code) => code,
                    }
                } else {
                    StatusCode::PREPROCESSOR_ERROR
                }
            }

            None => StatusCode::PREPROCESSOR_ERROR,
        }
    }
}

#[macro_export]
macro_rules! assert_output_from_file_eq {
    ($expected_output_relative_file_path: expr, $actual_output_path: expr) => {
        pretty_assertions::assert_eq!(
            $crate::utils::read_from_resource_file($expected_output_relative_file_path),
            std::fs::read_to_string($actual_output_path).unwrap()
        )
    };
}
