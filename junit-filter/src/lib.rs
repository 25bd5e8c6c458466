// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub mod command;
pub mod commands;
pub mod merge;
pub mod report;
pub mod utils;

pub use crate::merge::config::MergeConfig;
pub use crate::merge::{merge_junit, merge_reports, MergeOutcome, MergeStatus};
pub use crate::report::errors::Error;
