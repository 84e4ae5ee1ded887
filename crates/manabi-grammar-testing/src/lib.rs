//! Testing infrastructure for manabi-grammar integration tests.
//!
//! This crate provides utilities for writing integration tests:
//! - `TestWorld`: isolated source tree + database + CLI runner
//! - `assertions`: checks on `entry` command JSON output
//! - `fixtures`: the sample grammar tree (が and は)

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use world::{CliResult, TestWorld};
