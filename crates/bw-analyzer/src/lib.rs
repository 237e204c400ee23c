//! burstwatch analyzer — library crate behind the `bw-analyzer` binary.
//!
//! Re-exports all modules so external crates (e.g. `bw-e2e-tests`) can drive
//! a full run against a mock log source.

pub mod config;
pub mod report;
pub mod runner;
