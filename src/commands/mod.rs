//! CLI command implementations

pub mod filters;
pub mod options;
pub mod search;

#[cfg(test)]
mod cli_integration_tests;
