//! nodesearch CLI (Rust)
//!
//! Loads a node-definition catalog from JSON, builds an in-memory search
//! service over it, and answers interactive queries:
//! - `search(query, filters)` - fuzzy free-text search with conjunctive
//!   structured filtering
//! - `filters()` - list the registered structured filters
//! - `options(filter, query)` - typeahead over a filter's option values

mod catalog;
mod cli;
mod commands;
mod error;
mod search;

#[cfg(test)]
mod tests_search_service;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use error::AppError;
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    match run(cli) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

fn run(cli: Cli) -> Result<String, AppError> {
    let path = cli.catalog.ok_or_else(|| {
        AppError::InvalidInput(
            "No catalog supplied; use --catalog or NODESEARCH_CATALOG".to_string(),
        )
    })?;

    let defs = catalog::load_catalog(&path)?;
    debug!(count = defs.len(), "Catalog loaded");

    let service = search::NodeSearchService::new(defs)?;

    match cli.command {
        Commands::Search(args) => commands::search::execute_search(&service, &args, cli.json),
        Commands::Filters(_) => commands::filters::execute_filters(&service, cli.json),
        Commands::Options(args) => commands::options::execute_options(&service, &args, cli.json),
    }
}

/// Map AppError to exit code
fn get_exit_code(err: &AppError) -> i32 {
    match err {
        AppError::InvalidInput(_) => 1,
        AppError::CatalogLoadFailed(_) => 2,
        AppError::NotFound(_) => 3,
        AppError::Internal(_) => 5,
    }
}
