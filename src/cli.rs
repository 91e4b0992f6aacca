//! CLI mode implementation
//!
//! Argument definitions and the query-syntax layer that resolves filter
//! tokens (`i:IMAGE`, `input:IMAGE`, ...) to registered filters.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::error::AppError;
use crate::search::{NodeFilter, NodeSearchService};

/// nodesearch CLI
#[derive(Parser)]
#[command(name = "nodesearch")]
#[command(about = "Fuzzy search and structured filtering over node-definition catalogs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the catalog JSON file
    #[arg(short = 'C', long, global = true, env = "NODESEARCH_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Emit machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalog with free text and structured filters
    Search(SearchArgs),
    /// List the registered filters
    Filters(FiltersArgs),
    /// Browse a filter's option values by typeahead
    Options(OptionsArgs),
}

/// Search command arguments
#[derive(Parser, Clone, Debug)]
pub struct SearchArgs {
    /// Free-text query; empty selects the whole catalog
    #[arg(default_value = "")]
    pub query: String,

    /// Structured filter as TOKEN:VALUE, where TOKEN is a filter id or
    /// invoke sequence (repeatable; all must match)
    #[arg(short = 'f', long = "filter")]
    pub filters: Vec<String>,

    /// Maximum number of results
    #[arg(short = 'l', long)]
    pub limit: Option<usize>,
}

/// Filters command arguments
#[derive(Parser, Clone, Debug)]
pub struct FiltersArgs {}

/// Options command arguments
#[derive(Parser, Clone, Debug)]
pub struct OptionsArgs {
    /// Filter id or invoke sequence
    pub filter: String,

    /// Typeahead query over the filter's option values
    #[arg(default_value = "")]
    pub query: String,
}

/// Split a `TOKEN:VALUE` filter argument
pub fn parse_filter_arg(raw: &str) -> Result<(&str, &str), AppError> {
    match raw.split_once(':') {
        Some((token, value)) if !token.is_empty() && !value.is_empty() => Ok((token, value)),
        _ => Err(AppError::InvalidInput(format!(
            "Filter must be TOKEN:VALUE, got '{}'",
            raw
        ))),
    }
}

/// Resolve a filter token against ids and invoke sequences
pub fn resolve_filter<'a>(
    service: &'a NodeSearchService,
    token: &str,
) -> Result<&'a dyn NodeFilter, AppError> {
    if let Some(filter) = service.filter_by_id(token) {
        return Ok(filter);
    }

    service
        .filters()
        .iter()
        .find(|filter| filter.invoke_sequence() == token || filter.long_invoke_sequence() == token)
        .map(|filter| filter.as_ref())
        .ok_or_else(|| {
            let known: Vec<&str> = service.filters().iter().map(|f| f.id()).collect();
            AppError::NotFound(format!(
                "Unknown filter '{}' (known: {})",
                token,
                known.join(", ")
            ))
        })
}
