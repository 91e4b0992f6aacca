//! Options command implementation
//!
//! The filter-picker collaborator: given a filter token and a partial
//! value, surfaces the filter's option universe by typeahead.

use crate::cli::{resolve_filter, OptionsArgs};
use crate::error::{validate_query, AppError};
use crate::search::SearchOptions;
use crate::search::NodeSearchService;

/// Execute the `options` command
pub fn execute_options(
    service: &NodeSearchService,
    args: &OptionsArgs,
    json: bool,
) -> Result<String, AppError> {
    validate_query(&args.query)?;
    let filter = resolve_filter(service, &args.filter)?;

    let values = filter
        .options_index()
        .search(&args.query, &SearchOptions::default());

    if json {
        return Ok(serde_json::to_string_pretty(&values)?);
    }

    if values.is_empty() {
        return Ok(format!(
            "No {} options match \"{}\"",
            filter.name(),
            args.query
        ));
    }

    let mut output = format!("{} options ({}):\n", filter.name(), values.len());
    for value in values {
        output.push_str(&format!("  {}\n", value));
    }

    Ok(output)
}
