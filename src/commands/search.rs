//! Search command implementation

use tracing::info;
use unicode_segmentation::UnicodeSegmentation;

use crate::cli::{parse_filter_arg, resolve_filter, SearchArgs};
use crate::error::{validate_query, AppError};
use crate::search::service::FILTER_START_SEQUENCE;
use crate::search::{FilterAndValue, NodeSearchService, SearchOptions};

/// Execute the `search` command, returning rendered output
pub fn execute_search(
    service: &NodeSearchService,
    args: &SearchArgs,
    json: bool,
) -> Result<String, AppError> {
    validate_query(&args.query)?;

    if service.ends_with_filter_start_sequence(&args.query) {
        info!(
            "Query ends with '{}'; structured filters are applied with -f TOKEN:VALUE",
            FILTER_START_SEQUENCE
        );
    }

    let mut resolved: Vec<FilterAndValue<'_>> = Vec::with_capacity(args.filters.len());
    for raw in &args.filters {
        let (token, value) = parse_filter_arg(raw)?;
        resolved.push((resolve_filter(service, token)?, value));
    }

    let options = SearchOptions { limit: args.limit };
    let results = service.search_nodes(&args.query, &resolved, &options);

    if json {
        return Ok(serde_json::to_string_pretty(&results)?);
    }

    Ok(format_search_results(&results, &args.query))
}

/// Format search results for terminal display
pub fn format_search_results(
    results: &[&crate::catalog::defs::NodeDefinition],
    query: &str,
) -> String {
    if results.is_empty() {
        return format!("No nodes found for \"{}\"", query);
    }

    let mut output = format!("Found {} node(s) for \"{}\":\n", results.len(), query);
    for (rank, node) in results.iter().enumerate() {
        let shown_name = if node.display_name.is_empty() {
            &node.name
        } else {
            &node.display_name
        };
        output.push_str(&format!(
            "\n{}. {} ({}) [{}]\n",
            rank + 1,
            highlight(shown_name, query),
            node.name,
            node.category,
        ));
        if !node.description.is_empty() {
            output.push_str(&format!("   {}\n", highlight(&node.description, query)));
        }
    }

    output
}

/// Wrap query-term occurrences in **bold**, merging adjacent and
/// overlapping match ranges.
fn highlight(text: &str, query: &str) -> String {
    if query.is_empty() {
        return text.to_string();
    }

    let lower = text.to_lowercase();
    // Lowercasing can shift byte offsets for some scripts; highlighting is
    // cosmetic, so skip it rather than risk slicing mid-character.
    if lower.len() != text.len() {
        return text.to_string();
    }

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for term in query.unicode_words() {
        let term_l = term.to_lowercase();
        if term_l.is_empty() || term_l.len() != term.len() {
            continue;
        }
        let mut idx = 0usize;
        while let Some(pos) = lower[idx..].find(&term_l) {
            let abs = idx + pos;
            ranges.push((abs, abs + term.len()));
            idx = abs + term.len();
        }
    }

    if ranges.is_empty() {
        return text.to_string();
    }

    ranges.sort_by_key(|r| r.0);
    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (start, end) in ranges {
        match merged.last_mut() {
            Some(last) if start <= last.1 => {
                if end > last.1 {
                    last.1 = end;
                }
            }
            _ => merged.push((start, end)),
        }
    }

    let mut result = String::new();
    let mut last_idx = 0usize;
    for (start, end) in merged {
        if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            continue;
        }
        if last_idx < start {
            result.push_str(&text[last_idx..start]);
        }
        result.push_str("**");
        result.push_str(&text[start..end]);
        result.push_str("**");
        last_idx = end;
    }
    result.push_str(&text[last_idx..]);

    result
}
