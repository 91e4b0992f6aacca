//! Filters command implementation

use serde_json::json;

use crate::error::AppError;
use crate::search::NodeSearchService;

/// Execute the `filters` command: list the registered filters
pub fn execute_filters(service: &NodeSearchService, json_output: bool) -> Result<String, AppError> {
    if json_output {
        let listing: Vec<serde_json::Value> = service
            .filters()
            .iter()
            .map(|filter| {
                json!({
                    "id": filter.id(),
                    "name": filter.name(),
                    "invoke_sequence": filter.invoke_sequence(),
                    "long_invoke_sequence": filter.long_invoke_sequence(),
                    "option_count": filter.options_index().len(),
                })
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&listing)?);
    }

    let mut output = format!("Registered filters ({}):\n", service.filters().len());
    for filter in service.filters() {
        output.push_str(&format!(
            "  {:<10} {:<12} {}: / {}:  ({} options)\n",
            filter.id(),
            filter.name(),
            filter.invoke_sequence(),
            filter.long_invoke_sequence(),
            filter.options_index().len(),
        ));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::defs::NodeDefinition;

    fn service() -> NodeSearchService {
        let defs: Vec<NodeDefinition> = serde_json::from_str(
            r#"[{"name": "LoadImage", "category": "image",
                 "outputs": ["IMAGE"], "output_names": ["image"],
                 "output_is_list": [false], "source_module": "nodes"}]"#,
        )
        .unwrap();
        NodeSearchService::new(defs).unwrap()
    }

    #[test]
    fn test_filters_listing() {
        let output = execute_filters(&service(), false).unwrap();
        assert!(output.contains("Registered filters (4):"));
        assert!(output.contains("input"));
        assert!(output.contains("output"));
        assert!(output.contains("category"));
        assert!(output.contains("source"));
    }

    #[test]
    fn test_filters_listing_json() {
        let output = execute_filters(&service(), true).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[0]["id"], "input");
        assert_eq!(parsed[1]["invoke_sequence"], "o");
    }
}
