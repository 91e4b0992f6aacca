//! Integration tests for CLI command execution
//!
//! Exercise the execute_* functions end to end: catalog file on disk,
//! loader, service construction, command output.

#[cfg(test)]
mod cli_integration_tests {
    use std::io::Write;

    use crate::catalog::loader::load_catalog;
    use crate::cli::{OptionsArgs, SearchArgs};
    use crate::commands::filters::execute_filters;
    use crate::commands::options::execute_options;
    use crate::commands::search::execute_search;
    use crate::search::NodeSearchService;

    const CATALOG_JSON: &str = r#"[
        {"name": "LoadImage", "display_name": "Load Image",
         "category": "image", "description": "Load an image from disk",
         "inputs": {"required": {"path": ["STRING", {}]}},
         "outputs": ["IMAGE"], "output_names": ["image"],
         "output_is_list": [false], "source_module": "nodes"},
        {"name": "SaveImage", "display_name": "Save Image",
         "category": "image", "description": "Write an image to disk",
         "inputs": {"required": {"images": ["IMAGE", {}]}},
         "outputs": [], "output_names": [], "output_is_list": [],
         "source_module": "custom_nodes.image-toolkit"}
    ]"#;

    fn service_from_disk() -> NodeSearchService {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG_JSON.as_bytes()).unwrap();
        let defs = load_catalog(file.path()).unwrap();
        NodeSearchService::new(defs).unwrap()
    }

    fn search_args(query: &str, filters: &[&str], limit: Option<usize>) -> SearchArgs {
        SearchArgs {
            query: query.to_string(),
            filters: filters.iter().map(|s| s.to_string()).collect(),
            limit,
        }
    }

    #[test]
    fn test_execute_search_free_text() {
        let service = service_from_disk();
        let output = execute_search(&service, &search_args("load", &[], None), false).unwrap();

        assert!(output.contains("LoadImage"), "should surface the match");
        assert!(output.contains("**Load**"), "should highlight the term");
        assert!(!output.contains("SaveImage"));
    }

    #[test]
    fn test_execute_search_with_filter_token() {
        let service = service_from_disk();
        let output =
            execute_search(&service, &search_args("", &["o:IMAGE"], None), false).unwrap();

        assert!(output.contains("LoadImage"));
        assert!(!output.contains("SaveImage"));
    }

    #[test]
    fn test_execute_search_filter_conjunction_narrows() {
        let service = service_from_disk();
        let output = execute_search(
            &service,
            &search_args("", &["c:image", "s:image-toolkit"], None),
            false,
        )
        .unwrap();

        assert!(output.contains("SaveImage"));
        assert!(!output.contains("LoadImage"));
    }

    #[test]
    fn test_execute_search_includes_builtins() {
        let service = service_from_disk();
        let output =
            execute_search(&service, &search_args("", &["c:utils"], None), false).unwrap();

        assert!(output.contains("PrimitiveNode"));
        assert!(output.contains("Reroute"));
        assert!(output.contains("Note"));
    }

    #[test]
    fn test_execute_search_json_output() {
        let service = service_from_disk();
        let output = execute_search(&service, &search_args("load", &[], None), true).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["name"], "LoadImage");
    }

    #[test]
    fn test_execute_search_bad_filter_argument() {
        let service = service_from_disk();
        let err =
            execute_search(&service, &search_args("", &["no-delimiter"], None), false).unwrap_err();
        assert_eq!(err.error_code(), "invalid_input");
    }

    #[test]
    fn test_execute_filters_lists_source() {
        let service = service_from_disk();
        let output = execute_filters(&service, false).unwrap();
        assert!(output.contains("source"));
    }

    #[test]
    fn test_execute_options_picker() {
        let service = service_from_disk();
        let args = OptionsArgs {
            filter: "source".to_string(),
            query: String::new(),
        };
        let output = execute_options(&service, &args, false).unwrap();

        assert!(output.contains("Core"));
        assert!(output.contains("image-toolkit"));
    }
}
