//! Behavioral tests for the search service across modules
//!
//! These pin down the composition laws the CLI and any embedding UI rely
//! on: empty-query semantics, ranked-then-filtered-then-truncated result
//! construction, and fail-soft handling of malformed catalog entries.

use crate::catalog::defs::NodeDefinition;
use crate::search::{NodeSearchService, SearchOptions};

fn names<'a>(results: &[&'a NodeDefinition]) -> Vec<&'a str> {
    results.iter().map(|node| node.name.as_str()).collect()
}

fn image_catalog() -> Vec<NodeDefinition> {
    serde_json::from_str(
        r#"[
            {"name": "LoadImage", "category": "image",
             "inputs": {"required": {"image": ["STRING", {}]}},
             "outputs": ["IMAGE"], "output_names": ["image"],
             "output_is_list": [false]},
            {"name": "SaveImage", "category": "image",
             "inputs": {"required": {"images": ["IMAGE", {}]}},
             "outputs": [], "output_names": [], "output_is_list": []}
        ]"#,
    )
    .unwrap()
}

// The worked example from the service's documentation: free text finds
// LoadImage, category keeps both in catalog order, output narrows to the
// producer.
#[test]
fn test_two_node_catalog_walkthrough() {
    let service = NodeSearchService::new(image_catalog()).unwrap();

    let by_text = service.search_nodes("load", &[], &SearchOptions::default());
    assert_eq!(names(&by_text), vec!["LoadImage"]);

    let category = service.filter_by_id("category").unwrap();
    let by_category = service.search_nodes("", &[(category, "image")], &SearchOptions::default());
    assert_eq!(names(&by_category), vec!["LoadImage", "SaveImage"]);

    let output = service.filter_by_id("output").unwrap();
    let by_output = service.search_nodes("", &[(output, "IMAGE")], &SearchOptions::default());
    assert_eq!(names(&by_output), vec!["LoadImage"]);
}

#[test]
fn test_filter_predicate_is_independent_of_text_score() {
    let service = NodeSearchService::new(image_catalog()).unwrap();
    let output = service.filter_by_id("output").unwrap();

    // With a query, ordering comes from match quality; with an empty
    // query it is catalog order. The filter keeps the same nodes either
    // way.
    let with_query = service.search_nodes("image", &[(output, "IMAGE")], &SearchOptions::default());
    let without_query = service.search_nodes("", &[(output, "IMAGE")], &SearchOptions::default());
    assert_eq!(names(&with_query), names(&without_query));
}

#[test]
fn test_truncation_law_holds_under_filters() {
    let catalog: Vec<NodeDefinition> = serde_json::from_str(
        r#"[
            {"name": "ImageBlend", "category": "image", "outputs": ["IMAGE"],
             "output_names": ["image"], "output_is_list": [false]},
            {"name": "ImageCrop", "category": "image", "outputs": ["IMAGE"],
             "output_names": ["image"], "output_is_list": [false]},
            {"name": "ImageInvert", "category": "image", "outputs": ["IMAGE"],
             "output_names": ["image"], "output_is_list": [false]},
            {"name": "LatentCrop", "category": "latent", "outputs": ["LATENT"],
             "output_names": ["latent"], "output_is_list": [false]}
        ]"#,
    )
    .unwrap();
    let service = NodeSearchService::new(catalog).unwrap();
    let output = service.filter_by_id("output").unwrap();
    let filters = [(output, "IMAGE")];

    let full = service.search_nodes("image", &filters, &SearchOptions::default());
    assert!(full.len() >= 2);

    for k in 0..=full.len() {
        let capped = service.search_nodes("image", &filters, &SearchOptions::with_limit(k));
        assert_eq!(names(&capped), names(&full[..k]), "limit {}", k);
    }
}

#[test]
fn test_no_match_above_threshold_leaks_through() {
    let service = NodeSearchService::new(image_catalog()).unwrap();
    // Nothing in the catalog resembles this
    let results = service.search_nodes("qzwxv", &[], &SearchOptions::default());
    assert!(results.is_empty());
}

#[test]
fn test_malformed_outputs_never_break_search() {
    let catalog: Vec<NodeDefinition> = serde_json::from_str(
        r#"[
            {"name": "Healthy", "category": "image", "outputs": ["IMAGE"],
             "output_names": ["image"], "output_is_list": [false]},
            {"name": "Broken", "category": "image", "outputs": "IMAGE"}
        ]"#,
    )
    .unwrap();
    let service = NodeSearchService::new(catalog).unwrap();

    // The broken entry stays text-searchable
    let by_text = service.search_nodes("broken", &[], &SearchOptions::default());
    assert_eq!(names(&by_text), vec!["Broken"]);

    // but never matches an output filter
    let output = service.filter_by_id("output").unwrap();
    let by_output = service.search_nodes("", &[(output, "IMAGE")], &SearchOptions::default());
    assert_eq!(names(&by_output), vec!["Healthy"]);
}

#[test]
fn test_filter_matching_is_exact_membership() {
    let service = NodeSearchService::new(image_catalog()).unwrap();
    let output = service.filter_by_id("output").unwrap();

    // The committed value must equal a declared option byte for byte;
    // near misses that the picker would suggest do not match.
    let lowercase = service.search_nodes("", &[(output, "image")], &SearchOptions::default());
    assert!(lowercase.is_empty());
    let truncated = service.search_nodes("", &[(output, "IMAG")], &SearchOptions::default());
    assert!(truncated.is_empty());
}

#[test]
fn test_concurrent_reads() {
    use std::sync::Arc;

    let service = Arc::new(NodeSearchService::new(image_catalog()).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let service = Arc::clone(&service);
            std::thread::spawn(move || {
                let query = if i % 2 == 0 { "load" } else { "save" };
                let results = service.search_nodes(query, &[], &SearchOptions::default());
                assert_eq!(results.len(), 1);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
