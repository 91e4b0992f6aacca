//! Structured attribute filters over node definitions
//!
//! Each filter extracts a set of option values from a node (input types,
//! output types, category, source) and carries its own fuzzy index over
//! the de-duplicated option universe of the whole catalog, so the option
//! values themselves are discoverable by typeahead. Filter predicates are
//! exact membership checks; fuzziness applies only to discovering option
//! values, never to evaluating a chosen filter against a node.

use std::collections::HashSet;
use tracing::error;

use crate::catalog::defs::NodeDefinition;
use crate::catalog::source::NodeSource;
use crate::search::fuzzy::{FuzzyIndex, FuzzyIndexConfig};

/// An active filter paired with the option value it must match
pub type FilterAndValue<'a> = (&'a dyn NodeFilter, &'a str);

/// A structured filter over node definitions.
///
/// `node_options` must be pure: the option index is built once over the
/// union of every node's extraction and never recomputed per query.
/// Filters are shared across threads by the service, hence the bounds.
pub trait NodeFilter: Send + Sync + std::fmt::Debug {
    /// Unique key for lookup among registered filters
    fn id(&self) -> &'static str;

    /// Display label
    fn name(&self) -> &'static str;

    /// Short token an external query-syntax layer uses to select this
    /// filter (e.g. the `i` in `i:`)
    fn invoke_sequence(&self) -> &'static str;

    /// Long form of the invocation token (e.g. `input`)
    fn long_invoke_sequence(&self) -> &'static str;

    /// Extract this filter's option values from one node
    fn node_options(&self, node: &NodeDefinition) -> Vec<String>;

    /// Fuzzy index over the catalog-wide option universe
    fn options_index(&self) -> &FuzzyIndex<String>;

    /// Whether `node` matches the chosen option `value`.
    ///
    /// Default semantics is membership in `node_options(node)`; concrete
    /// filters must not deviate without documenting the deviation.
    fn matches(&self, node: &NodeDefinition, value: &str) -> bool {
        self.node_options(node).iter().any(|option| option == value)
    }
}

/// De-duplicated union of option values across the catalog, first-seen
/// order, wrapped in a fuzzy index.
fn build_options_index(
    catalog: &[NodeDefinition],
    config: FuzzyIndexConfig,
    extract: impl Fn(&NodeDefinition) -> Vec<String>,
) -> FuzzyIndex<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut universe = Vec::new();

    for node in catalog {
        for option in extract(node) {
            if seen.insert(option.clone()) {
                universe.push(option);
            }
        }
    }

    FuzzyIndex::new(universe, |option| vec![option.clone()], config)
}

/// Filters by the type tag of any declared input (required or optional)
#[derive(Debug)]
pub struct InputTypeFilter {
    options: FuzzyIndex<String>,
}

impl InputTypeFilter {
    pub fn new(catalog: &[NodeDefinition], config: FuzzyIndexConfig) -> Self {
        Self {
            options: build_options_index(catalog, config, Self::extract),
        }
    }

    fn extract(node: &NodeDefinition) -> Vec<String> {
        node.inputs
            .iter_all()
            .map(|(_, decl)| decl.descriptor().tag().to_string())
            .collect()
    }
}

impl NodeFilter for InputTypeFilter {
    fn id(&self) -> &'static str {
        "input"
    }

    fn name(&self) -> &'static str {
        "Input Type"
    }

    fn invoke_sequence(&self) -> &'static str {
        "i"
    }

    fn long_invoke_sequence(&self) -> &'static str {
        "input"
    }

    fn node_options(&self, node: &NodeDefinition) -> Vec<String> {
        Self::extract(node)
    }

    fn options_index(&self) -> &FuzzyIndex<String> {
        &self.options
    }
}

/// Filters by the type tag of any declared output.
///
/// Fails soft on a malformed `outputs` field: the anomaly is reported and
/// the node contributes an empty option set, so one bad catalog entry
/// never breaks search over the rest.
#[derive(Debug)]
pub struct OutputTypeFilter {
    options: FuzzyIndex<String>,
}

impl OutputTypeFilter {
    pub fn new(catalog: &[NodeDefinition], config: FuzzyIndexConfig) -> Self {
        Self {
            options: build_options_index(catalog, config, Self::extract),
        }
    }

    fn extract(node: &NodeDefinition) -> Vec<String> {
        let Some(outputs) = node.outputs.as_list() else {
            error!(name = %node.name, "Node declares a non-sequence outputs field");
            return Vec::new();
        };

        outputs
            .iter()
            .filter_map(|output| output.tag().map(String::from))
            .collect()
    }
}

impl NodeFilter for OutputTypeFilter {
    fn id(&self) -> &'static str {
        "output"
    }

    fn name(&self) -> &'static str {
        "Output Type"
    }

    fn invoke_sequence(&self) -> &'static str {
        "o"
    }

    fn long_invoke_sequence(&self) -> &'static str {
        "output"
    }

    fn node_options(&self, node: &NodeDefinition) -> Vec<String> {
        Self::extract(node)
    }

    fn options_index(&self) -> &FuzzyIndex<String> {
        &self.options
    }
}

/// Filters by the node's category path
#[derive(Debug)]
pub struct CategoryFilter {
    options: FuzzyIndex<String>,
}

impl CategoryFilter {
    pub fn new(catalog: &[NodeDefinition], config: FuzzyIndexConfig) -> Self {
        Self {
            options: build_options_index(catalog, config, Self::extract),
        }
    }

    fn extract(node: &NodeDefinition) -> Vec<String> {
        vec![node.category.clone()]
    }
}

impl NodeFilter for CategoryFilter {
    fn id(&self) -> &'static str {
        "category"
    }

    fn name(&self) -> &'static str {
        "Category"
    }

    fn invoke_sequence(&self) -> &'static str {
        "c"
    }

    fn long_invoke_sequence(&self) -> &'static str {
        "category"
    }

    fn node_options(&self, node: &NodeDefinition) -> Vec<String> {
        Self::extract(node)
    }

    fn options_index(&self) -> &FuzzyIndex<String> {
        &self.options
    }
}

/// Filters by the human-readable provenance label.
///
/// Nodes without a `source_module` contribute an empty option set and
/// therefore never match any source value.
#[derive(Debug)]
pub struct SourceFilter {
    options: FuzzyIndex<String>,
}

impl SourceFilter {
    pub fn new(catalog: &[NodeDefinition], config: FuzzyIndexConfig) -> Self {
        Self {
            options: build_options_index(catalog, config, Self::extract),
        }
    }

    fn extract(node: &NodeDefinition) -> Vec<String> {
        node.source_module
            .as_deref()
            .map(|module| vec![NodeSource::classify(module).display_text()])
            .unwrap_or_default()
    }
}

impl NodeFilter for SourceFilter {
    fn id(&self) -> &'static str {
        "source"
    }

    fn name(&self) -> &'static str {
        "Source"
    }

    fn invoke_sequence(&self) -> &'static str {
        "s"
    }

    fn long_invoke_sequence(&self) -> &'static str {
        "source"
    }

    fn node_options(&self, node: &NodeDefinition) -> Vec<String> {
        Self::extract(node)
    }

    fn options_index(&self) -> &FuzzyIndex<String> {
        &self.options
    }
}
