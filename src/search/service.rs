//! Catalog search service
//!
//! Composes the catalog-wide fuzzy index with the registered structured
//! filters: free-text search first, then conjunctive filter evaluation,
//! then limit truncation. That ordering is load-bearing: filtering after
//! ranking keeps result order defined by match quality, and truncating
//! last means a limit can never drop a matching node just because
//! non-matching ones occupied earlier slots.

use crate::catalog::defs::NodeDefinition;
use crate::error::AppError;
use crate::search::filter::{
    CategoryFilter, FilterAndValue, InputTypeFilter, NodeFilter, OutputTypeFilter, SourceFilter,
};
use crate::search::fuzzy::{FuzzyIndex, FuzzyIndexConfig, SearchOptions};

/// Trailing delimiter that switches an interactive query from free-text
/// mode to filter-picker mode
pub const FILTER_START_SEQUENCE: char = ':';

/// Read-only search engine over one catalog load.
///
/// All state is built at construction; every query method is a pure read,
/// so a service can be shared across concurrent callers. Reflecting a
/// changed catalog means constructing a new service and swapping the
/// reference.
pub struct NodeSearchService {
    node_index: FuzzyIndex<NodeDefinition>,
    filters: Vec<Box<dyn NodeFilter>>,
}

impl NodeSearchService {
    /// Build the service and its standard filters from a catalog
    pub fn new(catalog: Vec<NodeDefinition>) -> Result<Self, AppError> {
        let filter_config = FuzzyIndexConfig::default();

        let mut standard: Vec<Box<dyn NodeFilter>> = vec![
            Box::new(InputTypeFilter::new(&catalog, filter_config.clone())),
            Box::new(OutputTypeFilter::new(&catalog, filter_config.clone())),
            Box::new(CategoryFilter::new(&catalog, filter_config.clone())),
        ];

        // Provenance is only meaningful when some entry declares it; a
        // heterogeneous catalog still gets the filter, and entries without
        // a source_module simply never match.
        if catalog.iter().any(|node| node.source_module.is_some()) {
            standard.push(Box::new(SourceFilter::new(&catalog, filter_config)));
        }

        let node_index = FuzzyIndex::new(
            catalog,
            |node| {
                vec![
                    node.name.clone(),
                    node.display_name.clone(),
                    node.description.clone(),
                ]
            },
            FuzzyIndexConfig::default(),
        );

        let mut service = Self {
            node_index,
            filters: Vec::new(),
        };
        for filter in standard {
            service.register_filter(filter)?;
        }

        Ok(service)
    }

    /// Register a filter; duplicate ids are a construction-time usage
    /// error and are rejected immediately.
    pub fn register_filter(&mut self, filter: Box<dyn NodeFilter>) -> Result<(), AppError> {
        if self.filter_by_id(filter.id()).is_some() {
            return Err(AppError::InvalidInput(format!(
                "Duplicate filter id: {}",
                filter.id()
            )));
        }
        self.filters.push(filter);
        Ok(())
    }

    /// The catalog, in original order
    pub fn catalog(&self) -> &[NodeDefinition] {
        self.node_index.items()
    }

    /// The registered filters, in registration order
    pub fn filters(&self) -> &[Box<dyn NodeFilter>] {
        &self.filters
    }

    /// Look up a registered filter by id
    pub fn filter_by_id(&self, id: &str) -> Option<&dyn NodeFilter> {
        self.filters
            .iter()
            .find(|filter| filter.id() == id)
            .map(|filter| filter.as_ref())
    }

    /// Whether an interactive query just entered filter-picker territory
    pub fn ends_with_filter_start_sequence(&self, query: &str) -> bool {
        query.ends_with(FILTER_START_SEQUENCE)
    }

    /// Search the catalog: fuzzy-match `query`, keep nodes matching every
    /// supplied (filter, value) pair, truncate to the option limit.
    pub fn search_nodes(
        &self,
        query: &str,
        filters: &[FilterAndValue<'_>],
        options: &SearchOptions,
    ) -> Vec<&NodeDefinition> {
        let matched = self.node_index.search(query, &SearchOptions::default());

        let mut results: Vec<&NodeDefinition> = matched
            .into_iter()
            .filter(|node| {
                filters
                    .iter()
                    .all(|(filter, value)| filter.matches(node, value))
            })
            .collect();

        if let Some(limit) = options.limit {
            results.truncate(limit);
        }

        results
    }
}
