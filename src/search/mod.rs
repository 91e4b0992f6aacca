//! Catalog search: fuzzy index, structured filters, and their composition

pub mod filter;
pub mod fuzzy;
pub mod service;

pub use filter::{
    CategoryFilter, FilterAndValue, InputTypeFilter, NodeFilter, OutputTypeFilter, SourceFilter,
};
pub use fuzzy::{FieldIndex, FuzzyIndex, FuzzyIndexConfig, SearchOptions};
pub use service::NodeSearchService;
