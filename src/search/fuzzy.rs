//! Generic fuzzy index over a fixed item set
//!
//! Wraps nucleo-matcher (the Smith-Waterman scorer used in the Helix
//! editor) behind an index that is built once over designated text fields
//! and then serves read-only queries. Raw nucleo scores grow with match
//! quality; this module normalizes them against the needle's self-match
//! score into a 0..1 scale where lower is better, so a configured
//! threshold can discard weak candidates uniformly across needle lengths.

use nucleo_matcher::{Config, Matcher, Utf32String};
use unicode_normalization::UnicodeNormalization;

/// Tuning knobs for a fuzzy index
#[derive(Debug, Clone)]
pub struct FuzzyIndexConfig {
    /// Maximum normalized score kept in results; 0.0 admits only perfect
    /// matches, 1.0 admits anything nucleo matches at all.
    pub threshold: f64,
    /// Sort results by ascending score (best first). Ties keep the items'
    /// original order.
    pub sort_results: bool,
}

impl Default for FuzzyIndexConfig {
    fn default() -> Self {
        Self {
            threshold: 0.6,
            sort_results: true,
        }
    }
}

impl FuzzyIndexConfig {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }
}

/// Slight score penalty per unmatched haystack character, so an exact name
/// outranks names that merely extend it. Small enough to never push a
/// genuine match past a sane threshold on its own.
const LENGTH_PENALTY_PER_CHAR: f64 = 0.001;

/// Per-query options
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Cap on the number of results, applied after scoring and sorting so
    /// truncation never biases which items get scored.
    pub limit: Option<usize>,
}

impl SearchOptions {
    pub fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}

/// Precomputed haystacks for one item set and field selection.
///
/// Building this is the expensive part of index construction; it can be
/// built once and cloned into several `FuzzyIndex` instances that differ
/// only in scoring configuration.
#[derive(Debug, Clone, Default)]
pub struct FieldIndex {
    rows: Vec<Vec<Utf32String>>,
}

impl FieldIndex {
    /// Extract and normalize the searchable fields of every item
    pub fn build<T>(items: &[T], extract: impl Fn(&T) -> Vec<String>) -> Self {
        let rows = items
            .iter()
            .map(|item| {
                extract(item)
                    .iter()
                    .map(|field| Utf32String::from(normalize(field).as_str()))
                    .collect()
            })
            .collect();

        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Fuzzy-searchable wrapper around an ordered item set
#[derive(Debug)]
pub struct FuzzyIndex<T> {
    items: Vec<T>,
    fields: FieldIndex,
    config: FuzzyIndexConfig,
}

impl<T> FuzzyIndex<T> {
    /// Build an index over `items`, extracting searchable text per item
    pub fn new(
        items: Vec<T>,
        extract: impl Fn(&T) -> Vec<String>,
        config: FuzzyIndexConfig,
    ) -> Self {
        let fields = FieldIndex::build(&items, &extract);
        Self::with_field_index(items, fields, config)
    }

    /// Build from a precomputed field index over the same item sequence
    pub fn with_field_index(items: Vec<T>, fields: FieldIndex, config: FuzzyIndexConfig) -> Self {
        debug_assert_eq!(items.len(), fields.len());
        Self {
            items,
            fields,
            config,
        }
    }

    /// The wrapped items, in original order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Search the item set.
    ///
    /// An empty query is the no-filter fast path: the full item set comes
    /// back in original order without a ranking pass.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<&T> {
        if query.is_empty() {
            return truncate(self.items.iter().collect(), options);
        }

        truncate(
            self.search_scored(query)
                .into_iter()
                .map(|(_, item)| item)
                .collect(),
            options,
        )
    }

    /// Search with the normalized score attached to each result.
    ///
    /// An empty query yields every item at the perfect score, in original
    /// order.
    pub fn search_scored(&self, query: &str) -> Vec<(f64, &T)> {
        if query.is_empty() {
            return self.items.iter().map(|item| (0.0, item)).collect();
        }

        let needle = Utf32String::from(normalize(query).as_str());
        let mut matcher = Matcher::new(Config::DEFAULT);

        // Best achievable raw score for this needle, used as the
        // normalization ceiling.
        let Some(self_score) = matcher.fuzzy_match(needle.slice(..), needle.slice(..)) else {
            return Vec::new();
        };
        let ceiling = f64::from(self_score);

        let mut scored: Vec<(f64, &T)> = self
            .items
            .iter()
            .zip(&self.fields.rows)
            .filter_map(|(item, haystacks)| {
                let best = haystacks
                    .iter()
                    .filter_map(|haystack| {
                        let slack = haystack
                            .slice(..)
                            .len()
                            .saturating_sub(needle.slice(..).len());
                        matcher
                            .fuzzy_match(haystack.slice(..), needle.slice(..))
                            .map(|raw| {
                                let closeness = (1.0 - f64::from(raw) / ceiling).clamp(0.0, 1.0);
                                closeness + slack as f64 * LENGTH_PENALTY_PER_CHAR
                            })
                    })
                    .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))?;

                (best <= self.config.threshold).then_some((best, item))
            })
            .collect();

        if self.config.sort_results {
            // Stable sort: equal scores keep catalog order
            scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        }

        scored
    }
}

fn truncate<T>(mut results: Vec<T>, options: &SearchOptions) -> Vec<T> {
    if let Some(limit) = options.limit {
        results.truncate(limit);
    }
    results
}

/// Unicode NFC normalization applied to haystacks and needles alike
fn normalize(text: &str) -> String {
    text.nfc().collect()
}
