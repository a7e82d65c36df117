//! Query Engine
//!
//! The QueryEngine runs filter and aggregate requests against the collections
//! held by a `CollectionRegistry`:
//! - Filtered listings (`search`) and relevance ranking (`rank`)
//! - Derived aggregates over the full collection
//! - Report views (distribution, group summaries, top-N, threshold alerts)
//!
//! ## Query Flow
//!
//! ```text
//! FilterCriteria (from the view layer)
//!        │
//!        ▼
//! ┌───────────────────┐
//! │ Look up collection│
//! │ by kind           │
//! └────────┬──────────┘
//!          │
//!          ▼
//!    filter / rank / aggregate
//!          │
//!          ▼
//! Owned result returned to the caller
//! ```
//!
//! Nothing is cached; every call recomputes from the registered records.

use std::sync::Arc;

use salesboard_core::{CollectionKind, FilterCriteria, QueryError, Record};

use crate::aggregate::{self, Aggregate, Summary};
use crate::filter;
use crate::rank;
use crate::registry::CollectionRegistry;
use crate::report::{self, GroupSummary};

mod types;

pub use types::QueryResult;

/// The QueryEngine answers listing and KPI queries.
pub struct QueryEngine {
    /// Registry containing all collections.
    registry: Arc<CollectionRegistry>,
}

impl QueryEngine {
    /// Create a new QueryEngine with the given registry.
    pub fn new(registry: Arc<CollectionRegistry>) -> Self {
        Self { registry }
    }

    /// Get the registry (shared Arc).
    pub fn registry(&self) -> Arc<CollectionRegistry> {
        self.registry.clone()
    }

    // =========================================================================
    // Listings
    // =========================================================================

    /// Filter a collection.
    pub fn search(
        &self,
        kind: CollectionKind,
        criteria: &FilterCriteria,
    ) -> Result<QueryResult, QueryError> {
        self.registry.with_collection(kind, |collection| {
            let records: Vec<Record> =
                filter::filter(collection.records(), collection.schema(), criteria)
                    .into_iter()
                    .cloned()
                    .collect();

            tracing::debug!(
                "Search {} term={:?} status={:?}: {}/{} records",
                kind,
                criteria.term,
                criteria.status,
                records.len(),
                collection.len()
            );

            QueryResult {
                kind,
                records,
                total: collection.len(),
            }
        })
    }

    /// Relevance-ranked search on a collection's title field.
    pub fn rank(&self, kind: CollectionKind, term: &str) -> Result<Vec<Record>, QueryError> {
        self.registry.with_collection(kind, |collection| {
            rank::rank(collection.records(), collection.schema(), term)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    // =========================================================================
    // Aggregates
    // =========================================================================

    /// Compute an aggregate over the full collection.
    pub fn aggregate(&self, kind: CollectionKind, agg: &Aggregate) -> Result<f64, QueryError> {
        self.registry
            .with_collection(kind, |collection| {
                aggregate::aggregate(collection.records(), collection.schema(), agg)
            })?
            .inspect(|value| tracing::debug!("Aggregate {:?} on {}: {}", agg, kind, value))
    }

    /// Compute an aggregate over the records `criteria` admits.
    pub fn aggregate_filtered(
        &self,
        kind: CollectionKind,
        criteria: &FilterCriteria,
        agg: &Aggregate,
    ) -> Result<f64, QueryError> {
        self.registry.with_collection(kind, |collection| {
            let subset = filter::filter(collection.records(), collection.schema(), criteria);
            aggregate::aggregate(subset, collection.schema(), agg)
        })?
    }

    /// Count / sum / mean of a numeric field over the full collection.
    pub fn summarize(&self, kind: CollectionKind, field: &str) -> Result<Summary, QueryError> {
        self.registry.with_collection(kind, |collection| {
            aggregate::summarize(collection.records(), collection.schema(), field)
        })?
    }

    /// Count / sum / mean of a numeric field over the records `criteria` admits.
    pub fn summarize_filtered(
        &self,
        kind: CollectionKind,
        criteria: &FilterCriteria,
        field: &str,
    ) -> Result<Summary, QueryError> {
        self.registry.with_collection(kind, |collection| {
            let subset = filter::filter(collection.records(), collection.schema(), criteria);
            aggregate::summarize(subset, collection.schema(), field)
        })?
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Distribution of values of `field` (typically the status field).
    pub fn distribution(
        &self,
        kind: CollectionKind,
        field: &str,
    ) -> Result<Vec<(String, usize)>, QueryError> {
        self.registry.with_collection(kind, |collection| {
            let absent = collection.records().iter().all(|r| r.get(field).is_none());
            if absent && !collection.is_empty() {
                return Err(QueryError::UnknownField {
                    kind,
                    field: field.to_string(),
                });
            }
            Ok(report::count_by(collection.records(), field))
        })?
    }

    /// Per-key totals of `value_field`, highest total first.
    pub fn group(
        &self,
        kind: CollectionKind,
        key_field: &str,
        value_field: &str,
    ) -> Result<Vec<GroupSummary>, QueryError> {
        self.registry.with_collection(kind, |collection| {
            report::group_by(collection.records(), collection.schema(), key_field, value_field)
        })?
    }

    /// The `n` records with the highest `field`.
    pub fn top(
        &self,
        kind: CollectionKind,
        field: &str,
        n: usize,
    ) -> Result<Vec<Record>, QueryError> {
        self.registry.with_collection(kind, |collection| {
            report::top_n(collection.records(), collection.schema(), field, n)
                .map(|records| records.into_iter().cloned().collect())
        })?
    }

    /// The `n` records `criteria` admits with the highest `field`.
    pub fn top_filtered(
        &self,
        kind: CollectionKind,
        criteria: &FilterCriteria,
        field: &str,
        n: usize,
    ) -> Result<Vec<Record>, QueryError> {
        self.registry.with_collection(kind, |collection| {
            let subset = filter::filter(collection.records(), collection.schema(), criteria);
            report::top_n(subset, collection.schema(), field, n)
                .map(|records| records.into_iter().cloned().collect())
        })?
    }

    /// Records `criteria` admits with `field` at most `threshold`, lowest first.
    pub fn below(
        &self,
        kind: CollectionKind,
        criteria: &FilterCriteria,
        field: &str,
        threshold: f64,
    ) -> Result<Vec<Record>, QueryError> {
        self.registry.with_collection(kind, |collection| {
            let subset = filter::filter(collection.records(), collection.schema(), criteria);
            report::below(subset, collection.schema(), field, threshold)
                .map(|records| records.into_iter().cloned().collect())
        })?
    }

    /// `numerator / denominator * 100` over the full collection.
    pub fn percent_of(
        &self,
        kind: CollectionKind,
        numerator: &str,
        denominator: &str,
    ) -> Result<f64, QueryError> {
        self.registry.with_collection(kind, |collection| {
            report::percent_of(collection.records(), collection.schema(), numerator, denominator)
        })?
    }

    /// `numerator / denominator * 100` over the records `criteria` admits.
    pub fn percent_of_filtered(
        &self,
        kind: CollectionKind,
        criteria: &FilterCriteria,
        numerator: &str,
        denominator: &str,
    ) -> Result<f64, QueryError> {
        self.registry.with_collection(kind, |collection| {
            let subset = filter::filter(collection.records(), collection.schema(), criteria);
            report::percent_of(subset, collection.schema(), numerator, denominator)
        })?
    }
}
