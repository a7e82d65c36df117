//! Shared types for the query engine.

use serde::{Deserialize, Serialize};

use salesboard_core::{CollectionKind, Record};

/// Result of one `search` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Collection that was queried.
    pub kind: CollectionKind,

    /// Matching records, in collection order.
    pub records: Vec<Record>,

    /// Size of the full collection, for "showing N of M" displays.
    pub total: usize,
}

impl QueryResult {
    /// Number of matching records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
