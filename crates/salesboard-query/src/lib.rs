//! In-memory query engine for salesboard.
//!
//! This crate provides the tabular query layer including:
//! - Stable, case-insensitive filtering with status and date constraints
//! - Sum / mean / count aggregates over schema-designated numeric fields
//! - Relevance ranking and report views (distribution, grouping, top-N, low stock)
//! - A collection registry and the `QueryEngine` over it
//! - The built-in sample tables

pub mod aggregate;
pub mod engine;
pub mod filter;
pub mod rank;
pub mod registry;
pub mod report;
pub mod samples;

// Re-export commonly used types
pub use aggregate::{aggregate, summarize, Aggregate, Summary};
pub use engine::{QueryEngine, QueryResult};
pub use filter::{filter, matches_term};
pub use rank::rank;
pub use registry::CollectionRegistry;
pub use report::{below, count_by, group_by, percent_of, top_n, GroupSummary};

// Re-export salesboard_core types for convenience
pub use salesboard_core::{
    Collection, CollectionKind, CollectionSchema, DateRange, FilterCriteria, QueryError, Record,
    StatusFilter,
};
