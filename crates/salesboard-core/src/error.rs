//! Error types for salesboard.

use thiserror::Error;

use crate::schema::CollectionKind;

/// Query errors - surfaced to the caller, never coerced to a sentinel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// Aggregate requested on a non-numeric or absent field.
    #[error("Field '{field}' cannot be aggregated: {reason}")]
    SchemaMismatch { field: String, reason: String },

    /// Mean requested over zero records.
    #[error("Mean of '{field}' is undefined over zero records")]
    DivisionUndefined { field: String },

    /// Two records share an identifier.
    #[error("Duplicate record id '{0}'")]
    DuplicateId(String),

    /// A record has no text identifier.
    #[error("Record at index {index} has no text '{field}' identifier")]
    MissingId { index: usize, field: String },

    /// A record's field set differs from the rest of the collection.
    #[error("Record '{id}' does not share the collection's field set")]
    HeterogeneousRecord { id: String },

    /// The schema names a field the records do not carry.
    #[error("Field '{field}' is not present in {kind} records")]
    UnknownField { kind: CollectionKind, field: String },

    /// No collection registered for the kind.
    #[error("Collection '{0}' not found")]
    CollectionNotFound(CollectionKind),

    /// A collection for the kind is already registered.
    #[error("Collection '{0}' already exists")]
    CollectionAlreadyExists(CollectionKind),

    /// Collection kind string did not parse.
    #[error("Unknown collection kind: {0}")]
    UnknownKind(String),

    /// Date range bounds are malformed or reversed.
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),
}
