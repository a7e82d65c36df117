//! Core types for salesboard.
//!
//! This crate contains shared data structures that are used across all salesboard crates:
//! - Record, Collection and schema types for the sample tables
//! - Filter criteria
//! - Chat message types
//! - Configuration types
//! - Error types

mod config;
mod criteria;
mod error;
mod message;
mod record;
mod schema;

pub use config::{config_dir, config_path, AppConfig, ChatConfig, QueryConfig, RuleConfig};
pub use criteria::{DateRange, FilterCriteria, StatusFilter, ALL_STATUSES};
pub use error::{ConfigError, QueryError};
pub use message::{ChatMessage, Role};
pub use record::{Collection, FieldValue, Record, RecordId};
pub use schema::{CollectionKind, CollectionSchema, ACTIVE_STATUS};
