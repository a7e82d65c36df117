//! Collection Registry
//!
//! Stores one validated collection per kind. Collections are registered once
//! and read many times, so reads take a shared lock.

use parking_lot::RwLock;
use std::collections::HashMap;

use salesboard_core::{Collection, CollectionKind, QueryError};

/// Registry for storing collections by kind.
pub struct CollectionRegistry {
    collections: RwLock<HashMap<CollectionKind, Collection>>,
}

impl CollectionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a collection.
    ///
    /// Returns an error if a collection of the same kind already exists.
    pub fn add(&self, collection: Collection) -> Result<(), QueryError> {
        let mut collections = self.collections.write();
        let kind = collection.kind();
        if collections.contains_key(&kind) {
            return Err(QueryError::CollectionAlreadyExists(kind));
        }
        tracing::info!("Registered {} collection ({} records)", kind, collection.len());
        collections.insert(kind, collection);
        Ok(())
    }

    /// Replace (or insert) the collection for its kind.
    ///
    /// Returns the previous collection, if any.
    pub fn replace(&self, collection: Collection) -> Option<Collection> {
        let kind = collection.kind();
        let old = self.collections.write().insert(kind, collection);
        tracing::debug!("Replaced {} collection", kind);
        old
    }

    /// Execute a function with access to a collection.
    ///
    /// Fails with `CollectionNotFound` if the kind is not registered.
    pub fn with_collection<F, R>(&self, kind: CollectionKind, f: F) -> Result<R, QueryError>
    where
        F: FnOnce(&Collection) -> R,
    {
        let collections = self.collections.read();
        collections
            .get(&kind)
            .map(f)
            .ok_or(QueryError::CollectionNotFound(kind))
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<CollectionKind> {
        let mut kinds: Vec<CollectionKind> = self.collections.read().keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Check if a collection of the given kind exists.
    pub fn exists(&self, kind: CollectionKind) -> bool {
        self.collections.read().contains_key(&kind)
    }

    /// Get the count of registered collections.
    pub fn count(&self) -> usize {
        self.collections.read().len()
    }
}

impl Default for CollectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
