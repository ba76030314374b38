pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use crate::models::{Property, PropertyUpdate};
use crate::search::{Pagination, Predicate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Property with this ID already exists: {0}")]
    Duplicate(String),

    #[error("Document store error: {0}")]
    Backend(#[from] mongodb::error::Error),

    #[error("Failed to encode document: {0}")]
    Encoding(#[from] mongodb::bson::ser::Error),
}

/// Persistent property collection. The only place listings are mutated.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// One page of matching properties, newest-created first
    async fn find(&self, predicate: &Predicate, window: &Pagination) -> StoreResult<Vec<Property>>;

    /// Number of matching properties across all pages
    async fn count(&self, predicate: &Predicate) -> StoreResult<u64>;

    async fn get(&self, property_id: &str) -> StoreResult<Option<Property>>;

    /// Fails with [`StoreError::Duplicate`] if the id is taken
    async fn insert(&self, property: Property) -> StoreResult<Property>;

    /// Merge `update` into the stored record; `None` if the id is unknown
    async fn update(
        &self,
        property_id: &str,
        update: PropertyUpdate,
        at: DateTime<Utc>,
    ) -> StoreResult<Option<Property>>;

    /// `false` if the id is unknown
    async fn delete(&self, property_id: &str) -> StoreResult<bool>;

    /// Drop every record and insert `properties`
    async fn replace_all(&self, properties: Vec<Property>) -> StoreResult<u64>;

    /// Release the underlying connection
    async fn close(&self) {}

    fn backend_name(&self) -> &'static str;
}
