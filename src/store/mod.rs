//! Record store subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → Arc<dyn PersonStore>
//!     → TimedStore (resilience/timeouts.rs, bounds every call)
//!     → SqliteStore | MemoryStore | DisconnectedStore
//! ```
//!
//! # Design Decisions
//! - Ids arrive as raw text; each store classifies malformed ids itself
//! - Uniqueness of `name` is enforced by the backing store, never by a
//!   read-then-write check in the handler
//! - Delete is idempotent: a missing record is not an error

pub mod disconnected;
pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::model::{MalformedId, NewPerson, PersonRecord};

pub use disconnected::DisconnectedStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Errors raised by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Identifier text does not match the store's id shape.
    #[error("malformed identifier `{0}`")]
    MalformedId(String),

    /// A write would duplicate a unique field.
    #[error("duplicate value for unique field `{field}`")]
    Duplicate { field: &'static str },

    /// The store call did not finish in time.
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    /// No store connection is available.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<MalformedId> for StoreError {
    fn from(err: MalformedId) -> Self {
        StoreError::MalformedId(err.0)
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Asynchronous CRUD access to person records.
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// All records in insertion order.
    async fn find_all(&self) -> StoreResult<Vec<PersonRecord>>;

    /// The record with the given id, or `None`.
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<PersonRecord>>;

    /// Insert a new record and return it with its assigned id.
    async fn insert(&self, person: NewPerson) -> StoreResult<PersonRecord>;

    /// Replace name and number; `None` if no record has this id.
    async fn update_by_id(&self, id: &str, person: NewPerson) -> StoreResult<Option<PersonRecord>>;

    /// Remove a record, returning it if it existed.
    async fn delete_by_id(&self, id: &str) -> StoreResult<Option<PersonRecord>>;

    /// Number of stored records.
    async fn count(&self) -> StoreResult<u64>;
}
