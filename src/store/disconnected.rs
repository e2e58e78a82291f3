//! Placeholder store used when the startup connection failed.

use async_trait::async_trait;

use crate::model::{NewPerson, PersonRecord};
use crate::store::{PersonStore, StoreError, StoreResult};

/// Fails every operation with `StoreError::Unavailable`.
///
/// Keeps the process serving the static pages while persistence is down.
#[derive(Debug, Clone)]
pub struct DisconnectedStore {
    reason: String,
}

impl DisconnectedStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    fn unavailable<T>(&self) -> StoreResult<T> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }
}

#[async_trait]
impl PersonStore for DisconnectedStore {
    async fn find_all(&self) -> StoreResult<Vec<PersonRecord>> {
        self.unavailable()
    }

    async fn find_by_id(&self, _id: &str) -> StoreResult<Option<PersonRecord>> {
        self.unavailable()
    }

    async fn insert(&self, _person: NewPerson) -> StoreResult<PersonRecord> {
        self.unavailable()
    }

    async fn update_by_id(&self, _id: &str, _person: NewPerson) -> StoreResult<Option<PersonRecord>> {
        self.unavailable()
    }

    async fn delete_by_id(&self, _id: &str) -> StoreResult<Option<PersonRecord>> {
        self.unavailable()
    }

    async fn count(&self) -> StoreResult<u64> {
        self.unavailable()
    }
}
