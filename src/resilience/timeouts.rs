//! Timeout enforcement for store calls.
//!
//! # Responsibilities
//! - Wrap every store operation with `tokio::time::timeout`
//! - Report expiry as `StoreError::Timeout`
//!
//! # Design Decisions
//! - A dropped future cancels the underlying call cleanly
//! - The wrapper is itself a `PersonStore`, so handlers do not know about it

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

use crate::model::{NewPerson, PersonRecord};
use crate::store::{PersonStore, StoreError, StoreResult};

/// A store whose calls are bounded by a deadline.
pub struct TimedStore<S> {
    inner: S,
    limit: Duration,
}

impl<S: PersonStore> TimedStore<S> {
    pub fn new(inner: S, limit: Duration) -> Self {
        Self { inner, limit }
    }

    async fn bounded<T>(&self, op: &'static str, fut: impl Future<Output = StoreResult<T>>) -> StoreResult<T> {
        match tokio::time::timeout(self.limit, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(operation = op, limit = ?self.limit, "Store call timed out");
                Err(StoreError::Timeout(self.limit))
            }
        }
    }
}

#[async_trait]
impl<S: PersonStore> PersonStore for TimedStore<S> {
    async fn find_all(&self) -> StoreResult<Vec<PersonRecord>> {
        self.bounded("find_all", self.inner.find_all()).await
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<PersonRecord>> {
        self.bounded("find_by_id", self.inner.find_by_id(id)).await
    }

    async fn insert(&self, person: NewPerson) -> StoreResult<PersonRecord> {
        self.bounded("insert", self.inner.insert(person)).await
    }

    async fn update_by_id(&self, id: &str, person: NewPerson) -> StoreResult<Option<PersonRecord>> {
        self.bounded("update_by_id", self.inner.update_by_id(id, person)).await
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<Option<PersonRecord>> {
        self.bounded("delete_by_id", self.inner.delete_by_id(id)).await
    }

    async fn count(&self) -> StoreResult<u64> {
        self.bounded("count", self.inner.count()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    struct SlowStore;

    #[async_trait]
    impl PersonStore for SlowStore {
        async fn find_all(&self) -> StoreResult<Vec<PersonRecord>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }
        async fn find_by_id(&self, _id: &str) -> StoreResult<Option<PersonRecord>> {
            Ok(None)
        }
        async fn insert(&self, _person: NewPerson) -> StoreResult<PersonRecord> {
            Err(StoreError::Unavailable("read only".into()))
        }
        async fn update_by_id(&self, _id: &str, _person: NewPerson) -> StoreResult<Option<PersonRecord>> {
            Ok(None)
        }
        async fn delete_by_id(&self, _id: &str) -> StoreResult<Option<PersonRecord>> {
            Ok(None)
        }
        async fn count(&self) -> StoreResult<u64> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_slow_call_times_out() {
        let store = TimedStore::new(SlowStore, Duration::from_millis(20));
        let err = store.find_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Timeout(d) if d == Duration::from_millis(20)));
    }

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let store = TimedStore::new(MemoryStore::new(), Duration::from_secs(1));
        let person = NewPerson::new("Arto Hellas", "040-123456").unwrap();
        let created = store.insert(person).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store.find_by_id(&created.id.to_string()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_inner_errors_preserved() {
        let store = TimedStore::new(SlowStore, Duration::from_secs(1));
        let person = NewPerson::new("Arto Hellas", "040-123456").unwrap();
        let err = store.insert(person).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
