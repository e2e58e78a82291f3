//! In-process person store.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::model::{NewPerson, PersonId, PersonRecord};
use crate::store::{PersonStore, StoreError, StoreResult};

#[derive(Debug, Clone)]
struct Stored {
    seq: u64,
    record: PersonRecord,
}

/// A thread-safe store backed by `DashMap`.
///
/// The `names` index is claimed through the entry API before a record is
/// written, so two concurrent inserts of the same name cannot both succeed.
/// Lock order is always `records` then `names`; insert and delete never hold
/// a `records` guard while touching `names`.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<DashMap<PersonId, Stored>>,
    names: Arc<DashMap<String, PersonId>>,
    next_seq: Arc<AtomicU64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn claim_name(&self, name: &str, id: PersonId) -> StoreResult<()> {
        match self.names.entry(name.to_string()) {
            Entry::Occupied(entry) if *entry.get() != id => {
                Err(StoreError::Duplicate { field: "name" })
            }
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(entry) => {
                entry.insert(id);
                Ok(())
            }
        }
    }

    fn release_name(&self, name: &str, id: PersonId) {
        self.names.remove_if(name, |_, owner| *owner == id);
    }
}

#[async_trait]
impl PersonStore for MemoryStore {
    async fn find_all(&self) -> StoreResult<Vec<PersonRecord>> {
        let mut stored: Vec<Stored> = self.records.iter().map(|e| e.value().clone()).collect();
        stored.sort_by_key(|s| s.seq);
        Ok(stored.into_iter().map(|s| s.record).collect())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<PersonRecord>> {
        let id = PersonId::parse(id)?;
        Ok(self.records.get(&id).map(|e| e.record.clone()))
    }

    async fn insert(&self, person: NewPerson) -> StoreResult<PersonRecord> {
        let id = PersonId::generate();
        self.claim_name(person.name(), id)?;

        let record = PersonRecord::create(id, person);
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.records.insert(id, Stored { seq, record: record.clone() });
        Ok(record)
    }

    async fn update_by_id(&self, id: &str, person: NewPerson) -> StoreResult<Option<PersonRecord>> {
        let id = PersonId::parse(id)?;
        let Some(mut entry) = self.records.get_mut(&id) else {
            return Ok(None);
        };

        // The name swap happens entirely under the record's guard, so
        // concurrent updates of one record see each other's names.
        let old_name = entry.record.name.clone();
        let renamed = old_name != person.name();
        if renamed {
            self.claim_name(person.name(), id)?;
        }

        entry.record.apply_update(person);
        if renamed {
            self.release_name(&old_name, id);
        }
        Ok(Some(entry.record.clone()))
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<Option<PersonRecord>> {
        let id = PersonId::parse(id)?;
        let removed = self.records.remove(&id).map(|(_, stored)| stored.record);
        if let Some(record) = &removed {
            self.release_name(&record.name, id);
        }
        Ok(removed)
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.records.len() as u64)
    }
}
