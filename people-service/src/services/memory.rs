//! In-process [`PersonStore`] used to exercise the HTTP surface without a
//! MongoDB deployment.

use crate::error::PersonError;
use crate::models::{PersonDocument, PersonId};
use crate::services::store::{PersonFilter, PersonStore};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<PersonDocument>>,
    calls: AtomicUsize,
    failure: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Number of store calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn enter(&self) -> Result<(), PersonError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(PersonError::Store(anyhow::anyhow!(message.clone()))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PersonStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<PersonDocument>, PersonError> {
        self.enter()?;
        Ok(self.records.read().await.clone())
    }

    async fn find_one(&self, filter: &PersonFilter) -> Result<Option<PersonDocument>, PersonError> {
        self.enter()?;
        let records = self.records.read().await;
        Ok(records.iter().find(|d| filter.matches(d)).cloned())
    }

    async fn insert(&self, person: &PersonDocument) -> Result<PersonId, PersonError> {
        self.enter()?;
        let id = ObjectId::new();
        self.records.write().await.push(PersonDocument {
            id: Some(id),
            ..person.clone()
        });
        Ok(PersonId::from(id))
    }

    async fn update_one(
        &self,
        filter: &PersonFilter,
        person: &PersonDocument,
    ) -> Result<u64, PersonError> {
        self.enter()?;
        let mut records = self.records.write().await;
        match records.iter_mut().find(|d| filter.matches(d)) {
            Some(record) => {
                record.name = person.name.clone();
                record.age = person.age;
                record.address = person.address.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, filter: &PersonFilter) -> Result<u64, PersonError> {
        self.enter()?;
        let mut records = self.records.write().await;
        match records.iter().position(|d| filter.matches(d)) {
            Some(index) => {
                records.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), PersonError> {
        self.enter()
    }
}
