use crate::error::PersonError;
use crate::models::{PersonDocument, PersonId};
use async_trait::async_trait;
use mongodb::bson::{doc, Document};

/// Selects the record(s) an operation applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonFilter {
    /// Match on a parsed ObjectId.
    Id(PersonId),
    /// Match `_id` against the raw string. Stored ids are ObjectIds, so this
    /// matches nothing.
    RawKey(String),
}

impl PersonFilter {
    pub fn by_id(id: PersonId) -> Self {
        PersonFilter::Id(id)
    }

    /// Lenient form for update/delete: a malformed key is not an error, it
    /// just selects no record.
    pub fn by_key(key: &str) -> Self {
        match key.parse::<PersonId>() {
            Ok(id) => PersonFilter::Id(id),
            Err(_) => PersonFilter::RawKey(key.to_owned()),
        }
    }

    pub fn to_document(&self) -> Document {
        match self {
            PersonFilter::Id(id) => doc! { "_id": id.object_id() },
            PersonFilter::RawKey(key) => doc! { "_id": key.as_str() },
        }
    }

    pub fn matches(&self, document: &PersonDocument) -> bool {
        match self {
            PersonFilter::Id(id) => document.id == Some(id.object_id()),
            PersonFilter::RawKey(_) => false,
        }
    }
}

/// Persistence seam for person records. Every method is a single store
/// round-trip; implementations must be safe to share across handlers.
#[async_trait]
pub trait PersonStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<PersonDocument>, PersonError>;

    async fn find_one(&self, filter: &PersonFilter) -> Result<Option<PersonDocument>, PersonError>;

    /// Inserts without an `_id` and returns the one the store assigned.
    async fn insert(&self, person: &PersonDocument) -> Result<PersonId, PersonError>;

    /// Replaces the non-id fields of the first match. Returns the matched count.
    async fn update_one(
        &self,
        filter: &PersonFilter,
        person: &PersonDocument,
    ) -> Result<u64, PersonError>;

    /// Returns the deleted count.
    async fn delete_one(&self, filter: &PersonFilter) -> Result<u64, PersonError>;

    async fn ping(&self) -> Result<(), PersonError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn by_key_parses_valid_ids() {
        let oid = ObjectId::new();
        let filter = PersonFilter::by_key(&oid.to_hex());
        assert_eq!(filter, PersonFilter::Id(PersonId::from(oid)));
        assert_eq!(filter.to_document(), doc! { "_id": oid });
    }

    #[test]
    fn by_key_keeps_malformed_keys_raw() {
        let filter = PersonFilter::by_key("not-an-id");
        assert_eq!(filter.to_document(), doc! { "_id": "not-an-id" });
        assert!(!filter.matches(&PersonDocument {
            id: Some(ObjectId::new()),
            ..Default::default()
        }));
    }

    #[test]
    fn id_filter_matches_only_its_record() {
        let oid = ObjectId::new();
        let filter = PersonFilter::by_id(oid.into());
        let hit = PersonDocument {
            id: Some(oid),
            ..Default::default()
        };
        let miss = PersonDocument {
            id: Some(ObjectId::new()),
            ..Default::default()
        };
        assert!(filter.matches(&hit));
        assert!(!filter.matches(&miss));
        assert!(!filter.matches(&PersonDocument::default()));
    }
}
