use crate::dtos::{Person, PersonInput};
use crate::error::PersonError;
use crate::models::PersonId;
use crate::services::store::{PersonFilter, PersonStore};
use std::sync::Arc;

/// Maps the five people operations onto a [`PersonStore`].
#[derive(Clone)]
pub struct PeopleService {
    store: Arc<dyn PersonStore>,
}

impl PeopleService {
    pub fn new(store: Arc<dyn PersonStore>) -> Self {
        Self { store }
    }

    /// All records in the store's natural order.
    pub async fn list(&self) -> Result<Vec<Person>, PersonError> {
        let documents = self.store.find_all().await?;
        Ok(documents.into_iter().map(Person::from).collect())
    }

    /// Malformed ids are rejected before the store is consulted.
    pub async fn get_by_id(&self, id: &str) -> Result<Person, PersonError> {
        let person_id = id
            .parse::<PersonId>()
            .map_err(|source| PersonError::InvalidIdentifier {
                id: id.to_owned(),
                source,
            })?;

        self.store
            .find_one(&PersonFilter::by_id(person_id))
            .await?
            .map(Person::from)
            .ok_or_else(|| PersonError::NotFound(person_id.to_string()))
    }

    /// Any id in `person` is discarded in favour of the store-assigned one.
    pub async fn create(&self, person: PersonInput) -> Result<Person, PersonError> {
        let mut document = person.into_document();
        let id = self.store.insert(&document).await?;
        document.id = Some(id.object_id());

        tracing::info!(person_id = %id, "Person created");
        Ok(Person::from(document))
    }

    /// Echoes `person` back without re-reading. A key that matches nothing is
    /// not an error.
    pub async fn update(
        &self,
        id: &str,
        person: PersonInput,
    ) -> Result<PersonInput, PersonError> {
        let matched = self
            .store
            .update_one(&PersonFilter::by_key(id), &person.clone().into_document())
            .await?;

        if matched == 0 {
            tracing::debug!(person_id = %id, "Update matched no person");
        }
        Ok(person)
    }

    /// Succeeds whether or not a record was removed.
    pub async fn delete(&self, id: &str) -> Result<(), PersonError> {
        let deleted = self.store.delete_one(&PersonFilter::by_key(id)).await?;

        if deleted == 0 {
            tracing::debug!(person_id = %id, "Delete matched no person");
        }
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), PersonError> {
        self.store.ping().await
    }
}
