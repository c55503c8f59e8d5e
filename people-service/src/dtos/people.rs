use crate::models::{PersonDocument, PersonId};
use serde::{Deserialize, Serialize};

/// JSON shape of a stored person returned by the HTTP surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Person {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PersonId>,
    pub name: String,
    pub age: i64,
    pub address: String,
}

/// JSON body accepted by create and update.
///
/// Absent fields decode to their zero values and unknown fields are ignored;
/// only a wrong JSON type fails decoding. `id` is opaque: create discards it
/// and update echoes it back untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub age: i64,
    pub address: String,
}

impl PersonInput {
    /// Stored shape without an id; the store assigns one on insert.
    pub fn into_document(self) -> PersonDocument {
        PersonDocument {
            id: None,
            name: self.name,
            age: self.age,
            address: self.address,
        }
    }
}

impl From<PersonDocument> for Person {
    fn from(document: PersonDocument) -> Self {
        Self {
            id: document.id.map(PersonId::from),
            name: document.name,
            age: document.age,
            address: document.address,
        }
    }
}
