use mongodb::bson::{doc, oid, oid::ObjectId, Document};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Store-assigned identifier of a person, rendered as 24 lowercase hex chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersonId(ObjectId);

impl PersonId {
    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for PersonId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

impl FromStr for PersonId {
    type Err = oid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s).map(Self)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for PersonId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for PersonId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Stored shape of a person in the `people` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: i64,
    #[serde(default)]
    pub address: String,
}

impl PersonDocument {
    /// `$set` update replacing every field except `_id`.
    pub fn replacement(&self) -> Document {
        doc! {
            "$set": {
                "name": self.name.as_str(),
                "age": self.age,
                "address": self.address.as_str(),
            }
        }
    }
}
