use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A person record.
///
/// Apart from the store identifier the record is an opaque JSON object:
/// whatever fields a client sends are stored and returned unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Bson>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Person {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { id: None, fields }
    }

    pub fn with_id(mut self, id: impl Into<Bson>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// True when every field of `other` is present here with the same
    /// value, ignoring identifiers.
    pub fn contains_fields_of(&self, other: &Person) -> bool {
        other
            .fields
            .iter()
            .all(|(k, v)| self.fields.get(k) == Some(v))
    }
}
