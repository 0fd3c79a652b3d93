//! Record domain types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field_map::FieldMap;

/// Opaque record identifier assigned by the record store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Opaque identifier of the authenticated principal that owns a record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for OwnerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A persisted record as returned by the record store.
///
/// Editable attributes live in `fields`; on the wire they sit next to `id`
/// and `owner`, e.g. `{"id":"abc","owner":"u1","name":"Widget"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerId>,

    #[serde(flatten)]
    pub fields: FieldMap,
}

impl Record {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            owner: None,
            fields: FieldMap::new(),
        }
    }

    pub fn with_owner(mut self, owner: OwnerId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.set(name, value);
        self
    }

    /// Value of an editable attribute, if the record has one
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.fields.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = Record::new("abc")
            .with_owner(OwnerId::new("u1"))
            .with_field("name", "Widget");

        assert_eq!(record.id.as_str(), "abc");
        assert_eq!(record.owner, Some(OwnerId::new("u1")));
        assert_eq!(record.attribute("name"), Some("Widget"));
        assert_eq!(record.attribute("color"), None);
    }

    #[test]
    fn test_record_json_is_flat() {
        let record = Record::new("abc").with_field("name", "Widget");
        let value = serde_json::to_value(&record).expect("serialization failed");

        assert_eq!(value["id"], "abc");
        assert_eq!(value["name"], "Widget");
        assert!(value.get("owner").is_none());
        assert!(value.get("fields").is_none());
    }

    #[test]
    fn test_record_parses_seed_json() {
        let json = r#"{"id":"abc","owner":"u1","name":"Widget","color":"red"}"#;
        let record: Record = serde_json::from_str(json).expect("invalid JSON");

        assert_eq!(record.id, RecordId::from("abc"));
        assert_eq!(record.owner.as_ref().map(OwnerId::as_str), Some("u1"));
        assert_eq!(record.attribute("name"), Some("Widget"));
        assert_eq!(record.attribute("color"), Some("red"));
    }
}
