//! Insertion-ordered field map
//!
//! Used for both form values and validation messages. Order is the order in
//! which fields were first inserted, which for a form is the declared field
//! order. Serializes as a JSON object with that order preserved.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered `name -> value` map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Insert or replace a value. Replacing keeps the original position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (k, v) in iter {
            map.set(k, v);
        }
        map
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct FieldMapVisitor;

impl<'de> Visitor<'de> for FieldMapVisitor {
    type Value = FieldMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of field names to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = FieldMap::new();
        while let Some((k, v)) = access.next_entry::<String, String>()? {
            map.set(k, v);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_preserves_insertion_order() {
        let mut map = FieldMap::new();
        map.set("name", "Widget");
        map.set("color", "red");
        map.set("name", "Gadget");

        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["name", "color"]);
        assert_eq!(map.get("name"), Some("Gadget"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut map: FieldMap = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(map.remove("a"), Some("1".to_string()));
        assert_eq!(map.remove("a"), None);
        assert!(!map.contains("a"));
        assert!(map.contains("b"));
    }

    #[test]
    fn test_json_keeps_order() {
        let map: FieldMap = [("zeta", "1"), ("alpha", "2")].into_iter().collect();
        let json = serde_json::to_string(&map).expect("serialization failed");
        assert_eq!(json, r#"{"zeta":"1","alpha":"2"}"#);

        let back: FieldMap = serde_json::from_str(&json).expect("invalid JSON");
        assert_eq!(back.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_rejects_non_string_values() {
        let result = serde_json::from_str::<FieldMap>(r#"{"count":3}"#);
        assert!(result.is_err());
    }
}
