//! Schema-less record payloads for insert and update.
//!
//! sObjects have open-ended field sets, so a record is an insertion-ordered
//! list of `field -> FieldValue` pairs rather than a fixed struct.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Number;

/// A single field value. Serialized untagged, so it appears in the body as a
/// plain JSON string, number, boolean or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Number(Number),
    Bool(bool),
    Null,
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Number(value.into())
    }
}

/// Non-finite floats have no JSON form and become `Null`.
impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(FieldValue::Null, FieldValue::Number)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Record::default()
    }

    /// Builder-style `set`.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Insert a field, replacing the value in place if the name already exists.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        let index = self.fields.iter().position(|(existing, _)| existing == name)?;
        Some(self.fields.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.set(name, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_insertion_order() {
        let record = Record::new()
            .field("Name", "Acme")
            .field("NumberOfEmployees", 42)
            .field("IsActive__c", true)
            .field("Description", None::<&str>);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"Name":"Acme","NumberOfEmployees":42,"IsActive__c":true,"Description":null}"#
        );
    }

    #[test]
    fn set_replaces_existing_field_in_place() {
        let mut record = Record::new().field("A", 1).field("B", 2);
        record.set("A", "one");
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("A"), Some(&FieldValue::from("one")));
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"A":"one","B":2}"#);
    }

    #[test]
    fn remove_drops_field() {
        let mut record: Record = [("Name", "Acme"), ("Site", "HQ")].into_iter().collect();
        assert_eq!(record.remove("Name"), Some(FieldValue::from("Acme")));
        assert!(record.remove("Name").is_none());
        assert_eq!(record.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec!["Site"]);
    }

    #[test]
    fn non_finite_float_becomes_null() {
        assert_eq!(FieldValue::from(f64::NAN), FieldValue::Null);
        assert_eq!(
            serde_json::to_string(&FieldValue::from(2.5)).unwrap(),
            "2.5"
        );
    }

    #[test]
    fn field_value_deserializes_untagged() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"["x", 3, false, null]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::from("x"),
                FieldValue::from(3),
                FieldValue::Bool(false),
                FieldValue::Null
            ]
        );
    }
}
