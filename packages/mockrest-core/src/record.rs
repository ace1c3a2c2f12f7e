//! Fixture record representation.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::StoreError;

/// A single fixture record: an integer id plus arbitrary JSON fields.
///
/// Serializes as one flat JSON object, e.g. `{"id": 1, "name": "Link", "address_ids": [1]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Record id, unique within its collection
    pub id: u64,
    /// Every other field
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Creates a record with no fields besides its id.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            fields: Map::new(),
        }
    }

    /// Builds a record from a JSON object that carries its own `id`.
    ///
    /// # Arguments
    /// * `collection` - Collection name, used for error reporting
    /// * `value` - JSON object with an integer (or integer string) `id`
    pub fn from_value(collection: &str, value: Value) -> Result<Self, StoreError> {
        let Value::Object(mut fields) = value else {
            return Err(StoreError::InvalidRecord {
                collection: collection.to_string(),
                reason: "record is not a JSON object".to_string(),
            });
        };
        let id = fields
            .remove("id")
            .as_ref()
            .and_then(parse_id)
            .ok_or_else(|| StoreError::InvalidRecord {
                collection: collection.to_string(),
                reason: "record has no integer id".to_string(),
            })?;
        Ok(Self { id, fields })
    }

    /// Returns a field value; `"id"` resolves to the record id.
    pub fn get(&self, field: &str) -> Option<Value> {
        if field == "id" {
            return Some(Value::from(self.id));
        }
        self.fields.get(field).cloned()
    }

    /// Shallow merge: every key in `attrs` overwrites the current value,
    /// keys not present in `attrs` are left alone. The id never changes.
    pub fn merge(&mut self, attrs: &Map<String, Value>) {
        for (key, value) in attrs {
            if key == "id" {
                continue;
            }
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// Returns true if every filter matches this record.
    ///
    /// A filter matches when the field equals the filter value, or when
    /// both render to the same string (query strings carry `"1"` for `1`).
    pub fn matches(&self, filters: &Map<String, Value>) -> bool {
        filters.iter().all(|(key, expected)| match self.get(key) {
            Some(actual) => values_match(&actual, expected),
            None => false,
        })
    }

    /// Returns the ids stored in an array-of-ids field such as `address_ids`.
    pub fn ids_in(&self, field: &str) -> Vec<u64> {
        match self.fields.get(field) {
            Some(Value::Array(items)) => items.iter().filter_map(parse_id).collect(),
            Some(other) => parse_id(other).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Converts the record into its flat JSON form.
    pub fn to_value(&self) -> Value {
        let mut object = Map::with_capacity(self.fields.len() + 1);
        object.insert("id".to_string(), Value::from(self.id));
        for (key, value) in &self.fields {
            object.insert(key.clone(), value.clone());
        }
        Value::Object(object)
    }
}

/// Parses a record id from a JSON number or a numeric string.
pub fn parse_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn values_match(actual: &Value, expected: &Value) -> bool {
    if actual == expected {
        return true;
    }
    match (actual, expected) {
        (Value::Array(items), other) if !other.is_array() => {
            items.iter().any(|item| values_match(item, other))
        }
        (Value::String(a), Value::String(b)) => a == b,
        (a, Value::String(b)) => scalar_string(a).is_some_and(|a| a == *b),
        (Value::String(a), b) => scalar_string(b).is_some_and(|b| *a == b),
        _ => false,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
