//! FILENAME: core/records/src/record.rs
//! PURPOSE: A flat key/value record as supplied by the remote API.
//! CONTEXT: Records are immutable inputs to the view pipeline. A record is
//! identified by the id of the entity it was built from (channel id, peer
//! pubkey, ...).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// Identity of the entity behind a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId(value.to_string())
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        RecordId(value.to_string())
    }
}

/// Shared blank value returned for absent keys.
static EMPTY: FieldValue = FieldValue::Empty;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub fields: FxHashMap<String, FieldValue>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Record {
            id: id.into(),
            fields: FxHashMap::default(),
        }
    }

    /// Builder-style field setter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Returns the value stored under `key`, or None if the key is absent.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Returns the value under `key`, treating an absent key as `Empty`.
    pub fn value(&self, key: &str) -> &FieldValue {
        self.fields.get(key).unwrap_or(&EMPTY)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let record = Record::new("123x1x0")
            .with("capacity", 1_000_000.0)
            .with("peerAlias", "ACINQ")
            .with("active", true);

        assert_eq!(record.len(), 3);
        assert_eq!(record.get("capacity"), Some(&FieldValue::Number(1_000_000.0)));
        assert_eq!(record.value("peerAlias").as_str(), Some("ACINQ"));
    }

    #[test]
    fn absent_key_reads_as_empty() {
        let record = Record::new(1u64);
        assert!(record.get("missing").is_none());
        assert_eq!(record.value("missing"), &FieldValue::Empty);
    }
}
