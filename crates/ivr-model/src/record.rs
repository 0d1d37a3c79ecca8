//! Canonical records: the shared field vocabulary all sources normalize into.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::source::SourceTag;

/// Metadata attached to every normalized record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub source: SourceTag,
    /// ISO 8601 timestamp of normalization.
    pub normalized_at: String,
    /// Completeness/trust score in [0.0, 1.0].
    pub confidence_score: f64,
}

/// A record in the canonical field vocabulary (e.g. `patient_first_name`,
/// `payer_id`, `group_number`), produced by normalizing one raw source record.
///
/// Values are JSON scalars or small lists; consumers never mutate a record in
/// place, merging always produces a new [`MergedRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
    #[serde(rename = "_metadata")]
    pub metadata: RecordMetadata,
}

impl CanonicalRecord {
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the field as a string slice when it is a non-empty JSON string.
    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        match self.fields.get(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// True when the field is present and neither null nor an empty string.
    #[must_use]
    pub fn has_value(&self, field: &str) -> bool {
        value_is_present(self.fields.get(field))
    }
}

/// Provenance metadata for a multi-source merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeMetadata {
    /// Sources in the order they were merged.
    pub merged_from: Vec<SourceTag>,
    /// ISO 8601 timestamp of the merge.
    pub merged_at: String,
    /// Which source's value won each field.
    pub field_sources: BTreeMap<String, SourceTag>,
}

/// Result of merging N canonical records, keeping the highest-confidence value
/// per field and recording which source supplied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
    #[serde(rename = "_metadata")]
    pub metadata: MergeMetadata,
}

impl MergedRecord {
    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        match self.fields.get(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Presence test shared by confidence scoring and merging: null and empty
/// strings count as absent, everything else (including `false` and `0`) counts.
#[must_use]
pub fn value_is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}
