//! Multi-source merge: one record per field vocabulary slot, with provenance.

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::Value;

use ivr_model::{CanonicalRecord, MergeMetadata, MergedRecord, SourceTag, value_is_present};

use crate::error::NormalizeError;

/// Merges normalized records into one, field by field. A later record only
/// replaces a field when its record confidence is strictly higher, so ties
/// keep the earlier source and input order is a stable priority order.
pub fn merge_records(records: &[CanonicalRecord]) -> Result<MergedRecord, NormalizeError> {
    if records.is_empty() {
        return Err(NormalizeError::NoRecords);
    }

    let mut winners: BTreeMap<String, (Value, SourceTag, f64)> = BTreeMap::new();
    for record in records {
        let confidence = record.metadata.confidence_score;
        for (field, value) in &record.fields {
            if !value_is_present(Some(value)) {
                continue;
            }
            let replace = winners
                .get(field)
                .is_none_or(|(_, _, existing)| confidence > *existing);
            if replace {
                winners.insert(
                    field.clone(),
                    (value.clone(), record.metadata.source, confidence),
                );
            }
        }
    }

    let mut fields = BTreeMap::new();
    let mut field_sources = BTreeMap::new();
    for (field, (value, source, _)) in winners {
        fields.insert(field.clone(), value);
        field_sources.insert(field, source);
    }

    tracing::debug!(
        records = records.len(),
        fields = fields.len(),
        "merged canonical records"
    );

    Ok(MergedRecord {
        fields,
        metadata: MergeMetadata {
            merged_from: records.iter().map(|r| r.metadata.source).collect(),
            merged_at: Utc::now().to_rfc3339(),
            field_sources,
        },
    })
}
