//! Record confidence: how much downstream consumers should trust one
//! normalized record relative to records from other sources.

use std::collections::BTreeMap;

use serde_json::Value;

use ivr_model::{SourceTag, value_is_present};

/// The core identity fields a usable record needs. Completeness is measured
/// against this set, not against every field the source happened to carry.
pub const CORE_FIELDS: &[&str] = &[
    "patient_first_name",
    "patient_last_name",
    "patient_member_id",
    "payer_name",
    "payer_id",
];

/// Completeness over [`CORE_FIELDS`] scaled by the source's reliability,
/// clamped to [0.0, 1.0].
#[must_use]
pub fn score(fields: &BTreeMap<String, Value>, source: SourceTag) -> f64 {
    let filled = CORE_FIELDS
        .iter()
        .filter(|f| value_is_present(fields.get(**f)))
        .count();
    let completeness = filled as f64 / CORE_FIELDS.len() as f64;
    (completeness * source.reliability()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), json!(v)))
            .collect()
    }

    #[test]
    fn full_record_scores_the_source_reliability() {
        let full = fields(&[
            ("patient_first_name", "John"),
            ("patient_last_name", "Smith"),
            ("patient_member_id", "MBR123"),
            ("payer_name", "Aetna"),
            ("payer_id", "AETNA"),
        ]);
        let score = score(&full, SourceTag::EligibilityResponse);
        assert!((score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_records_scale_down() {
        let partial = fields(&[("patient_first_name", "John"), ("payer_name", "Aetna")]);
        let score = score(&partial, SourceTag::InsuranceCard);
        assert!((score - 0.4 * 0.9).abs() < 1e-9);
    }

    #[test]
    fn empty_record_scores_zero() {
        assert!(score(&BTreeMap::new(), SourceTag::ManualEntry) < f64::EPSILON);
    }
}
