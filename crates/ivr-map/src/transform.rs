//! Named value transformers applied by mapping rules.
//!
//! A transformer sees the located value, the rule that located it, and the
//! whole source record, so it can compose values the rule's paths alone
//! cannot (full names, assembled addresses).

use std::collections::BTreeMap;

use serde_json::Value;

use ivr_model::{MappingRule, get_path};
use ivr_normalize::{normalize_date, normalize_phone};
use ivr_patterns::standardize_payer_name;

use crate::error::MapError;

pub type TransformFn = fn(&Value, &MappingRule, &Value) -> Value;

/// Registry of transformers addressable by name from mapping rules.
pub struct TransformerRegistry {
    transformers: BTreeMap<&'static str, TransformFn>,
}

impl TransformerRegistry {
    /// The built-in transformer set.
    #[must_use]
    pub fn builtin() -> Self {
        let mut transformers: BTreeMap<&'static str, TransformFn> = BTreeMap::new();
        transformers.insert("full_name", full_name);
        transformers.insert("date", date);
        transformers.insert("phone", phone);
        transformers.insert("payer_name", payer_name);
        transformers.insert("address", address);
        Self { transformers }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<TransformFn> {
        self.transformers.get(name).copied()
    }

    /// Checks that every transformer a rule set names exists. Run when a rule
    /// set is bound so a typo in configuration fails fast instead of
    /// degrading silently per record.
    pub fn check_rules(&self, rules: &[MappingRule]) -> Result<(), MapError> {
        for rule in rules {
            if let Some(name) = &rule.transform
                && self.get(name).is_none()
            {
                return Err(MapError::UnknownTransformer {
                    target_field: rule.target_field.clone(),
                    transform: name.clone(),
                });
            }
        }
        Ok(())
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Composes "First Last" from the record when both parts exist; otherwise
/// passes the located value through.
fn full_name(value: &Value, _rule: &MappingRule, record: &Value) -> Value {
    let first = get_path(record, "patient_first_name").and_then(as_text);
    let last = get_path(record, "patient_last_name").and_then(as_text);
    match (first, last) {
        (Some(first), Some(last)) => Value::String(format!("{first} {last}")),
        (Some(only), None) | (None, Some(only)) => Value::String(only),
        (None, None) => value.clone(),
    }
}

/// ISO date or null; mapping output never carries half-parsed dates.
fn date(value: &Value, _rule: &MappingRule, _record: &Value) -> Value {
    as_text(value)
        .and_then(|raw| normalize_date(&raw))
        .map_or(Value::Null, Value::String)
}

/// US phone format when parseable; the original text otherwise.
fn phone(value: &Value, _rule: &MappingRule, _record: &Value) -> Value {
    match as_text(value) {
        Some(raw) => match normalize_phone(&raw) {
            Some(formatted) => Value::String(formatted),
            None => Value::String(raw),
        },
        None => value.clone(),
    }
}

fn payer_name(value: &Value, _rule: &MappingRule, _record: &Value) -> Value {
    match as_text(value) {
        Some(raw) => Value::String(standardize_payer_name(&raw)),
        None => value.clone(),
    }
}

/// Uses the located value when present, otherwise assembles an address from
/// the sibling fields of the rule's primary path (`facility_address` pulls in
/// `facility_city`, `facility_state`, `facility_zip`).
fn address(value: &Value, rule: &MappingRule, record: &Value) -> Value {
    if let Some(text) = as_text(value) {
        return Value::String(text);
    }
    let Some(stem) = rule.primary_path.strip_suffix("_address") else {
        return value.clone();
    };
    let parts: Vec<String> = ["address", "city", "state", "zip"]
        .iter()
        .filter_map(|suffix| get_path(record, &format!("{stem}_{suffix}")).and_then(as_text))
        .collect();
    if parts.is_empty() {
        Value::Null
    } else {
        Value::String(parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_transformer_fails_rule_binding() {
        let registry = TransformerRegistry::builtin();
        let rules = vec![
            MappingRule::path("a", "x").with_transform("date"),
            MappingRule::path("b", "y").with_transform("rot13"),
        ];
        let err = registry.check_rules(&rules).unwrap_err();
        assert!(matches!(err, MapError::UnknownTransformer { .. }));
    }

    #[test]
    fn full_name_composes_from_the_record() {
        let record = json!({"patient_first_name": "John", "patient_last_name": "Smith"});
        let rule = MappingRule::path("patientInfo.patientName", "patient_first_name");
        let out = full_name(&json!("John"), &rule, &record);
        assert_eq!(out, json!("John Smith"));
    }

    #[test]
    fn address_assembles_sibling_fields() {
        let record = json!({
            "facility_city": "Austin",
            "facility_state": "TX",
            "facility_zip": "78701"
        });
        let rule = MappingRule::path("facilityInfo.facilityAddress", "facility_address");
        let out = address(&Value::Null, &rule, &record);
        assert_eq!(out, json!("Austin, TX, 78701"));
    }

    #[test]
    fn date_transformer_nulls_unparseable_input() {
        let rule = MappingRule::path("patientInfo.dateOfBirth", "patient_dob");
        assert_eq!(date(&json!("03/15/1965"), &rule, &json!({})), json!("1965-03-15"));
        assert_eq!(date(&json!("spring"), &rule, &json!({})), Value::Null);
    }
}
