//! Source-specific normalization onto the canonical field vocabulary.

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::Value;

use ivr_model::{CanonicalRecord, RecordMetadata, SourceTag, get_path};
use ivr_patterns::{mac_jurisdiction, payer_id_for_name, standardize_payer_name};

use crate::confidence;
use crate::fields::{
    detect_plan_type, normalize_date, normalize_id, normalize_money, normalize_person_name,
    normalize_phone, normalize_state, split_full_name,
};
use crate::report::{IssueReason, NormalizationReport};

/// Probe order for recovering a member ID when the source mapping found none.
const MEMBER_ID_PROBES: &[&str] = &[
    "member_id",
    "patient_member_id",
    "subscriber_id",
    "id_number",
    "member_number",
    "policy_number",
];

const DATE_FIELDS: &[&str] = &["patient_dob", "date_of_service", "order_date"];
const ID_FIELDS: &[&str] = &["patient_member_id", "group_number", "provider_npi"];
const PHONE_FIELDS: &[&str] = &["payer_phone", "provider_phone", "contact_phone", "patient_phone"];
const NAME_FIELDS: &[&str] = &["patient_first_name", "patient_last_name"];
const MONEY_FIELDS: &[&str] = &["copay", "deductible", "out_of_pocket_max"];

/// Canonical field to the dot-paths probed in the raw payload, per source.
/// Paths are tried in order; the first present value wins.
fn probe_table(source: SourceTag) -> &'static [(&'static str, &'static [&'static str])] {
    match source {
        SourceTag::InsuranceCard => &[
            ("patient_name", &["patient_name", "name", "member_name"]),
            ("patient_dob", &["dob", "date_of_birth", "patient_dob"]),
            (
                "payer_name",
                &["payer_name", "insurance_name", "carrier", "plan_name"],
            ),
            ("patient_member_id", &["member_id", "id_number"]),
            ("group_number", &["group_number", "group", "grp"]),
            ("plan_type", &["plan_type"]),
            (
                "payer_phone",
                &["customer_service_phone", "member_services", "phone"],
            ),
        ],
        SourceTag::EsignSubmission => &[
            (
                "patient_first_name",
                &["patient_first_name", "fields.patient_first_name"],
            ),
            (
                "patient_last_name",
                &["patient_last_name", "fields.patient_last_name"],
            ),
            ("patient_name", &["patient_name", "fields.patient_name"]),
            ("patient_dob", &["patient_dob", "fields.patient_dob", "dob"]),
            (
                "payer_name",
                &["primary_insurance", "payer_name", "fields.insurance_name"],
            ),
            ("patient_member_id", &["member_id", "fields.member_id"]),
            ("group_number", &["group_number", "fields.group_number"]),
            ("provider_name", &["provider_name", "fields.provider_name"]),
            ("provider_npi", &["provider_npi", "fields.npi", "npi"]),
            ("facility_name", &["facility_name", "fields.facility_name"]),
        ],
        SourceTag::QuickIntake => &[
            ("patient_first_name", &["patient_first_name", "first_name"]),
            ("patient_last_name", &["patient_last_name", "last_name"]),
            ("patient_dob", &["patient_dob", "dob"]),
            ("payer_name", &["payer_name", "insurance"]),
            ("patient_member_id", &["patient_member_id", "member_id"]),
            ("group_number", &["group_number"]),
            ("patient_state", &["patient_state", "state"]),
        ],
        SourceTag::EligibilityResponse => &[
            ("patient_first_name", &["subscriber.first_name"]),
            ("patient_last_name", &["subscriber.last_name"]),
            ("patient_dob", &["subscriber.dob"]),
            ("payer_name", &["payer.name"]),
            ("payer_id", &["payer.id"]),
            ("patient_member_id", &["subscriber.member_id"]),
            (
                "group_number",
                &["plan.group_number", "coverage.group_number"],
            ),
            ("plan_type", &["plan.type"]),
            ("patient_state", &["subscriber.address.state"]),
            ("copay", &["benefits.copay", "coverage.copay"]),
            ("deductible", &["benefits.deductible", "coverage.deductible"]),
            (
                "out_of_pocket_max",
                &["benefits.out_of_pocket_max", "benefits.oop_max"],
            ),
        ],
        SourceTag::ManualEntry | SourceTag::Unknown => &[
            ("patient_first_name", &["patient_first_name"]),
            ("patient_last_name", &["patient_last_name"]),
            ("patient_name", &["patient_name"]),
            ("patient_dob", &["patient_dob"]),
            ("payer_name", &["payer_name"]),
            ("patient_member_id", &["patient_member_id", "member_id"]),
            ("group_number", &["group_number"]),
            ("plan_type", &["plan_type"]),
            ("payer_phone", &["payer_phone"]),
            ("provider_name", &["provider_name"]),
            ("provider_npi", &["provider_npi"]),
            ("facility_name", &["facility_name"]),
            ("patient_state", &["patient_state"]),
        ],
    }
}

/// Normalizes one raw source payload into a [`CanonicalRecord`], reporting
/// every field that failed to normalize instead of erroring the record.
#[must_use]
pub fn normalize_record(raw: &Value, source: SourceTag) -> (CanonicalRecord, NormalizationReport) {
    let mut report = NormalizationReport::new(source);
    let mut fields = BTreeMap::new();

    for (canonical, probes) in probe_table(source) {
        for probe in *probes {
            let Some(value) = get_path(raw, probe) else {
                continue;
            };
            match scalar_to_string(value) {
                Some(text) if !text.trim().is_empty() => {
                    fields.insert((*canonical).to_string(), Value::String(text));
                    break;
                }
                Some(_) => {}
                None => report.note(canonical, &value.to_string(), IssueReason::UnexpectedShape),
            }
        }
    }

    recover_member_id(raw, &mut fields);
    apply_common_normalizations(&mut fields, &mut report);

    report.fields_emitted = fields.len();
    tracing::debug!(
        source = %source,
        fields = report.fields_emitted,
        issues = report.issues.len(),
        "normalized source record"
    );

    let confidence_score = confidence::score(&fields, source);
    let record = CanonicalRecord {
        fields,
        metadata: RecordMetadata {
            source,
            normalized_at: Utc::now().to_rfc3339(),
            confidence_score,
        },
    };
    (record, report)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn recover_member_id(raw: &Value, fields: &mut BTreeMap<String, Value>) {
    if fields.contains_key("patient_member_id") {
        return;
    }
    for probe in MEMBER_ID_PROBES {
        if let Some(value) = get_path(raw, probe)
            && let Some(text) = scalar_to_string(value)
            && !text.trim().is_empty()
        {
            fields.insert("patient_member_id".to_string(), Value::String(text));
            return;
        }
    }
}

/// Normalizations applied after source probing, on canonical fields only.
fn apply_common_normalizations(
    fields: &mut BTreeMap<String, Value>,
    report: &mut NormalizationReport,
) {
    // A bare full name splits into first/last unless the split parts were
    // already provided by the source.
    if let Some(full) = take_str(fields, "patient_name") {
        let (first, last) = split_full_name(&full);
        if let Some(first) = first {
            fields
                .entry("patient_first_name".to_string())
                .or_insert(Value::String(first));
        }
        if let Some(last) = last {
            fields
                .entry("patient_last_name".to_string())
                .or_insert(Value::String(last));
        }
    }

    for field in NAME_FIELDS {
        if let Some(raw) = take_str(fields, field) {
            fields.insert((*field).to_string(), Value::String(normalize_person_name(&raw)));
        }
    }

    for field in DATE_FIELDS {
        if let Some(raw) = take_str(fields, field) {
            match normalize_date(&raw) {
                Some(iso) => {
                    fields.insert((*field).to_string(), Value::String(iso));
                }
                None => {
                    report.note(field, &raw, IssueReason::UnparseableDate);
                    fields.insert((*field).to_string(), Value::Null);
                }
            }
        }
    }

    // Unlike dates, malformed phones and IDs keep their best-effort text so
    // partial data is never thrown away; the report still flags them.
    for field in PHONE_FIELDS {
        if let Some(raw) = take_str(fields, field) {
            match normalize_phone(&raw) {
                Some(formatted) => {
                    fields.insert((*field).to_string(), Value::String(formatted));
                }
                None => {
                    report.note(field, &raw, IssueReason::UnparseablePhone);
                    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
                    let kept = if digits.is_empty() { raw } else { digits };
                    fields.insert((*field).to_string(), Value::String(kept));
                }
            }
        }
    }

    for field in ID_FIELDS {
        if let Some(raw) = take_str(fields, field) {
            match normalize_id(&raw) {
                Some(cleaned) => {
                    fields.insert((*field).to_string(), Value::String(cleaned));
                }
                None => {
                    report.note(field, &raw, IssueReason::UnparseableId);
                    fields.insert((*field).to_string(), Value::String(raw));
                }
            }
        }
    }

    for field in MONEY_FIELDS {
        if let Some(raw) = take_str(fields, field) {
            match normalize_money(&raw).and_then(serde_json::Number::from_f64) {
                Some(amount) => {
                    fields.insert((*field).to_string(), Value::Number(amount));
                }
                None => {
                    report.note(field, &raw, IssueReason::UnparseableAmount);
                    fields.insert((*field).to_string(), Value::String(raw));
                }
            }
        }
    }

    if let Some(raw) = take_str(fields, "payer_name") {
        let standardized = standardize_payer_name(&raw);
        if let Some(id) = payer_id_for_name(&standardized)
            && !fields.contains_key("payer_id")
        {
            fields.insert("payer_id".to_string(), Value::String(id.to_string()));
        }
        // Plan type can often be read off the card's plan description.
        if !fields.contains_key("plan_type")
            && let Some(plan) = detect_plan_type(&raw)
            && plan != "Other"
        {
            fields.insert("plan_type".to_string(), Value::String(plan.to_string()));
        }
        fields.insert("payer_name".to_string(), Value::String(standardized));
    }

    if let Some(raw) = take_str(fields, "plan_type")
        && let Some(plan) = detect_plan_type(&raw)
    {
        fields.insert("plan_type".to_string(), Value::String(plan.to_string()));
    }

    if let Some(raw) = take_str(fields, "patient_state")
        && let Some(state) = normalize_state(&raw)
    {
        fields.insert(
            "mac_jurisdiction".to_string(),
            Value::String(mac_jurisdiction(&state).to_string()),
        );
        fields.insert("patient_state".to_string(), Value::String(state));
    }
}

fn take_str(fields: &mut BTreeMap<String, Value>, field: &str) -> Option<String> {
    match fields.remove(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(other) => {
            fields.insert(field.to_string(), other);
            None
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn eligibility_payloads_probe_nested_paths() {
        let raw = json!({
            "subscriber": {
                "first_name": "JOHN",
                "last_name": "SMITH",
                "dob": "1965-03-15",
                "member_id": "mbr-123",
                "address": {"state": "tx"}
            },
            "payer": {"name": "AETNA INC", "id": "60054"}
        });
        let (record, report) = normalize_record(&raw, SourceTag::EligibilityResponse);

        assert_eq!(record.get_str("patient_first_name"), Some("John"));
        assert_eq!(record.get_str("patient_last_name"), Some("Smith"));
        assert_eq!(record.get_str("patient_member_id"), Some("MBR123"));
        assert_eq!(record.get_str("payer_name"), Some("Aetna"));
        // The payer's own ID wins over the lookup table.
        assert_eq!(record.get_str("payer_id"), Some("60054"));
        assert_eq!(record.get_str("mac_jurisdiction"), Some("JH"));
        assert!(report.is_clean());
        assert!((record.metadata.confidence_score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unparseable_values_null_out_and_report() {
        let raw = json!({
            "patient_name": "SMITH, JOHN",
            "dob": "sometime in spring",
            "payer_name": "BCBS of Texas",
            "member_id": "MBR-445",
            "customer_service_phone": "call us"
        });
        let (record, report) = normalize_record(&raw, SourceTag::InsuranceCard);

        assert_eq!(record.get_str("patient_first_name"), Some("John"));
        assert_eq!(record.get_str("patient_last_name"), Some("Smith"));
        assert_eq!(record.get_str("payer_name"), Some("Blue Cross Blue Shield"));
        assert_eq!(record.get_str("payer_id"), Some("BCBS"));
        assert_eq!(record.get("patient_dob"), Some(&Value::Null));
        // Phones keep the original text when unparseable; only dates null out.
        assert_eq!(record.get_str("payer_phone"), Some("call us"));
        assert_eq!(report.issues.len(), 2);
        assert!(!report.is_clean());
    }

    #[test]
    fn benefit_amounts_become_numbers() {
        let raw = json!({
            "subscriber": {"first_name": "Ana", "last_name": "Lopez", "member_id": "A1"},
            "payer": {"name": "Humana", "id": "HUM01"},
            "benefits": {"copay": "$25.00", "deductible": "1,500", "oop_max": "varies"}
        });
        let (record, report) = normalize_record(&raw, SourceTag::EligibilityResponse);

        assert_eq!(record.get("copay"), Some(&json!(25.0)));
        assert_eq!(record.get("deductible"), Some(&json!(1500.0)));
        // Non-numeric amounts keep their text and show up in the report.
        assert_eq!(record.get_str("out_of_pocket_max"), Some("varies"));
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].reason, IssueReason::UnparseableAmount);
    }

    #[test]
    fn datetime_dobs_normalize_to_plain_dates() {
        let raw = json!({
            "subscriber": {"first_name": "Ana", "last_name": "Lopez",
                           "dob": "1965-03-15T00:00:00Z", "member_id": "A1"},
            "payer": {"name": "Humana", "id": "HUM01"}
        });
        let (record, report) = normalize_record(&raw, SourceTag::EligibilityResponse);
        assert_eq!(record.get_str("patient_dob"), Some("1965-03-15"));
        assert!(report.is_clean());
    }

    #[test]
    fn member_id_recovers_from_alternate_keys() {
        let raw = json!({"policy_number": "POL 77-812"});
        let (record, _) = normalize_record(&raw, SourceTag::ManualEntry);
        assert_eq!(record.get_str("patient_member_id"), Some("POL77812"));
    }

    #[test]
    fn phone_country_code_is_stripped() {
        let raw = json!({"payer_name": "Humana", "customer_service_phone": "1-800-555-1234"});
        let (record, _) = normalize_record(&raw, SourceTag::InsuranceCard);
        assert_eq!(record.get_str("payer_phone"), Some("(800) 555-1234"));
        assert_eq!(record.get_str("payer_id"), Some("HUMANA"));
    }
}
