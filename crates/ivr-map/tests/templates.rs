//! Built-in template rule sets applied to canonical records.

use ivr_map::{MappingEngine, TransformerRegistry, validate_template_completeness};
use ivr_model::get_path;
use ivr_patterns::PatternRegistry;
use proptest::prelude::*;
use serde_json::json;

fn canonical_record() -> serde_json::Value {
    json!({
        "patient_first_name": "John",
        "patient_last_name": "Smith",
        "patient_dob": "03/15/1965",
        "payer_name": "BCBS of Texas",
        "patient_member_id": "ZGP123456789",
        "group_number": "GRP-007",
        "payer_phone": "18005551234",
        "provider_name": "Dr. Jane Doe",
        "provider_npi": "1992837465",
        "facility_name": "Sunrise Wound Clinic",
        "facility_address": "500 Lakeshore Blvd",
        "order_date": "03/20/2024"
    })
}

#[test]
fn esign_template_builds_nested_output_with_defaults() {
    let registry = PatternRegistry::builtin();
    let transformers = TransformerRegistry::builtin();
    let engine = MappingEngine::for_template(&registry, "esign_ivr", &transformers).unwrap();
    let outcome = engine.apply(&canonical_record());

    let output = &outcome.output;
    assert_eq!(
        get_path(output, "patientInfo.patientName"),
        Some(&json!("John Smith"))
    );
    assert_eq!(
        get_path(output, "patientInfo.dateOfBirth"),
        Some(&json!("1965-03-15"))
    );
    assert_eq!(
        get_path(output, "insuranceInfo.primaryInsurance.primaryInsuranceName"),
        Some(&json!("Blue Cross Blue Shield"))
    );
    assert_eq!(
        get_path(output, "insuranceInfo.primaryInsurance.payerPhone"),
        Some(&json!("(800) 555-1234"))
    );
    assert_eq!(
        get_path(output, "orderInfo.orderDate"),
        Some(&json!("2024-03-20"))
    );
    // Post-processing defaults.
    assert_eq!(
        get_path(output, "patientInfo.consentToTreat"),
        Some(&json!(true))
    );
    assert!(get_path(output, "submissionDate").is_some());
}

#[test]
fn coverage_template_carries_fixed_resource_fields() {
    let registry = PatternRegistry::builtin();
    let transformers = TransformerRegistry::builtin();
    let engine = MappingEngine::for_template(&registry, "coverage_record", &transformers).unwrap();
    let record = json!({
        "patient_fhir_id": "pat-42",
        "payer_name": "Aetna",
        "patient_member_id": "mbr9",
        "group_number": "G-1"
    });
    let outcome = engine.apply(&record);

    let output = &outcome.output;
    assert_eq!(
        get_path(output, "subscriber.reference"),
        Some(&json!("Patient/pat-42"))
    );
    assert_eq!(
        get_path(output, "beneficiary.reference"),
        Some(&json!("Patient/pat-42"))
    );
    assert_eq!(get_path(output, "payor.0.display"), Some(&json!("Aetna")));
    assert_eq!(get_path(output, "identifier.0.value"), Some(&json!("MBR9")));
    assert_eq!(get_path(output, "resourceType"), Some(&json!("Coverage")));
    assert_eq!(get_path(output, "status"), Some(&json!("active")));
}

#[test]
fn quick_intake_flattens_nested_template_output() {
    let registry = PatternRegistry::builtin();
    let transformers = TransformerRegistry::builtin();
    let engine = MappingEngine::for_template(&registry, "quick_intake", &transformers).unwrap();
    let record = json!({
        "patientInfo": {"firstName": "maria", "lastName": "gonzales"},
        "insuranceInfo": {"primaryInsurance": {"name": "Humana", "memberId": "H-77"}}
    });
    let outcome = engine.apply(&record);

    let output = &outcome.output;
    assert_eq!(get_path(output, "patient_first_name"), Some(&json!("Maria")));
    assert_eq!(get_path(output, "patient_last_name"), Some(&json!("Gonzales")));
    assert_eq!(get_path(output, "payer_name"), Some(&json!("Humana")));
    assert_eq!(get_path(output, "patient_member_id"), Some(&json!("H-77")));
}

#[test]
fn missing_npi_surfaces_in_output_and_completeness() {
    let registry = PatternRegistry::builtin();
    let transformers = TransformerRegistry::builtin();
    let engine = MappingEngine::for_template(&registry, "esign_ivr", &transformers).unwrap();

    let mut record = canonical_record();
    record
        .as_object_mut()
        .expect("record is an object")
        .remove("provider_npi");
    let outcome = engine.apply(&record);
    assert_eq!(get_path(&outcome.output, "providerInfo.providerNPI"), None);
    assert!(outcome
        .unmapped
        .contains(&"providerInfo.providerNPI".to_string()));

    let report =
        validate_template_completeness(&registry, "Imbed Biosciences", "esign_ivr", &record)
            .unwrap();
    assert!(!report.can_proceed);
    assert!(report.missing.contains(&"providerInfo.providerNPI".to_string()));
    assert!(report
        .critical_missing
        .contains(&"providerInfo.providerNPI".to_string()));
}

proptest! {
    #[test]
    fn completeness_percent_tracks_missing_count(
        have_first in any::<bool>(),
        have_dob in any::<bool>(),
        have_payer in any::<bool>(),
        have_member in any::<bool>(),
        have_npi in any::<bool>(),
        have_facility in any::<bool>(),
    ) {
        let registry = PatternRegistry::builtin();
        let mut record = serde_json::Map::new();
        record.insert("patient_last_name".to_string(), json!("Smith"));
        if have_first { record.insert("patient_first_name".to_string(), json!("John")); }
        if have_dob { record.insert("patient_dob".to_string(), json!("1965-03-15")); }
        if have_payer { record.insert("payer_name".to_string(), json!("Aetna")); }
        if have_member { record.insert("patient_member_id".to_string(), json!("M1")); }
        if have_npi { record.insert("provider_npi".to_string(), json!("1992837465")); }
        if have_facility { record.insert("facility_name".to_string(), json!("Clinic")); }

        let report = validate_template_completeness(
            &registry,
            "Skye Biologics",
            "esign_ivr",
            &serde_json::Value::Object(record),
        )
        .unwrap();

        let required = report.available.len() + report.missing.len();
        prop_assert_eq!(required, 6);
        let expected = 100.0 * report.available.len() as f64 / required as f64;
        prop_assert!((report.completeness_percent - expected).abs() < 1e-9);
        prop_assert_eq!(report.can_proceed, report.missing.is_empty());
        for field in &report.critical_missing {
            prop_assert!(report.missing.contains(field));
        }
    }
}
