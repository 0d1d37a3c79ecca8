//! End-to-end extraction over realistic order-form text.

use ivr_extract::{extract_order_form_data, parse_money};
use ivr_patterns::PatternRegistry;
use proptest::prelude::*;

#[test]
fn extremity_care_order_form_end_to_end() {
    let registry = PatternRegistry::builtin();
    let text = "\
ExtremityCare Order Form
www.extremitycare.com
Facility Name: Sunrise Wound Clinic
Requesting Provider: Dr. John Smith
Order Date: 03/15/2024
NPI Number: 1234567890

Restorigin™ Amnion Patch, Thin 2x2cm 4 units $3,760.61
";
    let result = extract_order_form_data(text, &registry).unwrap();

    assert_eq!(result.manufacturer.as_deref(), Some("Extremity Care"));
    assert_eq!(result.confidence_score, 100);
    assert_eq!(result.field("facility_name"), Some("Sunrise Wound Clinic"));
    assert_eq!(result.field("requesting_provider"), Some("Dr. John Smith"));
    assert_eq!(result.field("order_date"), Some("03/15/2024"));
    assert_eq!(result.field("npi_number"), Some("1234567890"));

    assert_eq!(result.products.len(), 1);
    let product = &result.products[0];
    assert_eq!(product.name, "Restorigin™ Amnion Patch, Thin");
    assert_eq!(product.size, "2x2cm");
    assert_eq!(product.quantity, 4);
    assert!((product.unit_price - 3760.61).abs() < 1e-9);
}

#[test]
fn medlife_form_uses_its_fixed_product_name() {
    let registry = PatternRegistry::builtin();
    let text = "\
MEDLIFE SOLUTIONS order sheet (medlifesol.com)
Company/Facility: Lakeside Surgical
Contact Name: Maria Gonzales
AmnioAMP-MP 4 sq cm 2x2 cm 3
";
    let result = extract_order_form_data(text, &registry).unwrap();

    assert_eq!(result.manufacturer.as_deref(), Some("MedLife Solutions"));
    assert_eq!(result.field("facility_name"), Some("Lakeside Surgical"));
    assert_eq!(result.products.len(), 1);
    assert_eq!(result.products[0].name, "AmnioAMP-MP");
    assert_eq!(result.products[0].size, "2x2 cm");
    assert_eq!(result.products[0].quantity, 3);
}

#[test]
fn malformed_rows_degrade_without_failing() {
    let registry = PatternRegistry::builtin();
    let text = "\
extremitycare.com
Facility Name: Sunrise Wound Clinic
Dermal Graft 4x4cm 2 TBD
Mystery Item 3x3cm 0 $50.00
";
    let result = extract_order_form_data(text, &registry).unwrap();

    // The TBD price defaults to zero but the line survives; the zero-quantity
    // line is dropped. Both get a warning.
    assert_eq!(result.products.len(), 1);
    assert_eq!(result.products[0].name, "Dermal Graft");
    assert!((result.products[0].unit_price - 0.0).abs() < f64::EPSILON);
    assert!(result.warnings.iter().any(|w| w.contains("TBD")));
    assert!(result.warnings.iter().any(|w| w.contains("Mystery Item")));
}

#[test]
fn empty_input_yields_an_empty_result() {
    let registry = PatternRegistry::builtin();
    let result = extract_order_form_data("   \n\t", &registry).unwrap();
    assert!(result.manufacturer.is_none());
    assert_eq!(result.confidence_score, 0);
    assert!(result.extracted_fields.is_empty());
    assert!(result.products.is_empty());
    assert!(!result.warnings.is_empty());
}

#[test]
fn unidentified_text_falls_back_to_generic_labels() {
    let registry = PatternRegistry::builtin();
    let text = "Clinic Name: Harbor Health\nPhone: (512) 555-0142\n";
    let result = extract_order_form_data(text, &registry).unwrap();

    assert!(result.manufacturer.is_none());
    assert_eq!(result.field("facility_name"), Some("Harbor Health"));
    assert_eq!(result.field("phone"), Some("(512) 555-0142"));
    assert!(result.warnings.iter().any(|w| w.contains("generic")));
}

#[test]
fn bare_contact_details_are_recovered_without_labels() {
    let registry = PatternRegistry::builtin();
    let text = "Please reach us at billing@harborhealth.org or 512.555.0142 with questions.\n";
    let result = extract_order_form_data(text, &registry).unwrap();

    assert!(result.manufacturer.is_none());
    assert_eq!(result.field("email"), Some("billing@harborhealth.org"));
    assert_eq!(result.field("phone"), Some("512.555.0142"));
}

proptest! {
    #[test]
    fn money_parsing_never_panics(raw in ".{0,32}") {
        if let Some(amount) = parse_money(&raw) {
            prop_assert!(amount >= 0.0);
            prop_assert!(amount.is_finite());
        }
    }

    #[test]
    fn extraction_never_panics_on_arbitrary_text(text in "(?s).{0,256}") {
        let registry = PatternRegistry::builtin();
        let result = extract_order_form_data(&text, &registry).unwrap();
        prop_assert!(result.confidence_score <= 100);
        for product in &result.products {
            prop_assert!(product.is_valid());
        }
    }
}
