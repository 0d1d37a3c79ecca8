//! The pattern registry: every table the engine consults at runtime.
//!
//! Constructed once (builtin tables or a JSON override file) and shared by
//! reference across all components. Nothing here is mutated after
//! construction, so the registry is safe to share across threads without
//! locking.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use ivr_model::{ManufacturerProfile, MappingRule, ProductGroups, ProductPattern};

use crate::config::ScoringConfig;
use crate::error::PatternsError;

/// Immutable configuration for manufacturer identification, label extraction,
/// product line capture, template mapping, and completeness validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternRegistry {
    /// Profiles in registration order; identification ties break toward the
    /// earlier entry.
    manufacturers: Vec<ManufacturerProfile>,
    /// Label variants tried when no manufacturer was identified.
    generic_labels: BTreeMap<String, Vec<String>>,
    /// Product line patterns tried when manufacturer-specific ones fail.
    generic_product_patterns: Vec<ProductPattern>,
    /// Mapping rule sets keyed by target template name.
    templates: BTreeMap<String, Vec<MappingRule>>,
    /// Template target fields required for every manufacturer.
    common_required: Vec<String>,
    /// Extra required target fields per manufacturer. Reference fixture:
    /// manufacturers absent here use only the common set.
    manufacturer_required: BTreeMap<String, Vec<String>>,
    /// Always-critical target fields regardless of manufacturer.
    critical_fields: Vec<String>,
    scoring: ScoringConfig,
}

impl PatternRegistry {
    /// Loads a full registry from a JSON file (per-deployment overrides).
    pub fn from_json_file(path: &Path) -> Result<Self, PatternsError> {
        let raw = fs::read_to_string(path).map_err(|e| PatternsError::io(path, e))?;
        let registry: Self = serde_json::from_str(&raw).map_err(|e| PatternsError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
        registry.validate()?;
        Ok(registry)
    }

    fn validate(&self) -> Result<(), PatternsError> {
        let mut seen = std::collections::BTreeSet::new();
        for profile in &self.manufacturers {
            if profile.name.trim().is_empty() {
                return Err(PatternsError::InvalidRegistry {
                    message: "manufacturer with empty name".to_string(),
                });
            }
            if !seen.insert(profile.name.clone()) {
                return Err(PatternsError::DuplicateManufacturer {
                    name: profile.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Profiles in registration order.
    #[must_use]
    pub fn manufacturers(&self) -> &[ManufacturerProfile] {
        &self.manufacturers
    }

    #[must_use]
    pub fn manufacturer(&self, name: &str) -> Option<&ManufacturerProfile> {
        self.manufacturers.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn generic_labels(&self) -> &BTreeMap<String, Vec<String>> {
        &self.generic_labels
    }

    #[must_use]
    pub fn generic_product_patterns(&self) -> &[ProductPattern] {
        &self.generic_product_patterns
    }

    pub fn template_rules(&self, template: &str) -> Result<&[MappingRule], PatternsError> {
        self.templates
            .get(template)
            .map(Vec::as_slice)
            .ok_or_else(|| PatternsError::UnknownTemplate {
                name: template.to_string(),
            })
    }

    #[must_use]
    pub fn template_names(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    /// Common fields plus any manufacturer-specific extras, deduplicated and
    /// in stable order (common first).
    #[must_use]
    pub fn required_fields_for(&self, manufacturer: &str) -> Vec<String> {
        let mut required = self.common_required.clone();
        if let Some(extra) = self.manufacturer_required.get(manufacturer) {
            for field in extra {
                if !required.contains(field) {
                    required.push(field.clone());
                }
            }
        }
        required
    }

    #[must_use]
    pub fn critical_fields(&self) -> &[String] {
        &self.critical_fields
    }

    #[must_use]
    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// The built-in tables carried from the reference configuration.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            manufacturers: builtin_manufacturers(),
            generic_labels: builtin_generic_labels(),
            generic_product_patterns: builtin_generic_product_patterns(),
            templates: builtin_templates(),
            common_required: vec_of(&[
                "patientInfo.patientName",
                "patientInfo.dateOfBirth",
                "insuranceInfo.primaryInsurance.primaryInsuranceName",
                "insuranceInfo.primaryInsurance.primaryMemberId",
                "providerInfo.providerNPI",
                "facilityInfo.facilityName",
            ]),
            manufacturer_required: builtin_manufacturer_required(),
            critical_fields: vec_of(&[
                "patientInfo.patientName",
                "patientInfo.dateOfBirth",
                "insuranceInfo.primaryInsurance.primaryInsuranceName",
                "providerInfo.providerNPI",
            ]),
            scoring: ScoringConfig::default(),
        }
    }
}

fn vec_of(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn labels(pairs: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    pairs
        .iter()
        .map(|(field, variants)| ((*field).to_string(), vec_of(variants)))
        .collect()
}

fn builtin_manufacturers() -> Vec<ManufacturerProfile> {
    vec![
        ManufacturerProfile {
            name: "MedLife Solutions".to_string(),
            identifier_keywords: vec_of(&["MEDLIFE", "AmnioAMP-MP", "medlifesol.com"]),
            product_keywords: vec_of(&["AmnioAMP-MP"]),
            field_label_variants: labels(&[
                ("facility_name", &["Company/Facility"]),
                ("contact_name", &["Contact Name"]),
                ("contact_phone", &["Contact Phone"]),
                ("shipping_address", &["Address"]),
            ]),
            product_patterns: vec![ProductPattern {
                pattern: r"AmnioAMP-MP\D*?(\d+\s*sq\s*cm)\s+(\d+x\d+\s*cm)(?:\s+(\d+))?"
                    .to_string(),
                groups: ProductGroups {
                    fixed_name: Some("AmnioAMP-MP".to_string()),
                    size: Some(2),
                    quantity: Some(3),
                    ..ProductGroups::default()
                },
            }],
        },
        ManufacturerProfile {
            name: "Extremity Care".to_string(),
            identifier_keywords: vec_of(&[
                "ExtremityCare",
                "Restorigin",
                "completeFT",
                "extremitycare.com",
                "Q4191",
                "Q4271",
            ]),
            product_keywords: vec_of(&["Restorigin™", "completeFT™"]),
            field_label_variants: labels(&[
                ("facility_name", &["Facility Name"]),
                ("requesting_provider", &["Requesting Provider"]),
                ("order_date", &["Order Date"]),
                ("provider_phone", &["Provider Phone"]),
                ("patient_name", &["Patient Name/Case ID"]),
                ("email", &["Email"]),
                ("date_of_service", &["Date of Service"]),
                ("npi_number", &["NPI Number"]),
            ]),
            product_patterns: vec![ProductPattern {
                pattern: concat!(
                    r"([A-Z][A-Z\-\d]+)\s+((?:Restorigin|completeFT)[^\n]*?)\s+",
                    r"(\d+(?:\.\d+)?(?:x\d+(?:\.\d+)?)?\s*(?:cm|mm))\s+(\d+)\s+\$?([\d,]+(?:\.\d+)?)"
                )
                .to_string(),
                groups: ProductGroups {
                    sku: Some(1),
                    name: Some(2),
                    size: Some(3),
                    quantity: Some(4),
                    price: Some(5),
                    ..ProductGroups::default()
                },
            }],
        },
        ManufacturerProfile {
            name: "ACZ Distribution".to_string(),
            identifier_keywords: vec_of(&[
                "ACZ DISTRIBUTION",
                "ACZandAssociates.com",
                "ACZ & Associates",
            ]),
            product_keywords: Vec::new(),
            field_label_variants: labels(&[
                ("account_name", &["Account Name"]),
                ("contact_name", &["Contact Name"]),
                ("contact_email", &["Contact e-mail"]),
                ("contact_phone", &["Contact Number"]),
                ("order_date", &["Date of Order"]),
                ("anticipated_date", &["Anticipated Application Date"]),
                ("po_number", &["PO#"]),
                ("patient_id", &["Patient ID"]),
            ]),
            product_patterns: Vec::new(),
        },
        ManufacturerProfile {
            name: "Advanced Solution".to_string(),
            identifier_keywords: vec_of(&["ADVANCED SOLUTION", "AdvancedSolution.Health"]),
            product_keywords: Vec::new(),
            field_label_variants: labels(&[
                ("facility_name", &["Facility Name"]),
                ("shipping_contact", &["Shipping Contact Name"]),
                ("billing_contact", &["Billing Contact Name"]),
                ("shipping_address", &["Shipping Address"]),
                ("phone_number", &["Phone Number"]),
                ("fax_number", &["Fax Number"]),
                ("email", &["Email Address"]),
                ("case_date", &["Date of Case"]),
                ("arrival_date", &["Product Arrival Date & Time"]),
                ("po_number", &["Purchase Order Number"]),
            ]),
            product_patterns: Vec::new(),
        },
        ManufacturerProfile {
            name: "BioWound Solutions".to_string(),
            identifier_keywords: vec_of(&["BioWound Solutions", "biowound.com"]),
            product_keywords: Vec::new(),
            field_label_variants: labels(&[
                ("po_number", &["PO#"]),
                ("order_date", &["DATE"]),
                ("bill_to", &["BILL TO"]),
                ("ship_to", &["SHIP TO"]),
                ("salesperson", &["SALESPERSON"]),
                ("contact_email", &["CONTACT EMAIL"]),
                ("contact_phone", &["CONTACT PHONE"]),
                ("delivery_date", &["REQUESTED DELIVERY DATE"]),
                ("net_terms", &["NET TERMS"]),
            ]),
            product_patterns: Vec::new(),
        },
        ManufacturerProfile {
            name: "Imbed Biosciences".to_string(),
            identifier_keywords: vec_of(&["Imbed", "BIOSCIENCES", "Microlyte"]),
            product_keywords: vec_of(&["Microlyte"]),
            field_label_variants: labels(&[
                ("facility_name", &["Facility Name"]),
                ("address", &["Address"]),
                ("email", &["Email"]),
                ("phone", &["Phone"]),
                ("billing_address", &["Billing Address"]),
                ("billing_email", &["Billing Contact Email"]),
                ("order_date", &["Order Date"]),
            ]),
            product_patterns: Vec::new(),
        },
        ManufacturerProfile {
            name: "Skye Biologics".to_string(),
            identifier_keywords: vec_of(&["SKYE", "skyebiologics.com", "WoundPlus", "Q4277"]),
            product_keywords: vec_of(&["WoundPlus™"]),
            field_label_variants: labels(&[
                (
                    "facility_name",
                    &["Facility name of where procedure will be performed"],
                ),
                ("physician_name", &["Physician Name"]),
                ("patient_name", &["Patient Name"]),
                ("date_of_birth", &["Date of Birth"]),
                ("npi", &["NPI"]),
                ("tin", &["TIN"]),
                ("sales_rep", &["Skye Sales Rep"]),
            ]),
            product_patterns: Vec::new(),
        },
    ]
}

fn builtin_generic_labels() -> BTreeMap<String, Vec<String>> {
    labels(&[
        (
            "facility_name",
            &["Facility Name", "Company", "Account Name", "Clinic Name"],
        ),
        (
            "contact_name",
            &["Contact Name", "Contact", "Requesting Provider"],
        ),
        ("phone", &["Phone", "Phone Number", "Contact Phone", "Tel"]),
        ("email", &["Email", "E-mail", "Email Address"]),
        ("order_date", &["Order Date", "Date of Order"]),
        (
            "po_number",
            &["PO#", "PO Number", "Purchase Order", "Order Number"],
        ),
        ("address", &["Address", "Shipping Address", "Ship To"]),
    ])
}

fn builtin_generic_product_patterns() -> Vec<ProductPattern> {
    vec![
        // Pipe- or tab-delimited table row: name | size | qty | price
        ProductPattern {
            pattern: r"(?m)^\s*([^|\t\n]+?)\s*[|\t]\s*([^|\t\n]*?)\s*[|\t]\s*(\d+)\s*[|\t]\s*(\S+)\s*$"
                .to_string(),
            groups: ProductGroups {
                name: Some(1),
                size: Some(2),
                quantity: Some(3),
                price: Some(4),
                ..ProductGroups::default()
            },
        },
        // Inline row: name size qty [units] price
        ProductPattern {
            pattern: concat!(
                r"(?m)^\s*([A-Za-z][\w\s,'\-™®]*?)\s+",
                r"(\d+(?:\.\d+)?(?:\s*x\s*\d+(?:\.\d+)?)?\s*(?:sq\s*cm|cm|mm))\s+",
                r"(\d+)(?:\s*(?:units?|ea|pcs?))?\s+(\S+)\s*$"
            )
            .to_string(),
            groups: ProductGroups {
                name: Some(1),
                size: Some(2),
                quantity: Some(3),
                price: Some(4),
                ..ProductGroups::default()
            },
        },
    ]
}

fn builtin_templates() -> BTreeMap<String, Vec<MappingRule>> {
    use ivr_model::ValueFormat;

    let mut templates = BTreeMap::new();

    templates.insert(
        "esign_ivr".to_string(),
        vec![
            MappingRule::path("patientInfo.patientName", "patient_first_name")
                .with_fallbacks(&["patient.first_name", "patient_name"])
                .with_transform("full_name"),
            MappingRule::path("patientInfo.dateOfBirth", "patient_dob")
                .with_fallbacks(&["patient.dob", "patient_date_of_birth"])
                .with_transform("date"),
            MappingRule::path("patientInfo.patientId", "patient_member_id")
                .with_fallbacks(&["member_id", "subscriber_id", "insurance_id"]),
            MappingRule::path(
                "insuranceInfo.primaryInsurance.primaryInsuranceName",
                "payer_name",
            )
            .with_fallbacks(&["insurance_name", "primary_insurance"])
            .with_transform("payer_name"),
            MappingRule::path(
                "insuranceInfo.primaryInsurance.primaryMemberId",
                "patient_member_id",
            )
            .with_fallbacks(&["member_id", "policy_number"]),
            MappingRule::path("insuranceInfo.primaryInsurance.groupNumber", "group_number")
                .with_fallbacks(&["insurance_group", "group_id"]),
            MappingRule::path("insuranceInfo.primaryInsurance.payerPhone", "payer_phone")
                .with_fallbacks(&["insurance_phone"])
                .with_transform("phone"),
            MappingRule::path("providerInfo.providerName", "provider_name")
                .with_fallbacks(&["provider.name", "ordering_provider"]),
            MappingRule::path("providerInfo.providerNPI", "provider_npi")
                .with_fallbacks(&["provider.npi", "npi"]),
            MappingRule::path("facilityInfo.facilityName", "facility_name")
                .with_fallbacks(&["facility.name", "location_name"]),
            MappingRule::path("facilityInfo.facilityAddress", "facility_address")
                .with_fallbacks(&["facility.address"])
                .with_transform("address"),
            MappingRule::path("orderInfo.orderDate", "order_date")
                .with_fallbacks(&["request_date"])
                .with_transform("date"),
            MappingRule::path("productInfo.productName", "product_name")
                .with_fallbacks(&["products.0.name"]),
        ],
    );

    templates.insert(
        "coverage_record".to_string(),
        vec![
            MappingRule::path("subscriber.reference", "patient_fhir_id").with_prefix("Patient/"),
            MappingRule::path("beneficiary.reference", "patient_fhir_id").with_prefix("Patient/"),
            MappingRule::path("payor.0.display", "payer_name").with_fallbacks(&["insurance_name"]),
            MappingRule::path("identifier.0.value", "patient_member_id")
                .with_fallbacks(&["member_id"])
                .with_format(ValueFormat::Upper),
            MappingRule::path("class.0.value", "group_number").with_fallbacks(&["plan_code"]),
        ],
    );

    templates.insert(
        "quick_intake".to_string(),
        vec![
            MappingRule::path("patient_first_name", "patientInfo.firstName")
                .with_fallbacks(&["patient.first_name", "firstName"])
                .with_format(ValueFormat::Title),
            MappingRule::path("patient_last_name", "patientInfo.lastName")
                .with_fallbacks(&["patient.last_name", "lastName"])
                .with_format(ValueFormat::Title),
            MappingRule::path("payer_name", "insuranceInfo.primaryInsurance.name")
                .with_fallbacks(&["insurance_name", "primary_payer"]),
            MappingRule::path("patient_member_id", "insuranceInfo.primaryInsurance.memberId")
                .with_fallbacks(&["member_id", "subscriber_id"]),
        ],
    );

    templates
}

fn builtin_manufacturer_required() -> BTreeMap<String, Vec<String>> {
    let mut required = BTreeMap::new();
    required.insert(
        "Extremity Care".to_string(),
        vec_of(&["providerInfo.providerName", "orderInfo.orderDate"]),
    );
    required.insert(
        "MedLife Solutions".to_string(),
        vec_of(&["providerInfo.providerName", "productInfo.productName"]),
    );
    required.insert(
        "ACZ Distribution".to_string(),
        vec_of(&[
            "providerInfo.providerName",
            "insuranceInfo.primaryInsurance.groupNumber",
        ]),
    );
    required.insert(
        "BioWound Solutions".to_string(),
        vec_of(&["facilityInfo.facilityAddress"]),
    );
    required
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_is_valid() {
        let registry = PatternRegistry::builtin();
        registry.validate().unwrap();
        assert!(registry.manufacturers().len() >= 5);
        assert!(registry.manufacturer("Extremity Care").is_some());
    }

    #[test]
    fn required_fields_union_common_and_manufacturer() {
        let registry = PatternRegistry::builtin();
        let common_only = registry.required_fields_for("Skye Biologics");
        let extremity = registry.required_fields_for("Extremity Care");
        assert!(extremity.len() > common_only.len());
        assert!(extremity.contains(&"orderInfo.orderDate".to_string()));
        // No duplicates even when tables overlap.
        let mut dedup = extremity.clone();
        dedup.dedup();
        assert_eq!(dedup.len(), extremity.len());
    }

    #[test]
    fn unknown_template_is_an_error() {
        let registry = PatternRegistry::builtin();
        assert!(registry.template_rules("fax_cover_sheet").is_err());
        assert!(registry.template_rules("esign_ivr").is_ok());
    }

    #[test]
    fn registry_round_trips_through_json() {
        let registry = PatternRegistry::builtin();
        let json = serde_json::to_string(&registry).unwrap();
        let parsed: PatternRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed.manufacturers().len(),
            registry.manufacturers().len()
        );
    }
}
