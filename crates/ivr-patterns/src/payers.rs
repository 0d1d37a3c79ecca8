//! Payer name standardization and payer-ID lookup tables.
//!
//! Alias matching is substring-based and case-insensitive so OCR variants like
//! "BC/BS of Texas" still collapse to the standard carrier name.

/// (alias substring, standardized name)
const PAYER_ALIASES: &[(&str, &str)] = &[
    ("BCBS", "Blue Cross Blue Shield"),
    ("BC/BS", "Blue Cross Blue Shield"),
    ("UHC", "UnitedHealthcare"),
    ("UNITED HEALTHCARE", "UnitedHealthcare"),
    ("CIGNA HEALTHCARE", "Cigna"),
    ("AETNA INC", "Aetna"),
    ("MEDICARE PART B", "Medicare"),
];

/// (standardized name, payer id)
const PAYER_IDS: &[(&str, &str)] = &[
    ("Medicare", "MEDICARE"),
    ("Blue Cross Blue Shield", "BCBS"),
    ("UnitedHealthcare", "UHC001"),
    ("Aetna", "AETNA"),
    ("Cigna", "CIGNA"),
    ("Humana", "HUMANA"),
    ("Anthem", "ANTHEM"),
];

/// Collapses a raw carrier name onto its standardized form when an alias
/// matches; otherwise title-cases the trimmed input.
#[must_use]
pub fn standardize_payer_name(raw: &str) -> String {
    let upper = raw.to_uppercase();
    for (alias, standard) in PAYER_ALIASES {
        if upper.contains(alias) {
            return (*standard).to_string();
        }
    }
    title_case(raw.trim())
}

/// Looks up the payer ID for a standardized payer name.
#[must_use]
pub fn payer_id_for_name(standardized: &str) -> Option<&'static str> {
    PAYER_IDS
        .iter()
        .find(|(name, _)| *name == standardized)
        .map(|(_, id)| *id)
}

/// Title-cases each whitespace-separated word.
#[must_use]
pub fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
