//! Top-level order-form extraction pipeline.

use std::collections::BTreeMap;

use regex::Regex;

use ivr_model::ExtractionResult;
use ivr_patterns::PatternRegistry;

use crate::error::ExtractError;
use crate::identify::identify_manufacturer;
use crate::labels::LabelValueExtractor;
use crate::products::extract_products;
use crate::validate::finalize_extraction;

const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";
const PHONE_PATTERN: &str = r"(?:\+?1[-. ]?)?\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}";

/// Extracts manufacturer, labeled fields, and product lines from raw
/// order-form text.
pub struct OrderFormExtractor<'a> {
    registry: &'a PatternRegistry,
}

impl<'a> OrderFormExtractor<'a> {
    #[must_use]
    pub fn new(registry: &'a PatternRegistry) -> Self {
        Self { registry }
    }

    /// Runs the full pipeline: identify the manufacturer, extract that
    /// manufacturer's labeled fields (or the generic set when unidentified),
    /// then capture product lines with manufacturer patterns before falling
    /// back to the generic ones.
    ///
    /// Empty or whitespace-only input yields an empty result with a warning.
    pub fn extract(&self, text: &str) -> Result<ExtractionResult, ExtractError> {
        let mut result = ExtractionResult::default();
        if text.trim().is_empty() {
            result.warnings.push("empty input text".to_string());
            return Ok(result);
        }

        let matched = identify_manufacturer(text, self.registry);
        let profile = matched
            .as_ref()
            .and_then(|m| self.registry.manufacturer(&m.name));

        let labels = LabelValueExtractor::new(self.registry.scoring());
        result.extracted_fields = match profile {
            Some(profile) => labels.extract(text, &profile.field_label_variants),
            None => {
                let mut fields = labels.extract(text, self.registry.generic_labels());
                recover_contacts(text, &mut fields)?;
                fields
            }
        };

        let mut products = Vec::new();
        if let Some(profile) = profile
            && !profile.product_patterns.is_empty()
        {
            products = extract_products(text, &profile.product_patterns, &mut result.warnings)?;
        }
        if products.is_empty() {
            products = extract_products(
                text,
                self.registry.generic_product_patterns(),
                &mut result.warnings,
            )?;
        }
        result.products = products;

        if let Some(matched) = matched {
            tracing::debug!(
                manufacturer = %matched.name,
                confidence = matched.confidence,
                fields = result.extracted_fields.len(),
                products = result.products.len(),
                "order form extracted"
            );
            result.confidence_score = matched.confidence;
            result.manufacturer = Some(matched.name);
        } else {
            tracing::debug!(
                fields = result.extracted_fields.len(),
                products = result.products.len(),
                "order form extracted without manufacturer match"
            );
            result
                .warnings
                .push("no manufacturer identified; generic patterns used".to_string());
        }
        finalize_extraction(&mut result);
        Ok(result)
    }
}

/// Unlabeled contact recovery for documents with no manufacturer profile: a
/// bare email address or phone number in the text still fills the canonical
/// slot when no label produced one.
fn recover_contacts(text: &str, fields: &mut BTreeMap<String, String>) -> Result<(), ExtractError> {
    for (field, pattern) in [("email", EMAIL_PATTERN), ("phone", PHONE_PATTERN)] {
        if fields.contains_key(field) {
            continue;
        }
        let regex = Regex::new(pattern).map_err(|source| ExtractError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        if let Some(found) = regex.find(text) {
            fields.insert(field.to_string(), found.as_str().to_string());
        }
    }
    Ok(())
}
