//! Final result validation: never fails, only filters and warns.

use ivr_model::ExtractionResult;

/// Drops product lines that fail validation and appends warnings for the
/// gaps downstream consumers care about most.
pub fn finalize_extraction(result: &mut ExtractionResult) {
    let before = result.products.len();
    result.products.retain(ivr_model::ProductLine::is_valid);
    if result.products.len() < before {
        result.warnings.push(format!(
            "dropped {} invalid product line(s)",
            before - result.products.len()
        ));
    }

    if !result.extracted_fields.contains_key("facility_name") {
        result.warnings.push("facility name not found".to_string());
    }
    if result.products.is_empty() {
        result.warnings.push("no products extracted".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ivr_model::ProductLine;

    #[test]
    fn gaps_are_warned_not_errored() {
        let mut result = ExtractionResult::default();
        finalize_extraction(&mut result);
        assert!(result.warnings.contains(&"facility name not found".to_string()));
        assert!(result.warnings.contains(&"no products extracted".to_string()));
    }

    #[test]
    fn invalid_products_are_filtered() {
        let mut result = ExtractionResult::default();
        result
            .extracted_fields
            .insert("facility_name".to_string(), "Clinic".to_string());
        result.products.push(ProductLine {
            sku: None,
            name: "Graft".to_string(),
            size: "2x2cm".to_string(),
            quantity: 0,
            unit_price: 10.0,
            total_price: None,
        });
        finalize_extraction(&mut result);
        assert!(result.products.is_empty());
        assert!(result.warnings.iter().any(|w| w.contains("invalid product")));
        assert!(result.warnings.contains(&"no products extracted".to_string()));
    }
}
