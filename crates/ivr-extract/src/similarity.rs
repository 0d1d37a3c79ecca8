//! Character and phrase similarity used by fuzzy label matching, plus
//! whole-result comparison for near-duplicate detection.

use rapidfuzz::distance::levenshtein::normalized_similarity;

use ivr_model::{ExtractionResult, ProductLine};
use ivr_patterns::ScoringConfig;

use crate::utils::normalize_label;

/// Normalized edit-distance similarity between two strings, in [0, 1].
#[must_use]
pub fn char_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    normalized_similarity(a.chars(), b.chars())
}

/// Fraction of label words that find a sufficiently similar word at the same
/// position in the candidate window. Both sides are compared in normalized
/// form so case and separators do not count against the match.
#[must_use]
pub fn window_similarity(window: &[&str], label_words: &[&str], config: &ScoringConfig) -> f64 {
    if label_words.is_empty() || window.len() != label_words.len() {
        return 0.0;
    }
    let matched = window
        .iter()
        .zip(label_words)
        .filter(|(w, l)| {
            char_similarity(&normalize_label(w), &normalize_label(l)) >= config.word_similarity_min
        })
        .count();
    matched as f64 / label_words.len() as f64
}

/// Overall similarity of two extraction results in [0, 1], for detecting
/// near-duplicate submissions of the same order form.
///
/// Averages whatever is comparable: manufacturer equality, shared extracted
/// fields, and product lists. Nothing comparable yields 0, never a
/// divide-by-zero.
#[must_use]
pub fn compare_extractions(a: &ExtractionResult, b: &ExtractionResult) -> f64 {
    let mut score = 0.0;
    let mut comparisons = 0u32;

    if let (Some(ma), Some(mb)) = (&a.manufacturer, &b.manufacturer) {
        score += if ma == mb { 1.0 } else { 0.0 };
        comparisons += 1;
    }
    for (field, va) in &a.extracted_fields {
        if let Some(vb) = b.extracted_fields.get(field) {
            score += char_similarity(&va.to_lowercase(), &vb.to_lowercase());
            comparisons += 1;
        }
    }
    if !a.products.is_empty() && !b.products.is_empty() {
        score += product_list_similarity(&a.products, &b.products);
        comparisons += 1;
    }

    if comparisons == 0 {
        0.0
    } else {
        score / f64::from(comparisons)
    }
}

/// Average over A's products of each product's best match in B.
fn product_list_similarity(a: &[ProductLine], b: &[ProductLine]) -> f64 {
    let total: f64 = a
        .iter()
        .map(|pa| {
            b.iter()
                .map(|pb| product_similarity(pa, pb))
                .fold(0.0, f64::max)
        })
        .sum();
    total / a.len() as f64
}

/// Average of the comparable parts: name similarity always, size and
/// quantity equality when both sides carry them.
fn product_similarity(a: &ProductLine, b: &ProductLine) -> f64 {
    let mut parts = vec![char_similarity(
        &a.name.to_lowercase(),
        &b.name.to_lowercase(),
    )];
    if !a.size.is_empty() && !b.size.is_empty() {
        parts.push(if a.size == b.size { 1.0 } else { 0.0 });
    }
    if a.quantity > 0 && b.quantity > 0 {
        parts.push(if a.quantity == b.quantity { 1.0 } else { 0.0 });
    }
    parts.iter().sum::<f64>() / parts.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        assert!((char_similarity("facility", "facility") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ocr_typos_stay_close() {
        assert!(char_similarity("facilty", "facility") > 0.8);
        assert!(char_similarity("phone", "order") < 0.5);
    }

    fn result(manufacturer: &str, fields: &[(&str, &str)]) -> ExtractionResult {
        ExtractionResult {
            manufacturer: Some(manufacturer.to_string()),
            confidence_score: 100,
            extracted_fields: fields
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            products: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn identical_results_compare_to_one() {
        let a = result("Extremity Care", &[("facility_name", "Sunrise Wound Clinic")]);
        assert!((compare_extractions(&a, &a.clone()) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn different_manufacturers_drag_the_score_down() {
        let a = result("Extremity Care", &[("facility_name", "Sunrise Wound Clinic")]);
        let b = result("Skye Biologics", &[("facility_name", "Sunrise Wound Clinic")]);
        let score = compare_extractions(&a, &b);
        assert!(score < 1.0);
        assert!(score > 0.4);
    }

    #[test]
    fn nothing_comparable_scores_zero() {
        let mut a = result("Extremity Care", &[("facility_name", "X")]);
        a.manufacturer = None;
        let b = result("Skye Biologics", &[("contact_name", "Y")]);
        let mut b_nameless = b.clone();
        b_nameless.manufacturer = None;
        assert!(compare_extractions(&a, &b_nameless).abs() < f64::EPSILON);
    }

    #[test]
    fn matching_products_raise_the_score() {
        let product = ProductLine {
            sku: None,
            name: "Restorigin Amnion Patch".to_string(),
            size: "2x2cm".to_string(),
            quantity: 4,
            unit_price: 3760.61,
            total_price: None,
        };
        let mut a = result("Extremity Care", &[]);
        let mut b = result("Extremity Care", &[]);
        a.products.push(product.clone());
        b.products.push(product);
        assert!((compare_extractions(&a, &b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn window_similarity_counts_positionwise_matches() {
        let config = ScoringConfig::default();
        let label = ["Facility", "Name"];
        assert!(window_similarity(&["Facilty", "Name:"], &label, &config) >= 0.99);
        assert!(window_similarity(&["Shipping", "Name"], &label, &config) < 0.6);
        assert!(window_similarity(&["Facility"], &label, &config) < f64::EPSILON);
    }
}
