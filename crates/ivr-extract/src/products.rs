//! Product line extraction from order tables and inline product rows.

use regex::Regex;

use ivr_model::{ProductLine, ProductPattern};

use crate::error::ExtractError;
use crate::utils::{clean_field_value, parse_money, parse_quantity};

/// Runs the given patterns over the text and collects every valid product
/// line. Invalid captures (no name, zero quantity) are dropped and reported
/// through `warnings` instead of failing the extraction.
pub fn extract_products(
    text: &str,
    patterns: &[ProductPattern],
    warnings: &mut Vec<String>,
) -> Result<Vec<ProductLine>, ExtractError> {
    let mut products = Vec::new();
    for entry in patterns {
        let regex = Regex::new(&entry.pattern).map_err(|source| ExtractError::Pattern {
            pattern: entry.pattern.clone(),
            source,
        })?;
        for captures in regex.captures_iter(text) {
            let group = |idx: Option<usize>| {
                idx.and_then(|i| captures.get(i))
                    .map(|m| clean_field_value(m.as_str()))
                    .filter(|s| !s.is_empty())
            };

            let name = entry
                .groups
                .fixed_name
                .clone()
                .or_else(|| group(entry.groups.name))
                .unwrap_or_default();
            let quantity = group(entry.groups.quantity)
                .map(|raw| parse_quantity(&raw))
                .unwrap_or(0);
            let raw_price = group(entry.groups.price);
            let unit_price = match &raw_price {
                Some(raw) => parse_money(raw).unwrap_or_else(|| {
                    warnings.push(format!("unparseable price `{raw}` for `{name}`, using 0"));
                    0.0
                }),
                None => 0.0,
            };

            let product = ProductLine {
                sku: group(entry.groups.sku),
                name,
                size: group(entry.groups.size).unwrap_or_default(),
                quantity,
                unit_price,
                total_price: None,
            };
            if product.is_valid() {
                products.push(product);
            } else {
                warnings.push(format!(
                    "dropped incomplete product line (name `{}`, qty {})",
                    product.name, product.quantity
                ));
            }
        }
        // First pattern that yields products wins; later ones are fallbacks.
        if !products.is_empty() {
            break;
        }
    }
    Ok(products)
}
