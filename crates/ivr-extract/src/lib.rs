//! Fuzzy field extraction from manufacturer order-form text.
//!
//! The pipeline identifies the manufacturer from keyword evidence, extracts
//! labeled fields with an exact pass plus a fuzzy sliding-window fallback,
//! and captures product line items with regex patterns from the registry.

#![deny(unsafe_code)]

mod engine;
mod error;
mod identify;
mod labels;
mod products;
mod similarity;
mod utils;
mod validate;

pub use engine::OrderFormExtractor;
pub use error::ExtractError;
pub use identify::{ManufacturerMatch, identify_manufacturer};
pub use labels::LabelValueExtractor;
pub use products::extract_products;
pub use similarity::{char_similarity, compare_extractions, window_similarity};
pub use utils::{clean_field_value, parse_money, parse_quantity};
pub use validate::finalize_extraction;

use ivr_model::ExtractionResult;
use ivr_patterns::PatternRegistry;

/// Convenience entry point: one-shot extraction against a registry.
pub fn extract_order_form_data(
    text: &str,
    registry: &PatternRegistry,
) -> Result<ExtractionResult, ExtractError> {
    OrderFormExtractor::new(registry).extract(text)
}
