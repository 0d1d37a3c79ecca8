//! Results produced by order-form text extraction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One structured line item extracted from an order form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductLine {
    /// Manufacturer SKU when the capture pattern provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub name: String,
    pub size: String,
    pub quantity: u32,
    pub unit_price: f64,
    /// `quantity * unit_price` when both are known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
}

impl ProductLine {
    /// True when the line survives validation: a named product with at least
    /// one unit. Invalid lines are dropped, never retained as zeros.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.quantity > 0
    }
}

/// Output of `extract_order_form_data` for one text input.
///
/// Ephemeral: produced per call, never persisted by this core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Identified manufacturer name, or `None` when no profile scored.
    pub manufacturer: Option<String>,
    /// Identification confidence in [0, 100].
    pub confidence_score: u8,
    /// Canonical field name to extracted raw value.
    pub extracted_fields: BTreeMap<String, String>,
    pub products: Vec<ProductLine>,
    pub warnings: Vec<String>,
}

impl ExtractionResult {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.extracted_fields.get(name).map(String::as_str)
    }
}
