//! Static manufacturer profiles owned by the pattern registry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Capture-group layout for a manufacturer-specific product line pattern.
///
/// Indices refer to capture groups in [`ProductPattern::pattern`]. Groups that
/// a pattern does not capture are left `None`; a fixed product name may be
/// supplied instead of a name group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductGroups {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<usize>,
    /// Literal product name for patterns anchored on a single product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<usize>,
}

/// One regex over raw order-form text yielding product line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPattern {
    pub pattern: String,
    pub groups: ProductGroups,
}

/// Everything known about one manufacturer's order forms.
///
/// Immutable after registry construction; referenced (never owned) by
/// extraction results via the manufacturer name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManufacturerProfile {
    pub name: String,
    /// Keywords whose presence in text identifies this manufacturer.
    pub identifier_keywords: Vec<String>,
    /// Product names; weaker identification signal than identifiers.
    pub product_keywords: Vec<String>,
    /// Canonical field name to the label variants this manufacturer's forms use.
    pub field_label_variants: BTreeMap<String, Vec<String>>,
    /// Manufacturer-specific product line capture patterns, tried before the
    /// generic fallbacks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub product_patterns: Vec<ProductPattern>,
}
