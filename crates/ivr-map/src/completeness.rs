//! Completeness gating for a manufacturer/template pair.

use serde::Serialize;
use serde_json::Value;

use ivr_model::{MappingRule, get_path, value_is_present};
use ivr_patterns::PatternRegistry;

use crate::error::MapError;

/// What the record can and cannot fill for one manufacturer's template.
#[derive(Debug, Clone, Serialize)]
pub struct CompletenessReport {
    pub manufacturer: String,
    pub template: String,
    /// `100 * available / required`, 100 when nothing is required.
    pub completeness_percent: f64,
    pub available: Vec<String>,
    pub missing: Vec<String>,
    /// Missing fields that are always critical, for any manufacturer.
    pub critical_missing: Vec<String>,
    /// True exactly when nothing required is missing.
    pub can_proceed: bool,
}

/// Resolves each required target field to its mapping rule and attempts
/// extraction against the record, without building output. A required field
/// with no rule in the template counts as missing.
pub fn validate_template_completeness(
    registry: &PatternRegistry,
    manufacturer: &str,
    template: &str,
    record: &Value,
) -> Result<CompletenessReport, MapError> {
    let rules = registry.template_rules(template)?;
    let required = registry.required_fields_for(manufacturer);

    let mut available = Vec::new();
    let mut missing = Vec::new();
    for field in &required {
        let resolvable = rules
            .iter()
            .find(|rule| rule.target_field == *field)
            .is_some_and(|rule| rule_resolves(rule, record));
        if resolvable {
            available.push(field.clone());
        } else {
            missing.push(field.clone());
        }
    }

    let completeness_percent = if required.is_empty() {
        100.0
    } else {
        100.0 * available.len() as f64 / required.len() as f64
    };
    let critical_missing: Vec<String> = missing
        .iter()
        .filter(|f| registry.critical_fields().contains(*f))
        .cloned()
        .collect();
    let can_proceed = missing.is_empty();

    tracing::debug!(
        manufacturer,
        template,
        completeness = completeness_percent,
        missing = missing.len(),
        critical = critical_missing.len(),
        "validated template completeness"
    );

    Ok(CompletenessReport {
        manufacturer: manufacturer.to_string(),
        template: template.to_string(),
        completeness_percent,
        available,
        missing,
        critical_missing,
        can_proceed,
    })
}

/// A rule resolves when its primary path or any fallback holds a present
/// value. Transformers that synthesize values still need at least the name
/// parts present, so path presence is the right proxy here.
fn rule_resolves(rule: &MappingRule, record: &Value) -> bool {
    std::iter::once(rule.primary_path.as_str())
        .chain(rule.fallback_paths.iter().map(String::as_str))
        .any(|path| value_is_present(get_path(record, path)))
}
