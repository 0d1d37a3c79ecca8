//! Declarative mapping rules projecting canonical data onto template schemas.

use serde::{Deserialize, Serialize};

/// Case transformation applied after a value is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    Upper,
    Lower,
    Title,
}

/// One mapping rule: how to locate a value in a source record and place it at
/// a (possibly dot-pathed) target field in the template output.
///
/// `transform` names a function in the transformer registry; the name is
/// resolved when the rule set is bound to a registry, so unknown names fail at
/// configuration time rather than per record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingRule {
    /// Target field name; dot-paths build nested output structure.
    pub target_field: String,
    /// Primary dot-path to read from the source record.
    pub primary_path: String,
    /// Tried in order when the primary path yields nothing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallback_paths: Vec<String>,
    /// Literal prefix prepended to the located value (reference-style ids).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Named transformer applied as `(value, rule, full_record) -> value`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
}

impl MappingRule {
    /// A rule with only a primary path.
    #[must_use]
    pub fn path(target_field: &str, primary_path: &str) -> Self {
        Self {
            target_field: target_field.to_string(),
            primary_path: primary_path.to_string(),
            fallback_paths: Vec::new(),
            prefix: None,
            transform: None,
            format: None,
        }
    }

    #[must_use]
    pub fn with_fallbacks(mut self, fallbacks: &[&str]) -> Self {
        self.fallback_paths = fallbacks.iter().map(|s| (*s).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: &str) -> Self {
        self.transform = Some(transform.to_string());
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = Some(format);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_composes_rule() {
        let rule = MappingRule::path("providerInfo.providerNPI", "provider_npi")
            .with_fallbacks(&["provider.npi", "npi"])
            .with_format(ValueFormat::Upper);
        assert_eq!(rule.target_field, "providerInfo.providerNPI");
        assert_eq!(rule.fallback_paths.len(), 2);
        assert_eq!(rule.format, Some(ValueFormat::Upper));
    }

    #[test]
    fn format_deserializes_lowercase() {
        let rule: MappingRule = serde_json::from_str(
            r#"{"target_field":"x","primary_path":"y","format":"title"}"#,
        )
        .unwrap();
        assert_eq!(rule.format, Some(ValueFormat::Title));
    }
}
