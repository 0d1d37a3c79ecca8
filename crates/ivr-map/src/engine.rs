//! Rule evaluation: projecting a canonical record onto a target template.

use chrono::Utc;
use serde_json::{Map, Value};

use ivr_model::{MappingRule, ValueFormat, get_path, set_path, value_is_present};
use ivr_patterns::{PatternRegistry, title_case};

use crate::error::MapError;
use crate::transform::TransformerRegistry;

/// External fuzzy-matching collaborator that can map a whole record in one
/// shot. Implementations may call out of process; failures are represented as
/// `None` and never abort the mapping, which falls back to the static rules.
pub trait ExternalMatcher {
    fn map_record(&self, record: &Value, manufacturer: &str, template: &str) -> Option<Value>;
}

/// Result of applying one template's rule set to one record.
#[derive(Debug, Clone)]
pub struct MappingOutcome {
    /// Nested template output; dot-paths in target fields build structure.
    pub output: Value,
    /// Target fields that received a value.
    pub mapped: Vec<String>,
    /// Target fields no rule could resolve.
    pub unmapped: Vec<String>,
}

/// A template's rule set bound to a transformer registry.
///
/// Binding resolves every transformer name eagerly, so an engine that
/// constructs successfully can never hit an unknown transformer per record.
pub struct MappingEngine<'a> {
    template: String,
    rules: &'a [MappingRule],
    transformers: &'a TransformerRegistry,
}

impl<'a> MappingEngine<'a> {
    /// Binds a named template's rules from the registry.
    pub fn for_template(
        registry: &'a PatternRegistry,
        template: &str,
        transformers: &'a TransformerRegistry,
    ) -> Result<Self, MapError> {
        let rules = registry.template_rules(template)?;
        transformers.check_rules(rules)?;
        Ok(Self {
            template: template.to_string(),
            rules,
            transformers,
        })
    }

    /// Binds an ad-hoc rule set (synthetic registries in tests, overrides).
    pub fn bind(
        template: &str,
        rules: &'a [MappingRule],
        transformers: &'a TransformerRegistry,
    ) -> Result<Self, MapError> {
        transformers.check_rules(rules)?;
        Ok(Self {
            template: template.to_string(),
            rules,
            transformers,
        })
    }

    #[must_use]
    pub fn rules(&self) -> &[MappingRule] {
        self.rules
    }

    /// Applies every rule to the record and post-processes the result.
    #[must_use]
    pub fn apply(&self, record: &Value) -> MappingOutcome {
        let mut output = Value::Object(Map::new());
        let mut mapped = Vec::new();
        let mut unmapped = Vec::new();

        for rule in self.rules {
            let value = self.evaluate(rule, record);
            if value_is_present(Some(&value)) {
                set_path(&mut output, &rule.target_field, value);
                mapped.push(rule.target_field.clone());
            } else {
                unmapped.push(rule.target_field.clone());
            }
        }

        post_process(&self.template, &mut output);
        tracing::debug!(
            template = %self.template,
            mapped = mapped.len(),
            unmapped = unmapped.len(),
            "applied template rules"
        );
        MappingOutcome {
            output,
            mapped,
            unmapped,
        }
    }

    /// Like [`apply`](Self::apply), but hands the whole record to an external
    /// matcher first. Only when the matcher declines does the static rule set
    /// run.
    #[must_use]
    pub fn apply_with_matcher(
        &self,
        record: &Value,
        manufacturer: &str,
        matcher: &dyn ExternalMatcher,
    ) -> MappingOutcome {
        if let Some(output) = matcher.map_record(record, manufacturer, &self.template) {
            let mut mapped = Vec::new();
            let mut unmapped = Vec::new();
            for rule in self.rules {
                if value_is_present(get_path(&output, &rule.target_field)) {
                    mapped.push(rule.target_field.clone());
                } else {
                    unmapped.push(rule.target_field.clone());
                }
            }
            tracing::debug!(
                template = %self.template,
                manufacturer,
                mapped = mapped.len(),
                "external matcher mapped the record"
            );
            return MappingOutcome {
                output,
                mapped,
                unmapped,
            };
        }
        tracing::warn!(
            template = %self.template,
            manufacturer,
            "external matcher declined, falling back to static rules"
        );
        self.apply(record)
    }

    /// Locates a rule's value (primary, then fallbacks), then applies
    /// prefix, transform, and format in that order. An unresolved rule
    /// yields null without invoking any of the three.
    fn evaluate(&self, rule: &MappingRule, record: &Value) -> Value {
        let located = std::iter::once(rule.primary_path.as_str())
            .chain(rule.fallback_paths.iter().map(String::as_str))
            .find_map(|path| {
                let value = get_path(record, path)?;
                value_is_present(Some(value)).then(|| value.clone())
            });

        let Some(mut value) = located else {
            return Value::Null;
        };

        if let Some(prefix) = &rule.prefix
            && let Value::String(s) = &value
        {
            value = Value::String(format!("{prefix}{s}"));
        }
        if let Some(name) = &rule.transform
            && let Some(transform) = self.transformers.get(name)
        {
            value = transform(&value, rule, record);
        }
        if let Some(format) = rule.format
            && let Value::String(s) = &value
        {
            value = Value::String(apply_format(s, format));
        }
        value
    }
}

fn apply_format(raw: &str, format: ValueFormat) -> String {
    match format {
        ValueFormat::Upper => raw.to_uppercase(),
        ValueFormat::Lower => raw.to_lowercase(),
        ValueFormat::Title => title_case(raw),
    }
}

/// Template-specific defaults applied after rule evaluation.
fn post_process(template: &str, output: &mut Value) {
    match template {
        "esign_ivr" => {
            if get_path(output, "patientInfo.consentToTreat").is_none() {
                set_path(output, "patientInfo.consentToTreat", Value::Bool(true));
            }
            if get_path(output, "submissionDate").is_none() {
                set_path(
                    output,
                    "submissionDate",
                    Value::String(Utc::now().format("%Y-%m-%d").to_string()),
                );
            }
        }
        "coverage_record" => {
            set_path(output, "resourceType", Value::String("Coverage".to_string()));
            if get_path(output, "status").is_none() {
                set_path(output, "status", Value::String("active".to_string()));
            }
        }
        _ => {}
    }
}
