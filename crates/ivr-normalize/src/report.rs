//! Per-record normalization diagnostics.
//!
//! Normalization is lenient on purpose: unparseable dates become null and
//! unparseable phones or IDs keep their original text instead of failing the
//! record. The report makes those degradations visible so callers can surface
//! them instead of silently shipping bad values.

use serde::{Deserialize, Serialize};

use ivr_model::SourceTag;

/// Why a field was dropped or nulled during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueReason {
    UnparseableDate,
    UnparseablePhone,
    UnparseableId,
    UnparseableAmount,
    /// Source value was an object or array where a scalar was expected.
    UnexpectedShape,
}

/// One field that did not normalize cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    /// The raw value as received, for operator triage.
    pub raw: String,
    pub reason: IssueReason,
}

/// Diagnostics for one normalization pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationReport {
    pub source: SourceTag,
    /// Canonical fields emitted with a usable value.
    pub fields_emitted: usize,
    pub issues: Vec<FieldIssue>,
}

impl NormalizationReport {
    #[must_use]
    pub fn new(source: SourceTag) -> Self {
        Self {
            source,
            fields_emitted: 0,
            issues: Vec::new(),
        }
    }

    pub fn note(&mut self, field: &str, raw: &str, reason: IssueReason) {
        self.issues.push(FieldIssue {
            field: field.to_string(),
            raw: raw.to_string(),
            reason,
        });
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}
