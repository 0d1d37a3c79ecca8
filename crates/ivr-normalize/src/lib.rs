//! Canonical normalization of heterogeneous insurance data sources.
//!
//! Raw payloads from cards, submissions, intake forms, and eligibility
//! responses are probed into one canonical field vocabulary, cleaned by
//! shared field normalizers, confidence-scored, and merged field-by-field
//! with provenance.

#![deny(unsafe_code)]

mod confidence;
mod error;
mod fields;
mod merge;
mod normalizer;
mod report;

pub use confidence::{CORE_FIELDS, score as confidence_score};
pub use error::NormalizeError;
pub use fields::{
    detect_plan_type, normalize_date, normalize_id, normalize_money, normalize_person_name,
    normalize_phone, normalize_state, split_full_name,
};
pub use merge::merge_records;
pub use normalizer::normalize_record;
pub use report::{FieldIssue, IssueReason, NormalizationReport};
