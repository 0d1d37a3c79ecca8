//! Declarative template mapping and completeness gating.
//!
//! Rules name a primary path, ordered fallbacks, and optional prefix,
//! transformer, and case format. A rule set is bound to a transformer
//! registry up front so configuration typos fail before any record flows.

#![deny(unsafe_code)]

mod completeness;
mod engine;
mod error;
mod transform;

pub use completeness::{CompletenessReport, validate_template_completeness};
pub use engine::{ExternalMatcher, MappingEngine, MappingOutcome};
pub use error::MapError;
pub use transform::{TransformFn, TransformerRegistry};
