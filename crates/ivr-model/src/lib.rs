#![deny(unsafe_code)]

//! Shared data model for the intake-form extraction and normalization engine.
//!
//! Long-lived configuration types ([`ManufacturerProfile`], [`MappingRule`])
//! are constructed once and shared read-only; per-call types
//! ([`ExtractionResult`], [`CanonicalRecord`], [`MergedRecord`]) are created
//! fresh for each operation and have no identity beyond the call.

pub mod error;
pub mod extraction;
pub mod mapping;
pub mod path;
pub mod profile;
pub mod record;
pub mod source;

pub use error::ModelError;
pub use extraction::{ExtractionResult, ProductLine};
pub use mapping::{MappingRule, ValueFormat};
pub use path::{get_path, set_path};
pub use profile::{ManufacturerProfile, ProductGroups, ProductPattern};
pub use record::{
    CanonicalRecord, MergeMetadata, MergedRecord, RecordMetadata, value_is_present,
};
pub use source::SourceTag;
