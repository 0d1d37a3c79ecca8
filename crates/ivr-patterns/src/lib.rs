//! Registry of manufacturer profiles, label variants, product patterns,
//! template mapping rule sets, and completeness tables.
//!
//! Everything data-driven in the intake pipeline lives here so that
//! deployments can swap the built-in tables for a JSON override file without
//! touching the extraction or mapping code.

#![deny(unsafe_code)]

mod config;
mod error;
mod jurisdiction;
mod payers;
mod registry;

pub use config::ScoringConfig;
pub use error::PatternsError;
pub use jurisdiction::mac_jurisdiction;
pub use payers::{payer_id_for_name, standardize_payer_name, title_case};
pub use registry::PatternRegistry;
