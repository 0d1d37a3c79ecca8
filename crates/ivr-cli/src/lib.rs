//! CLI library components for the intake pipeline.

pub mod logging;
