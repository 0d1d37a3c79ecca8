//! Named tuning constants for identification and fuzzy label matching.
//!
//! These are heuristics, not derived constants. The defaults reproduce the
//! behavior the reference tables were calibrated against, but deployments may
//! override them; nothing here assumes the defaults are optimal.

use serde::{Deserialize, Serialize};

/// Scoring and matching thresholds shared by the extraction components.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Points per identifier keyword found in the text.
    pub identifier_points: u32,
    /// Points per product keyword found in the text.
    pub product_points: u32,
    /// Minimum sliding-window similarity for a fuzzy label match.
    pub fuzzy_window_threshold: f64,
    /// Minimum per-word character similarity for a window word to count.
    pub word_similarity_min: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            identifier_points: 10,
            product_points: 5,
            fuzzy_window_threshold: 0.7,
            word_similarity_min: 0.8,
        }
    }
}

impl ScoringConfig {
    /// Manufacturer confidence from a raw keyword score, clamped to [0, 100].
    #[must_use]
    pub fn confidence_from_score(&self, score: u32) -> u8 {
        score.saturating_mul(10).min(100) as u8
    }
}
