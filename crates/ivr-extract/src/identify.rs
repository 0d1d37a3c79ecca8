//! Manufacturer identification from free-form order text.

use ivr_patterns::PatternRegistry;

/// Outcome of scoring the registry's profiles against one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManufacturerMatch {
    pub name: String,
    /// Raw keyword score before clamping.
    pub score: u32,
    /// Score mapped onto [0, 100].
    pub confidence: u8,
}

/// Scores every registered manufacturer against the text and returns the
/// best match, or `None` when no keyword matched at all.
///
/// Identifier keywords weigh more than product keywords. Ties keep the
/// earlier registry entry, so profile order is a priority order.
#[must_use]
pub fn identify_manufacturer(text: &str, registry: &PatternRegistry) -> Option<ManufacturerMatch> {
    let haystack = text.to_uppercase();
    let scoring = registry.scoring();

    let mut best: Option<ManufacturerMatch> = None;
    for profile in registry.manufacturers() {
        let identifier_hits = profile
            .identifier_keywords
            .iter()
            .filter(|k| haystack.contains(&k.to_uppercase()))
            .count() as u32;
        let product_hits = profile
            .product_keywords
            .iter()
            .filter(|k| haystack.contains(&k.to_uppercase()))
            .count() as u32;

        let score = identifier_hits * scoring.identifier_points
            + product_hits * scoring.product_points;
        if score == 0 {
            continue;
        }
        tracing::debug!(
            manufacturer = %profile.name,
            identifier_hits,
            product_hits,
            score,
            "scored manufacturer profile"
        );
        if best.as_ref().is_none_or(|b| score > b.score) {
            best = Some(ManufacturerMatch {
                name: profile.name.clone(),
                score,
                confidence: scoring.confidence_from_score(score),
            });
        }
    }
    best
}
