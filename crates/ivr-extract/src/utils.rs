//! Text cleanup helpers shared by the extraction components.

/// Normalizes a label for comparison by lowercasing and collapsing
/// separators into single spaces.
#[must_use]
pub fn normalize_label(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\', ':'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cleans an extracted field value: collapses whitespace and strips stray
/// punctuation and quotes left behind by label splitting.
#[must_use]
pub fn clean_field_value(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_start_matches(|c: char| matches!(c, '"' | '\'' | ':' | '-' | '_' | '|'))
        .trim_end_matches(|c: char| {
            matches!(c, '"' | '\'' | ':' | '-' | '_' | ',' | ';' | '|' | '.')
        })
        .trim()
        .to_string()
}

/// Parses a money amount by stripping everything but digits and the decimal
/// point. Returns `None` when nothing parseable remains.
#[must_use]
pub fn parse_money(raw: &str) -> Option<f64> {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok()
}

/// Parses a quantity, tolerating surrounding text. Unparseable input is 0.
#[must_use]
pub fn parse_quantity(raw: &str) -> u32 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Heuristic for whether a line is itself a form label rather than a value.
/// Used when an exact label match has an empty value and the value may have
/// wrapped onto the following line.
#[must_use]
pub fn looks_like_label(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.contains(':') || trimmed.ends_with('?') {
        return true;
    }
    let lower = trimmed.to_lowercase();
    ["name", "date", "phone", "email", "address", "number"]
        .iter()
        .any(|indicator| lower.contains(indicator))
}
