//! Field-level normalizers shared by every source.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use ivr_patterns::title_case;

/// Date formats accepted, tried in order. US month-first wins the ambiguous
/// cases since the source documents are US insurance paperwork.
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%d/%m/%Y", "%Y-%m-%d", "%m-%d-%Y", "%d-%m-%Y"];

/// Datetime formats tried before the date-only ladder; eligibility payloads
/// often carry full timestamps where only the date matters.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Normalizes a date string to ISO `YYYY-MM-DD`, keeping only the date part
/// of datetime input. Returns `None` when no known format parses.
#[must_use]
pub fn normalize_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive().format("%Y-%m-%d").to_string());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Some(dt.date().format("%Y-%m-%d").to_string());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
}

/// Normalizes a US phone number to `(XXX) XXX-XXXX`. A leading country code
/// `1` on an 11-digit number is dropped. Anything else is unparseable.
#[must_use]
pub fn normalize_phone(raw: &str) -> Option<String> {
    let mut digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 11 && digits.starts_with('1') {
        digits.remove(0);
    }
    if digits.len() != 10 {
        return None;
    }
    Some(format!(
        "({}) {}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..10]
    ))
}

/// Normalizes an identifier to uppercase alphanumerics only.
#[must_use]
pub fn normalize_id(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_uppercase();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Title-cases a person name.
#[must_use]
pub fn normalize_person_name(raw: &str) -> String {
    title_case(raw.trim())
}

/// Splits a full name into (first, last). `LAST, FIRST` order is detected by
/// the comma; otherwise the first word is the first name and the final word
/// the last name.
#[must_use]
pub fn split_full_name(raw: &str) -> (Option<String>, Option<String>) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return (None, None);
    }
    if let Some((last, first)) = trimmed.split_once(',') {
        let first = first.trim();
        let last = last.trim();
        return (
            (!first.is_empty()).then(|| normalize_person_name(first)),
            (!last.is_empty()).then(|| normalize_person_name(last)),
        );
    }
    let words: Vec<&str> = trimmed.split_whitespace().collect();
    match words.as_slice() {
        [] => (None, None),
        [only] => (Some(normalize_person_name(only)), None),
        [first, .., last] => (
            Some(normalize_person_name(first)),
            Some(normalize_person_name(last)),
        ),
    }
}

/// Classifies free-text plan descriptions into a closed plan-type set.
/// Non-empty text that matches nothing is `Other`; empty input is `None`.
#[must_use]
pub fn detect_plan_type(raw: &str) -> Option<&'static str> {
    let text = raw.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }
    let plan = if text.contains("medicare") {
        "Medicare"
    } else if text.contains("medicaid") {
        "Medicaid"
    } else if text.contains("ppo") {
        "PPO"
    } else if text.contains("hmo") {
        "HMO"
    } else if text.contains("pos") {
        "POS"
    } else if text.contains("epo") {
        "EPO"
    } else {
        "Other"
    };
    Some(plan)
}

/// Parses a benefit amount (copay, deductible, out-of-pocket maximum) by
/// stripping currency symbols and separators. `None` when nothing numeric
/// remains.
#[must_use]
pub fn normalize_money(raw: &str) -> Option<f64> {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok()
}

/// Normalizes a two-letter state code. Longer strings are not coerced.
#[must_use]
pub fn normalize_state(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()))
        .then(|| trimmed.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_normalize_to_iso() {
        assert_eq!(normalize_date("03/15/1965"), Some("1965-03-15".to_string()));
        assert_eq!(normalize_date("1965-03-15"), Some("1965-03-15".to_string()));
        assert_eq!(normalize_date("12-31-2024"), Some("2024-12-31".to_string()));
        assert_eq!(normalize_date("31-12-2024"), Some("2024-12-31".to_string()));
        assert_eq!(normalize_date("not a date"), None);
        assert_eq!(normalize_date(""), None);
    }

    #[test]
    fn datetimes_keep_only_the_date_part() {
        assert_eq!(
            normalize_date("1965-03-15T00:00:00Z"),
            Some("1965-03-15".to_string())
        );
        assert_eq!(
            normalize_date("2024-06-01T14:30:00-05:00"),
            Some("2024-06-01".to_string())
        );
        assert_eq!(
            normalize_date("2024-06-01T14:30:00"),
            Some("2024-06-01".to_string())
        );
        assert_eq!(
            normalize_date("2024-06-01 14:30:00"),
            Some("2024-06-01".to_string())
        );
    }

    #[test]
    fn phones_normalize_to_us_format() {
        assert_eq!(
            normalize_phone("1-800-555-1234"),
            Some("(800) 555-1234".to_string())
        );
        assert_eq!(
            normalize_phone("(512) 555-0142"),
            Some("(512) 555-0142".to_string())
        );
        assert_eq!(normalize_phone("5551234"), None);
        assert_eq!(normalize_phone("ext. 204"), None);
    }

    #[test]
    fn ids_keep_alphanumerics_only() {
        assert_eq!(normalize_id(" mbr-123 456 "), Some("MBR123456".to_string()));
        assert_eq!(normalize_id("---"), None);
    }

    #[test]
    fn comma_names_split_last_first() {
        assert_eq!(
            split_full_name("SMITH, JOHN"),
            (Some("John".to_string()), Some("Smith".to_string()))
        );
        assert_eq!(
            split_full_name("Jane Q Public"),
            (Some("Jane".to_string()), Some("Public".to_string()))
        );
        assert_eq!(split_full_name("Cher"), (Some("Cher".to_string()), None));
        assert_eq!(split_full_name("  "), (None, None));
    }

    #[test]
    fn plan_types_classify_with_other_fallback() {
        assert_eq!(detect_plan_type("BCBS PPO Select"), Some("PPO"));
        assert_eq!(detect_plan_type("Medicare Advantage HMO"), Some("Medicare"));
        assert_eq!(detect_plan_type("Standard Plan"), Some("Other"));
        assert_eq!(detect_plan_type(""), None);
    }

    #[test]
    fn benefit_amounts_strip_currency_noise() {
        assert_eq!(normalize_money("$1,500.00"), Some(1500.0));
        assert_eq!(normalize_money("25"), Some(25.0));
        assert_eq!(normalize_money("n/a"), None);
    }

    #[test]
    fn state_codes_must_be_two_letters() {
        assert_eq!(normalize_state(" tx "), Some("TX".to_string()));
        assert_eq!(normalize_state("Texas"), None);
        assert_eq!(normalize_state("T1"), None);
    }
}
