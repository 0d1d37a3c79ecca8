//! Medicare Administrative Contractor (MAC) jurisdiction lookup.
//!
//! Reference fixture carried from the upstream tables; not an authoritative
//! or complete list of jurisdictions. States absent from the table resolve to
//! `"Unknown"` rather than being guessed.

const JURISDICTIONS: &[(&str, &[&str])] = &[
    ("JE", &["CA", "HI", "NV", "AS", "GU", "MP"]),
    (
        "JF",
        &["AK", "AZ", "ID", "MT", "ND", "OR", "SD", "UT", "WA", "WY"],
    ),
    ("JH", &["AR", "CO", "LA", "MS", "NM", "OK", "TX"]),
    (
        "JJ",
        &["AL", "FL", "GA", "KY", "NC", "SC", "TN", "VA", "WV"],
    ),
    (
        "JK",
        &[
            "CT", "DE", "DC", "ME", "MD", "MA", "NH", "NJ", "NY", "PA", "RI", "VT",
        ],
    ),
    (
        "JL",
        &["IA", "IL", "IN", "KS", "MI", "MN", "MO", "NE", "OH", "WI"],
    ),
];

/// Maps a two-letter state code to its MAC jurisdiction bucket.
#[must_use]
pub fn mac_jurisdiction(state: &str) -> &'static str {
    let code = state.trim().to_uppercase();
    for (jurisdiction, states) in JURISDICTIONS {
        if states.iter().any(|s| *s == code) {
            return jurisdiction;
        }
    }
    "Unknown"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_states_resolve() {
        assert_eq!(mac_jurisdiction("CA"), "JE");
        assert_eq!(mac_jurisdiction("tx"), "JH");
        assert_eq!(mac_jurisdiction(" NY "), "JK");
    }

    #[test]
    fn unknown_states_fall_through() {
        assert_eq!(mac_jurisdiction("PR"), "Unknown");
        assert_eq!(mac_jurisdiction(""), "Unknown");
    }
}
