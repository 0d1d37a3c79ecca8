//! Label/value extraction: exact colon-split matching with a fuzzy
//! sliding-window fallback for OCR-damaged labels.

use std::collections::BTreeMap;

use ivr_patterns::ScoringConfig;

use crate::similarity::window_similarity;
use crate::utils::{clean_field_value, looks_like_label, normalize_label};

pub struct LabelValueExtractor<'a> {
    config: &'a ScoringConfig,
}

impl<'a> LabelValueExtractor<'a> {
    #[must_use]
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    /// Extracts every canonical field whose label variants appear in the
    /// text. The exact pass runs first for all fields; the fuzzy pass only
    /// fills fields the exact pass missed, so an exact hit is never
    /// overridden by a looser one.
    #[must_use]
    pub fn extract(
        &self,
        text: &str,
        label_variants: &BTreeMap<String, Vec<String>>,
    ) -> BTreeMap<String, String> {
        let lines: Vec<&str> = text.lines().collect();
        let mut fields = BTreeMap::new();

        for (field, variants) in label_variants {
            if let Some(value) = self.extract_exact(&lines, variants) {
                tracing::trace!(field = %field, "exact label match");
                fields.insert(field.clone(), value);
            }
        }
        for (field, variants) in label_variants {
            if fields.contains_key(field) {
                continue;
            }
            if let Some(value) = self.extract_fuzzy(&lines, variants) {
                tracing::trace!(field = %field, "fuzzy label match");
                fields.insert(field.clone(), value);
            }
        }
        fields
    }

    /// Looks for lines containing the label. An empty value after the colon
    /// reads the following line instead, unless that line looks like another
    /// label itself.
    fn extract_exact(&self, lines: &[&str], variants: &[String]) -> Option<String> {
        for variant in variants {
            let wanted = normalize_label(variant);
            for (i, line) in lines.iter().enumerate() {
                let Some((label_part, value_part)) = line.split_once(':') else {
                    continue;
                };
                // Suffix match so decorated labels ("Primary Contact Name")
                // still hit, without "Contact" stealing "Contact Email".
                if !normalize_label(label_part).ends_with(&wanted) {
                    continue;
                }
                let value = clean_field_value(value_part);
                if !value.is_empty() {
                    return Some(value);
                }
                if let Some(wrapped) = Self::next_line_value(lines, i) {
                    return Some(wrapped);
                }
            }
        }
        None
    }

    /// The same-line-empty fallback: the value may have wrapped onto the line
    /// below the label.
    fn next_line_value(lines: &[&str], index: usize) -> Option<String> {
        let next = lines.get(index + 1)?;
        if looks_like_label(next) {
            return None;
        }
        let wrapped = clean_field_value(next);
        (!wrapped.is_empty()).then_some(wrapped)
    }

    /// Slides a window of the variant's word count across each line and
    /// takes the text after the matching window as the value, falling back to
    /// the next line the same way the exact phase does.
    fn extract_fuzzy(&self, lines: &[&str], variants: &[String]) -> Option<String> {
        for variant in variants {
            let label_words: Vec<&str> = variant.split_whitespace().collect();
            if label_words.is_empty() {
                continue;
            }
            for (i, line) in lines.iter().enumerate() {
                let words: Vec<&str> = line.split_whitespace().collect();
                if words.len() < label_words.len() {
                    continue;
                }
                for start in 0..=(words.len() - label_words.len()) {
                    let window = &words[start..start + label_words.len()];
                    if window_similarity(window, &label_words, self.config)
                        < self.config.fuzzy_window_threshold
                    {
                        continue;
                    }
                    let rest = words[start + label_words.len()..].join(" ");
                    let value = clean_field_value(&rest);
                    if !value.is_empty() {
                        return Some(value);
                    }
                    if let Some(wrapped) = Self::next_line_value(lines, i) {
                        return Some(wrapped);
                    }
                }
            }
        }
        None
    }
}
