//! Source tags for the heterogeneous inputs feeding normalization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Identifies where a raw record came from.
///
/// The tag selects the source-specific field mapping during normalization and
/// carries a reliability multiplier used by confidence scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    /// OCR output from a scanned insurance card.
    InsuranceCard,
    /// Fields returned by a completed e-signature submission.
    EsignSubmission,
    /// The quick intake form filled by office staff.
    QuickIntake,
    /// A payer eligibility-check response.
    EligibilityResponse,
    /// Manually keyed data.
    ManualEntry,
    /// Unrecognized origin; normalized as-is with the lowest reliability.
    Unknown,
}

impl SourceTag {
    /// Reliability multiplier applied to the required-field fill rate.
    ///
    /// Eligibility responses come straight from the payer and are trusted
    /// fully; manual entry is the least reliable of the known sources.
    #[must_use]
    pub fn reliability(self) -> f64 {
        match self {
            Self::EligibilityResponse => 1.0,
            Self::EsignSubmission => 0.95,
            Self::InsuranceCard => 0.9,
            Self::QuickIntake => 0.85,
            Self::ManualEntry => 0.8,
            Self::Unknown => 0.7,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InsuranceCard => "insurance_card",
            Self::EsignSubmission => "esign_submission",
            Self::QuickIntake => "quick_intake",
            Self::EligibilityResponse => "eligibility_response",
            Self::ManualEntry => "manual_entry",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceTag {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "insurance_card" | "insurance-card" => Ok(Self::InsuranceCard),
            "esign_submission" | "esign" | "e-signature" => Ok(Self::EsignSubmission),
            "quick_intake" | "quick-intake" | "quick_request" => Ok(Self::QuickIntake),
            "eligibility_response" | "eligibility" => Ok(Self::EligibilityResponse),
            "manual_entry" | "manual" => Ok(Self::ManualEntry),
            "unknown" => Ok(Self::Unknown),
            other => Err(ModelError::UnknownSourceTag(other.to_string())),
        }
    }
}
