use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four VARK learning-style preferences.
///
/// Each style also names a study module, so the same value keys module
/// progress, survey options and the content bank. Declaration order is the
/// fixed precedence used everywhere a deterministic order is needed
/// (tie-breaks, iteration, ranking).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    Visual,
    Auditory,
    Reading,
    Kinesthetic,
}

impl LearningStyle {
    /// All styles in precedence order.
    pub const ALL: [LearningStyle; 4] = [
        LearningStyle::Visual,
        LearningStyle::Auditory,
        LearningStyle::Reading,
        LearningStyle::Kinesthetic,
    ];

    /// Stable identifier, identical to the persisted form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LearningStyle::Visual => "visual",
            LearningStyle::Auditory => "auditory",
            LearningStyle::Reading => "reading",
            LearningStyle::Kinesthetic => "kinesthetic",
        }
    }

    /// Human-readable module name.
    #[must_use]
    pub fn module_name(self) -> &'static str {
        match self {
            LearningStyle::Visual => "Visual",
            LearningStyle::Auditory => "Auditory",
            LearningStyle::Reading => "Reading/Writing",
            LearningStyle::Kinesthetic => "Kinesthetic",
        }
    }

    /// Profile label shown for a primary style.
    #[must_use]
    pub fn learner_label(self) -> &'static str {
        match self {
            LearningStyle::Visual => "Visual Learner",
            LearningStyle::Auditory => "Auditory Learner",
            LearningStyle::Reading => "Reading/Writing Learner",
            LearningStyle::Kinesthetic => "Kinesthetic Learner",
        }
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing a style from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStyleError {
    raw: String,
}

impl fmt::Display for ParseStyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown learning style: {}", self.raw)
    }
}

impl std::error::Error for ParseStyleError {}

impl FromStr for LearningStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        LearningStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == normalized)
            .ok_or_else(|| ParseStyleError { raw: s.to_string() })
    }
}
