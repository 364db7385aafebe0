use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::SURVEY_QUESTION_COUNT;
use crate::model::LearningStyle;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TallyError {
    #[error("tally total ({total}) exceeds the survey size ({max})")]
    TooManyAnswers { total: u32, max: u32 },
}

/// Per-style answer counts from the preference survey.
///
/// The total never exceeds the survey size: a tally is either built by
/// counting answers against the bank or validated on the way in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TallyCounts")]
pub struct VarkTally {
    visual: u32,
    auditory: u32,
    reading: u32,
    kinesthetic: u32,
}

#[derive(Deserialize)]
struct TallyCounts {
    visual: u32,
    auditory: u32,
    reading: u32,
    kinesthetic: u32,
}

impl TryFrom<TallyCounts> for VarkTally {
    type Error = TallyError;

    fn try_from(raw: TallyCounts) -> Result<Self, Self::Error> {
        Self::new(raw.visual, raw.auditory, raw.reading, raw.kinesthetic)
    }
}

impl VarkTally {
    /// Build a tally from explicit counts.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::TooManyAnswers` if the counts add up to more than
    /// the number of survey questions.
    pub fn new(visual: u32, auditory: u32, reading: u32, kinesthetic: u32) -> Result<Self, TallyError> {
        let total = u64::from(visual) + u64::from(auditory) + u64::from(reading) + u64::from(kinesthetic);
        let max = SURVEY_QUESTION_COUNT as u32;
        if total > u64::from(max) {
            return Err(TallyError::TooManyAnswers {
                total: u32::try_from(total).unwrap_or(u32::MAX),
                max,
            });
        }
        Ok(Self {
            visual,
            auditory,
            reading,
            kinesthetic,
        })
    }

    #[must_use]
    pub fn count(&self, style: LearningStyle) -> u32 {
        match style {
            LearningStyle::Visual => self.visual,
            LearningStyle::Auditory => self.auditory,
            LearningStyle::Reading => self.reading,
            LearningStyle::Kinesthetic => self.kinesthetic,
        }
    }

    /// Number of answers counted.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.visual + self.auditory + self.reading + self.kinesthetic
    }

    /// Counts in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = (LearningStyle, u32)> + '_ {
        LearningStyle::ALL
            .into_iter()
            .map(move |style| (style, self.count(style)))
    }

    // Callers count each survey question at most once, which keeps the cap.
    pub(crate) fn record(&mut self, style: LearningStyle) {
        let slot = match style {
            LearningStyle::Visual => &mut self.visual,
            LearningStyle::Auditory => &mut self.auditory,
            LearningStyle::Reading => &mut self.reading,
            LearningStyle::Kinesthetic => &mut self.kinesthetic,
        };
        *slot = slot.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_full_survey() {
        let tally = VarkTally::new(2, 1, 1, 1).unwrap();
        assert_eq!(tally.total(), 5);
        assert_eq!(tally.count(LearningStyle::Visual), 2);
    }

    #[test]
    fn new_rejects_more_answers_than_questions() {
        let err = VarkTally::new(3, 3, 0, 0).unwrap_err();
        assert_eq!(err, TallyError::TooManyAnswers { total: 6, max: 5 });
    }

    #[test]
    fn deserialize_enforces_cap() {
        let ok: VarkTally =
            serde_json::from_str(r#"{"visual":1,"auditory":1,"reading":1,"kinesthetic":0}"#)
                .unwrap();
        assert_eq!(ok.total(), 3);

        let bad = serde_json::from_str::<VarkTally>(
            r#"{"visual":5,"auditory":1,"reading":0,"kinesthetic":0}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn iter_follows_precedence_order() {
        let tally = VarkTally::new(0, 1, 2, 0).unwrap();
        let styles: Vec<_> = tally.iter().map(|(style, _)| style).collect();
        assert_eq!(styles, LearningStyle::ALL.to_vec());
    }
}
