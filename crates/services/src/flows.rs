//! Screen-level operations built on `ProgressStore::dispatch`.
//!
//! These validate input against the reference content and turn raw answers
//! into scores before handing a typed event to the store.

use std::collections::BTreeMap;

use vark_core::content::{self, ContentError};
use vark_core::model::{LearningStyle, Percent};
use vark_core::{Event, Phase, scoring};

use crate::error::AssessmentError;
use crate::store::ProgressStore;

impl ProgressStore {
    /// Choose the topic to study.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::TopicNotFound` for unknown ids; progress is
    /// left untouched.
    pub fn select_topic(&mut self, topic_id: &str) -> Result<Phase, AssessmentError> {
        let topic = content::topic(topic_id)?;
        Ok(self.dispatch(Event::SelectTopic(topic.id.to_string())))
    }

    /// Tally survey answers (question id to option id) and record them.
    pub fn complete_survey(&mut self, answers: &BTreeMap<String, String>) -> Phase {
        let tally = scoring::tally_survey(content::survey_questions(), answers);
        tracing::info!(
            answered = tally.total(),
            primary = %scoring::primary_style(&tally),
            "survey completed"
        );
        self.dispatch(Event::CompleteSurvey(tally))
    }

    /// Mark a module as being studied.
    pub fn start_module(&mut self, style: LearningStyle) -> Phase {
        self.dispatch(Event::StartModuleStudy(style))
    }

    /// Add study time to a started module.
    pub fn record_study_time(&mut self, style: LearningStyle, seconds: u64) -> Phase {
        self.dispatch(Event::RecordStudyTime {
            module: style,
            seconds,
        })
    }

    /// Store free-form notes on a started module. Blank notes remove them.
    pub fn save_notes(&mut self, style: LearningStyle, notes: &str) -> Phase {
        self.dispatch(Event::SaveNotes {
            module: style,
            notes: notes.to_string(),
        })
    }

    /// Score a recall test for the selected topic and record the result.
    ///
    /// `answers` maps question id to the chosen option index.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` when no topic is selected or the topic has no
    /// module for `style`.
    pub fn complete_module_test(
        &mut self,
        style: LearningStyle,
        answers: &BTreeMap<String, usize>,
    ) -> Result<Percent, AssessmentError> {
        let topic_id = self
            .snapshot()
            .selected_topic()
            .ok_or(ContentError::NoTopicSelected)?;
        let module = content::module(topic_id, style)?;
        let score = scoring::recall_score(module.questions, answers);
        tracing::info!(module = %style, score = %score, "recall test scored");

        self.dispatch(Event::CompleteModuleTest {
            module: style,
            score,
        });
        Ok(score)
    }

    /// Discard all progress and clear storage.
    pub fn reset(&mut self) -> Phase {
        tracing::info!("resetting assessment progress");
        self.dispatch(Event::Reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use storage::InMemoryRepository;
    use vark_core::time::fixed_clock;

    const TOPIC: &str = "marine_bioluminescence";

    async fn store() -> ProgressStore {
        ProgressStore::open(Arc::new(InMemoryRepository::new()), fixed_clock()).await
    }

    fn all_correct(style: LearningStyle) -> BTreeMap<String, usize> {
        content::module(TOPIC, style)
            .unwrap()
            .questions
            .iter()
            .map(|q| (q.id.to_string(), q.correct))
            .collect()
    }

    #[tokio::test]
    async fn unknown_topic_is_rejected_without_change() {
        let mut store = store().await;
        let err = store.select_topic("volcanoes").unwrap_err();

        assert!(matches!(
            err,
            AssessmentError::Content(ContentError::TopicNotFound(_))
        ));
        assert!(store.snapshot().is_pristine());
    }

    #[tokio::test]
    async fn survey_answers_become_tally() {
        let mut store = store().await;
        store.select_topic(TOPIC).unwrap();

        let answers = [("q1", "b"), ("q2", "a"), ("q3", "b"), ("q4", "c"), ("q5", "d")]
            .iter()
            .map(|(q, o)| ((*q).to_string(), (*o).to_string()))
            .collect();
        let phase = store.complete_survey(&answers);

        assert_eq!(phase, Phase::ModuleSelection);
        let tally = store.snapshot().vark_results().copied().unwrap();
        assert_eq!(tally.total(), 5);
    }

    #[tokio::test]
    async fn module_test_requires_topic() {
        let mut store = store().await;
        let err = store
            .complete_module_test(LearningStyle::Visual, &BTreeMap::new())
            .unwrap_err();

        assert!(matches!(
            err,
            AssessmentError::Content(ContentError::NoTopicSelected)
        ));
    }

    #[tokio::test]
    async fn module_test_scores_against_full_question_list() {
        let mut store = store().await;
        store.select_topic(TOPIC).unwrap();
        store.start_module(LearningStyle::Auditory);

        let mut answers = all_correct(LearningStyle::Auditory);
        let first = answers.keys().next().cloned().unwrap();
        answers.remove(&first);
        let score = store
            .complete_module_test(LearningStyle::Auditory, &answers)
            .unwrap();

        assert_eq!(score.value(), 67);
        let progress = store.snapshot().module(LearningStyle::Auditory).unwrap();
        assert!(progress.completed());
        assert_eq!(progress.retention_score(), score);
    }

    #[tokio::test]
    async fn study_time_and_notes_accumulate_on_started_module() {
        let mut store = store().await;
        store.select_topic(TOPIC).unwrap();
        store.start_module(LearningStyle::Kinesthetic);
        store.record_study_time(LearningStyle::Kinesthetic, 40);
        store.record_study_time(LearningStyle::Kinesthetic, 20);
        store.save_notes(LearningStyle::Kinesthetic, "  try the glow-stick demo ");

        let progress = store.snapshot().module(LearningStyle::Kinesthetic).unwrap();
        assert_eq!(progress.time_spent(), 60);
        assert_eq!(progress.notes(), Some("try the glow-stick demo"));
    }

    #[tokio::test]
    async fn finishing_every_module_reaches_results() {
        let mut store = store().await;
        store.select_topic(TOPIC).unwrap();
        store.complete_survey(&BTreeMap::new());

        for style in LearningStyle::ALL {
            store.start_module(style);
            store
                .complete_module_test(style, &all_correct(style))
                .unwrap();
        }

        assert_eq!(store.current_phase(), Phase::Results);
        let results = store.snapshot().final_results().unwrap();
        assert!(results.performance_scores().values().all(|s| *s == Percent::FULL));
        assert_eq!(results.recommendations().len(), 5);

        assert_eq!(store.reset(), Phase::Welcome);
    }
}
