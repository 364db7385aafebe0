//! Pure scoring functions: survey tally, primary style, recall percentage,
//! completion gate and final results.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::content::{RecallQuestion, SurveyQuestion, recommendations};
use crate::model::{FinalResults, LearningStyle, Percent, ProgressSnapshot, VarkTally};

/// Count chosen options per style.
///
/// `answers` maps question id to option id. Answers naming an unknown
/// question or option are ignored, and each bank question counts at most once,
/// so the total never exceeds the bank size.
#[must_use]
pub fn tally_survey(bank: &[SurveyQuestion], answers: &BTreeMap<String, String>) -> VarkTally {
    let mut tally = VarkTally::default();
    for question in bank {
        let chosen = answers
            .get(question.id)
            .and_then(|option_id| question.option(option_id));
        if let Some(option) = chosen {
            tally.record(option.style);
        }
    }
    tally
}

/// Style with the highest count.
///
/// Ties go to the style that comes first in `LearningStyle::ALL`
/// (visual, auditory, reading, kinesthetic). An empty tally yields visual.
#[must_use]
pub fn primary_style(tally: &VarkTally) -> LearningStyle {
    let mut best = (LearningStyle::Visual, tally.count(LearningStyle::Visual));
    for (style, count) in tally.iter().skip(1) {
        if count > best.1 {
            best = (style, count);
        }
    }
    best.0
}

/// `100 * correct / total`, rounded half up. Zero questions score zero.
#[must_use]
pub fn percentage(correct: usize, total: usize) -> Percent {
    if total == 0 {
        return Percent::ZERO;
    }
    let correct = correct.min(total) as u64;
    let total = total as u64;
    let rounded = (200 * correct + total) / (2 * total);
    Percent::saturating(u32::try_from(rounded).unwrap_or(100))
}

/// Score a recall test.
///
/// `answers` maps question id to the chosen option index. Unanswered
/// questions count as wrong; the denominator is the full question list.
#[must_use]
pub fn recall_score(questions: &[RecallQuestion], answers: &BTreeMap<String, usize>) -> Percent {
    let correct = questions
        .iter()
        .filter(|question| {
            answers
                .get(question.id)
                .is_some_and(|answer| question.is_correct(*answer))
        })
        .count();
    percentage(correct, questions.len())
}

/// True once every study module has a completed recall test.
#[must_use]
pub fn completion_gate_reached(snapshot: &ProgressSnapshot) -> bool {
    LearningStyle::ALL.iter().all(|style| {
        snapshot
            .module(*style)
            .is_some_and(|progress| progress.completed())
    })
}

/// Build the learning-style profile from the current snapshot.
#[must_use]
pub fn final_results(snapshot: &ProgressSnapshot, completed_at: DateTime<Utc>) -> FinalResults {
    let tally = snapshot.vark_results().copied().unwrap_or_default();
    let primary = primary_style(&tally);
    let performance = snapshot
        .module_progress()
        .iter()
        .filter(|(_, progress)| progress.completed())
        .map(|(style, progress)| (*style, progress.retention_score()))
        .collect();
    let strategies = recommendations(primary)
        .iter()
        .map(|line| (*line).to_string())
        .collect();

    FinalResults::new(primary, tally, performance, strategies, completed_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{module, survey_questions};
    use crate::time::fixed_now;
    use crate::transition::{Event, apply};

    fn answers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(q, o)| ((*q).to_string(), (*o).to_string()))
            .collect()
    }

    #[test]
    fn all_visual_answers_tally_to_five_visual() {
        let chosen = answers(&[("q1", "b"), ("q2", "a"), ("q3", "d"), ("q4", "a"), ("q5", "d")]);
        let tally = tally_survey(survey_questions(), &chosen);

        assert_eq!(tally, VarkTally::new(5, 0, 0, 0).unwrap());
        assert_eq!(primary_style(&tally), LearningStyle::Visual);
    }

    #[test]
    fn tally_ignores_unknown_questions_and_options() {
        let chosen = answers(&[("q1", "c"), ("q2", "z"), ("q7", "a")]);
        let tally = tally_survey(survey_questions(), &chosen);

        assert_eq!(tally.total(), 1);
        assert_eq!(tally.count(LearningStyle::Auditory), 1);
    }

    #[test]
    fn partial_survey_sums_to_answered_count() {
        let chosen = answers(&[("q1", "a"), ("q2", "b"), ("q3", "a")]);
        let tally = tally_survey(survey_questions(), &chosen);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn ties_break_in_fixed_order() {
        let tally = VarkTally::new(2, 2, 1, 0).unwrap();
        assert_eq!(primary_style(&tally), LearningStyle::Visual);

        let tally = VarkTally::new(0, 1, 2, 2).unwrap();
        assert_eq!(primary_style(&tally), LearningStyle::Reading);
    }

    #[test]
    fn clear_maximum_wins_regardless_of_order() {
        let tally = VarkTally::new(1, 0, 1, 3).unwrap();
        assert_eq!(primary_style(&tally), LearningStyle::Kinesthetic);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(2, 3).value(), 67);
        assert_eq!(percentage(1, 3).value(), 33);
        assert_eq!(percentage(1, 2).value(), 50);
        assert_eq!(percentage(1, 8).value(), 13);
        assert_eq!(percentage(3, 3), Percent::FULL);
        assert_eq!(percentage(0, 0), Percent::ZERO);
    }

    #[test]
    fn recall_score_is_idempotent() {
        let questions = module("marine_bioluminescence", LearningStyle::Visual)
            .unwrap()
            .questions;
        let chosen: BTreeMap<String, usize> =
            [("q1".to_string(), 2), ("q2".to_string(), 1), ("q3".to_string(), 0)]
                .into_iter()
                .collect();

        let first = recall_score(questions, &chosen);
        let second = recall_score(questions, &chosen);
        assert_eq!(first.value(), 67);
        assert_eq!(first, second);
    }

    #[test]
    fn unanswered_questions_count_as_wrong() {
        let questions = module("marine_bioluminescence", LearningStyle::Auditory)
            .unwrap()
            .questions;
        let chosen: BTreeMap<String, usize> = [("q1".to_string(), 3)].into_iter().collect();
        assert_eq!(recall_score(questions, &chosen).value(), 33);
    }

    #[test]
    fn gate_requires_every_module() {
        let mut snapshot = ProgressSnapshot::default();
        for style in &LearningStyle::ALL[..3] {
            snapshot = apply(
                snapshot,
                Event::CompleteModuleTest {
                    module: *style,
                    score: Percent::FULL,
                },
            );
        }
        assert!(!completion_gate_reached(&snapshot));

        snapshot = apply(snapshot, Event::StartModuleStudy(LearningStyle::Kinesthetic));
        assert!(!completion_gate_reached(&snapshot));

        snapshot = apply(
            snapshot,
            Event::CompleteModuleTest {
                module: LearningStyle::Kinesthetic,
                score: Percent::new(33).unwrap(),
            },
        );
        assert!(completion_gate_reached(&snapshot));
    }

    #[test]
    fn final_results_collect_scores_and_recommendations() {
        let mut snapshot = apply(
            ProgressSnapshot::default(),
            Event::CompleteSurvey(VarkTally::new(1, 1, 3, 0).unwrap()),
        );
        for (style, score) in LearningStyle::ALL.into_iter().zip([100, 67, 33, 0]) {
            snapshot = apply(
                snapshot,
                Event::CompleteModuleTest {
                    module: style,
                    score: Percent::new(score).unwrap(),
                },
            );
        }

        let results = final_results(&snapshot, fixed_now());

        assert_eq!(results.primary_learning_style(), LearningStyle::Reading);
        assert_eq!(results.vark_scores().total(), 5);
        assert_eq!(results.performance_scores().len(), 4);
        assert_eq!(
            results.performance_scores()[&LearningStyle::Auditory].value(),
            67
        );
        assert_eq!(
            results.recommendations()[0],
            "Take detailed written notes during lectures"
        );
        assert_eq!(results.completed_at(), fixed_now());
    }
}
