//! The progress reducer: `apply(snapshot, event)` is a total, pure function.
//!
//! Persistence and the completion gate are the caller's business; nothing in
//! here performs I/O or reads the clock.

use crate::model::{FinalResults, LearningStyle, ModuleProgress, Percent, ProgressSnapshot, VarkTally};

/// A discrete progress change requested by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SelectTopic(String),
    CompleteSurvey(VarkTally),
    StartModuleStudy(LearningStyle),
    CompleteModuleTest {
        module: LearningStyle,
        score: Percent,
    },
    /// Add study time to a started module.
    RecordStudyTime {
        module: LearningStyle,
        seconds: u64,
    },
    /// Replace a started module's notes; blank text clears them.
    SaveNotes {
        module: LearningStyle,
        notes: String,
    },
    CompleteAssessment(Box<FinalResults>),
    Reset,
}

impl Event {
    /// Short name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Event::SelectTopic(_) => "select_topic",
            Event::CompleteSurvey(_) => "complete_survey",
            Event::StartModuleStudy(_) => "start_module_study",
            Event::CompleteModuleTest { .. } => "complete_module_test",
            Event::RecordStudyTime { .. } => "record_study_time",
            Event::SaveNotes { .. } => "save_notes",
            Event::CompleteAssessment(_) => "complete_assessment",
            Event::Reset => "reset",
        }
    }
}

/// Produce the snapshot that follows `event`.
#[must_use]
pub fn apply(mut snapshot: ProgressSnapshot, event: Event) -> ProgressSnapshot {
    match event {
        Event::SelectTopic(topic) => {
            snapshot.selected_topic = Some(topic);
        }
        Event::CompleteSurvey(tally) => {
            snapshot.vark_completed = true;
            snapshot.vark_results = Some(tally);
        }
        Event::StartModuleStudy(module) => {
            snapshot
                .module_progress
                .entry(module)
                .and_modify(ModuleProgress::mark_started)
                .or_insert_with(|| ModuleProgress::started(module));
        }
        Event::CompleteModuleTest { module, score } => {
            snapshot
                .module_progress
                .entry(module)
                .or_insert_with(|| ModuleProgress::started(module))
                .complete_test(score);
        }
        Event::RecordStudyTime { module, seconds } => {
            if let Some(progress) = snapshot.module_progress.get_mut(&module) {
                progress.add_time(seconds);
            }
        }
        Event::SaveNotes { module, notes } => {
            if let Some(progress) = snapshot.module_progress.get_mut(&module) {
                let trimmed = notes.trim();
                progress.set_notes((!trimmed.is_empty()).then(|| trimmed.to_string()));
            }
        }
        Event::CompleteAssessment(results) => {
            // Results are created once; a finished assessment keeps its first profile.
            if !snapshot.completed {
                snapshot.completed = true;
                snapshot.final_results = Some(*results);
            }
        }
        Event::Reset => return ProgressSnapshot::default(),
    }
    snapshot
}
