use std::fmt;

use crate::model::ProgressSnapshot;

/// Top-level stage of the assessment that the UI renders.
///
/// `TopicSelection` is only ever reached by navigating from `Welcome`; it is
/// never derived from stored progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Welcome,
    TopicSelection,
    Survey,
    ModuleSelection,
    Results,
}

impl Phase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Welcome => "welcome",
            Phase::TopicSelection => "topic-selection",
            Phase::Survey => "survey",
            Phase::ModuleSelection => "module-selection",
            Phase::Results => "results",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry phase for a snapshot. First matching rule wins.
///
/// Recomputed on every read and never stored, so the displayed phase cannot
/// drift from persisted progress.
#[must_use]
pub fn derive_phase(snapshot: &ProgressSnapshot) -> Phase {
    if snapshot.is_completed() {
        Phase::Results
    } else if !snapshot.module_progress().is_empty() || snapshot.vark_completed() {
        Phase::ModuleSelection
    } else if snapshot.selected_topic().is_some() {
        Phase::Survey
    } else {
        Phase::Welcome
    }
}
