use serde::{Deserialize, Serialize};

use crate::model::{LearningStyle, Percent};

/// Where a single study module stands, as shown on the module selection view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// Progress for one study module.
///
/// Created the first time the module's study view opens and updated when its
/// recall test completes. Only a full reset removes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProgress {
    module_id: LearningStyle,
    study_started: bool,
    completed: bool,
    retention_score: Percent,
    time_spent: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl ModuleProgress {
    /// Fresh progress for a module whose study view just opened.
    #[must_use]
    pub fn started(module_id: LearningStyle) -> Self {
        Self {
            module_id,
            study_started: true,
            completed: false,
            retention_score: Percent::ZERO,
            time_spent: 0,
            notes: None,
        }
    }

    #[must_use]
    pub fn module_id(&self) -> LearningStyle {
        self.module_id
    }

    #[must_use]
    pub fn study_started(&self) -> bool {
        self.study_started
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn retention_score(&self) -> Percent {
        self.retention_score
    }

    /// Seconds spent on the study view.
    #[must_use]
    pub fn time_spent(&self) -> u64 {
        self.time_spent
    }

    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    #[must_use]
    pub fn status(&self) -> ModuleStatus {
        if self.completed {
            ModuleStatus::Completed
        } else if self.study_started {
            ModuleStatus::InProgress
        } else {
            ModuleStatus::NotStarted
        }
    }

    pub(crate) fn mark_started(&mut self) {
        self.study_started = true;
    }

    pub(crate) fn complete_test(&mut self, score: Percent) {
        self.study_started = true;
        self.completed = true;
        self.retention_score = score;
    }

    pub(crate) fn add_time(&mut self, seconds: u64) {
        self.time_spent = self.time_spent.saturating_add(seconds);
    }

    pub(crate) fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
    }
}
