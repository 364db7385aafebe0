use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::{FinalResults, LearningStyle, ModuleProgress, ModuleStatus, VarkTally};

/// Invariant violations found in a decoded snapshot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("module entry `{key}` carries module id `{found}`")]
    ModuleKeyMismatch {
        key: LearningStyle,
        found: LearningStyle,
    },

    #[error("assessment marked completed without final results")]
    CompletedWithoutResults,

    #[error("final results present on an unfinished assessment")]
    ResultsWithoutCompletion,

    #[error("survey results present but survey not completed")]
    ResultsWithoutSurvey,
}

/// The complete persisted progress record.
///
/// Exactly one snapshot exists at a time and the progress store owns it;
/// everyone else reads it through shared references. The default value is the
/// pristine state of a first launch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) selected_topic: Option<String>,
    pub(crate) vark_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) vark_results: Option<VarkTally>,
    pub(crate) module_progress: BTreeMap<LearningStyle, ModuleProgress>,
    pub(crate) completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) final_results: Option<FinalResults>,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn selected_topic(&self) -> Option<&str> {
        self.selected_topic.as_deref()
    }

    #[must_use]
    pub fn vark_completed(&self) -> bool {
        self.vark_completed
    }

    #[must_use]
    pub fn vark_results(&self) -> Option<&VarkTally> {
        self.vark_results.as_ref()
    }

    #[must_use]
    pub fn module_progress(&self) -> &BTreeMap<LearningStyle, ModuleProgress> {
        &self.module_progress
    }

    #[must_use]
    pub fn module(&self, style: LearningStyle) -> Option<&ModuleProgress> {
        self.module_progress.get(&style)
    }

    #[must_use]
    pub fn module_status(&self, style: LearningStyle) -> ModuleStatus {
        self.module(style)
            .map_or(ModuleStatus::NotStarted, ModuleProgress::status)
    }

    #[must_use]
    pub fn completed_module_count(&self) -> usize {
        self.module_progress
            .values()
            .filter(|progress| progress.completed())
            .count()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn final_results(&self) -> Option<&FinalResults> {
        self.final_results.as_ref()
    }

    /// True for the untouched first-launch state, which is never persisted.
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        *self == Self::default()
    }

    /// Check cross-field invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first `SnapshotError` found.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        for (key, progress) in &self.module_progress {
            if progress.module_id() != *key {
                return Err(SnapshotError::ModuleKeyMismatch {
                    key: *key,
                    found: progress.module_id(),
                });
            }
        }
        match (self.completed, self.final_results.is_some()) {
            (true, false) => return Err(SnapshotError::CompletedWithoutResults),
            (false, true) => return Err(SnapshotError::ResultsWithoutCompletion),
            _ => {}
        }
        if self.vark_results.is_some() && !self.vark_completed {
            return Err(SnapshotError::ResultsWithoutSurvey);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_pristine_and_valid() {
        let snapshot = ProgressSnapshot::default();
        assert!(snapshot.is_pristine());
        assert!(snapshot.validate().is_ok());
        assert_eq!(snapshot.completed_module_count(), 0);
    }

    #[test]
    fn default_snapshot_serializes_required_fields_only() {
        let json = serde_json::to_value(ProgressSnapshot::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "varkCompleted": false,
                "moduleProgress": {},
                "completed": false
            })
        );
    }

    #[test]
    fn missing_required_field_fails_to_decode() {
        let result = serde_json::from_str::<ProgressSnapshot>(r#"{"varkCompleted":false}"#);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_module_key_fails_to_decode() {
        let raw = r#"{
            "varkCompleted": true,
            "moduleProgress": {
                "olfactory": {
                    "moduleId": "visual",
                    "studyStarted": true,
                    "completed": true,
                    "retentionScore": 100,
                    "timeSpent": 0
                }
            },
            "completed": false
        }"#;
        assert!(serde_json::from_str::<ProgressSnapshot>(raw).is_err());
    }

    #[test]
    fn validate_rejects_mismatched_module_key() {
        let raw = r#"{
            "varkCompleted": true,
            "moduleProgress": {
                "auditory": {
                    "moduleId": "visual",
                    "studyStarted": true,
                    "completed": false,
                    "retentionScore": 0,
                    "timeSpent": 12
                }
            },
            "completed": false
        }"#;
        let snapshot: ProgressSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(
            snapshot.validate().unwrap_err(),
            SnapshotError::ModuleKeyMismatch {
                key: LearningStyle::Auditory,
                found: LearningStyle::Visual,
            }
        );
    }

    #[test]
    fn validate_rejects_completion_without_results() {
        let raw = r#"{"varkCompleted":true,"moduleProgress":{},"completed":true}"#;
        let snapshot: ProgressSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(
            snapshot.validate().unwrap_err(),
            SnapshotError::CompletedWithoutResults
        );
    }
}
