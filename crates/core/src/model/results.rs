use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{LearningStyle, Percent, VarkTally};

/// Computed learning-style profile, produced once when the assessment
/// completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalResults {
    primary_learning_style: LearningStyle,
    vark_scores: VarkTally,
    performance_scores: BTreeMap<LearningStyle, Percent>,
    recommendations: Vec<String>,
    completed_at: DateTime<Utc>,
}

impl FinalResults {
    #[must_use]
    pub fn new(
        primary_learning_style: LearningStyle,
        vark_scores: VarkTally,
        performance_scores: BTreeMap<LearningStyle, Percent>,
        recommendations: Vec<String>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            primary_learning_style,
            vark_scores,
            performance_scores,
            recommendations,
            completed_at,
        }
    }

    #[must_use]
    pub fn primary_learning_style(&self) -> LearningStyle {
        self.primary_learning_style
    }

    #[must_use]
    pub fn vark_scores(&self) -> &VarkTally {
        &self.vark_scores
    }

    #[must_use]
    pub fn performance_scores(&self) -> &BTreeMap<LearningStyle, Percent> {
        &self.performance_scores
    }

    #[must_use]
    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Module scores ordered best first; equal scores keep style precedence.
    #[must_use]
    pub fn ranked_performance(&self) -> Vec<(LearningStyle, Percent)> {
        let mut ranked: Vec<_> = self
            .performance_scores
            .iter()
            .map(|(style, score)| (*style, *score))
            .collect();
        // Stable sort over a BTreeMap walk keeps precedence order for ties.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}
