//! Immutable reference data: the survey bank, the topic bank and the study
//! strategies recommended per style.

use thiserror::Error;

use crate::model::LearningStyle;

mod recommendations;
mod survey;
mod topics;

pub use recommendations::recommendations;
pub use survey::{
    SURVEY_QUESTION_COUNT, SurveyOption, SurveyQuestion, survey_question, survey_questions,
};
pub use topics::{LearningModule, RecallQuestion, Topic, topics};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentError {
    #[error("no topic selected")]
    NoTopicSelected,

    #[error("topic not found: {0}")]
    TopicNotFound(String),

    #[error("topic `{topic}` has no {style} module")]
    ModuleNotFound { topic: String, style: LearningStyle },
}

/// Look up a topic by id.
///
/// # Errors
///
/// Returns `ContentError::TopicNotFound` for unknown ids.
pub fn topic(id: &str) -> Result<&'static Topic, ContentError> {
    topics()
        .iter()
        .find(|topic| topic.id == id)
        .ok_or_else(|| ContentError::TopicNotFound(id.to_string()))
}

/// Look up the module for a style within a topic.
///
/// # Errors
///
/// Returns `ContentError` if the topic is unknown or has no authored module
/// for `style`.
pub fn module(topic_id: &str, style: LearningStyle) -> Result<&'static LearningModule, ContentError> {
    topic(topic_id)?
        .module(style)
        .ok_or_else(|| ContentError::ModuleNotFound {
            topic: topic_id.to_string(),
            style,
        })
}
