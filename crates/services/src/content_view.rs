//! Read-only views that join progress with reference content.

use vark_core::content::{self, ContentError, LearningModule};
use vark_core::model::{LearningStyle, ModuleStatus, Percent, ProgressSnapshot};

/// Study material to show for a module.
///
/// Missing content degrades to a placeholder instead of failing the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleView {
    Authored(&'static LearningModule),
    Placeholder {
        style: LearningStyle,
        reason: ContentError,
    },
}

impl ModuleView {
    #[must_use]
    pub fn style(&self) -> LearningStyle {
        match self {
            ModuleView::Authored(module) => module.style,
            ModuleView::Placeholder { style, .. } => *style,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            ModuleView::Authored(module) => module.title,
            ModuleView::Placeholder { style, .. } => style.module_name(),
        }
    }
}

/// Resolve the module for `style` within the selected topic.
#[must_use]
pub fn module_view(snapshot: &ProgressSnapshot, style: LearningStyle) -> ModuleView {
    let resolved = snapshot
        .selected_topic()
        .ok_or(ContentError::NoTopicSelected)
        .and_then(|topic_id| content::module(topic_id, style));

    match resolved {
        Ok(module) => ModuleView::Authored(module),
        Err(reason) => {
            tracing::warn!(module = %style, error = %reason, "module content unavailable");
            ModuleView::Placeholder { style, reason }
        }
    }
}

/// One row of the module selection screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCard {
    pub style: LearningStyle,
    pub title: String,
    pub status: ModuleStatus,
    pub score: Option<Percent>,
    pub time_spent: u64,
}

/// Every style in display order, with its current progress.
#[must_use]
pub fn module_overview(snapshot: &ProgressSnapshot) -> Vec<ModuleCard> {
    LearningStyle::ALL
        .iter()
        .map(|style| {
            let progress = snapshot.module(*style);
            ModuleCard {
                style: *style,
                title: module_view(snapshot, *style).title().to_string(),
                status: snapshot.module_status(*style),
                score: progress
                    .filter(|p| p.completed())
                    .map(|p| p.retention_score()),
                time_spent: progress.map_or(0, |p| p.time_spent()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vark_core::{Event, apply};

    fn with_topic(topic: &str) -> ProgressSnapshot {
        apply(ProgressSnapshot::default(), Event::SelectTopic(topic.into()))
    }

    #[test]
    fn authored_module_is_resolved() {
        let view = module_view(&with_topic("marine_bioluminescence"), LearningStyle::Visual);
        match view {
            ModuleView::Authored(module) => assert_eq!(module.id, "visual_marine"),
            other => panic!("expected authored module, got {other:?}"),
        }
    }

    #[test]
    fn unknown_topic_degrades_to_placeholder() {
        let view = module_view(&with_topic("volcanoes"), LearningStyle::Reading);
        assert_eq!(
            view,
            ModuleView::Placeholder {
                style: LearningStyle::Reading,
                reason: ContentError::TopicNotFound("volcanoes".into()),
            }
        );
        assert_eq!(view.title(), LearningStyle::Reading.module_name());
    }

    #[test]
    fn overview_lists_all_styles_with_status() {
        let snapshot = with_topic("marine_bioluminescence");
        let snapshot = apply(snapshot, Event::StartModuleStudy(LearningStyle::Auditory));
        let snapshot = apply(
            snapshot,
            Event::CompleteModuleTest {
                module: LearningStyle::Visual,
                score: Percent::FULL,
            },
        );

        let cards = module_overview(&snapshot);
        let styles: Vec<_> = cards.iter().map(|c| c.style).collect();
        assert_eq!(styles, LearningStyle::ALL.to_vec());
        assert_eq!(cards[0].status, ModuleStatus::Completed);
        assert_eq!(cards[0].score, Some(Percent::FULL));
        assert_eq!(cards[1].status, ModuleStatus::InProgress);
        assert_eq!(cards[1].score, None);
        assert_eq!(cards[2].status, ModuleStatus::NotStarted);
    }
}
