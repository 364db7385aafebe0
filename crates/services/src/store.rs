use std::sync::Arc;

use storage::repository::SnapshotRepository;
use tokio::sync::watch;
use vark_core::model::ProgressSnapshot;
use vark_core::{Clock, Event, Phase, apply, derive_phase, scoring};

use crate::autosave::{AutoSaveHandle, AutoSaver, SaveStatus};

/// Owner of the live progress snapshot.
///
/// Every change goes through `dispatch`, which applies the pure reducer, fires
/// the completion gate and queues persistence. Readers get shared references
/// only.
pub struct ProgressStore {
    snapshot: ProgressSnapshot,
    saver: AutoSaveHandle,
    clock: Clock,
}

impl ProgressStore {
    /// Restore progress and start auto-saving.
    ///
    /// The repository is read exactly once, before the save task exists, so no
    /// write can race the initial load. Missing, malformed or unreadable data
    /// all start from the pristine snapshot; a read failure is reported through
    /// the save status.
    pub async fn open(repo: Arc<dyn SnapshotRepository>, clock: Clock) -> Self {
        let (snapshot, status) = match repo.load().await {
            Ok(Some(snapshot)) => {
                tracing::info!(phase = %derive_phase(&snapshot), "restored saved progress");
                (snapshot, SaveStatus::Idle)
            }
            Ok(None) => {
                tracing::info!("no saved progress, starting fresh");
                (ProgressSnapshot::default(), SaveStatus::Idle)
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not read saved progress, starting fresh");
                (ProgressSnapshot::default(), SaveStatus::Error(err.to_string()))
            }
        };

        let saver = AutoSaver::spawn(repo, status);
        Self::with_saver(snapshot, saver, clock)
    }

    #[must_use]
    pub fn with_saver(snapshot: ProgressSnapshot, saver: AutoSaveHandle, clock: Clock) -> Self {
        Self {
            snapshot,
            saver,
            clock,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.snapshot
    }

    /// Phase to render, recomputed from the snapshot on every call.
    #[must_use]
    pub fn current_phase(&self) -> Phase {
        derive_phase(&self.snapshot)
    }

    #[must_use]
    pub fn save_status(&self) -> SaveStatus {
        self.saver.status()
    }

    #[must_use]
    pub fn subscribe_status(&self) -> watch::Receiver<SaveStatus> {
        self.saver.subscribe()
    }

    /// Apply an event and return the resulting phase.
    ///
    /// Persistence is queued, never awaited. The pristine snapshot is not
    /// written; `Reset` clears storage instead.
    pub fn dispatch(&mut self, event: Event) -> Phase {
        tracing::debug!(event = event.kind(), "applying progress event");
        let is_reset = matches!(event, Event::Reset);

        let mut next = apply(self.snapshot.clone(), event);
        if !next.is_completed() && scoring::completion_gate_reached(&next) {
            let results = scoring::final_results(&next, self.clock.now());
            tracing::info!(
                primary = %results.primary_learning_style(),
                "all modules completed, assessment finished"
            );
            next = apply(next, Event::CompleteAssessment(Box::new(results)));
        }

        if is_reset {
            self.saver.clear();
        } else if next != self.snapshot && !next.is_pristine() {
            self.saver.save(next.clone());
        }

        self.snapshot = next;
        self.current_phase()
    }

    /// Wait for queued persistence to finish.
    pub async fn flush(&self) {
        self.saver.flush().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryRepository;
    use vark_core::model::{LearningStyle, Percent, VarkTally};
    use vark_core::time::{fixed_clock, fixed_now};

    async fn open(repo: &InMemoryRepository) -> ProgressStore {
        ProgressStore::open(Arc::new(repo.clone()), fixed_clock()).await
    }

    fn complete(module: LearningStyle) -> Event {
        Event::CompleteModuleTest {
            module,
            score: Percent::new(67).unwrap(),
        }
    }

    #[tokio::test]
    async fn fresh_store_starts_at_welcome_and_writes_nothing() {
        let repo = InMemoryRepository::new();
        let store = open(&repo).await;
        store.flush().await;

        assert_eq!(store.current_phase(), Phase::Welcome);
        assert!(repo.raw().is_none());
    }

    #[tokio::test]
    async fn transitions_are_persisted() {
        let repo = InMemoryRepository::new();
        let mut store = open(&repo).await;

        let phase = store.dispatch(Event::SelectTopic("marine_bioluminescence".into()));
        assert_eq!(phase, Phase::Survey);
        store.flush().await;

        let saved = storage::codec::decode_snapshot(&repo.raw().unwrap()).unwrap();
        assert_eq!(&saved, store.snapshot());
    }

    #[tokio::test]
    async fn gate_fires_exactly_on_fourth_completion() {
        let repo = InMemoryRepository::new();
        let mut store = open(&repo).await;
        store.dispatch(Event::CompleteSurvey(VarkTally::new(1, 3, 1, 0).unwrap()));

        for style in &LearningStyle::ALL[..3] {
            store.dispatch(Event::StartModuleStudy(*style));
            let phase = store.dispatch(complete(*style));
            assert_eq!(phase, Phase::ModuleSelection);
            assert!(store.snapshot().final_results().is_none());
        }

        store.dispatch(Event::StartModuleStudy(LearningStyle::Kinesthetic));
        let phase = store.dispatch(complete(LearningStyle::Kinesthetic));

        assert_eq!(phase, Phase::Results);
        let results = store.snapshot().final_results().unwrap();
        assert_eq!(results.primary_learning_style(), LearningStyle::Auditory);
        assert_eq!(results.completed_at(), fixed_now());
        assert_eq!(results.performance_scores().len(), 4);
    }

    #[tokio::test]
    async fn retaking_a_test_after_completion_keeps_first_results() {
        let repo = InMemoryRepository::new();
        let mut store = open(&repo).await;
        for style in LearningStyle::ALL {
            store.dispatch(complete(style));
        }
        let first = store.snapshot().final_results().cloned().unwrap();

        store.dispatch(Event::CompleteModuleTest {
            module: LearningStyle::Visual,
            score: Percent::FULL,
        });

        assert!(store.snapshot().is_completed());
        assert_eq!(store.snapshot().final_results(), Some(&first));
    }

    #[tokio::test]
    async fn reset_clears_storage_and_returns_to_welcome() {
        let repo = InMemoryRepository::new();
        let mut store = open(&repo).await;
        store.dispatch(Event::SelectTopic("marine_bioluminescence".into()));
        store.dispatch(Event::StartModuleStudy(LearningStyle::Reading));

        let phase = store.dispatch(Event::Reset);
        store.flush().await;

        assert_eq!(phase, Phase::Welcome);
        assert!(store.snapshot().is_pristine());
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unchanged_snapshot_is_not_rewritten() {
        let repo = InMemoryRepository::new();
        let mut store = open(&repo).await;
        store.dispatch(Event::SelectTopic("marine_bioluminescence".into()));
        store.flush().await;

        repo.put_raw("sentinel");
        store.dispatch(Event::RecordStudyTime {
            module: LearningStyle::Visual,
            seconds: 10,
        });
        store.flush().await;

        assert_eq!(repo.raw().as_deref(), Some("sentinel"));
    }

    #[tokio::test]
    async fn read_failure_starts_fresh_with_error_status() {
        let repo = InMemoryRepository::new();
        repo.set_fail_reads(true);
        let store = open(&repo).await;

        assert!(store.snapshot().is_pristine());
        assert!(store.save_status().is_error());
    }

    #[tokio::test]
    async fn write_failure_keeps_in_memory_progress() {
        let repo = InMemoryRepository::new();
        let mut store = open(&repo).await;
        repo.set_fail_writes(true);

        let phase = store.dispatch(Event::SelectTopic("marine_bioluminescence".into()));
        store.flush().await;

        assert_eq!(phase, Phase::Survey);
        assert!(store.save_status().is_error());
        assert_eq!(store.snapshot().selected_topic(), Some("marine_bioluminescence"));
    }
}
