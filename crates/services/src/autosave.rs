//! Background persistence task.
//!
//! Transitions hand snapshots to an `AutoSaveHandle` without waiting. A single
//! task drains the queue and performs each write or clear before looking at
//! the next one, so writes land in the order they were issued and an older
//! snapshot can never overwrite a newer one.

use std::sync::Arc;

use storage::repository::{SnapshotRepository, StorageError};
use tokio::sync::{mpsc, oneshot, watch};
use vark_core::model::ProgressSnapshot;

/// Persistence state for presentation (e.g. a save indicator).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    /// The last persistence operation failed. Cleared by the next success.
    Error(String),
}

impl SaveStatus {
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, SaveStatus::Error(_))
    }
}

enum SaveCommand {
    Save(Box<ProgressSnapshot>),
    Clear,
    Flush(oneshot::Sender<()>),
}

/// Single consumer of the save queue.
pub struct AutoSaver {
    receiver: mpsc::UnboundedReceiver<SaveCommand>,
    repo: Arc<dyn SnapshotRepository>,
    status: watch::Sender<SaveStatus>,
}

impl AutoSaver {
    #[must_use]
    pub fn new(repo: Arc<dyn SnapshotRepository>, initial: SaveStatus) -> (Self, AutoSaveHandle) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (status, status_rx) = watch::channel(initial);
        let saver = Self {
            receiver,
            repo,
            status,
        };
        let handle = AutoSaveHandle {
            sender,
            status: status_rx,
        };
        (saver, handle)
    }

    /// Start the task on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn spawn(repo: Arc<dyn SnapshotRepository>, initial: SaveStatus) -> AutoSaveHandle {
        let (saver, handle) = Self::new(repo, initial);
        tokio::spawn(saver.run());
        handle
    }

    /// Process commands until every handle is dropped.
    pub async fn run(mut self) {
        tracing::debug!("auto-save task started");

        while let Some(command) = self.receiver.recv().await {
            match command {
                SaveCommand::Save(snapshot) => {
                    self.status.send_replace(SaveStatus::Saving);
                    let result = self.repo.save(&snapshot).await;
                    self.settle("save", result);
                }
                SaveCommand::Clear => {
                    self.status.send_replace(SaveStatus::Saving);
                    let result = self.repo.clear().await;
                    self.settle("clear", result);
                }
                SaveCommand::Flush(reply) => {
                    let _ = reply.send(());
                }
            }
        }

        tracing::debug!("auto-save task stopped");
    }

    fn settle(&self, operation: &'static str, result: Result<(), StorageError>) {
        match result {
            Ok(()) => {
                tracing::trace!(operation, "progress persisted");
                self.status.send_replace(SaveStatus::Idle);
            }
            Err(err) => {
                tracing::error!(operation, error = %err, "progress persistence failed");
                self.status.send_replace(SaveStatus::Error(err.to_string()));
            }
        }
    }
}

/// Cheap, cloneable sender side of the save queue.
#[derive(Clone)]
pub struct AutoSaveHandle {
    sender: mpsc::UnboundedSender<SaveCommand>,
    status: watch::Receiver<SaveStatus>,
}

impl AutoSaveHandle {
    /// Queue a full-snapshot write. Never blocks.
    pub fn save(&self, snapshot: ProgressSnapshot) {
        self.send(SaveCommand::Save(Box::new(snapshot)));
    }

    /// Queue removal of the stored snapshot, ordered after earlier writes.
    pub fn clear(&self) {
        self.send(SaveCommand::Clear);
    }

    /// Wait until every previously queued write and clear has finished.
    pub async fn flush(&self) {
        let (reply, done) = oneshot::channel();
        if self.sender.send(SaveCommand::Flush(reply)).is_ok() {
            let _ = done.await;
        }
    }

    #[must_use]
    pub fn status(&self) -> SaveStatus {
        self.status.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SaveStatus> {
        self.status.clone()
    }

    fn send(&self, command: SaveCommand) {
        if self.sender.send(command).is_err() {
            tracing::warn!("auto-save task has stopped; dropping persistence request");
        }
    }
}
