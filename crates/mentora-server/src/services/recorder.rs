//! History Recorder
//!
//! Best-effort persistence of completed interactions. Entries are emitted
//! onto a one-way channel and written by an independent worker task, so the
//! caller's own success is never affected by a recording failure.

use std::sync::Arc;

use tokio::sync::mpsc;

use mentora::{HistoryCategory, HistoryEntry, HistoryRepository};

/// Sending handle to the write-behind history worker
#[derive(Clone)]
pub struct HistoryRecorder {
    tx: mpsc::UnboundedSender<HistoryEntry>,
}

impl HistoryRecorder {
    /// Spawns the worker task and returns the sending handle.
    pub fn start<R: HistoryRepository + 'static>(repo: Arc<R>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<HistoryEntry>();

        tokio::spawn(async move {
            while let Some(entry) = rx.recv().await {
                if let Err(e) = repo.save(&entry).await {
                    tracing::warn!(
                        "Failed to record history entry for {}: {}",
                        entry.user_id,
                        e
                    );
                }
            }
        });

        Self { tx }
    }

    /// Record a completed interaction.
    ///
    /// No-op without an owner identity: history is a privilege of an
    /// authenticated context, not an error condition. Send failures are
    /// logged and swallowed.
    pub fn record(
        &self,
        owner_id: &str,
        query: &str,
        answer: &str,
        category: HistoryCategory,
        metadata: Option<&str>,
    ) {
        if owner_id.trim().is_empty() {
            return;
        }

        let entry = HistoryEntry::from_interaction(owner_id, query, answer, category, metadata);
        if self.tx.send(entry).is_err() {
            tracing::warn!("History worker is gone; dropping entry");
        }
    }
}
