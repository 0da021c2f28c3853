//! Note Ingestion
//!
//! Conversation and canvas collaborators hand over `{title, content, tags,
//! source}` events that become notes automatically. Events are applied
//! through [`NoteStore::create_note`], the same entry point manual edits use.
//!
//! ## Acceptance rule
//!
//! - trimmed content must be at least `min_content_chars` characters long;
//!   the note keeps the content exactly as delivered
//! - a blank title is derived from the first non-empty content line,
//!   cut to `title_max_chars` characters (with a trailing ellipsis when cut)
//! - tags are normalized like any other note's tags
//!
//! ## Serialized background ingestion
//!
//! [`IngestionWorker::spawn`] starts a task that drains an mpsc queue and
//! applies each event while holding the store's write lock. Readers taking
//! the read lock therefore only ever see a store between two whole
//! mutations.

use crate::config::IngestionConfig;
use crate::models::{NewNote, NoteSource, ValidationError};
use crate::services::error::NoteStoreError;
use crate::services::note_store::NoteStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;

/// Store shared between the view layer and the ingestion worker
pub type SharedNoteStore = Arc<RwLock<NoteStore>>;

/// A note proposed by an external collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionEvent {
    #[serde(default)]
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub source: NoteSource,
}

impl IngestionEvent {
    pub fn new(source: NoteSource, content: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            content: content.into(),
            tags: Vec::new(),
            source,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Check the event against `rules` and turn it into creation parameters
    pub fn into_new_note(self, rules: &IngestionConfig) -> Result<NewNote, ValidationError> {
        let content = self.content.trim();
        if content.is_empty() {
            return Err(ValidationError::MissingField("content".to_string()));
        }

        let length = content.chars().count();
        if length < rules.min_content_chars {
            return Err(ValidationError::ContentTooShort {
                actual: length,
                minimum: rules.min_content_chars,
            });
        }

        let title = match self.title.trim() {
            "" => derive_title(content, rules.title_max_chars),
            given => given.to_string(),
        };

        Ok(NewNote::new(title, self.content)
            .with_tags(self.tags)
            .with_source(self.source))
    }
}

/// First non-empty line of `content`, cut to `max_chars` characters
fn derive_title(content: &str, max_chars: usize) -> String {
    let line = content
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default();

    if line.chars().count() <= max_chars {
        return line.to_string();
    }

    let mut title: String = line.chars().take(max_chars.saturating_sub(1)).collect();
    title.push('…');
    title
}

impl NoteStore {
    /// Validate an ingestion event and create the note, returning its id
    pub fn ingest(&mut self, event: IngestionEvent) -> Result<String, NoteStoreError> {
        let source = event.source;
        let params = event.into_new_note(&self.config().ingestion).map_err(|e| {
            tracing::warn!("Rejected {} ingestion event: {}", source.as_str(), e);
            e
        })?;

        let id = self.create_note(params);
        tracing::info!("Ingested {} note '{}'", source.as_str(), id);
        Ok(id)
    }
}

/// Cloneable handle for queueing events to the worker
#[derive(Clone)]
pub struct IngestionSender {
    tx: mpsc::Sender<IngestionEvent>,
}

impl IngestionSender {
    /// Queue an event, waiting if the queue is full
    pub async fn submit(&self, event: IngestionEvent) -> Result<(), NoteStoreError> {
        self.tx
            .send(event)
            .await
            .map_err(|_| NoteStoreError::IngestionClosed)
    }

    /// Queue an event without waiting; fails when the queue is full or closed
    pub fn try_submit(&self, event: IngestionEvent) -> Result<(), NoteStoreError> {
        match self.tx.try_send(event) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!("Ingestion queue full, event dropped");
                Err(NoteStoreError::IngestionQueueFull)
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(NoteStoreError::IngestionClosed),
        }
    }
}

/// Outcome counters reported when the worker stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestionReport {
    pub created: usize,
    pub rejected: usize,
}

/// Background task applying ingestion events to a shared store
pub struct IngestionWorker {
    sender: IngestionSender,
    handle: JoinHandle<IngestionReport>,
}

impl IngestionWorker {
    /// Spawn the worker on the current tokio runtime.
    ///
    /// The queue capacity comes from the store's ingestion config.
    pub async fn spawn(store: SharedNoteStore) -> Self {
        let capacity = store.read().await.config().ingestion.channel_capacity;
        let (tx, mut rx) = mpsc::channel::<IngestionEvent>(capacity);

        tracing::info!("IngestionWorker starting (queue capacity {})", capacity);
        let handle = tokio::spawn(async move {
            let mut report = IngestionReport::default();
            while let Some(event) = rx.recv().await {
                let mut guard = store.write().await;
                match guard.ingest(event) {
                    Ok(_) => report.created += 1,
                    Err(_) => report.rejected += 1,
                }
            }
            tracing::info!(
                "IngestionWorker stopped: {} created, {} rejected",
                report.created,
                report.rejected
            );
            report
        });

        Self {
            sender: IngestionSender { tx },
            handle,
        }
    }

    pub fn sender(&self) -> IngestionSender {
        self.sender.clone()
    }

    /// Stop accepting events, drain what is queued and wait for the task.
    ///
    /// Senders cloned from this worker keep the queue open until they are
    /// dropped too.
    pub async fn shutdown(self) -> IngestionReport {
        drop(self.sender);
        match self.handle.await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("IngestionWorker task failed: {}", e);
                IngestionReport::default()
            }
        }
    }
}
