//! Domain Events for NoteStore
//!
//! The store emits one event per successful mutation over a tokio broadcast
//! channel, so a rendering layer can refresh its derived views without
//! polling. No-op mutations (unknown id, unchanged fields) emit nothing.

use crate::models::{Note, NoteFlag};
use serde::{Deserialize, Serialize};

/// Domain events emitted by the note store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NoteEvent {
    /// A new note was created (manually or through ingestion)
    NoteCreated { note: Note },

    /// Title, content, tags or links of a note changed
    NoteUpdated { note: Note },

    /// A note was removed; links pointing at it are left in place
    NoteDeleted { id: String },

    /// A pin/star flag was flipped
    FlagToggled {
        id: String,
        flag: NoteFlag,
        value: bool,
    },

    /// The detail view focus moved
    SelectionChanged { id: String },
}

impl NoteEvent {
    /// Get a string representation of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            NoteEvent::NoteCreated { .. } => "note:created",
            NoteEvent::NoteUpdated { .. } => "note:updated",
            NoteEvent::NoteDeleted { .. } => "note:deleted",
            NoteEvent::FlagToggled { .. } => "note:flag-toggled",
            NoteEvent::SelectionChanged { .. } => "selection:changed",
        }
    }

    /// Id of the note the event refers to
    pub fn note_id(&self) -> &str {
        match self {
            NoteEvent::NoteCreated { note } | NoteEvent::NoteUpdated { note } => &note.id,
            NoteEvent::NoteDeleted { id }
            | NoteEvent::FlagToggled { id, .. }
            | NoteEvent::SelectionChanged { id } => id,
        }
    }
}
