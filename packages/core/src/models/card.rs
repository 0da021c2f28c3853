//! List-row projection of a note for the notes pane.

use super::{Note, NoteSource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the notes pane shows for one note in the list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteCard {
    pub id: String,
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub is_starred: bool,
    pub source: Option<NoteSource>,
    pub updated_at: DateTime<Utc>,
    /// First `tag_limit` tags in display order
    pub visible_tags: Vec<String>,
    /// Count behind the "+N" badge
    pub hidden_tag_count: usize,
    /// Number of outgoing links, dangling ones included
    pub related_count: usize,
    pub is_selected: bool,
}

impl NoteCard {
    pub fn from_note(note: &Note, tag_limit: usize, is_selected: bool) -> Self {
        let visible_tags: Vec<String> = note.tags.iter().take(tag_limit).cloned().collect();
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            content: note.content.clone(),
            is_pinned: note.is_pinned,
            is_starred: note.is_starred,
            source: note.source,
            updated_at: note.updated_at,
            hidden_tag_count: note.tags.len() - visible_tags.len(),
            visible_tags,
            related_count: note.related_notes.len(),
            is_selected,
        }
    }
}

/// Why the list is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmptyState {
    /// A search term or tag filter is active and nothing matched
    NoMatches,
    /// The store holds no notes at all
    NoNotes,
}

/// The rendered notes pane: list rows, empty-state reason and footer count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesView {
    pub cards: Vec<NoteCard>,
    pub empty_state: Option<EmptyState>,
    pub total_notes: usize,
}
