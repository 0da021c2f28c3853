//! Note Store
//!
//! Owns the note collection, the current selection and the event channel.
//! All reads go through the pure functions in [`crate::services::query`];
//! all writes go through the targeted mutations below, which never rebuild a
//! note from scratch, so fields an edit does not mention are preserved.
//!
//! # Not-found policy
//!
//! Mutating, linking or resolving an id that is not in the store is a no-op.
//! The return value (`bool` / `Option`) says whether anything happened; no
//! operation here returns an error.
//!
//! # Examples
//!
//! ```rust
//! use leonardo_core::models::{NewNote, NoteFlag};
//! use leonardo_core::services::{NoteQuery, NoteStore, SortCriterion};
//!
//! let mut store = NoteStore::new();
//! let guide = store.create_note(NewNote::new("AI guide", "Working with AI").with_tags(["AI"]));
//! let idea = store.create_note(NewNote::new("Project idea", "Platform plan"));
//!
//! store.toggle_flag(&idea, NoteFlag::Pinned);
//!
//! let ordered = store.query(&NoteQuery::new(), SortCriterion::Title);
//! assert_eq!(ordered[0].id, idea);
//! assert_eq!(ordered[1].id, guide);
//! ```

use crate::config::NotesConfig;
use crate::models::time::{SystemTimeProvider, TimeProvider};
use crate::models::{
    sample_notes, EmptyState, NewNote, Note, NoteCard, NoteFlag, NoteUpdate, NotesView,
};
use crate::services::error::NoteStoreError;
use crate::services::events::NoteEvent;
use crate::services::query::{derive_tag_vocabulary, run_pipeline, NoteQuery, SortCriterion};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Which note the detail view is focused on.
///
/// A selected id does not have to resolve: selecting a deleted or unknown id
/// leaves the detail view empty rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "id", rename_all = "camelCase")]
pub enum Selection {
    #[default]
    NoneSelected,
    Selected(String),
}

impl Selection {
    pub fn id(&self) -> Option<&str> {
        match self {
            Selection::NoneSelected => None,
            Selection::Selected(id) => Some(id),
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.id() == Some(id)
    }
}

/// Which way a link is written by [`NoteStore::link_notes`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkDirection {
    /// Only `from` gains a related entry
    Outgoing,
    /// Both notes reference each other
    Both,
}

/// Footer/overview counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteStats {
    pub total: usize,
    pub pinned: usize,
    pub starred: usize,
    pub distinct_tags: usize,
}

pub struct NoteStore {
    notes: Vec<Note>,
    selection: Selection,
    clock: Arc<dyn TimeProvider>,
    event_tx: broadcast::Sender<NoteEvent>,
    config: NotesConfig,
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteStore {
    /// Empty store with default configuration and the system clock
    pub fn new() -> Self {
        Self::build(NotesConfig::default())
    }

    /// Store configured from `config`, seeded with the starter notes if enabled
    pub fn from_config(config: NotesConfig) -> Result<Self, NoteStoreError> {
        config.validate().map_err(NoteStoreError::invalid_config)?;
        let seed = config.seed_sample_notes;
        let store = Self::build(config);
        Ok(if seed {
            store.with_notes(sample_notes())
        } else {
            store
        })
    }

    fn build(config: NotesConfig) -> Self {
        let (event_tx, _) = broadcast::channel(config.event_channel_capacity);
        Self {
            notes: Vec::new(),
            selection: Selection::NoneSelected,
            clock: Arc::new(SystemTimeProvider),
            event_tx,
            config,
        }
    }

    /// Replace the clock used for timestamps
    pub fn with_time_provider(mut self, clock: Arc<dyn TimeProvider>) -> Self {
        self.clock = clock;
        self
    }

    /// Add existing notes, keeping their timestamps and flags.
    ///
    /// A note whose id is already present is skipped. An `updated_at` earlier
    /// than `created_at` is raised to `created_at`.
    pub fn with_notes(mut self, notes: impl IntoIterator<Item = Note>) -> Self {
        for mut note in notes {
            if self.contains(&note.id) {
                tracing::warn!("Skipping seed note with duplicate id '{}'", note.id);
                continue;
            }
            if note.updated_at < note.created_at {
                tracing::warn!(
                    "Seed note '{}' updated before it was created, clamping updated_at",
                    note.id
                );
                note.touch(note.created_at);
            }
            self.notes.push(note);
        }
        self
    }

    pub fn config(&self) -> &NotesConfig {
        &self.config
    }

    // ----- reads -------------------------------------------------------

    /// Full collection in insertion order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get_note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get_note(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Distinct tags across the current notes
    pub fn tag_vocabulary(&self) -> BTreeSet<String> {
        derive_tag_vocabulary(&self.notes)
    }

    /// Search, sort, then move pinned notes to the front
    pub fn query(&self, query: &NoteQuery, sort: SortCriterion) -> Vec<&Note> {
        run_pipeline(&self.notes, query, sort)
    }

    /// The notes pane for the given query: list rows, empty state and footer count
    pub fn view(&self, query: &NoteQuery, sort: SortCriterion) -> NotesView {
        let cards: Vec<NoteCard> = self
            .query(query, sort)
            .into_iter()
            .map(|note| {
                NoteCard::from_note(
                    note,
                    self.config.preview_tag_limit,
                    self.selection.is_selected(&note.id),
                )
            })
            .collect();

        let empty_state = if !cards.is_empty() {
            None
        } else if query.is_filtering() {
            Some(EmptyState::NoMatches)
        } else {
            Some(EmptyState::NoNotes)
        };

        NotesView {
            cards,
            empty_state,
            total_notes: self.notes.len(),
        }
    }

    pub fn stats(&self) -> NoteStats {
        NoteStats {
            total: self.notes.len(),
            pinned: self.notes.iter().filter(|n| n.is_pinned).count(),
            starred: self.notes.iter().filter(|n| n.is_starred).count(),
            distinct_tags: self.tag_vocabulary().len(),
        }
    }

    /// Each outgoing link of `note` resolved to the current note, or `None` if it dangles
    pub fn resolve_related(&self, note: &Note) -> Vec<Option<&Note>> {
        note.related_notes
            .iter()
            .map(|id| self.get_note(id))
            .collect()
    }

    /// [`resolve_related`](Self::resolve_related) by id; an unknown id has no links
    pub fn resolve_related_by_id(&self, id: &str) -> Vec<Option<&Note>> {
        match self.get_note(id) {
            Some(note) => self.resolve_related(note),
            None => Vec::new(),
        }
    }

    /// Notes whose related list points at `id`
    pub fn backlinks(&self, id: &str) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|n| n.id != id && n.links_to(id))
            .collect()
    }

    // ----- selection ---------------------------------------------------

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Focus the detail view on `id`, whether or not it currently resolves
    pub fn select_note(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.contains(&id) {
            tracing::debug!("Selected id '{}' does not resolve to a note", id);
        }
        self.selection = Selection::Selected(id.clone());
        self.emit_event(NoteEvent::SelectionChanged { id });
    }

    /// The selected note, if there is a selection and it still resolves
    pub fn selected_note(&self) -> Option<&Note> {
        self.selection.id().and_then(|id| self.get_note(id))
    }

    // ----- mutations ---------------------------------------------------

    /// Create a note stamped with the current time and return its id
    pub fn create_note(&mut self, params: NewNote) -> String {
        let mut note = Note::from_new(params, self.clock.now());
        while self.contains(&note.id) {
            note.id = uuid::Uuid::new_v4().to_string();
        }

        let id = note.id.clone();
        tracing::debug!("Created note '{}' ({:?})", id, note.source);
        self.notes.push(note.clone());
        self.emit_event(NoteEvent::NoteCreated { note });
        id
    }

    /// Apply a targeted edit. Returns false if the id is unknown or nothing changed.
    pub fn update_note(&mut self, id: &str, update: NoteUpdate) -> bool {
        let now = self.clock.now();
        let Some(note) = self.note_mut(id) else {
            tracing::debug!("update_note: no note '{}', ignoring", id);
            return false;
        };

        if !note.apply_update(update, now) {
            return false;
        }

        let snapshot = note.clone();
        self.emit_event(NoteEvent::NoteUpdated { note: snapshot });
        true
    }

    /// Flip a display flag and return its new value.
    ///
    /// `updated_at` is left alone: pinning or starring is not an edit and
    /// must not reshuffle the "recently updated" order.
    pub fn toggle_flag(&mut self, id: &str, flag: NoteFlag) -> Option<bool> {
        let Some(note) = self.note_mut(id) else {
            tracing::debug!("toggle_flag: no note '{}', ignoring", id);
            return None;
        };

        let value = !note.flag(flag);
        *note.flag_mut(flag) = value;

        self.emit_event(NoteEvent::FlagToggled {
            id: id.to_string(),
            flag,
            value,
        });
        Some(value)
    }

    /// Add `to` to the related list of `from` (and the reverse for [`LinkDirection::Both`]).
    ///
    /// Both notes must exist. Self links and links already present are
    /// skipped. Returns true if any related list changed.
    pub fn link_notes(&mut self, from: &str, to: &str, direction: LinkDirection) -> bool {
        if from == to || !self.contains(from) || !self.contains(to) {
            return false;
        }

        let mut changed = self.push_link(from, to);
        if direction == LinkDirection::Both {
            changed |= self.push_link(to, from);
        }
        changed
    }

    /// Remove `to` from the related list of `from`. Works for dangling ids too.
    pub fn unlink_notes(&mut self, from: &str, to: &str) -> bool {
        let Some(note) = self.get_note(from) else {
            return false;
        };
        if !note.links_to(to) {
            return false;
        }

        let related: Vec<String> = note
            .related_notes
            .iter()
            .filter(|r| r.as_str() != to)
            .cloned()
            .collect();
        self.update_note(
            from,
            NoteUpdate {
                related_notes: Some(related),
                ..Default::default()
            },
        )
    }

    /// Remove a note. Links other notes hold to it are kept and now dangle;
    /// a selection pointing at it is kept as well.
    pub fn delete_note(&mut self, id: &str) -> Option<Note> {
        let index = self.notes.iter().position(|n| n.id == id)?;
        let removed = self.notes.remove(index);

        let dangling = self.backlinks(id).len();
        if dangling > 0 {
            tracing::debug!(
                "Deleted note '{}' still referenced by {} note(s)",
                id,
                dangling
            );
        }

        self.emit_event(NoteEvent::NoteDeleted { id: id.to_string() });
        Some(removed)
    }

    // ----- events ------------------------------------------------------

    /// Subscribe to domain events emitted after each successful mutation
    pub fn subscribe_to_events(&self) -> broadcast::Receiver<NoteEvent> {
        self.event_tx.subscribe()
    }

    /// Ignores errors if no subscribers
    fn emit_event(&self, event: NoteEvent) {
        tracing::trace!("Emitting {} for '{}'", event.event_type(), event.note_id());
        let _ = self.event_tx.send(event);
    }

    fn note_mut(&mut self, id: &str) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.id == id)
    }

    fn push_link(&mut self, from: &str, to: &str) -> bool {
        let Some(note) = self.get_note(from) else {
            return false;
        };
        if note.links_to(to) {
            return false;
        }

        let mut related = note.related_notes.clone();
        related.push(to.to_string());
        self.update_note(
            from,
            NoteUpdate {
                related_notes: Some(related),
                ..Default::default()
            },
        )
    }
}
