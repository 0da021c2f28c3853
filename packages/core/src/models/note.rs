//! Note Data Structures
//!
//! This module defines the `Note` record held by the note store together with
//! the parameter types used to create and edit it.
//!
//! # Examples
//!
//! ```rust
//! use leonardo_core::models::{NewNote, NoteSource};
//!
//! let params = NewNote::new("AI producer guide", "Working with AI as a non-developer...")
//!     .with_tags(["AI", "guide", "AI"])
//!     .with_source(NoteSource::Chat);
//!
//! // Duplicate tags collapse, first occurrence wins
//! assert_eq!(params.tags, vec!["AI".to_string(), "guide".to_string()]);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for notes arriving from outside the store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Content too short: {actual} characters, at least {minimum} required")]
    ContentTooShort { actual: usize, minimum: usize },
}

/// Where a note originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteSource {
    Chat,
    Youtube,
    Image,
    Manual,
}

impl NoteSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteSource::Chat => "chat",
            NoteSource::Youtube => "youtube",
            NoteSource::Image => "image",
            NoteSource::Manual => "manual",
        }
    }
}

/// Boolean display flags that can be toggled without editing the note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoteFlag {
    Pinned,
    Starred,
}

/// A tagged, timestamped, linkable text record.
///
/// # Fields
///
/// - `id`: UUID assigned at creation, never reused within a store
/// - `tags`: de-duplicated, in the order they were first given
/// - `created_at`: set once at creation
/// - `updated_at`: bumped on title/content/tag/link edits only
/// - `related_notes`: outgoing soft links; ids may dangle after a delete
/// - `source`: where the note came from, fixed at creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default)]
    pub related_notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<NoteSource>,
}

impl Note {
    /// Build a fresh note from creation parameters with both timestamps at `now`.
    ///
    /// Tags are normalized however `params` was built (builder, literal, JSON).
    pub fn from_new(params: NewNote, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            content: params.content,
            tags: normalize_tags(params.tags),
            created_at: now,
            updated_at: now,
            is_pinned: false,
            is_starred: false,
            related_notes: params.related_notes,
            source: params.source,
        }
    }

    /// Current value of a display flag
    pub fn flag(&self, flag: NoteFlag) -> bool {
        match flag {
            NoteFlag::Pinned => self.is_pinned,
            NoteFlag::Starred => self.is_starred,
        }
    }

    pub(crate) fn flag_mut(&mut self, flag: NoteFlag) -> &mut bool {
        match flag {
            NoteFlag::Pinned => &mut self.is_pinned,
            NoteFlag::Starred => &mut self.is_starred,
        }
    }

    /// Whether this note links out to `id`
    pub fn links_to(&self, id: &str) -> bool {
        self.related_notes.iter().any(|r| r == id)
    }

    /// Apply a targeted edit, returning true if any field actually changed.
    ///
    /// Fields left as `None` in the update are untouched. The caller owns the
    /// clock: `updated_at` is only moved when something changed.
    pub fn apply_update(&mut self, update: NoteUpdate, now: DateTime<Utc>) -> bool {
        let mut changed = false;

        if let Some(title) = update.title {
            if title != self.title {
                self.title = title;
                changed = true;
            }
        }

        if let Some(content) = update.content {
            if content != self.content {
                self.content = content;
                changed = true;
            }
        }

        if let Some(tags) = update.tags {
            let tags = normalize_tags(tags);
            if tags != self.tags {
                self.tags = tags;
                changed = true;
            }
        }

        if let Some(related) = update.related_notes {
            if related != self.related_notes {
                self.related_notes = related;
                changed = true;
            }
        }

        if changed {
            self.touch(now);
        }
        changed
    }

    /// Move `updated_at` forward, never behind `created_at`
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }
}

/// Parameters for creating a note
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub source: Option<NoteSource>,
    #[serde(default)]
    pub related_notes: Vec<String>,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = normalize_tags(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_source(mut self, source: NoteSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_related<I, S>(mut self, related: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related_notes = related.into_iter().map(Into::into).collect();
        self
    }
}

/// Targeted edit of an existing note; `None` leaves a field as it is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub related_notes: Option<Vec<String>>,
}

impl NoteUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: Some(tags.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }
}

/// Trim tags, drop empty ones and remove duplicates keeping first occurrence
pub fn normalize_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() || out.iter().any(|t| t == tag) {
            continue;
        }
        out.push(tag.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 30, 10, 0, 0).unwrap()
    }

    fn create_test_note() -> Note {
        Note::from_new(
            NewNote::new("Project idea", "Leonardo platform plan").with_tags(["project", "dev"]),
            t0(),
        )
    }

    #[test]
    fn test_note_creation_defaults() {
        let note = create_test_note();
        assert!(!note.id.is_empty());
        assert_eq!(note.created_at, note.updated_at);
        assert!(!note.is_pinned);
        assert!(!note.is_starred);
        assert!(note.related_notes.is_empty());
        assert_eq!(note.source, None);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = create_test_note();
        let b = create_test_note();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_deserialized_params_get_normalized_tags() {
        let params: NewNote =
            serde_json::from_str(r#"{"title":"t","content":"c","tags":["a","a"," ","b "]}"#)
                .unwrap();
        assert_eq!(params.tags, vec!["a", "a", " ", "b "]);

        let note = Note::from_new(params, t0());
        assert_eq!(note.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_normalize_tags_preserves_first_order() {
        let tags = normalize_tags(
            [" UI ", "React", "", "UI", "Design"]
                .into_iter()
                .map(String::from),
        );
        assert_eq!(tags, vec!["UI", "React", "Design"]);
    }

    #[test]
    fn test_apply_update_bumps_updated_at_only_on_change() {
        let mut note = create_test_note();
        let later = t0() + Duration::minutes(5);

        let changed = note.apply_update(NoteUpdate::title("Project idea"), later);
        assert!(!changed);
        assert_eq!(note.updated_at, t0());

        let changed = note.apply_update(NoteUpdate::content("New plan"), later);
        assert!(changed);
        assert_eq!(note.content, "New plan");
        assert_eq!(note.title, "Project idea");
        assert_eq!(note.updated_at, later);
        assert_eq!(note.created_at, t0());
    }

    #[test]
    fn test_apply_update_normalizes_tags() {
        let mut note = create_test_note();
        note.apply_update(NoteUpdate::tags(["a", "a", " b"]), t0());
        assert_eq!(note.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_touch_never_precedes_creation() {
        let mut note = create_test_note();
        note.touch(t0() - Duration::hours(1));
        assert_eq!(note.updated_at, note.created_at);
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let note = Note::from_new(
            NewNote::new("t", "c").with_source(NoteSource::Youtube),
            t0(),
        );
        let json = serde_json::to_value(&note).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("isPinned").is_some());
        assert!(json.get("relatedNotes").is_some());
        assert_eq!(json["source"], "youtube");
    }

    #[test]
    fn test_manual_note_omits_missing_source() {
        let note = create_test_note();
        let json = serde_json::to_value(&note).unwrap();
        assert!(json.get("source").is_none());
    }
}
