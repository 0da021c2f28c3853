//! Data Models
//!
//! - `Note` - the tagged, linked, timestamped record held by the store
//! - `NewNote` / `NoteUpdate` - creation parameters and targeted edits
//! - `NoteCard` / `NotesView` - list projection consumed by the notes pane
//! - `time` - clock abstraction used for note timestamps

mod card;
mod note;
mod samples;
pub mod time;

pub use card::{EmptyState, NoteCard, NotesView};
pub use note::{normalize_tags, NewNote, Note, NoteFlag, NoteSource, NoteUpdate, ValidationError};
pub use samples::sample_notes;
