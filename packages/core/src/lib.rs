//! Leonardo Workspace Note Store
//!
//! The note-management core of the three-pane workspace: an in-memory
//! collection of tagged, linked, timestamped notes with full-text search,
//! multi-tag filtering, sorting, pinning and cross-references.
//!
//! # Modules
//!
//! - [`models`] - Note record, creation/edit parameters, list projection, clock
//! - [`services`] - NoteStore, query pipeline, ingestion worker, domain events
//! - [`config`] - JSON configuration with defaults
//! - [`logging`] - tracing subscriber setup

pub mod config;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::NotesConfig;
pub use models::*;
pub use services::*;
