//! Business Services
//!
//! - `NoteStore` - owns the notes, the selection and all targeted mutations
//! - `query` - pure search / sort / pin-partition pipeline
//! - `ingestion` - auto-created notes from conversation and canvas events
//! - `events` - domain events broadcast after each mutation

pub mod error;
pub mod events;
pub mod ingestion;
pub mod note_store;
pub mod query;

pub use error::NoteStoreError;
pub use events::NoteEvent;
pub use ingestion::{
    IngestionEvent, IngestionReport, IngestionSender, IngestionWorker, SharedNoteStore,
};
pub use note_store::{LinkDirection, NoteStats, NoteStore, Selection};
pub use query::{
    derive_tag_vocabulary, pin_partition, run_pipeline, search, sort, toggle_tag, NoteQuery,
    SortCriterion,
};
