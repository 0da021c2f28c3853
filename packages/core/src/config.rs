//! Note store configuration
//!
//! Loaded from a JSON file. Every field has a default, so a partial or
//! missing file still yields a usable configuration.

use crate::services::query::SortCriterion;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the JSON config file
pub const CONFIG_ENV_VAR: &str = "LEONARDO_NOTES_CONFIG";

/// Upper bound for broadcast and ingestion channel capacities
const MAX_CHANNEL_CAPACITY: usize = 65_536;

/// Configuration for the note store and its rendering projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Sort applied when the view has not picked one
    #[serde(default)]
    pub default_sort: SortCriterion,

    /// Number of tags shown on a list row before the "+N" badge
    #[serde(default = "default_preview_tag_limit")]
    pub preview_tag_limit: usize,

    /// Start the store with the three starter notes
    #[serde(default)]
    pub seed_sample_notes: bool,

    /// Capacity of the domain event broadcast channel
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,

    #[serde(default)]
    pub ingestion: IngestionConfig,
}

/// Rules for notes created from conversation/canvas events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Pending events buffered before `submit` waits
    #[serde(default = "default_ingestion_channel_capacity")]
    pub channel_capacity: usize,

    /// Minimum trimmed content length (in characters) for an event to become a note
    #[serde(default = "default_min_content_chars")]
    pub min_content_chars: usize,

    /// Length cap for titles derived from content
    #[serde(default = "default_title_max_chars")]
    pub title_max_chars: usize,
}

fn default_preview_tag_limit() -> usize {
    3
}

fn default_event_channel_capacity() -> usize {
    128
}

fn default_ingestion_channel_capacity() -> usize {
    32
}

fn default_min_content_chars() -> usize {
    1
}

fn default_title_max_chars() -> usize {
    60
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            default_sort: SortCriterion::default(),
            preview_tag_limit: default_preview_tag_limit(),
            seed_sample_notes: false,
            event_channel_capacity: default_event_channel_capacity(),
            ingestion: IngestionConfig::default(),
        }
    }
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_ingestion_channel_capacity(),
            min_content_chars: default_min_content_chars(),
            title_max_chars: default_title_max_chars(),
        }
    }
}

impl NotesConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: NotesConfig =
            serde_json::from_str(json).context("Failed to parse notes config")?;
        config.validate().map_err(|e| anyhow!(e))?;
        Ok(config)
    }

    /// Load from a JSON file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No notes config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read notes config {:?}", path))?;
        Self::from_json_str(&contents).with_context(|| format!("Invalid notes config {:?}", path))
    }

    /// Load from the file named by `LEONARDO_NOTES_CONFIG`, or defaults when unset
    pub fn load_from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.preview_tag_limit == 0 {
            return Err("preview_tag_limit must be greater than 0".to_string());
        }

        if self.event_channel_capacity == 0 || self.event_channel_capacity > MAX_CHANNEL_CAPACITY {
            return Err(format!(
                "event_channel_capacity must be between 1 and {}",
                MAX_CHANNEL_CAPACITY
            ));
        }

        self.ingestion.validate()
    }
}

impl IngestionConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.channel_capacity == 0 || self.channel_capacity > MAX_CHANNEL_CAPACITY {
            return Err(format!(
                "ingestion.channel_capacity must be between 1 and {}",
                MAX_CHANNEL_CAPACITY
            ));
        }

        if self.min_content_chars == 0 {
            return Err("ingestion.min_content_chars must be greater than 0".to_string());
        }

        if self.title_max_chars == 0 {
            return Err("ingestion.title_max_chars must be greater than 0".to_string());
        }

        Ok(())
    }
}
