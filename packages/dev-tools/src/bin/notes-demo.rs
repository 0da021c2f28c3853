//! Notes Pane Demo Binary
//!
//! Builds a store from configuration, pushes a couple of ingestion events
//! through the background worker and prints the resulting pane view as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin notes-demo
//!
//! # Filter by text and tags
//! cargo run --bin notes-demo -- --search react --tag UI --sort title
//! ```
//!
//! # Environment Variables
//!
//! - `LEONARDO_NOTES_CONFIG`: Path to a JSON config file (defaults apply when unset)
//! - `RUST_LOG`: Logging level (e.g., "info", "debug", "trace")

use std::env;
use std::sync::Arc;

use anyhow::Context;
use leonardo_core::logging::init_tracing;
use leonardo_core::{
    IngestionEvent, IngestionWorker, NoteQuery, NoteSource, NoteStore, NotesConfig, SortCriterion,
};
use tokio::sync::RwLock;

/// Command line options: `--search <text>`, `--tag <tag>` (repeatable), `--sort <criterion>`
struct DemoArgs {
    query: NoteQuery,
    sort: Option<SortCriterion>,
}

fn parse_args() -> anyhow::Result<DemoArgs> {
    let mut query = NoteQuery::new();
    let mut sort = None;
    let mut args = env::args().skip(1);

    while let Some(flag) = args.next() {
        let value = args
            .next()
            .with_context(|| format!("Missing value for {}", flag))?;
        match flag.as_str() {
            "--search" => query.text = value,
            "--tag" => query.toggle_tag(&value),
            "--sort" => sort = Some(value.parse::<SortCriterion>().map_err(anyhow::Error::msg)?),
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }

    Ok(DemoArgs { query, sort })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");

    tracing::info!("🎨 Leonardo Notes Demo");

    let args = parse_args()?;

    let mut config = NotesConfig::load_from_env()?;
    config.seed_sample_notes = true;
    let sort = args.sort.unwrap_or(config.default_sort);

    let store = Arc::new(RwLock::new(NoteStore::from_config(config)?));
    let mut events = store.read().await.subscribe_to_events();

    let worker = IngestionWorker::spawn(store.clone()).await;
    let sender = worker.sender();
    sender
        .submit(
            IngestionEvent::new(
                NoteSource::Chat,
                "캔버스 영역에 비디오 플레이어 배치\n재생 컨트롤은 하단 고정",
            )
            .with_tags(["Canvas", "UI"]),
        )
        .await?;
    sender
        .submit(IngestionEvent::new(NoteSource::Image, "   "))
        .await?;
    drop(sender);

    let report = worker.shutdown().await;
    tracing::info!(
        "📥 Ingestion finished: {} created, {} rejected",
        report.created,
        report.rejected
    );

    while let Ok(event) = events.try_recv() {
        tracing::debug!("{} {:?}", event.event_type(), event.note_id());
    }

    let guard = store.read().await;
    let view = guard.view(&args.query, sort);
    println!("{}", serde_json::to_string_pretty(&view)?);

    let stats = guard.stats();
    tracing::info!(
        "📊 {} notes, {} pinned, {} starred, {} tags",
        stats.total,
        stats.pinned,
        stats.starred,
        stats.distinct_tags
    );

    Ok(())
}
