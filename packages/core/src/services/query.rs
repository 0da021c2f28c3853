//! Note Query Pipeline
//!
//! Pure functions over a snapshot of notes. The notes pane runs them in a
//! fixed order on every keystroke or tag toggle:
//!
//! 1. [`search`] - text match on title/content AND tag filter (OR across tags)
//! 2. [`sort`] - by updated, created or title
//! 3. [`pin_partition`] - pinned notes first, order within each group kept
//!
//! Pinning is applied last so it layers on top of the chosen sort instead of
//! acting as a sort key. Nothing here caches; every call reads the slice it
//! is given.
//!
//! # Examples
//!
//! ```rust
//! use leonardo_core::models::sample_notes;
//! use leonardo_core::services::query::{run_pipeline, NoteQuery, SortCriterion};
//!
//! let notes = sample_notes();
//! let query = NoteQuery::text("shadcn");
//! let results = run_pipeline(&notes, &query, SortCriterion::Updated);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].id, "2");
//! ```

use crate::models::Note;
use icu_collator::{CaseFirst, Collator, CollatorOptions, Strength};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Ordering applied by [`sort`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortCriterion {
    /// Most recently modified first
    #[default]
    Updated,
    /// Most recently created first
    Created,
    /// Alphabetical by title
    Title,
}

impl SortCriterion {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortCriterion::Updated => "updated",
            SortCriterion::Created => "created",
            SortCriterion::Title => "title",
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "updated" => Ok(SortCriterion::Updated),
            "created" => Ok(SortCriterion::Created),
            "title" => Ok(SortCriterion::Title),
            other => Err(format!("unknown sort criterion: {}", other)),
        }
    }
}

/// Search text plus the active tag filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteQuery {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub active_tags: BTreeSet<String>,
}

impl NoteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            active_tags: BTreeSet::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.active_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Flip one tag in the active filter
    pub fn toggle_tag(&mut self, tag: &str) {
        self.active_tags = toggle_tag(&self.active_tags, tag);
    }

    /// True when a search term or tag filter narrows the list
    pub fn is_filtering(&self) -> bool {
        !self.text.is_empty() || !self.active_tags.is_empty()
    }
}

/// Every distinct tag across `notes`, recomputed on each call
pub fn derive_tag_vocabulary(notes: &[Note]) -> BTreeSet<String> {
    notes.iter().flat_map(|n| n.tags.iter().cloned()).collect()
}

/// Notes matching the text query AND the tag filter, in input order.
///
/// The text matches when it is a case-insensitive substring of the title or
/// the content; an empty text matches everything. The tag filter matches when
/// it is empty or shares at least one tag with the note.
pub fn search<'a>(
    notes: &'a [Note],
    text: &str,
    active_tags: &BTreeSet<String>,
) -> Vec<&'a Note> {
    let needle = text.to_lowercase();
    notes
        .iter()
        .filter(|note| matches_text(note, &needle) && matches_tags(note, active_tags))
        .collect()
}

fn matches_text(note: &Note, needle_lower: &str) -> bool {
    needle_lower.is_empty()
        || note.title.to_lowercase().contains(needle_lower)
        || note.content.to_lowercase().contains(needle_lower)
}

fn matches_tags(note: &Note, active_tags: &BTreeSet<String>) -> bool {
    active_tags.is_empty() || note.tags.iter().any(|t| active_tags.contains(t))
}

/// Stable sort by the given criterion
pub fn sort<'a>(mut notes: Vec<&'a Note>, criterion: SortCriterion) -> Vec<&'a Note> {
    match criterion {
        SortCriterion::Updated => notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortCriterion::Created => notes.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortCriterion::Title => notes.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
    notes
}

/// Locale-aware title comparison.
///
/// Titles are ordered by the root Unicode collation, so accented letters sit
/// next to their base letter and case only breaks ties, lowercase first.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    TITLE_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b).then_with(|| a.cmp(b)),
        None => fold_case(a).cmp(fold_case(b)).then_with(|| b.cmp(a)),
    })
}

thread_local! {
    static TITLE_COLLATOR: Option<Collator> = {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        options.case_first = Some(CaseFirst::LowerFirst);
        Collator::try_new(&Default::default(), options)
            .map_err(|e| tracing::warn!("Title collator unavailable, using case folding: {}", e))
            .ok()
    };
}

fn fold_case(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// Stable partition: pinned notes first, then the rest, each group in input order
pub fn pin_partition<'a>(notes: Vec<&'a Note>) -> Vec<&'a Note> {
    let (mut pinned, unpinned): (Vec<&Note>, Vec<&Note>) =
        notes.into_iter().partition(|n| n.is_pinned);
    pinned.extend(unpinned);
    pinned
}

/// Add `tag` if absent, remove it if present
pub fn toggle_tag(active_tags: &BTreeSet<String>, tag: &str) -> BTreeSet<String> {
    let mut next = active_tags.clone();
    if !next.remove(tag) {
        next.insert(tag.to_string());
    }
    next
}

/// `search` then `sort` then `pin_partition`
pub fn run_pipeline<'a>(
    notes: &'a [Note],
    query: &NoteQuery,
    criterion: SortCriterion,
) -> Vec<&'a Note> {
    let found = search(notes, &query.text, &query.active_tags);
    pin_partition(sort(found, criterion))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{sample_notes, NewNote};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 30, hour, minute, 0).unwrap()
    }

    fn note(title: &str, content: &str, tags: &[&str]) -> Note {
        Note::from_new(
            NewNote::new(title, content).with_tags(tags.iter().copied()),
            at(9, 0),
        )
    }

    fn ids(notes: &[&Note]) -> Vec<String> {
        notes.iter().map(|n| n.id.clone()).collect()
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let notes = sample_notes();
        let found = search(&notes, "", &BTreeSet::new());
        assert_eq!(found.len(), notes.len());
    }

    #[test]
    fn test_search_is_case_insensitive_on_title_and_content() {
        let notes = vec![
            note("Rust Notes", "ownership", &[]),
            note("misc", "About RUST traits", &[]),
            note("other", "nothing here", &[]),
        ];
        let found = search(&notes, "rust", &BTreeSet::new());
        assert_eq!(ids(&found), vec![notes[0].id.clone(), notes[1].id.clone()]);
    }

    #[test]
    fn test_shadcn_search_finds_single_note() {
        let notes = sample_notes();
        let found = search(&notes, "shadcn", &BTreeSet::new());
        assert_eq!(ids(&found), vec!["2"]);
    }

    #[test]
    fn test_tag_filter_is_or_across_tags() {
        let notes = vec![
            note("a", "", &["x"]),
            note("b", "", &["y"]),
            note("c", "", &["z"]),
        ];
        let active: BTreeSet<String> = ["x", "y"].iter().map(|s| s.to_string()).collect();
        let found = search(&notes, "", &active);
        assert_eq!(ids(&found), vec![notes[0].id.clone(), notes[1].id.clone()]);
    }

    #[test]
    fn test_text_and_tags_must_both_match() {
        let notes = vec![note("alpha", "", &["x"]), note("alpha", "", &["y"])];
        let active: BTreeSet<String> = ["y".to_string()].into_iter().collect();
        let found = search(&notes, "ALPHA", &active);
        assert_eq!(ids(&found), vec![notes[1].id.clone()]);
    }

    #[test]
    fn test_sort_updated_is_non_increasing() {
        let notes = sample_notes();
        let sorted = sort(notes.iter().collect(), SortCriterion::Updated);
        assert_eq!(ids(&sorted), vec!["1", "3", "2"]);
        assert!(sorted.windows(2).all(|w| w[0].updated_at >= w[1].updated_at));
    }

    #[test]
    fn test_sort_created_is_non_increasing() {
        let notes = sample_notes();
        let sorted = sort(notes.iter().collect(), SortCriterion::Created);
        assert_eq!(ids(&sorted), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_sort_title_is_case_insensitive_and_stable() {
        let notes = vec![
            note("beta", "", &[]),
            note("Alpha", "", &[]),
            note("gamma", "", &[]),
            note("beta", "second", &[]),
        ];
        let sorted = sort(notes.iter().collect(), SortCriterion::Title);
        assert_eq!(
            ids(&sorted),
            vec![
                notes[1].id.clone(),
                notes[0].id.clone(),
                notes[3].id.clone(),
                notes[2].id.clone()
            ]
        );
    }

    #[test]
    fn test_sort_ties_keep_input_order() {
        let notes = vec![note("a", "", &[]), note("b", "", &[]), note("c", "", &[])];
        let sorted = sort(notes.iter().collect(), SortCriterion::Updated);
        assert_eq!(ids(&sorted), ids(&notes.iter().collect::<Vec<_>>()));
    }

    #[test]
    fn test_compare_titles_lowercase_first_on_case_tie() {
        assert_eq!(compare_titles("apple", "Apple"), Ordering::Less);
        assert_eq!(compare_titles("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_titles("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_compare_titles_places_accents_beside_base_letter() {
        assert_eq!(compare_titles("éclair", "zebra"), Ordering::Less);
        assert_eq!(compare_titles("Émile", "eclair"), Ordering::Greater);
        assert_eq!(compare_titles("resume", "résumé"), Ordering::Less);
        assert_eq!(compare_titles("résumé", "rose"), Ordering::Less);
    }

    #[test]
    fn test_sort_title_with_accented_titles() {
        let notes = vec![
            note("zebra", "", &[]),
            note("éclair", "", &[]),
            note("Apple", "", &[]),
            note("Über", "", &[]),
        ];
        let sorted = sort(notes.iter().collect(), SortCriterion::Title);
        let titles: Vec<&str> = sorted.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "éclair", "Über", "zebra"]);
    }

    #[test]
    fn test_pin_partition_is_stable() {
        let mut notes = vec![
            note("a", "", &[]),
            note("b", "", &[]),
            note("c", "", &[]),
            note("d", "", &[]),
        ];
        notes[1].is_pinned = true;
        notes[3].is_pinned = true;

        let partitioned = pin_partition(notes.iter().collect());
        assert_eq!(
            ids(&partitioned),
            vec![
                notes[1].id.clone(),
                notes[3].id.clone(),
                notes[0].id.clone(),
                notes[2].id.clone()
            ]
        );
    }

    #[test]
    fn test_pin_scenario_from_notes_pane() {
        let mut notes = sample_notes();
        let ordered = run_pipeline(&notes, &NoteQuery::new(), SortCriterion::Updated);
        assert_eq!(ids(&ordered), vec!["1", "3", "2"]);

        notes[1].is_pinned = true;
        let sorted = sort(notes.iter().collect(), SortCriterion::Updated);
        assert_eq!(ids(&sorted), vec!["1", "3", "2"]);
        let ordered = pin_partition(sorted);
        assert_eq!(ids(&ordered), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_toggle_tag_twice_is_identity() {
        let start: BTreeSet<String> = ["AI".to_string()].into_iter().collect();
        let once = toggle_tag(&start, "UI");
        assert!(once.contains("UI"));
        let twice = toggle_tag(&once, "UI");
        assert_eq!(twice, start);
    }

    #[test]
    fn test_query_toggle_tag_updates_filtering() {
        let mut query = NoteQuery::new();
        assert!(!query.is_filtering());
        query.toggle_tag("React");
        assert!(query.is_filtering());
        query.toggle_tag("React");
        assert!(!query.is_filtering());
    }

    #[test]
    fn test_tag_vocabulary_is_union() {
        let notes = vec![note("a", "", &["x", "y"]), note("b", "", &["y", "z"])];
        let vocab = derive_tag_vocabulary(&notes);
        assert_eq!(vocab.into_iter().collect::<Vec<_>>(), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_sort_criterion_parsing() {
        assert_eq!("Title".parse::<SortCriterion>(), Ok(SortCriterion::Title));
        assert!("priority".parse::<SortCriterion>().is_err());
        assert_eq!(SortCriterion::default(), SortCriterion::Updated);
    }
}
