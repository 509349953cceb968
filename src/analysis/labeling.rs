//! Cluster label derivation.
//!
//! A label is "dominant genre(s)" plus "mean release decade", e.g.
//! `Rock & New wave 1980s`. Good labels are what make the grouping usable,
//! so the ranking rules below are deliberately picky about ties and about
//! redundant genre pairs.

use super::vocabulary::{self, MICRO_GENRES};
use crate::playlist::TrackRecord;
use unicode_segmentation::UnicodeSegmentation;

/// Shown when no member tag matches any vocabulary entry.
const FALLBACK_GENRE: &str = "Mix";

/// Derives the display label for a non-empty cluster. Callers filter empty
/// clusters before labeling; this is never invoked on one.
pub fn label_cluster(members: &[TrackRecord]) -> String {
    let decade = mean_decade(members);
    let ranked = ranked_genres(members);

    let mut label = match ranked.first().copied() {
        Some(primary) => capitalize(primary),
        None => FALLBACK_GENRE.to_string(),
    };
    if ranked.len() >= 2 {
        let (primary, secondary) = (ranked[0], ranked[1]);
        // "Rock & Indie rock" says nothing "Indie rock" alone would not,
        // so a secondary related by substring is dropped.
        if !primary.contains(secondary) && !secondary.contains(primary) {
            label.push_str(" & ");
            label.push_str(&capitalize(secondary));
        }
    }

    format!("{} {}s", label, decade)
}

/// Decade of the arithmetic mean release year: mean 1994.3 becomes 1990.
fn mean_decade(members: &[TrackRecord]) -> i32 {
    let sum: i64 = members.iter().map(|t| t.release_year as i64).sum();
    let mean = sum as f64 / members.len() as f64;
    ((mean / 10.0).floor() as i32) * 10
}

/// Vocabulary entries matched by the members' flattened tags, best first.
///
/// Every tag instance counts, so fifteen "rock" tracks outvote one "jazz"
/// track. Equal counts rank the longer entry first: a cluster tagged
/// purely "synth-pop" co-activates "pop" at the same count, and the more
/// specific entry is the one worth printing. Remaining ties keep
/// vocabulary order via the stable sort.
fn ranked_genres(members: &[TrackRecord]) -> Vec<&'static str> {
    let tags = members
        .iter()
        .flat_map(|track| track.genres.iter())
        .map(String::as_str);
    let counts = vocabulary::match_counts(tags);

    let mut ranked: Vec<(&'static str, usize)> = MICRO_GENRES
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(entry, count)| (*entry, count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.len().cmp(&a.0.len())));
    ranked.into_iter().map(|(entry, _)| entry).collect()
}

/// Uppercases the first grapheme only: "synth-pop" becomes "Synth-pop".
fn capitalize(value: &str) -> String {
    let mut graphemes = value.graphemes(true);
    match graphemes.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), graphemes.as_str()),
        None => String::new(),
    }
}
