//! Pure utilities over track collections: duplicate handling, playlist
//! comparison and a couple of per-track heuristics.
//!
//! Everything in here is a total function over in-memory tracks. Duplicate
//! detection keys on lowercase name plus artist because exports of the same
//! playlist routinely carry the same song under different catalog ids
//! (remasters, re-releases, region variants). Playlist comparison keys on
//! the catalog id instead, since there "the same entry" is what matters.

use super::TrackRecord;
use std::collections::{HashMap, HashSet};

/// Which copy survives when duplicates collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKeep {
    /// Keep the copy with the highest popularity score.
    MostPopular,
    /// Keep the copy with the most recent release year.
    MostRecent,
}

fn duplicate_key(track: &TrackRecord) -> String {
    format!(
        "{}::{}",
        track.name.to_lowercase(),
        track.artist.to_lowercase()
    )
}

/// Groups of tracks sharing a name and artist, in first-seen order.
/// Only groups with two or more copies are returned.
pub fn detect_duplicates(tracks: &[TrackRecord]) -> Vec<Vec<TrackRecord>> {
    let mut groups: Vec<Vec<TrackRecord>> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for track in tracks {
        let key = duplicate_key(track);
        match index_by_key.get(&key) {
            Some(&index) => groups[index].push(track.clone()),
            None => {
                index_by_key.insert(key, groups.len());
                groups.push(vec![track.clone()]);
            }
        }
    }

    groups.retain(|group| group.len() > 1);
    groups
}

/// Collapses duplicate tracks, keeping one copy per name/artist pair.
/// The surviving copy sits at the position where the pair first appeared.
pub fn remove_duplicates(tracks: &[TrackRecord], keep: DuplicateKeep) -> Vec<TrackRecord> {
    let mut result: Vec<TrackRecord> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for track in tracks {
        let key = duplicate_key(track);
        match index_by_key.get(&key) {
            Some(&index) => {
                let existing = &result[index];
                let replace = match keep {
                    DuplicateKeep::MostPopular => track.popularity > existing.popularity,
                    DuplicateKeep::MostRecent => track.release_year > existing.release_year,
                };
                if replace {
                    result[index] = track.clone();
                }
            }
            None => {
                index_by_key.insert(key, result.len());
                result.push(track.clone());
            }
        }
    }

    result
}

/// Tracks of `first` whose catalog id also appears in `second`, in the
/// order they appear in `first`.
pub fn intersection(first: &[TrackRecord], second: &[TrackRecord]) -> Vec<TrackRecord> {
    let ids: HashSet<&str> = second.iter().map(|t| t.id.as_str()).collect();
    first
        .iter()
        .filter(|t| ids.contains(t.id.as_str()))
        .cloned()
        .collect()
}

/// Tracks of `first` whose catalog id does not appear in `second`.
pub fn difference(first: &[TrackRecord], second: &[TrackRecord]) -> Vec<TrackRecord> {
    let ids: HashSet<&str> = second.iter().map(|t| t.id.as_str()).collect();
    first
        .iter()
        .filter(|t| !ids.contains(t.id.as_str()))
        .cloned()
        .collect()
}

/// Raw genre tag counts across all tracks, most common first, capped at
/// `limit` entries. Equal counts order alphabetically so the output is
/// stable across runs.
pub fn genre_distribution(tracks: &[TrackRecord], limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for track in tracks {
        for tag in &track.genres {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut distribution: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    distribution.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    distribution.truncate(limit);
    distribution
}

/// Rough 0..=100 energy estimate from metadata alone: the mean of the
/// popularity score and the release year rescaled over 1950..=2025.
/// Newer and more popular reads as more energetic, which holds up
/// surprisingly well for party-playlist triage.
pub fn energy_estimate(track: &TrackRecord) -> u8 {
    let year_component = (((track.release_year - 1950) as f64 / 75.0) * 100.0).clamp(0.0, 100.0);
    ((year_component + track.popularity as f64) / 2.0).round() as u8
}

/// Tracks whose artist name contains `query`, case-insensitively.
pub fn extract_by_artist(tracks: &[TrackRecord], query: &str) -> Vec<TrackRecord> {
    let query = query.to_lowercase();
    tracks
        .iter()
        .filter(|t| t.artist.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_track(id: &str, name: &str, artist: &str, year: i32, popularity: u8) -> TrackRecord {
        TrackRecord {
            id: id.to_string(),
            name: name.to_string(),
            artist: artist.to_string(),
            album: String::new(),
            release_year: year,
            popularity,
            genres: vec![],
            image: None,
            preview_url: None,
            audio: None,
        }
    }

    fn with_genres(mut track: TrackRecord, genres: &[&str]) -> TrackRecord {
        track.genres = genres.iter().map(|g| g.to_string()).collect();
        track
    }

    // =========================================================================
    // Duplicate handling
    // =========================================================================

    #[test]
    fn detects_duplicates_case_insensitively() {
        let tracks = vec![
            make_track("a1", "One More Time", "Daft Punk", 2001, 80),
            make_track("b2", "one more time", "DAFT PUNK", 2001, 74),
            make_track("c3", "Digital Love", "Daft Punk", 2001, 70),
        ];

        let groups = detect_duplicates(&tracks);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[0][0].id, "a1");
    }

    #[test]
    fn different_artists_are_not_duplicates() {
        let tracks = vec![
            make_track("a1", "Hurt", "Nine Inch Nails", 1994, 70),
            make_track("b2", "Hurt", "Johnny Cash", 2002, 78),
        ];

        assert!(detect_duplicates(&tracks).is_empty());
    }

    #[test]
    fn remove_duplicates_keeps_most_popular_copy() {
        let tracks = vec![
            make_track("a1", "One More Time", "Daft Punk", 2001, 74),
            make_track("b2", "One More Time", "Daft Punk", 2011, 80),
            make_track("c3", "Digital Love", "Daft Punk", 2001, 70),
        ];

        let result = remove_duplicates(&tracks, DuplicateKeep::MostPopular);
        assert_eq!(result.len(), 2);
        // The winner takes the first occurrence's position.
        assert_eq!(result[0].id, "b2");
        assert_eq!(result[1].id, "c3");
    }

    #[test]
    fn remove_duplicates_keeps_most_recent_copy() {
        let tracks = vec![
            make_track("a1", "Respect", "Aretha Franklin", 1967, 82),
            make_track("b2", "Respect", "Aretha Franklin", 2014, 60),
        ];

        let result = remove_duplicates(&tracks, DuplicateKeep::MostRecent);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "b2");
    }

    #[test]
    fn remove_duplicates_first_copy_wins_ties() {
        let tracks = vec![
            make_track("a1", "Popcorn", "Hot Butter", 1972, 50),
            make_track("b2", "Popcorn", "Hot Butter", 1972, 50),
        ];

        let result = remove_duplicates(&tracks, DuplicateKeep::MostPopular);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "a1");
    }

    // =========================================================================
    // Playlist comparison
    // =========================================================================

    #[test]
    fn intersection_keys_on_catalog_id() {
        let first = vec![
            make_track("a1", "Song A", "X", 2000, 10),
            make_track("b2", "Song B", "X", 2000, 10),
        ];
        let second = vec![
            // Same id, different display name: still the same entry.
            make_track("b2", "Song B (Remastered)", "X", 2010, 20),
            make_track("c3", "Song C", "Y", 2000, 10),
        ];

        let common = intersection(&first, &second);
        assert_eq!(common.len(), 1);
        assert_eq!(common[0].id, "b2");
        assert_eq!(common[0].name, "Song B");
    }

    #[test]
    fn difference_keeps_only_first_playlist_exclusives() {
        let first = vec![
            make_track("a1", "Song A", "X", 2000, 10),
            make_track("b2", "Song B", "X", 2000, 10),
        ];
        let second = vec![make_track("b2", "Song B", "X", 2000, 10)];

        let only_first = difference(&first, &second);
        assert_eq!(only_first.len(), 1);
        assert_eq!(only_first[0].id, "a1");
    }

    // =========================================================================
    // Distribution and heuristics
    // =========================================================================

    #[test]
    fn genre_distribution_counts_and_orders() {
        let tracks = vec![
            with_genres(make_track("a1", "A", "X", 2000, 0), &["rock", "grunge"]),
            with_genres(make_track("b2", "B", "X", 2000, 0), &["rock"]),
            with_genres(make_track("c3", "C", "Y", 2000, 0), &["ambient"]),
        ];

        let distribution = genre_distribution(&tracks, 20);
        assert_eq!(distribution[0], ("rock".to_string(), 2));
        // Equal counts fall back to alphabetical order.
        assert_eq!(distribution[1], ("ambient".to_string(), 1));
        assert_eq!(distribution[2], ("grunge".to_string(), 1));
    }

    #[test]
    fn genre_distribution_respects_limit() {
        let tracks = vec![with_genres(
            make_track("a1", "A", "X", 2000, 0),
            &["a", "b", "c", "d"],
        )];

        assert_eq!(genre_distribution(&tracks, 2).len(), 2);
    }

    #[test]
    fn energy_estimate_blends_year_and_popularity() {
        // 2025 maxes the year component; with popularity 100 that is 100.
        assert_eq!(energy_estimate(&make_track("a", "A", "X", 2025, 100)), 100);
        // 1950 zeroes the year component.
        assert_eq!(energy_estimate(&make_track("b", "B", "X", 1950, 50)), 25);
        // Years before the window clamp instead of going negative.
        assert_eq!(energy_estimate(&make_track("c", "C", "X", 1901, 0)), 0);
    }

    #[test]
    fn extract_by_artist_matches_substrings() {
        let tracks = vec![
            make_track("a1", "A", "The Rolling Stones", 1969, 80),
            make_track("b2", "B", "Stone Temple Pilots", 1992, 70),
            make_track("c3", "C", "Blur", 1994, 75),
        ];

        let matches = extract_by_artist(&tracks, "stone");
        assert_eq!(matches.len(), 2);
        assert!(extract_by_artist(&tracks, "BLUR").len() == 1);
    }
}
