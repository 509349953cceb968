//! The fixed micro-genre vocabulary behind every genre feature.
//!
//! Entry position doubles as the index into the genre block of a feature
//! vector, so the order here is load-bearing: reordering or inserting
//! entries silently changes what every dimension means. Append-only edits
//! at the end of a family are safe within one run; centroids are never
//! persisted across runs.

use std::collections::HashSet;

/// Ordered micro-genre vocabulary.
///
/// Matching is by substring, so broad entries like "pop" also fire for
/// compound tags ("indie pop", "synth-pop"). That over-matching is
/// deliberate: a compound tag activating both the family and the niche
/// gives the distance metric a coarse-plus-fine genre signal.
pub const MICRO_GENRES: &[&str] = &[
    // Pop and the mainstream orbit
    "pop",
    "indie pop",
    "synth-pop",
    "electropop",
    "k-pop",
    "europop",
    // Rock and its offshoots
    "rock",
    "indie rock",
    "alternative",
    "punk",
    "metal",
    "hard rock",
    "grunge",
    "psychedelic",
    "post-punk",
    "new wave",
    // Hip hop and urban
    "hip hop",
    "rap",
    "trap",
    "drill",
    "r&b",
    "soul",
    "neo-soul",
    "funk",
    "urban",
    "grime",
    // Electronic and dance
    "electronic",
    "house",
    "techno",
    "trance",
    "disco",
    "edm",
    "dubstep",
    "drum and bass",
    "ambient",
    "synthwave",
    "lo-fi",
    // Regional scenes
    "latin",
    "reggaeton",
    "afrobeats",
    "dancehall",
    "salsa",
    "french",
    "uk",
    "german",
    "spanish",
    // Roots and mood
    "jazz",
    "blues",
    "country",
    "folk",
    "acoustic",
    "classical",
    "soundtrack",
    "chill",
];

/// Multi-hot genre activation for a track's tag set: 1.0 at every index
/// whose vocabulary entry occurs as a substring of at least one tag.
/// Tags are lowercased and deduplicated before matching.
pub fn genre_vector(tags: &[String]) -> Vec<f64> {
    let mut vector = vec![0.0; MICRO_GENRES.len()];
    let unique: HashSet<String> = tags.iter().map(|tag| tag.to_lowercase()).collect();
    for tag in &unique {
        for (index, entry) in MICRO_GENRES.iter().enumerate() {
            if tag.contains(entry) {
                vector[index] = 1.0;
            }
        }
    }
    vector
}

/// Per-entry match counts over a flat list of tags, duplicates included.
/// A tag contributes to every entry it contains, so "indie rock" counts
/// for both "rock" and "indie rock". Tags are expected lowercase, which
/// the importer guarantees.
pub fn match_counts<'a>(tags: impl Iterator<Item = &'a str>) -> Vec<usize> {
    let mut counts = vec![0usize; MICRO_GENRES.len()];
    for tag in tags {
        for (index, entry) in MICRO_GENRES.iter().enumerate() {
            if tag.contains(entry) {
                counts[index] += 1;
            }
        }
    }
    counts
}
