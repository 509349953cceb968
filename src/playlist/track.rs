//! Track data model.
//!
//! A [`TrackRecord`] is the unit every other module consumes: the importer
//! produces them, the analysis pipeline vectorizes them, and the playlist
//! utilities compare them. Fields mirror what a playlist export actually
//! carries, so most of them are plain strings.

use serde::{Deserialize, Serialize};

/// One track as imported from a playlist export.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct TrackRecord {
    /// Catalog id. Either the 22-character id from the export or a
    /// synthesized `local-` id when the export only had a name.
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    /// Release year of the containing album (sentinel 2000 when unknown).
    pub release_year: i32,
    /// Popularity score on the 0..=100 scale used by playlist exports.
    pub popularity: u8,
    /// Lowercase free-text genre tags, deduplicated, order preserved.
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    /// Per-track audio features, present only when the export carried them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioProfile>,
}

/// Acoustic attributes of a track, all on a 0.0..=1.0 scale except `tempo`
/// (beats per minute).
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct AudioProfile {
    pub acousticness: f64,
    pub danceability: f64,
    pub energy: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub speechiness: f64,
    pub valence: f64,
    pub tempo: f64,
}

impl Default for AudioProfile {
    /// Neutral profile used when an export row carries no audio data:
    /// midpoint for every unit-scale attribute, no instrumentalness, and a
    /// middle-of-the-road 120 BPM.
    fn default() -> Self {
        Self {
            acousticness: 0.5,
            danceability: 0.5,
            energy: 0.5,
            instrumentalness: 0.0,
            liveness: 0.5,
            speechiness: 0.5,
            valence: 0.5,
            tempo: 120.0,
        }
    }
}
