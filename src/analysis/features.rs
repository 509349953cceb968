//! Track-to-vector feature engineering.
//!
//! Every clustering run starts here: a [`Vectorizer`] turns each track into
//! a fixed-length `Vec<f64>` whose euclidean geometry encodes "these two
//! tracks belong together". Two strategies exist. The canonical one works
//! off genre tags and release era, which every playlist export carries; the
//! audio-profile one works off per-track acoustic attributes when the
//! export includes them.

use super::vocabulary;
use crate::config::VectorizerKind;
use crate::playlist::TrackRecord;
use chrono::Datelike;
use tracing::info;

/// Relative pull of each feature group on the distance metric. Genre
/// dominates, release era is secondary, popularity barely registers: it
/// only separates huge hits from obscurities inside an otherwise uniform
/// genre/era bucket.
pub const DEFAULT_YEAR_WEIGHT: f64 = 1.0;
pub const DEFAULT_POPULARITY_WEIGHT: f64 = 0.1;
pub const DEFAULT_GENRE_WEIGHT: f64 = 4.0;

/// Lower bound of the release-year window. Anything older clamps here;
/// the upper bound is the current year unless pinned explicitly.
pub const MIN_RELEASE_YEAR: i32 = 1960;

/// BPM window for tempo normalization in the audio strategy.
const MIN_TEMPO: f64 = 60.0;
const MAX_TEMPO: f64 = 200.0;

/// Per-feature-group scaling applied by the genre/era strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureWeights {
    pub year: f64,
    pub popularity: f64,
    pub genre: f64,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR_WEIGHT,
            popularity: DEFAULT_POPULARITY_WEIGHT,
            genre: DEFAULT_GENRE_WEIGHT,
        }
    }
}

/// Maps tracks to fixed-length feature vectors.
///
/// Implementations must be total: every well-formed track gets a vector of
/// exactly `dimensions()` entries, missing metadata falls back to neutral
/// values rather than failing.
pub trait Vectorizer {
    /// Output dimensionality, constant for the lifetime of the instance.
    fn dimensions(&self) -> usize;

    /// The feature vector for one track.
    fn vectorize(&self, track: &TrackRecord) -> Vec<f64>;
}

/// Builds the vectorizer for the configured strategy.
pub fn create_vectorizer(kind: VectorizerKind, weights: FeatureWeights) -> Box<dyn Vectorizer> {
    match kind {
        VectorizerKind::GenreEra => {
            info!("Using genre/era vectorizer");
            Box::new(GenreEraVectorizer::new(weights))
        }
        VectorizerKind::AudioProfile => {
            info!("Using audio-profile vectorizer");
            Box::new(AudioProfileVectorizer)
        }
    }
}

/// Canonical strategy: `[year, popularity, genre_0 .. genre_M-1]`.
///
/// Year is clamped into the release window and rescaled to 0..=1,
/// popularity divided by 100, and the genre block is the multi-hot
/// vocabulary activation. Each group is then scaled by its weight.
pub struct GenreEraVectorizer {
    weights: FeatureWeights,
    max_year: i32,
}

impl GenreEraVectorizer {
    /// A vectorizer whose year window tops out at the current year.
    pub fn new(weights: FeatureWeights) -> Self {
        Self::with_max_year(weights, chrono::Local::now().year())
    }

    /// Pins the upper bound of the year window, mainly so tests do not
    /// depend on the wall clock.
    pub fn with_max_year(weights: FeatureWeights, max_year: i32) -> Self {
        Self { weights, max_year }
    }

    fn normalize_year(&self, year: i32) -> f64 {
        if self.max_year <= MIN_RELEASE_YEAR {
            return 0.0;
        }
        let clamped = year.clamp(MIN_RELEASE_YEAR, self.max_year);
        (clamped - MIN_RELEASE_YEAR) as f64 / (self.max_year - MIN_RELEASE_YEAR) as f64
    }
}

impl Vectorizer for GenreEraVectorizer {
    fn dimensions(&self) -> usize {
        2 + vocabulary::MICRO_GENRES.len()
    }

    fn vectorize(&self, track: &TrackRecord) -> Vec<f64> {
        let mut vector = Vec::with_capacity(self.dimensions());
        vector.push(self.normalize_year(track.release_year) * self.weights.year);
        vector.push(track.popularity as f64 / 100.0 * self.weights.popularity);
        vector.extend(
            vocabulary::genre_vector(&track.genres)
                .into_iter()
                .map(|active| active * self.weights.genre),
        );
        vector
    }
}

/// Alternate strategy over per-track acoustic attributes.
///
/// Seven unit-scale attributes pass through as-is and tempo is clamped
/// into 60..=200 BPM then rescaled to 0..=1, so all eight dimensions
/// share one scale and need no reweighting. Tracks without audio data
/// get the neutral profile.
#[derive(Debug, Default)]
pub struct AudioProfileVectorizer;

impl Vectorizer for AudioProfileVectorizer {
    fn dimensions(&self) -> usize {
        8
    }

    fn vectorize(&self, track: &TrackRecord) -> Vec<f64> {
        let audio = track.audio.unwrap_or_default();
        vec![
            audio.acousticness,
            audio.danceability,
            audio.energy,
            audio.instrumentalness,
            audio.liveness,
            audio.speechiness,
            audio.valence,
            (audio.tempo.clamp(MIN_TEMPO, MAX_TEMPO) - MIN_TEMPO) / (MAX_TEMPO - MIN_TEMPO),
        ]
    }
}
