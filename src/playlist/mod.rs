//! Playlist domain: the track model plus pure collection utilities.

pub mod ops;
mod track;

pub use track::{AudioProfile, TrackRecord};
