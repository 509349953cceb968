//! Fixture playlists and temp-file helpers for end-to-end tests.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use unmess_engine::playlist::{AudioProfile, TrackRecord};

/// Builds a track with the metadata the analysis pipeline cares about.
pub fn make_track(
    id: &str,
    name: &str,
    artist: &str,
    year: i32,
    popularity: u8,
    genres: &[&str],
) -> TrackRecord {
    TrackRecord {
        id: id.to_string(),
        name: name.to_string(),
        artist: artist.to_string(),
        album: format!("{artist} LP"),
        release_year: year,
        popularity,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        image: None,
        preview_url: None,
        audio: None,
    }
}

/// Fifteen seventies rock tracks and fifteen 2010s synth-pop tracks. Two
/// obvious groups for any genre-aware distance metric.
pub fn rock_and_synth_playlist() -> Vec<TrackRecord> {
    let mut tracks = Vec::new();
    for i in 0..15 {
        tracks.push(make_track(
            &format!("rock-{i:02}"),
            &format!("Riff {i}"),
            "The Amp Static",
            1970 + (i as i32 % 10),
            55,
            &["rock", "classic rock"],
        ));
    }
    for i in 0..15 {
        tracks.push(make_track(
            &format!("synth-{i:02}"),
            &format!("Neon {i}"),
            "Glass Arcade",
            2010 + (i as i32 % 10),
            68,
            &["synth-pop"],
        ));
    }
    tracks
}

/// Ten rock tracks spread across 25 years plus five jazz tracks sharing
/// the newer era. Splits along genre only if genre outweighs the era gap.
pub fn rock_and_jazz_playlist() -> Vec<TrackRecord> {
    let mut tracks = Vec::new();
    for i in 0..5 {
        tracks.push(make_track(
            &format!("oldrock-{i}"),
            &format!("Vinyl Side {i}"),
            "Motorway",
            1970,
            40,
            &["rock"],
        ));
    }
    for i in 0..5 {
        tracks.push(make_track(
            &format!("newrock-{i}"),
            &format!("Reissue {i}"),
            "Motorway",
            1995,
            60,
            &["rock"],
        ));
    }
    for i in 0..5 {
        tracks.push(make_track(
            &format!("jazz-{i}"),
            &format!("Blue Chart {i}"),
            "The Quarter Notes",
            1995,
            45,
            &["jazz"],
        ));
    }
    tracks
}

/// Club tracks and acoustic folk with audio attributes at opposite ends of
/// the energy and acousticness scales.
pub fn edm_and_folk_playlist() -> Vec<TrackRecord> {
    let mut tracks = Vec::new();
    for i in 0..6 {
        let mut track = make_track(
            &format!("edm-{i}"),
            &format!("Drop {i}"),
            "Volt Cartel",
            2016 + (i as i32 % 4),
            70,
            &["edm"],
        );
        track.audio = Some(AudioProfile {
            acousticness: 0.05,
            danceability: 0.9,
            energy: 0.88 + (i as f64) * 0.01,
            instrumentalness: 0.7,
            liveness: 0.12,
            speechiness: 0.06,
            valence: 0.75,
            tempo: 126.0 + i as f64,
        });
        tracks.push(track);
    }
    for i in 0..6 {
        let mut track = make_track(
            &format!("folk-{i}"),
            &format!("Porch Song {i}"),
            "June Harrow",
            1970 + (i as i32 % 4),
            35,
            &["folk"],
        );
        track.audio = Some(AudioProfile {
            acousticness: 0.92,
            danceability: 0.35,
            energy: 0.2 + (i as f64) * 0.01,
            instrumentalness: 0.1,
            liveness: 0.3,
            speechiness: 0.04,
            valence: 0.4,
            tempo: 92.0 - i as f64,
        });
        tracks.push(track);
    }
    tracks
}

/// Renders tracks in the same CSV shape the group exporter writes.
pub fn playlist_to_csv(tracks: &[TrackRecord]) -> String {
    let mut csv =
        String::from("Track ID,Track Name,Artist Name,Album Name,Release Year,Popularity,Genres\n");
    for track in tracks {
        csv.push_str(&format!(
            "{},{},{},{},{},{},\"{}\"\n",
            track.id,
            track.name,
            track.artist,
            track.album,
            track.release_year,
            track.popularity,
            track.genres.join(", "),
        ));
    }
    csv
}

/// Writes CSV content to `playlist.csv` in a fresh temp dir. Keep the
/// returned guard alive for as long as the path is in use.
pub fn write_playlist_csv(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("playlist.csv");
    fs::write(&path, content).unwrap();
    (dir, path)
}
