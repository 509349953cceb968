//! Playlist CSV importer.
//!
//! Reads the CSV dialect produced by playlist export tools (Exportify and
//! friends). Those files are wildly inconsistent: column names differ per
//! tool and version, quoting is optional, and half the metadata may be
//! missing. The importer is therefore lenient per row and strict only
//! about the file as a whole: a row without both a usable id and a name is
//! skipped and counted, everything else gets defaults.

use crate::playlist::{AudioProfile, TrackRecord};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Length of a catalog track id in playlist exports.
const TRACK_ID_LEN: usize = 22;

/// Release year used when a row has no parseable date.
const SENTINEL_YEAR: i32 = 2000;

lazy_static! {
    static ref TRACK_URL_RE: Regex = Regex::new(r"track/([a-zA-Z0-9]{22})").unwrap();
}

#[derive(Debug, Error)]
pub enum CsvImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV file is empty")]
    Empty,

    #[error("CSV must contain a header row and at least one data row")]
    MissingData,

    #[error("CSV header has no recognizable track id or track name column")]
    NoUsableColumns,
}

/// Counters describing one import run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    /// Rows turned into tracks.
    pub imported: usize,
    /// Rows dropped for having neither an id nor a name.
    pub skipped: usize,
    /// Imported rows that needed a synthesized local id.
    pub synthesized_ids: usize,
}

/// Reads and parses a playlist export CSV from disk.
pub fn import_playlist_csv(path: &Path) -> Result<(Vec<TrackRecord>, ImportStats), CsvImportError> {
    let content = std::fs::read_to_string(path)?;
    parse_playlist_csv(&content)
}

/// Parses playlist export CSV content.
pub fn parse_playlist_csv(content: &str) -> Result<(Vec<TrackRecord>, ImportStats), CsvImportError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(CsvImportError::Empty);
    }
    let lines: Vec<&str> = trimmed.lines().collect();
    if lines.len() < 2 {
        return Err(CsvImportError::MissingData);
    }

    let headers = parse_csv_line(&lines[0].to_lowercase());
    let columns = detect_columns(&headers);
    if columns.id.is_none() && columns.url.is_none() && columns.name.is_none() {
        return Err(CsvImportError::NoUsableColumns);
    }

    let mut tracks = Vec::new();
    let mut stats = ImportStats::default();

    for line in &lines[1..] {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields = parse_csv_line(line);

        let id = extract_track_id(
            field(&fields, columns.id),
            field(&fields, columns.url),
        );
        let name = field(&fields, columns.name).filter(|value| !value.is_empty());

        if id.is_none() && name.is_none() {
            stats.skipped += 1;
            debug!("Skipping row with no track id and no name: {:?}", line);
            continue;
        }

        let id = match id {
            Some(id) => id,
            None => {
                stats.synthesized_ids += 1;
                format!("local-{}", Uuid::new_v4().simple())
            }
        };

        tracks.push(TrackRecord {
            id,
            name: name.unwrap_or("Unknown Track").to_string(),
            artist: field(&fields, columns.artist)
                .filter(|value| !value.is_empty())
                .unwrap_or("Unknown Artist")
                .to_string(),
            album: field(&fields, columns.album).unwrap_or("").to_string(),
            release_year: parse_release_year(field(&fields, columns.release)),
            popularity: parse_popularity(field(&fields, columns.popularity)),
            genres: parse_genres(field(&fields, columns.genres)),
            image: field(&fields, columns.image)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
            preview_url: field(&fields, columns.preview)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
            audio: parse_audio(&columns.audio, &fields),
        });
        stats.imported += 1;
    }

    info!(
        "Imported {} tracks ({} rows skipped, {} without catalog ids)",
        stats.imported, stats.skipped, stats.synthesized_ids
    );
    Ok((tracks, stats))
}

/// Column indices resolved from the header row.
#[derive(Debug, Default)]
struct ColumnMap {
    id: Option<usize>,
    url: Option<usize>,
    name: Option<usize>,
    artist: Option<usize>,
    album: Option<usize>,
    release: Option<usize>,
    popularity: Option<usize>,
    genres: Option<usize>,
    image: Option<usize>,
    preview: Option<usize>,
    audio: AudioColumns,
}

#[derive(Debug, Default)]
struct AudioColumns {
    acousticness: Option<usize>,
    danceability: Option<usize>,
    energy: Option<usize>,
    instrumentalness: Option<usize>,
    liveness: Option<usize>,
    speechiness: Option<usize>,
    valence: Option<usize>,
    tempo: Option<usize>,
}

impl AudioColumns {
    fn any(&self) -> bool {
        self.acousticness.is_some()
            || self.danceability.is_some()
            || self.energy.is_some()
            || self.instrumentalness.is_some()
            || self.liveness.is_some()
            || self.speechiness.is_some()
            || self.valence.is_some()
            || self.tempo.is_some()
    }
}

/// Maps lowercase header names to column roles by substring, first match
/// wins. Qualified names are tried before loose ones because export
/// headers love to collide ("Artist Name(s)" vs "Artist Genres", "Album
/// Name" vs "Album Release Date" vs "Album Image URL").
fn detect_columns(headers: &[String]) -> ColumnMap {
    let find = |matches: &dyn Fn(&str) -> bool| headers.iter().position(|h| matches(h.as_str()));

    ColumnMap {
        id: find(&|h| h.contains("spotify id") || h.contains("track id") || h.contains("uri")),
        url: find(&|h| h.contains("url") && !h.contains("image") && !h.contains("preview")),
        name: find(&|h| h.contains("track name"))
            .or_else(|| find(&|h| h.contains("title")))
            .or_else(|| find(&|h| h.contains("name") && !h.contains("artist") && !h.contains("album"))),
        artist: find(&|h| h.contains("artist name"))
            .or_else(|| find(&|h| h.contains("artist") && !h.contains("genre") && !h.contains("id"))),
        album: find(&|h| h.contains("album name")).or_else(|| {
            find(&|h| {
                h.contains("album")
                    && !h.contains("date")
                    && !h.contains("image")
                    && !h.contains("url")
                    && !h.contains("id")
            })
        }),
        release: find(&|h| h.contains("release")),
        popularity: find(&|h| h.contains("popularity")),
        genres: find(&|h| h.contains("genre")),
        image: find(&|h| h.contains("image")),
        preview: find(&|h| h.contains("preview")),
        audio: AudioColumns {
            acousticness: find(&|h| h.contains("acousticness")),
            danceability: find(&|h| h.contains("danceability")),
            energy: find(&|h| h.contains("energy")),
            instrumentalness: find(&|h| h.contains("instrumentalness")),
            liveness: find(&|h| h.contains("liveness")),
            speechiness: find(&|h| h.contains("speechiness")),
            valence: find(&|h| h.contains("valence")),
            tempo: find(&|h| h.contains("tempo")),
        },
    }
}

/// Splits one CSV line, honoring quoted fields and doubled-quote escapes.
/// Fields come back trimmed.
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

fn field<'a>(fields: &'a [String], index: Option<usize>) -> Option<&'a str> {
    index.and_then(|i| fields.get(i)).map(String::as_str)
}

/// Pulls a 22-character track id out of whatever the export provides:
/// a `spotify:track:` URI, a bare id, or an open.spotify.com URL.
fn extract_track_id(id_cell: Option<&str>, url_cell: Option<&str>) -> Option<String> {
    if let Some(value) = id_cell {
        let value = value.trim();
        if let Some(rest) = value.strip_prefix("spotify:track:") {
            return Some(rest.to_string());
        }
        if value.len() == TRACK_ID_LEN && value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Some(value.to_string());
        }
    }
    if let Some(value) = url_cell {
        if let Some(captures) = TRACK_URL_RE.captures(value) {
            return Some(captures[1].to_string());
        }
    }
    None
}

/// Leading year of a date cell ("1994-06-21" or plain "1994"); sentinel
/// when missing or malformed.
fn parse_release_year(cell: Option<&str>) -> i32 {
    cell.and_then(|value| value.split('-').next())
        .and_then(|value| value.trim().parse::<i32>().ok())
        .unwrap_or(SENTINEL_YEAR)
}

fn parse_popularity(cell: Option<&str>) -> u8 {
    cell.and_then(|value| value.trim().parse::<i64>().ok())
        .map(|value| value.clamp(0, 100) as u8)
        .unwrap_or(0)
}

/// Comma-separated genre cell into lowercase deduplicated tags, order
/// preserved.
fn parse_genres(cell: Option<&str>) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    if let Some(value) = cell {
        for tag in value.split(',') {
            let tag = tag.trim().to_lowercase();
            if !tag.is_empty() && !genres.contains(&tag) {
                genres.push(tag);
            }
        }
    }
    genres
}

/// Audio profile from the row, present only when the export has audio
/// columns at all. Unparseable cells fall back to the neutral default so
/// one bad value does not disqualify the row.
fn parse_audio(columns: &AudioColumns, fields: &[String]) -> Option<AudioProfile> {
    if !columns.any() {
        return None;
    }
    let defaults = AudioProfile::default();
    Some(AudioProfile {
        acousticness: parse_feature(columns.acousticness, fields, defaults.acousticness),
        danceability: parse_feature(columns.danceability, fields, defaults.danceability),
        energy: parse_feature(columns.energy, fields, defaults.energy),
        instrumentalness: parse_feature(columns.instrumentalness, fields, defaults.instrumentalness),
        liveness: parse_feature(columns.liveness, fields, defaults.liveness),
        speechiness: parse_feature(columns.speechiness, fields, defaults.speechiness),
        valence: parse_feature(columns.valence, fields, defaults.valence),
        tempo: parse_feature(columns.tempo, fields, defaults.tempo),
    })
}

fn parse_feature(column: Option<usize>, fields: &[String], default: f64) -> f64 {
    column
        .and_then(|index| fields.get(index))
        .and_then(|value| value.trim().parse::<f64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORTIFY_SAMPLE: &str = "\
Track URI,Track Name,Artist Name(s),Album Name,Album Release Date,Popularity,Artist Genres
spotify:track:4uLU6hMCjMI75M1A2tKUQC,Never Gonna Give You Up,Rick Astley,Whenever You Need Somebody,1987-11-12,81,\"new wave, synth-pop, dance pop\"
spotify:track:0VjIjW4GlUZAMYd2vXMi3b,Blinding Lights,The Weeknd,After Hours,2020-03-20,92,\"canadian pop, canadian contemporary r&b\"
";

    // =========================================================================
    // Line splitting
    // =========================================================================

    #[test]
    fn splits_plain_fields() {
        assert_eq!(parse_csv_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn splits_quoted_fields_with_commas() {
        assert_eq!(
            parse_csv_line("x,\"rock, indie rock\",y"),
            vec!["x", "rock, indie rock", "y"]
        );
    }

    #[test]
    fn unescapes_doubled_quotes() {
        assert_eq!(
            parse_csv_line("\"say \"\"hello\"\"\",b"),
            vec!["say \"hello\"", "b"]
        );
    }

    #[test]
    fn trims_fields() {
        assert_eq!(parse_csv_line(" a , b "), vec!["a", "b"]);
    }

    // =========================================================================
    // Id extraction
    // =========================================================================

    #[test]
    fn extracts_id_from_uri() {
        assert_eq!(
            extract_track_id(Some("spotify:track:4uLU6hMCjMI75M1A2tKUQC"), None),
            Some("4uLU6hMCjMI75M1A2tKUQC".to_string())
        );
    }

    #[test]
    fn extracts_bare_id() {
        assert_eq!(
            extract_track_id(Some("4uLU6hMCjMI75M1A2tKUQC"), None),
            Some("4uLU6hMCjMI75M1A2tKUQC".to_string())
        );
    }

    #[test]
    fn extracts_id_from_url_fallback() {
        assert_eq!(
            extract_track_id(
                Some("not an id"),
                Some("https://open.spotify.com/track/0VjIjW4GlUZAMYd2vXMi3b?si=abc")
            ),
            Some("0VjIjW4GlUZAMYd2vXMi3b".to_string())
        );
    }

    #[test]
    fn rejects_id_of_wrong_shape() {
        assert_eq!(extract_track_id(Some("short"), None), None);
        // 22 characters but not alphanumeric.
        assert_eq!(extract_track_id(Some("aaaa aaaa aaaa aaaa aa"), None), None);
    }

    // =========================================================================
    // Cell parsing
    // =========================================================================

    #[test]
    fn parses_release_year_variants() {
        assert_eq!(parse_release_year(Some("1987-11-12")), 1987);
        assert_eq!(parse_release_year(Some("1987")), 1987);
        assert_eq!(parse_release_year(Some("")), SENTINEL_YEAR);
        assert_eq!(parse_release_year(Some("unknown")), SENTINEL_YEAR);
        assert_eq!(parse_release_year(None), SENTINEL_YEAR);
    }

    #[test]
    fn clamps_popularity() {
        assert_eq!(parse_popularity(Some("81")), 81);
        assert_eq!(parse_popularity(Some("150")), 100);
        assert_eq!(parse_popularity(Some("-3")), 0);
        assert_eq!(parse_popularity(Some("n/a")), 0);
        assert_eq!(parse_popularity(None), 0);
    }

    #[test]
    fn genre_cells_are_lowercased_and_deduplicated() {
        assert_eq!(
            parse_genres(Some("Rock, INDIE ROCK, rock, ,grunge")),
            vec!["rock", "indie rock", "grunge"]
        );
        assert!(parse_genres(None).is_empty());
    }

    // =========================================================================
    // Whole-file parsing
    // =========================================================================

    #[test]
    fn imports_exportify_sample() {
        let (tracks, stats) = parse_playlist_csv(EXPORTIFY_SAMPLE).unwrap();

        assert_eq!(stats.imported, 2);
        assert_eq!(stats.skipped, 0);
        assert_eq!(stats.synthesized_ids, 0);

        assert_eq!(tracks[0].id, "4uLU6hMCjMI75M1A2tKUQC");
        assert_eq!(tracks[0].name, "Never Gonna Give You Up");
        assert_eq!(tracks[0].artist, "Rick Astley");
        assert_eq!(tracks[0].album, "Whenever You Need Somebody");
        assert_eq!(tracks[0].release_year, 1987);
        assert_eq!(tracks[0].popularity, 81);
        assert_eq!(
            tracks[0].genres,
            vec!["new wave", "synth-pop", "dance pop"]
        );
        assert_eq!(tracks[0].audio, None);
    }

    #[test]
    fn synthesizes_local_id_when_only_name_is_present() {
        let csv = "Track Name,Artist Name(s)\nHomemade Demo,Garage Band\n";
        let (tracks, stats) = parse_playlist_csv(csv).unwrap();

        assert_eq!(stats.imported, 1);
        assert_eq!(stats.synthesized_ids, 1);
        assert!(tracks[0].id.starts_with("local-"));
        assert_eq!(tracks[0].name, "Homemade Demo");
    }

    #[test]
    fn skips_rows_with_neither_id_nor_name() {
        let csv = "Track URI,Track Name,Popularity\n,,50\nspotify:track:4uLU6hMCjMI75M1A2tKUQC,Real Song,60\n";
        let (tracks, stats) = parse_playlist_csv(csv).unwrap();

        assert_eq!(stats.imported, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(tracks[0].name, "Real Song");
    }

    #[test]
    fn missing_metadata_gets_defaults() {
        let csv = "Track URI\nspotify:track:4uLU6hMCjMI75M1A2tKUQC\n";
        let (tracks, _) = parse_playlist_csv(csv).unwrap();

        assert_eq!(tracks[0].name, "Unknown Track");
        assert_eq!(tracks[0].artist, "Unknown Artist");
        assert_eq!(tracks[0].release_year, SENTINEL_YEAR);
        assert_eq!(tracks[0].popularity, 0);
        assert!(tracks[0].genres.is_empty());
    }

    #[test]
    fn reads_audio_columns_when_present() {
        let csv = "Track URI,Track Name,Energy,Valence,Tempo\n\
            spotify:track:4uLU6hMCjMI75M1A2tKUQC,Upbeat,0.93,0.92,113\n\
            spotify:track:0VjIjW4GlUZAMYd2vXMi3b,Sparse,bogus,0.2,\n";
        let (tracks, _) = parse_playlist_csv(csv).unwrap();

        let audio = tracks[0].audio.unwrap();
        assert_eq!(audio.energy, 0.93);
        assert_eq!(audio.tempo, 113.0);
        // Unlisted attributes keep neutral defaults.
        assert_eq!(audio.acousticness, 0.5);

        // Unparseable cells fall back per attribute, not per row.
        let sparse = tracks[1].audio.unwrap();
        assert_eq!(sparse.energy, 0.5);
        assert_eq!(sparse.valence, 0.2);
        assert_eq!(sparse.tempo, 120.0);
    }

    #[test]
    fn artist_genres_header_is_not_mistaken_for_artist() {
        let csv = "Track URI,Artist Genres,Artist Name(s)\n\
            spotify:track:4uLU6hMCjMI75M1A2tKUQC,\"indie pop\",Tame Impala\n";
        let (tracks, _) = parse_playlist_csv(csv).unwrap();

        assert_eq!(tracks[0].artist, "Tame Impala");
        assert_eq!(tracks[0].genres, vec!["indie pop"]);
    }

    #[test]
    fn empty_content_is_an_error() {
        assert!(matches!(
            parse_playlist_csv("   \n  "),
            Err(CsvImportError::Empty)
        ));
    }

    #[test]
    fn header_only_content_is_an_error() {
        assert!(matches!(
            parse_playlist_csv("Track URI,Track Name\n"),
            Err(CsvImportError::MissingData)
        ));
    }

    #[test]
    fn unusable_header_is_an_error() {
        assert!(matches!(
            parse_playlist_csv("Foo,Bar\n1,2\n"),
            Err(CsvImportError::NoUsableColumns)
        ));
    }
}
