//! Playlist Ops Tool
//!
//! This binary runs set and inspection operations on playlist CSV exports
//! without going through the full analysis pipeline: duplicate detection,
//! intersection and difference between two playlists, genre distribution,
//! artist extraction and per-track energy estimates.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use unmess_engine::cli_style::{self, get_styles, TableBuilder};
use unmess_engine::ingestion::import_playlist_csv;
use unmess_engine::playlist::ops;
use unmess_engine::playlist::TrackRecord;

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(name = "playlist-ops")]
#[command(about = "Set and inspection operations on playlist CSV exports")]
#[command(version = env!("APP_VERSION"))]
#[command(styles = get_styles())]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shows groups of tracks that appear more than once.
    /// Copies are matched by lowercased name and artist, not by id.
    Duplicates {
        #[clap(value_parser = parse_path)]
        playlist: PathBuf,
    },

    /// Shows tracks present in both playlists, matched by id.
    Intersect {
        #[clap(value_parser = parse_path)]
        first: PathBuf,
        #[clap(value_parser = parse_path)]
        second: PathBuf,
    },

    /// Shows tracks of the first playlist that are missing from the second.
    Diff {
        #[clap(value_parser = parse_path)]
        first: PathBuf,
        #[clap(value_parser = parse_path)]
        second: PathBuf,
    },

    /// Shows the most frequent genre tags of a playlist.
    Genres {
        #[clap(value_parser = parse_path)]
        playlist: PathBuf,

        /// Maximum number of tags to show.
        #[clap(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Shows tracks whose artist name contains the given query.
    ByArtist {
        #[clap(value_parser = parse_path)]
        playlist: PathBuf,
        artist: String,
    },

    /// Shows a rough energy estimate per track, most energetic first.
    Energy {
        #[clap(value_parser = parse_path)]
        playlist: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli_args = CliArgs::parse();

    match cli_args.command {
        Command::Duplicates { playlist } => {
            let tracks = load_playlist(&playlist)?;
            show_duplicates(&tracks);
        }
        Command::Intersect { first, second } => {
            let first = load_playlist(&first)?;
            let second = load_playlist(&second)?;
            let common = ops::intersection(&first, &second);
            cli_style::print_section_header("Tracks In Both Playlists");
            print_track_table(&common, "No common tracks");
            cli_style::print_section_footer();
            cli_style::print_key_value_highlight("Common tracks", &common.len().to_string());
        }
        Command::Diff { first, second } => {
            let first = load_playlist(&first)?;
            let second = load_playlist(&second)?;
            let missing = ops::difference(&first, &second);
            cli_style::print_section_header("Tracks Missing From Second Playlist");
            print_track_table(&missing, "Nothing missing, the second playlist covers the first");
            cli_style::print_section_footer();
            cli_style::print_key_value_highlight("Missing tracks", &missing.len().to_string());
        }
        Command::Genres { playlist, limit } => {
            let tracks = load_playlist(&playlist)?;
            show_genres(&tracks, limit);
        }
        Command::ByArtist { playlist, artist } => {
            let tracks = load_playlist(&playlist)?;
            let matches = ops::extract_by_artist(&tracks, &artist);
            cli_style::print_section_header(&format!("Tracks By {}", artist));
            print_track_table(&matches, "No tracks by that artist");
            cli_style::print_section_footer();
        }
        Command::Energy { playlist } => {
            let tracks = load_playlist(&playlist)?;
            show_energy(&tracks);
        }
    }

    Ok(())
}

fn load_playlist(path: &Path) -> Result<Vec<TrackRecord>> {
    let (tracks, stats) = import_playlist_csv(path)
        .with_context(|| format!("Failed to import playlist: {:?}", path))?;
    if stats.skipped > 0 {
        warn!("Skipped {} rows without a track id or name in {:?}", stats.skipped, path);
    }
    if tracks.is_empty() {
        cli_style::print_error("No usable tracks found in the playlist export");
        anyhow::bail!("no usable tracks in {:?}", path);
    }
    Ok(tracks)
}

fn show_duplicates(tracks: &[TrackRecord]) {
    let groups = ops::detect_duplicates(tracks);

    cli_style::print_section_header("Duplicate Tracks");
    if groups.is_empty() {
        cli_style::print_empty_list("No duplicates found");
    } else {
        for group in &groups {
            cli_style::print_key_value(
                &format!("{} copies", group.len()),
                &format!("{} by {}", group[0].name, group[0].artist),
            );
            for copy in group {
                cli_style::print_list_item(
                    &format!(
                        "{} ({}, popularity {})",
                        copy.id, copy.release_year, copy.popularity
                    ),
                    2,
                );
            }
        }
    }
    cli_style::print_section_footer();

    let total: usize = groups.iter().map(|g| g.len()).sum();
    cli_style::print_key_value_highlight("Duplicate groups", &groups.len().to_string());
    cli_style::print_key_value_highlight("Tracks involved", &total.to_string());
}

fn show_genres(tracks: &[TrackRecord], limit: usize) {
    let distribution = ops::genre_distribution(tracks, limit);

    cli_style::print_section_header("Genre Distribution");
    if distribution.is_empty() {
        cli_style::print_empty_list("No genre tags in this playlist");
    } else {
        let mut table = TableBuilder::new(vec!["#", "Genre", "Tracks"]);
        for (rank, (tag, count)) in distribution.iter().enumerate() {
            let position = (rank + 1).to_string();
            let count = count.to_string();
            table.add_row(vec![&position, tag, &count]);
        }
        table.print();
    }
    cli_style::print_section_footer();
}

fn show_energy(tracks: &[TrackRecord]) {
    let mut scored: Vec<(&TrackRecord, u8)> = tracks
        .iter()
        .map(|track| (track, ops::energy_estimate(track)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.name.cmp(&b.0.name)));

    cli_style::print_section_header("Energy Estimates");
    let mut table = TableBuilder::new(vec!["#", "Track", "Artist", "Year", "Energy"]);
    for (rank, (track, energy)) in scored.iter().enumerate() {
        let position = (rank + 1).to_string();
        let year = track.release_year.to_string();
        let energy = energy.to_string();
        table.add_row(vec![&position, &track.name, &track.artist, &year, &energy]);
    }
    table.print();
    cli_style::print_section_footer();
}

fn print_track_table(tracks: &[TrackRecord], empty_message: &str) {
    if tracks.is_empty() {
        cli_style::print_empty_list(empty_message);
        return;
    }
    let mut table = TableBuilder::new(vec!["#", "Track", "Artist", "Year", "Pop"]);
    for (rank, track) in tracks.iter().enumerate() {
        let position = (rank + 1).to_string();
        let year = track.release_year.to_string();
        let popularity = track.popularity.to_string();
        table.add_row(vec![
            &position,
            &track.name,
            &track.artist,
            &year,
            &popularity,
        ]);
    }
    table.print();
}
