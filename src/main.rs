use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use unmess_engine::analysis::{analyze, create_vectorizer};
use unmess_engine::cli_style;
use unmess_engine::config::{AppConfig, CliConfig, FileConfig, VectorizerKind};
use unmess_engine::export;
use unmess_engine::ingestion::import_playlist_csv;
use unmess_engine::playlist::ops::{self, DuplicateKeep};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(name = "unmess")]
#[command(about = "Split a messy playlist export into coherent groups")]
#[command(version = env!("APP_VERSION"))]
#[command(styles = cli_style::get_styles())]
struct CliArgs {
    /// Path to the playlist CSV export (Exportify or similar).
    #[clap(value_parser = parse_path)]
    pub playlist_csv: PathBuf,

    /// Number of groups to produce. Defaults to a size-based suggestion.
    #[clap(short, long)]
    pub groups: Option<usize>,

    /// Fixed seed for centroid initialization, for reproducible runs.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Feature-vector strategy.
    #[clap(long, value_enum)]
    pub vectorizer: Option<VectorizerKind>,

    /// Path to a TOML config file. Its values override CLI flags.
    #[clap(short, long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Keep duplicate tracks instead of collapsing them before analysis.
    #[clap(long, default_value_t = false)]
    pub keep_duplicates: bool,

    /// Write the full analysis report as JSON to this path.
    #[clap(long, value_parser = parse_path)]
    pub json: Option<PathBuf>,

    /// Write one CSV per group into this directory.
    #[clap(long, value_parser = parse_path)]
    pub export_dir: Option<PathBuf>,

    /// Suppress the banner and group tables; logs and exports still happen.
    #[clap(short, long, default_value_t = false)]
    pub quiet: bool,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    if !cli_args.quiet {
        cli_style::print_banner();
    }

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        groups: cli_args.groups,
        seed: cli_args.seed,
        vectorizer: cli_args.vectorizer,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Importing playlist from {:?}...", cli_args.playlist_csv);
    let (tracks, stats) = import_playlist_csv(&cli_args.playlist_csv)
        .with_context(|| format!("Failed to import playlist: {:?}", cli_args.playlist_csv))?;

    if tracks.is_empty() {
        cli_style::print_error("No usable tracks found in the playlist export");
        anyhow::bail!("no usable tracks in {:?}", cli_args.playlist_csv);
    }
    if stats.skipped > 0 && !cli_args.quiet {
        cli_style::print_warning(&format!(
            "Skipped {} rows without a track id or name",
            stats.skipped
        ));
    }

    let mut duplicates_removed = 0;
    let tracks = if cli_args.keep_duplicates {
        tracks
    } else {
        let kept = ops::remove_duplicates(&tracks, DuplicateKeep::MostPopular);
        duplicates_removed = tracks.len() - kept.len();
        if duplicates_removed > 0 {
            info!("Collapsed {} duplicate tracks", duplicates_removed);
        }
        kept
    };

    let group_count = config
        .groups
        .unwrap_or_else(|| config.grouping.suggest_group_count(tracks.len()));

    if !cli_args.quiet {
        cli_style::print_key_value("Playlist", &format!("{:?}", cli_args.playlist_csv));
        cli_style::print_key_value("Tracks", &tracks.len().to_string());
        cli_style::print_key_value("Groups", &group_count.to_string());
        cli_style::print_key_value("Vectorizer", &format!("{:?}", config.vectorizer));
    }

    let vectorizer = create_vectorizer(config.vectorizer, config.weights);
    let clusters = analyze(
        &tracks,
        group_count,
        vectorizer.as_ref(),
        &config.cluster_params,
    )?;

    if !cli_args.quiet {
        for (index, cluster) in clusters.iter().enumerate() {
            let label = cluster.label.as_deref().unwrap_or("Unlabeled");
            cli_style::print_section_header(&format!(
                "Group {}/{}: {}",
                index + 1,
                clusters.len(),
                label
            ));

            let mut table = cli_style::TableBuilder::new(vec!["#", "Track", "Artist", "Year", "Pop"]);
            for (row, track) in cluster.tracks.iter().enumerate() {
                let position = (row + 1).to_string();
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
            cli_style::print_section_footer();
        }
    }

    info!("");
    info!("Analysis Summary");
    info!("================");
    info!("Rows imported: {}", stats.imported);
    info!("Rows skipped: {}", stats.skipped);
    info!("Ids synthesized: {}", stats.synthesized_ids);
    info!("Duplicates removed: {}", duplicates_removed);
    info!("Tracks analyzed: {}", tracks.len());
    info!("Groups produced: {}", clusters.len());

    if let Some(path) = &cli_args.json {
        export::write_json_report(&clusters, path)?;
        info!("Report written to {:?}", path);
    }
    if let Some(dir) = &cli_args.export_dir {
        let written = export::write_group_csvs(&clusters, dir)?;
        info!("Wrote {} group CSVs into {:?}", written.len(), dir);
    }

    if !cli_args.quiet {
        cli_style::print_success(&format!(
            "Split {} tracks into {} groups",
            tracks.len(),
            clusters.len()
        ));
    }
    Ok(())
}
