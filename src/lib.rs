//! Unmess Playlist Analysis Engine Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod analysis;
pub mod cli_style;
pub mod config;
pub mod export;
pub mod ingestion;
pub mod playlist;

// Re-export commonly used types for convenience
pub use analysis::{analyze, AnalysisError, Cluster, ClusterParams};
pub use config::{AppConfig, CliConfig, GroupingPolicy, VectorizerKind};
pub use ingestion::{import_playlist_csv, parse_playlist_csv, CsvImportError, ImportStats};
pub use playlist::{AudioProfile, TrackRecord};
