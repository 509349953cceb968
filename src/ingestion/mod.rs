//! Ingestion of external playlist exports.
//!
//! Import workflow:
//! 1. Read the export CSV and detect which columns it actually has
//! 2. Extract or synthesize a catalog id per row
//! 3. Normalize metadata (year, popularity, lowercase genre tags)
//! 4. Hand back clean `TrackRecord`s plus counters for the run

mod csv_import;

pub use csv_import::{import_playlist_csv, parse_playlist_csv, CsvImportError, ImportStats};
