//! Shared constants for end-to-end tests
//!
//! When the sample export changes (row counts, duplicate pairs), update
//! only this file.

// ============================================================================
// Playlist Export Samples
// ============================================================================

/// A small Exportify-style export: two eras, one duplicate pair ("Take On
/// Me" twice) and one row with no identity at all.
pub const MIXED_EXPORT: &str = "\
Track URI,Track Name,Artist Name(s),Album Name,Album Release Date,Album Image URL,Track Preview URL,Popularity,Artist Genres
spotify:track:AAAAAAAAAAAAAAAAAAAA01,Paranoid,Black Sabbath,Paranoid,1970-09-18,https://i.scdn.co/image/cover1,https://p.scdn.co/mp3-preview/one,80,\"rock, hard rock, metal\"
spotify:track:AAAAAAAAAAAAAAAAAAAA02,Smoke on the Water,Deep Purple,Machine Head,1972-03-25,https://i.scdn.co/image/cover2,,78,\"rock, hard rock\"
spotify:track:AAAAAAAAAAAAAAAAAAAA03,Take On Me,a-ha,Hunting High and Low,1985-06-01,,,74,\"synth-pop, new wave\"
spotify:track:AAAAAAAAAAAAAAAAAAAA04,Take On Me,a-ha,Headlines and Deadlines,1991-11-04,,,52,\"synth-pop, new wave\"
,,,,,,,,
spotify:track:AAAAAAAAAAAAAAAAAAAA05,Blue Monday,New Order,Power Corruption and Lies,1983-03-07,,,75,\"new wave, synth-pop\"
";

/// Rows of [`MIXED_EXPORT`] that become tracks.
pub const MIXED_EXPORT_IMPORTED: usize = 5;

/// Rows of [`MIXED_EXPORT`] dropped for having neither an id nor a name.
pub const MIXED_EXPORT_SKIPPED: usize = 1;

/// Track count of [`MIXED_EXPORT`] after duplicate removal.
pub const MIXED_EXPORT_DEDUPED: usize = 4;
