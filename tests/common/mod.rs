//! Common test infrastructure
//!
//! Fixture playlists, CSV samples and temp-file helpers shared by the
//! end-to-end tests. Tests should only import from this module, not from
//! internal submodules.

mod constants;
mod fixtures;

// Public API - this is what tests import
#[allow(unused_imports)]
pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::*;
