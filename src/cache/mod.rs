//! Cache Module
//!
//! Provides the TTL key-value cache engine: sharded storage with lazy
//! expiration, glob key enumeration, and identifier normalization.

mod entry;
mod keys;
mod pattern;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{CacheEntry, EntrySnapshot};
pub use keys::cache_key;
pub use stats::CacheStats;
pub use store::CacheEngine;

pub(crate) use pattern::glob_match;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed TTL in seconds (ten years).
///
/// Keeps `now + ttl` well inside the range chrono can represent; larger
/// requests are rejected as invalid rather than wrapping into the past.
pub const MAX_TTL_SECONDS: u64 = 315_360_000;
