//! cachekit - An in-process TTL key-value cache engine
//!
//! Stores opaque JSON-compatible values under canonical string keys with
//! per-entry TTL expiry, glob-style key enumeration, and deterministic
//! normalization of free-text identifiers into cache keys.
//!
//! Expiry is lazy: every read compares the entry's absolute expiry
//! against the clock and treats elapsed entries as absent. An optional
//! background sweep ([`spawn_sweep_task`]) bounds memory by physically
//! removing expired entries.
//!
//! # Example
//! ```
//! use cachekit::{cache_key, CacheEngine};
//! use serde_json::json;
//!
//! let engine = CacheEngine::new(600);
//! let key = cache_key("city", "São Paulo").unwrap();
//! assert_eq!(key, "city_sao_paulo");
//!
//! engine.set(&key, json!({"temp": 24}), Some(300)).unwrap();
//! assert_eq!(engine.get(&key).unwrap(), Some(json!({"temp": 24})));
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{
    cache_key, CacheEngine, CacheEntry, CacheStats, EntrySnapshot, MAX_KEY_LENGTH,
    MAX_TTL_SECONDS,
};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_sweep_task;
