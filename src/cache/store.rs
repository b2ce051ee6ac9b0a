//! Cache Store Module
//!
//! Main cache engine combining a sharded concurrent map with lazy TTL
//! expiration. Operations on distinct keys never contend on a single
//! lock; each single-key operation is atomic under its shard lock.

use dashmap::DashMap;
use serde_json::Value;
use tracing::{debug, info};

use crate::cache::stats::StatsCounters;
use crate::cache::{
    glob_match, CacheEntry, CacheStats, EntrySnapshot, MAX_KEY_LENGTH, MAX_TTL_SECONDS,
};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Cache Engine ==
/// TTL-based key-value cache engine.
///
/// The engine is the sole owner of stored entries and their expiry
/// bookkeeping. Expiry is lazy: every read path compares `expires_at`
/// against the clock and treats elapsed entries as absent, removing them
/// opportunistically. The background sweep is optional and only bounds
/// memory; it is not required for correctness.
///
/// All operations take `&self`, so the engine can be shared across tasks
/// behind an `Arc` without an outer lock.
#[derive(Debug)]
pub struct CacheEngine {
    /// Key-value storage, sharded for per-key concurrency
    entries: DashMap<String, CacheEntry>,
    /// Performance counters
    stats: StatsCounters,
    /// Default TTL in seconds for writes without an explicit TTL
    default_ttl: u64,
}

impl CacheEngine {
    // == Constructors ==
    /// Creates a new engine with the given default TTL in seconds.
    pub fn new(default_ttl: u64) -> Self {
        Self {
            entries: DashMap::new(),
            stats: StatsCounters::default(),
            default_ttl,
        }
    }

    /// Creates a new engine from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.default_ttl)
    }

    /// Returns the process-wide default TTL in seconds.
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    // == Set ==
    /// Stores a value under `key`, unconditionally overwriting any
    /// existing entry and resetting its expiry to `now + ttl`.
    ///
    /// # Arguments
    /// * `key` - The canonical cache key (see [`crate::cache_key`])
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL in seconds (uses the default TTL if `None`)
    pub fn set(&self, key: &str, value: Value, ttl: Option<u64>) -> Result<()> {
        validate_key(key)?;
        let ttl = effective_ttl(ttl, self.default_ttl)?;

        self.entries
            .insert(key.to_string(), CacheEntry::new(value, ttl));
        debug!(key, ttl, "cache set");

        Ok(())
    }

    // == Get ==
    /// Retrieves the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key never existed, was deleted, or has
    /// expired. An expired entry is removed as a side effect and is never
    /// returned to the caller.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.get_with_expiration(key)?.map(|snapshot| snapshot.value))
    }

    // == Get With Expiration ==
    /// Same lookup semantics as [`CacheEngine::get`], additionally
    /// exposing the absolute expiry and remaining TTL.
    pub fn get_with_expiration(&self, key: &str) -> Result<Option<EntrySnapshot>> {
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired() {
                self.stats.record_hit();
                return Ok(Some(entry.snapshot()));
            }
            drop(entry);
            self.purge_expired(key);
        }

        self.stats.record_miss();
        Ok(None)
    }

    // == Exists ==
    /// Reports whether a live (non-expired) entry exists under `key`.
    pub fn exists(&self, key: &str) -> Result<bool> {
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired() {
                return Ok(true);
            }
            drop(entry);
            self.purge_expired(key);
        }
        Ok(false)
    }

    // == TTL ==
    /// Returns the seconds until expiry for a live key, or `None` if the
    /// key is absent or expired. Never negative for a live key.
    pub fn ttl(&self, key: &str) -> Result<Option<u64>> {
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired() {
                return Ok(Some(entry.ttl_remaining()));
            }
            drop(entry);
            self.purge_expired(key);
        }
        Ok(None)
    }

    // == Delete ==
    /// Removes the entry under `key` if present.
    ///
    /// Returns whether a removal of a live entry occurred; deleting an
    /// absent (or already expired) key returns `false`, never an error.
    pub fn delete(&self, key: &str) -> Result<bool> {
        match self.entries.remove(key) {
            Some((_, entry)) if !entry.is_expired() => {
                debug!(key, "cache delete");
                Ok(true)
            }
            Some(_) => {
                // Physically removed, but the caller never saw it alive
                self.stats.record_expiration();
                Ok(false)
            }
            None => Ok(false),
        }
    }

    // == Update ==
    /// Replaces the value of an existing entry.
    ///
    /// Returns `Ok(false)` without creating the key if it does not
    /// currently exist (post-expiry-check). With `extend_ttl` the entry
    /// is rewritten as if by `set` with `new_ttl` (default TTL if
    /// `None`); otherwise the existing expiry instant is left untouched,
    /// exactly preserving the remaining TTL.
    pub fn update(
        &self,
        key: &str,
        value: Value,
        extend_ttl: bool,
        new_ttl: Option<u64>,
    ) -> Result<bool> {
        let ttl = if extend_ttl {
            effective_ttl(new_ttl, self.default_ttl)?
        } else {
            0 // unused on the preserve path
        };

        if let Some(mut entry) = self.entries.get_mut(key) {
            if entry.is_expired() {
                drop(entry);
                self.purge_expired(key);
                return Ok(false);
            }

            if extend_ttl {
                *entry = CacheEntry::new(value, ttl);
                debug!(key, ttl, "cache update with TTL extension");
            } else {
                let remaining = entry.ttl_remaining();
                entry.value = value;
                entry.ttl_seconds = remaining;
                debug!(key, "cache update");
            }
            return Ok(true);
        }

        Ok(false)
    }

    // == Refresh ==
    /// Returns the prior value and expiry of `key` so the caller can
    /// re-derive new content externally, leaving the stored entry
    /// untouched until a follow-up `set`.
    ///
    /// # Errors
    /// Returns [`CacheError::NotFound`] if the key is absent or expired.
    pub fn refresh(&self, key: &str) -> Result<EntrySnapshot> {
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired() {
                return Ok(entry.snapshot());
            }
            drop(entry);
            self.purge_expired(key);
        }
        Err(CacheError::NotFound(key.to_string()))
    }

    // == Flush All ==
    /// Unconditionally removes every entry regardless of namespace.
    ///
    /// Readers concurrent with a flush see either the pre-flush or
    /// post-flush state for any given key, never a torn entry.
    pub fn flush_all(&self) -> Result<()> {
        self.entries.clear();
        info!("cache flushed, all entries cleared");
        Ok(())
    }

    // == Keys By Pattern ==
    /// Lists all live keys matching a glob pattern (e.g. `"city_*"`).
    ///
    /// The result is a best-effort snapshot at call time: keys created or
    /// deleted during enumeration may or may not appear, but every key
    /// included was live (non-expired) at the instant it was read.
    pub fn keys_by_pattern(&self, pattern: &str) -> Result<Vec<String>> {
        Ok(self
            .entries
            .iter()
            .filter(|item| !item.value().is_expired() && glob_match(pattern, item.key()))
            .map(|item| item.key().clone())
            .collect())
    }

    // == Entries By Pattern ==
    /// Bulk read: every live key matching `pattern` paired with a
    /// snapshot of its value, expiry and remaining TTL.
    pub fn entries_by_pattern(&self, pattern: &str) -> Result<Vec<(String, EntrySnapshot)>> {
        Ok(self
            .entries
            .iter()
            .filter(|item| !item.value().is_expired() && glob_match(pattern, item.key()))
            .map(|item| (item.key().clone(), item.value().snapshot()))
            .collect())
    }

    // == Sweep Expired ==
    /// Physically removes all expired entries, returning how many were
    /// removed. Lazy filtering on read already guarantees the observable
    /// contract; sweeping only bounds memory.
    pub fn sweep_expired(&self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|item| item.value().is_expired())
            .map(|item| item.key().clone())
            .collect();

        let mut removed = 0;
        for key in expired_keys {
            // Re-check under the shard lock so a concurrent rewrite survives
            if self.entries.remove_if(&key, |_, entry| entry.is_expired()).is_some() {
                self.stats.record_expiration();
                removed += 1;
            }
        }

        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    // == Length ==
    /// Returns the number of physically stored entries, including expired
    /// entries not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if no entries are physically stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Internal ==
    /// Removes `key` if its entry has expired, re-checking under the
    /// shard lock so a concurrent fresh write is never discarded.
    fn purge_expired(&self, key: &str) {
        if self
            .entries
            .remove_if(key, |_, entry| entry.is_expired())
            .is_some()
        {
            self.stats.record_expiration();
        }
    }
}

/// Validates a caller-supplied key.
fn validate_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(CacheError::InvalidArgument(
            "Key cannot be empty".to_string(),
        ));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidArgument(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

/// Resolves an optional caller TTL against the default, rejecting
/// non-positive and out-of-range values.
fn effective_ttl(ttl: Option<u64>, default_ttl: u64) -> Result<u64> {
    let ttl = ttl.unwrap_or(default_ttl);
    if ttl == 0 {
        return Err(CacheError::InvalidArgument(
            "TTL must be a positive number of seconds".to_string(),
        ));
    }
    if ttl > MAX_TTL_SECONDS {
        return Err(CacheError::InvalidArgument(format!(
            "TTL exceeds maximum of {} seconds",
            MAX_TTL_SECONDS
        )));
    }
    Ok(ttl)
}
