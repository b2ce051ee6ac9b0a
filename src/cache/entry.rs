//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::cache::MAX_TTL_SECONDS;

// == Clock ==
/// Returns the current UTC time.
///
/// Single source of truth for "now": every expiry computation in the
/// engine (writes, reads, TTL queries, enumeration) goes through this
/// function so writers and readers in the same process never skew.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now()
}

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value (opaque JSON-compatible payload)
    pub value: Value,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Absolute expiration timestamp, computed at write time
    pub expires_at: DateTime<Utc>,
    /// TTL requested at the last authoring write
    pub ttl_seconds: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_seconds` from now.
    ///
    /// The TTL is clamped to [`MAX_TTL_SECONDS`] so the expiry arithmetic
    /// can never overflow chrono's representable range; the engine
    /// rejects out-of-range TTLs before they reach this constructor.
    pub fn new(value: Value, ttl_seconds: u64) -> Self {
        let ttl_seconds = ttl_seconds.min(MAX_TTL_SECONDS);
        let created_at = now();
        Self {
            value,
            created_at,
            expires_at: created_at + Duration::seconds(ttl_seconds as i64),
            ttl_seconds,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to `expires_at`, so a key whose TTL has fully
    /// elapsed is never observable again.
    pub fn is_expired(&self) -> bool {
        now() >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL in whole seconds, clamped to zero once expired.
    pub fn ttl_remaining(&self) -> u64 {
        let remaining = (self.expires_at - now()).num_seconds();
        remaining.max(0) as u64
    }

    // == Snapshot ==
    /// Produces an owned, read-only view of the entry for callers.
    pub fn snapshot(&self) -> EntrySnapshot {
        EntrySnapshot {
            value: self.value.clone(),
            expires_at: self.expires_at,
            ttl_remaining: self.ttl_remaining(),
        }
    }
}

// == Entry Snapshot ==
/// Read-only view of a cache entry, returned by lookup operations that
/// expose expiry alongside the value.
///
/// Snapshots are owned copies: the store never hands out references to
/// live entries, so entries can expire or be evicted between calls
/// without dangling state elsewhere.
#[derive(Debug, Clone, Serialize)]
pub struct EntrySnapshot {
    /// The stored value
    pub value: Value,
    /// Absolute expiration timestamp
    pub expires_at: DateTime<Utc>,
    /// Seconds until expiry at the time the snapshot was taken
    pub ttl_remaining: u64,
}
