//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine.
///
/// Absence of a key is not an error on read paths: `get`, `exists` and
/// `ttl` report it through their return value. `NotFound` is raised only
/// by operations that require an existing entry (`refresh`).
#[derive(Error, Debug)]
pub enum CacheError {
    /// Target key does not exist or has expired
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Underlying store cannot be reached or an operation timed out.
    ///
    /// The in-memory store never produces this; it exists so callers can
    /// distinguish transport failure from "key not found" when the engine
    /// fronts a store that can fail.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Malformed input: non-positive TTL, empty key or identifier,
    /// oversized key
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;
