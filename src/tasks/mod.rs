//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the engine is
//! embedded in a host process.
//!
//! # Tasks
//! - Expiry sweep: removes expired cache entries at configured intervals

mod sweep;

pub use sweep::spawn_sweep_task;
