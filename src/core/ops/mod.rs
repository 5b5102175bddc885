//! core::ops
//!
//! Cross-process coordination for orchestrated operations.
//!
//! # Modules
//!
//! - [`lock`] - Exclusive, non-blocking process lock
//!
//! # Architecture
//!
//! Every orchestrated operation:
//! 1. Acquires the process lock (or fails fast if another run holds it)
//! 2. Runs its external steps in order
//! 3. Releases the lock on every exit path

pub mod lock;

pub use lock::{LockError, ProcessLock};
