//! Cache Error Types
//!
//! Only conditions a caller cannot branch on routinely live here. A missing
//! key is not an error: lookups return `Option` and `erase` returns `bool`.

use thiserror::Error;

/// Errors raised while constructing a cache.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// The requested configuration cannot describe a usable cache.
    ///
    /// Raised for a capacity of zero, since a cache that accepts writes but
    /// can hold nothing is contradictory.
    #[error("invalid configuration: capacity must be at least 1, got {requested}")]
    InvalidConfiguration {
        /// The capacity that was asked for.
        requested: usize,
    },

    /// Storage for the requested number of entries could not be reserved.
    #[error("allocation failure: could not reserve storage for {requested} entries")]
    AllocationFailure {
        /// The number of entries the reservation was sized for.
        requested: usize,
    },
}

/// Convenience `Result` alias for fallible cache construction.
pub type Result<T> = core::result::Result<T, CacheError>;
