//! Error types for hashing and password derivation

use thiserror::Error;

/// Errors that can occur while building blocks or deriving password hashes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptError {
    /// Appending would push a block past its fixed capacity
    #[error("Block overflow: capacity is {capacity} bytes, {requested} requested")]
    BlockOverflow {
        /// Block capacity in bytes
        capacity: usize,
        /// Length the block would have reached
        requested: usize,
    },

    /// Block content is too long to leave room for the padding trailer
    #[error("Cannot pad block: {len} content bytes exceed the {max} byte single-block limit")]
    PaddingOverflow {
        /// Content length before padding
        len: usize,
        /// Largest content length that still pads into one block
        max: usize,
    },

    /// Password exceeds the supported length
    #[error("Password too long: {len} bytes, at most {max} allowed")]
    PasswordTooLong {
        /// Actual password length in bytes
        len: usize,
        /// Maximum password length in bytes
        max: usize,
    },

    /// Salt exceeds the supported length
    #[error("Salt too long: {len} bytes, at most {max} allowed")]
    SaltTooLong {
        /// Actual salt length in bytes
        len: usize,
        /// Maximum salt length in bytes
        max: usize,
    },
}
