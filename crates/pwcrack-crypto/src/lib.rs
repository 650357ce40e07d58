//! MD5 engine and MD5-crypt password derivation
//!
//! This crate provides a from-scratch, single-block MD5 implementation and
//! the `$1$` MD5-crypt key-stretching scheme built on top of it.
//!
//! # Components
//!
//! - **Block**: fixed 64-byte buffer with overflow checks and MD5 padding
//! - **MD5**: the RFC 1321 compression function over one padded block
//! - **Crypt**: alternate hash, first intermediate hash, 1000-round stretch
//! - **Hash64**: the 22-character printable encoding of the final digest
//!
//! MD5 and MD5-crypt are broken for modern use. This crate exists to
//! reproduce and audit legacy `$1$` credential stores.
//!
//! # Examples
//!
//! ## Password hashing
//!
//! ```
//! use pwcrack_crypto::{crypt_string, hash_password};
//!
//! assert_eq!(hash_password("password", "rVu9zC1N").unwrap(), "JKUg1ByWFvKwjFHwMFLcD1");
//! assert_eq!(
//!     crypt_string("abc123", "abcdefgh").unwrap(),
//!     "$1$abcdefgh$MPPZJeod4Sk89awLhwv591"
//! );
//! ```
//!
//! ## Raw MD5 over a block
//!
//! ```
//! use pwcrack_crypto::{Block, md5_hash};
//!
//! let mut block = Block::new();
//! block.append_bytes(b"The quick brown fox jumps over the lazy dog").unwrap();
//! let digest = md5_hash(block).unwrap();
//! assert_eq!(digest.to_hex(), "9e107d9d372bb6826bd81d3542a419d6");
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod block;
pub mod crypt;
pub mod error;
pub mod hash64;
pub mod md5;

pub use error::CryptError;

// Re-export commonly used items
pub use block::{BLOCK_SIZE, Block};
pub use crypt::{
    ITERATIONS, MAGIC, PASSWORD_LIMIT, SALT_LENGTH, crypt_string, derive_digest, hash_password,
    verify_password,
};
pub use hash64::HASH_LENGTH;
pub use md5::{DIGEST_SIZE, Digest, md5_digest, md5_hash};
