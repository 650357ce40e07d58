//! Dictionary attack against MD5-crypt shadow files.
//!
//! Reads a whitespace-separated word list and a credential store of
//! `username:$1$salt$hash` lines, then reports every account whose stored
//! hash is reproduced by a dictionary word.
//!
//! # Architecture
//!
//! - `dictionary`: word list loading with length and count limits
//! - `shadow`: credential store parsing and validation
//! - `cracker`: per-record search, sequential or on a rayon pool
//! - `config`: CLI/environment configuration and validation
//! - `error`: error types for every stage
//!
//! The hashing itself lives in `pwcrack-crypto`.
//!
//! # Example
//!
//! ```
//! use pwcrack::{Cracker, CredentialStore, Dictionary};
//! use std::io::Cursor;
//!
//! let dictionary = Dictionary::from_reader(Cursor::new("password abc123"), 1000).unwrap();
//! let store = CredentialStore::from_reader(
//!     Cursor::new("alice:$1$abcdefgh$MPPZJeod4Sk89awLhwv591\n"),
//!     1000,
//! )
//! .unwrap();
//!
//! let cracked = Cracker::new(dictionary).crack_all(&store).unwrap();
//! assert_eq!(cracked[0].to_string(), "alice : abc123");
//! ```

#![warn(missing_docs)]
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]

pub mod config;
pub mod cracker;
pub mod dictionary;
pub mod error;
pub mod shadow;

pub use config::CrackConfig;
pub use cracker::{CrackedPassword, Cracker};
pub use dictionary::Dictionary;
pub use error::{ConfigError, CrackError, DictionaryError, EntryError, ShadowError, WordPosition};
pub use shadow::{CredentialStore, ShadowEntry};

use tracing::info;

/// Validate `config`, load both inputs it names and run the attack.
///
/// # Errors
///
/// Returns `CrackError` if the configuration is invalid, either input cannot
/// be loaded or the attack fails.
pub fn run(config: &CrackConfig) -> Result<Vec<CrackedPassword>, CrackError> {
    config.validate()?;

    let dictionary = Dictionary::from_file(&config.dictionary, config.max_words)?;
    info!(
        words = dictionary.len(),
        path = %config.dictionary.display(),
        "dictionary loaded"
    );

    let store = CredentialStore::from_file(&config.shadow, config.max_records)?;
    info!(
        records = store.len(),
        path = %config.shadow.display(),
        "shadow file loaded"
    );

    Cracker::new(dictionary)
        .with_threads(config.threads)
        .crack_all(&store)
}
