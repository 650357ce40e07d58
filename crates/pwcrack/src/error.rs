//! Error types for the dictionary cracker.
//!
//! All errors use thiserror for consistent error handling across the codebase.

use pwcrack_crypto::CryptError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Word list errors.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// Failed to open the dictionary file
    #[error("Failed to open dictionary {path}: {source}")]
    OpenFailed {
        /// Path to the dictionary file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O error while reading words
    #[error("Failed to read dictionary: {0}")]
    Io(#[from] std::io::Error),

    /// A word exceeds the maximum password length
    #[error("Invalid dictionary word at {position}: '{word}' is {len} bytes, at most {max} allowed")]
    WordTooLong {
        /// Where the word was found
        position: WordPosition,
        /// The offending word, lossily decoded for display
        word: String,
        /// Word length in bytes
        len: usize,
        /// Maximum word length in bytes
        max: usize,
    },

    /// The dictionary holds more words than allowed
    #[error("Too many dictionary words: limit is {max}")]
    TooManyWords {
        /// Maximum number of words
        max: usize,
    },
}

/// Location of a dictionary word in its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordPosition {
    /// 1-based line number in a word list file
    Line(usize),
    /// 1-based index in an in-memory word sequence
    Index(usize),
}

impl fmt::Display for WordPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line(line) => write!(f, "line {line}"),
            Self::Index(index) => write!(f, "word {index}"),
        }
    }
}

/// Reasons a single credential line is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// Line is longer than the supported maximum
    #[error("line is {len} bytes, at most {max} allowed")]
    LineTooLong {
        /// Actual line length
        len: usize,
        /// Maximum line length
        max: usize,
    },

    /// No ':' after the username
    #[error("missing ':' after username")]
    MissingSeparator,

    /// Username is empty
    #[error("username is empty")]
    EmptyUsername,

    /// Username is longer than allowed
    #[error("username is {len} bytes, at most {max} allowed")]
    UsernameTooLong {
        /// Actual username length
        len: usize,
        /// Maximum username length
        max: usize,
    },

    /// Username contains whitespace
    #[error("username contains whitespace")]
    UsernameWhitespace,

    /// Hash field does not start with `$1$`
    #[error("hash field does not start with '$1$'")]
    MissingMagic,

    /// Salt is malformed
    #[error("invalid salt: {0}")]
    InvalidSalt(String),

    /// Hash is malformed
    #[error("invalid hash: {0}")]
    InvalidHash(String),
}

/// Credential store errors.
#[derive(Debug, Error)]
pub enum ShadowError {
    /// Failed to open the shadow file
    #[error("Failed to open shadow file {path}: {source}")]
    OpenFailed {
        /// Path to the shadow file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O error while reading entries
    #[error("Failed to read shadow file: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed entry
    #[error("Invalid shadow file entry on line {line}: {source}")]
    InvalidEntry {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        #[source]
        source: EntryError,
    },

    /// The store holds more entries than allowed
    #[error("Too many shadow file entries: limit is {max}")]
    TooManyEntries {
        /// Maximum number of entries
        max: usize,
    },
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration value
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    /// Invalid configuration value
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue {
        /// Option name
        name: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Top-level errors for a cracking run.
#[derive(Debug, Error)]
pub enum CrackError {
    /// Dictionary error
    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    /// Shadow file error
    #[error("Shadow file error: {0}")]
    Shadow(#[from] ShadowError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Password derivation error
    #[error("Hashing error: {0}")]
    Crypt(#[from] CryptError),

    /// Worker pool could not be created
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
