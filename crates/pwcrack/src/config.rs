//! Cracker configuration management.
//!
//! Configuration can be provided via:
//! - CLI arguments (`<DICTIONARY> <SHADOW>`, `--threads`, etc.)
//! - Environment variables (`PWCRACK_DICTIONARY`, `PWCRACK_THREADS`, etc.)
//! - Default values
//!
//! # Example
//!
//! ```no_run
//! use pwcrack::CrackConfig;
//!
//! let config = CrackConfig::from_args();
//! config.validate().expect("Invalid configuration");
//!
//! println!("Dictionary: {}", config.dictionary.display());
//! println!("Shadow file: {}", config.shadow.display());
//! ```

use crate::dictionary::DEFAULT_MAX_WORDS;
use crate::error::ConfigError;
use crate::shadow::DEFAULT_MAX_ENTRIES;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Cracker configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pwcrack",
    about = "Dictionary attack against MD5-crypt ($1$) shadow files",
    version
)]
pub struct CrackConfig {
    /// Word list, whitespace-separated candidate passwords
    #[arg(env = "PWCRACK_DICTIONARY")]
    pub dictionary: PathBuf,

    /// Shadow file with `username:$1$salt$hash` lines
    #[arg(env = "PWCRACK_SHADOW")]
    pub shadow: PathBuf,

    /// Worker threads (1 = sequential, 0 = one per core)
    #[arg(long, env = "PWCRACK_THREADS", default_value_t = 1)]
    pub threads: usize,

    /// Maximum number of dictionary words
    #[arg(long, env = "PWCRACK_MAX_WORDS", default_value_t = DEFAULT_MAX_WORDS)]
    pub max_words: usize,

    /// Maximum number of shadow file records
    #[arg(long, env = "PWCRACK_MAX_RECORDS", default_value_t = DEFAULT_MAX_ENTRIES)]
    pub max_records: usize,
}

impl CrackConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Configuration with default limits for the given input files.
    #[must_use]
    pub fn new(dictionary: impl Into<PathBuf>, shadow: impl Into<PathBuf>) -> Self {
        Self {
            dictionary: dictionary.into(),
            shadow: shadow.into(),
            threads: 1,
            max_words: DEFAULT_MAX_WORDS,
            max_records: DEFAULT_MAX_ENTRIES,
        }
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The dictionary or shadow file doesn't exist
    /// - A word or record limit is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_file("dictionary", &self.dictionary)?;
        require_file("shadow", &self.shadow)?;

        if self.max_words == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max-words".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_records == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max-records".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

fn require_file(kind: &str, path: &Path) -> Result<(), ConfigError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ConfigError::MissingRequired(format!(
            "{kind} file not found: {}",
            path.display()
        )))
    }
}
