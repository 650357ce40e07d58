//! Dictionary attack against a credential store.
//!
//! Every record is tried against every word in dictionary order until the
//! first word whose derived hash equals the stored one. Records are
//! independent, so they can be spread over a rayon pool without changing the
//! result order.

use crate::dictionary::Dictionary;
use crate::error::CrackError;
use crate::shadow::{CredentialStore, ShadowEntry};
use pwcrack_crypto::{CryptError, hash_password};
use rayon::prelude::*;
use std::fmt;
use tracing::{debug, info};

/// A recovered password for one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrackedPassword {
    /// Account name from the credential store
    pub username: String,

    /// Dictionary word that reproduced the stored hash, as raw bytes
    pub password: Vec<u8>,
}

impl fmt::Display for CrackedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} : {}",
            self.username,
            String::from_utf8_lossy(&self.password)
        )
    }
}

/// Dictionary cracker.
#[derive(Debug, Clone)]
pub struct Cracker {
    dictionary: Dictionary,
    threads: usize,
}

impl Cracker {
    /// Create a sequential cracker over `dictionary`.
    #[must_use]
    pub const fn new(dictionary: Dictionary) -> Self {
        Self {
            dictionary,
            threads: 1,
        }
    }

    /// Set the number of worker threads.
    ///
    /// `1` keeps everything on the calling thread, `0` lets rayon pick.
    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Find the first dictionary word matching `entry`.
    pub fn crack_entry(&self, entry: &ShadowEntry) -> Result<Option<CrackedPassword>, CryptError> {
        for word in self.dictionary.iter() {
            if hash_password(word, &entry.salt)? == entry.hash {
                debug!(username = %entry.username, "password recovered");
                return Ok(Some(CrackedPassword {
                    username: entry.username.clone(),
                    password: word.to_vec(),
                }));
            }
        }

        debug!(
            username = %entry.username,
            candidates = self.dictionary.len(),
            "no dictionary word matched"
        );
        Ok(None)
    }

    /// Attack every record in `store`, returning matches in record order.
    ///
    /// # Errors
    ///
    /// Returns `CrackError` if the worker pool cannot be built or a
    /// derivation fails.
    pub fn crack_all(&self, store: &CredentialStore) -> Result<Vec<CrackedPassword>, CrackError> {
        info!(
            records = store.len(),
            words = self.dictionary.len(),
            threads = self.threads,
            "starting dictionary attack"
        );

        let results = if self.threads == 1 {
            store
                .iter()
                .map(|entry| self.crack_entry(entry))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.threads)
                .build()?;
            pool.install(|| {
                store
                    .entries()
                    .par_iter()
                    .map(|entry| self.crack_entry(entry))
                    .collect::<Result<Vec<_>, _>>()
            })?
        };

        let cracked: Vec<CrackedPassword> = results.into_iter().flatten().collect();
        info!(
            cracked = cracked.len(),
            records = store.len(),
            "dictionary attack finished"
        );
        Ok(cracked)
    }
}
