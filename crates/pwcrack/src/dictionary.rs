//! Candidate word list.
//!
//! Words are runs of bytes separated by ASCII whitespace. They are kept as raw
//! bytes, so word lists in any 8-bit encoding load unchanged. Each word must be
//! a valid password for the derivation (at most [`MAX_WORD_LEN`] bytes) and
//! the list itself is bounded; exceeding either limit is an error rather than
//! a truncation.

use crate::error::{DictionaryError, WordPosition};
use pwcrack_crypto::PASSWORD_LIMIT;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Maximum length of a dictionary word in bytes
pub const MAX_WORD_LEN: usize = PASSWORD_LIMIT;

/// Default maximum number of words
pub const DEFAULT_MAX_WORDS: usize = 1000;

/// Ordered list of candidate passwords.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<Vec<u8>>,
}

impl Dictionary {
    /// Read words from `reader`, accepting at most `max_words`.
    ///
    /// # Errors
    ///
    /// Returns `DictionaryError` if:
    /// - Reading fails
    /// - A word is longer than [`MAX_WORD_LEN`] bytes
    /// - More than `max_words` words are present
    pub fn from_reader<R: BufRead>(
        mut reader: R,
        max_words: usize,
    ) -> Result<Self, DictionaryError> {
        let mut words = Vec::new();
        let mut line = Vec::new();
        let mut line_number = 0;

        while reader.read_until(b'\n', &mut line)? > 0 {
            line_number += 1;
            for word in line
                .split(u8::is_ascii_whitespace)
                .filter(|word| !word.is_empty())
            {
                push_word(&mut words, word, WordPosition::Line(line_number), max_words)?;
            }
            line.clear();
        }

        Ok(Self { words })
    }

    /// Load the dictionary from a file.
    ///
    /// # Errors
    ///
    /// Returns `DictionaryError::OpenFailed` if the file cannot be opened, or
    /// any error of [`Dictionary::from_reader`].
    pub fn from_file(path: &Path, max_words: usize) -> Result<Self, DictionaryError> {
        let file = File::open(path).map_err(|source| DictionaryError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), max_words)
    }

    /// Build a dictionary from in-memory words, applying the same limits.
    ///
    /// Errors report the 1-based position of the word in `words`.
    pub fn from_words<I, S>(words: I, max_words: usize) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut list = Vec::new();
        for (index, word) in words.into_iter().enumerate() {
            push_word(&mut list, word.as_ref(), WordPosition::Index(index + 1), max_words)?;
        }
        Ok(Self { words: list })
    }

    /// Words in file order.
    pub fn words(&self) -> &[Vec<u8>] {
        &self.words
    }

    /// Iterate over words in file order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.words.iter().map(Vec::as_slice)
    }

    /// Number of words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the dictionary is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn push_word(
    words: &mut Vec<Vec<u8>>,
    word: &[u8],
    position: WordPosition,
    max_words: usize,
) -> Result<(), DictionaryError> {
    if word.len() > MAX_WORD_LEN {
        return Err(DictionaryError::WordTooLong {
            position,
            word: String::from_utf8_lossy(word).into_owned(),
            len: word.len(),
            max: MAX_WORD_LEN,
        });
    }
    if words.len() >= max_words {
        return Err(DictionaryError::TooManyWords { max: max_words });
    }
    words.push(word.to_vec());
    Ok(())
}
