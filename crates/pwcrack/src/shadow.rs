//! Shadow-file credential store.
//!
//! Each non-blank line has the form `username:$1$salt$hash`, optionally
//! followed by `:` and further shadow fields, which are ignored.
//!
//! - username: 1 to [`USERNAME_LIMIT`] bytes, no whitespace
//! - salt: exactly [`SALT_LENGTH`] printable ASCII characters other than `:`
//! - hash: exactly [`HASH_LENGTH`] characters of the hash64 alphabet

use crate::error::{EntryError, ShadowError};
use pwcrack_crypto::hash64::is_hash64_char;
use pwcrack_crypto::{CryptError, HASH_LENGTH, MAGIC, SALT_LENGTH, verify_password};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Maximum username length in bytes
pub const USERNAME_LIMIT: usize = 32;

/// Maximum length of one shadow line in bytes
pub const MAX_LINE_LENGTH: usize = 256;

/// Default maximum number of entries
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// One credential record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShadowEntry {
    /// Account name
    pub username: String,

    /// Salt mixed into the derivation
    pub salt: String,

    /// Stored 22-character hash
    pub hash: String,
}

impl ShadowEntry {
    /// Check whether `password` produces this entry's stored hash.
    pub fn matches(&self, password: impl AsRef<[u8]>) -> Result<bool, CryptError> {
        verify_password(password, &self.salt, &self.hash)
    }
}

impl fmt::Display for ShadowEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{MAGIC}{}${}", self.username, self.salt, self.hash)
    }
}

impl FromStr for ShadowEntry {
    type Err = EntryError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        if line.len() > MAX_LINE_LENGTH {
            return Err(EntryError::LineTooLong {
                len: line.len(),
                max: MAX_LINE_LENGTH,
            });
        }

        let (username, rest) = line.split_once(':').ok_or(EntryError::MissingSeparator)?;
        validate_username(username)?;

        let rest = rest.strip_prefix(MAGIC).ok_or(EntryError::MissingMagic)?;
        let (salt, rest) = rest
            .split_once('$')
            .ok_or_else(|| EntryError::InvalidSalt("missing '$' after salt".to_string()))?;
        validate_salt(salt)?;

        // Anything after the next ':' belongs to the remaining shadow fields
        let hash = rest.split_once(':').map_or(rest, |(hash, _)| hash);
        validate_hash(hash)?;

        Ok(Self {
            username: username.to_string(),
            salt: salt.to_string(),
            hash: hash.to_string(),
        })
    }
}

fn validate_username(username: &str) -> Result<(), EntryError> {
    if username.is_empty() {
        return Err(EntryError::EmptyUsername);
    }
    if username.len() > USERNAME_LIMIT {
        return Err(EntryError::UsernameTooLong {
            len: username.len(),
            max: USERNAME_LIMIT,
        });
    }
    if username.chars().any(char::is_whitespace) {
        return Err(EntryError::UsernameWhitespace);
    }
    Ok(())
}

fn validate_salt(salt: &str) -> Result<(), EntryError> {
    if let Some(c) = salt
        .chars()
        .find(|&c| !c.is_ascii_graphic() || c == ':')
    {
        return Err(EntryError::InvalidSalt(format!(
            "character {c:?} is not allowed"
        )));
    }
    if salt.len() != SALT_LENGTH {
        return Err(EntryError::InvalidSalt(format!(
            "expected {SALT_LENGTH} characters, got {}",
            salt.len()
        )));
    }
    Ok(())
}

fn validate_hash(hash: &str) -> Result<(), EntryError> {
    if let Some(c) = hash.chars().find(|&c| !is_hash64_char(c)) {
        return Err(EntryError::InvalidHash(format!(
            "character {c:?} is not in the hash alphabet"
        )));
    }
    if hash.len() != HASH_LENGTH {
        return Err(EntryError::InvalidHash(format!(
            "expected {HASH_LENGTH} characters, got {}",
            hash.len()
        )));
    }
    Ok(())
}

/// Parsed credential store, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialStore {
    entries: Vec<ShadowEntry>,
}

impl CredentialStore {
    /// Parse entries from `reader`, accepting at most `max_entries`.
    ///
    /// Blank lines are skipped. Any other malformed line aborts the parse.
    ///
    /// # Errors
    ///
    /// Returns `ShadowError` if:
    /// - Reading fails
    /// - A line is malformed
    /// - More than `max_entries` entries are present
    pub fn from_reader<R: BufRead>(reader: R, max_entries: usize) -> Result<Self, ShadowError> {
        let mut entries = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let entry = line
                .parse::<ShadowEntry>()
                .map_err(|source| ShadowError::InvalidEntry {
                    line: index + 1,
                    source,
                })?;

            if entries.len() >= max_entries {
                return Err(ShadowError::TooManyEntries { max: max_entries });
            }
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    /// Load the credential store from a file.
    ///
    /// # Errors
    ///
    /// Returns `ShadowError::OpenFailed` if the file cannot be opened, or any
    /// error of [`CredentialStore::from_reader`].
    pub fn from_file(path: &Path, max_entries: usize) -> Result<Self, ShadowError> {
        let file = File::open(path).map_err(|source| ShadowError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), max_entries)
    }

    /// Entries in file order.
    pub fn entries(&self) -> &[ShadowEntry] {
        &self.entries
    }

    /// Iterate over entries in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, ShadowEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<ShadowEntry>> for CredentialStore {
    fn from(entries: Vec<ShadowEntry>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::io::Cursor;

    const ALICE: &str = "alice:$1$abcdefgh$MPPZJeod4Sk89awLhwv591";

    fn parse(line: &str) -> Result<ShadowEntry, EntryError> {
        line.parse()
    }

    #[test]
    fn test_parse_valid_entry() {
        let entry = parse(ALICE).unwrap();
        assert_eq!(
            entry,
            ShadowEntry {
                username: "alice".to_string(),
                salt: "abcdefgh".to_string(),
                hash: "MPPZJeod4Sk89awLhwv591".to_string(),
            }
        );
        assert_eq!(entry.to_string(), ALICE);
    }

    #[test]
    fn test_parse_ignores_trailing_shadow_fields() {
        let entry = parse("bob:$1$rVu9zC1N$JKUg1ByWFvKwjFHwMFLcD1:19000:0:99999:7:::").unwrap();
        assert_eq!(entry.username, "bob");
        assert_eq!(entry.salt, "rVu9zC1N");
        assert_eq!(entry.hash, "JKUg1ByWFvKwjFHwMFLcD1");
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert_eq!(
            parse("alice$1$abcdefgh$MPPZJeod4Sk89awLhwv591"),
            Err(EntryError::MissingSeparator)
        );
    }

    #[test]
    fn test_parse_rejects_bad_usernames() {
        assert_eq!(
            parse(":$1$abcdefgh$MPPZJeod4Sk89awLhwv591"),
            Err(EntryError::EmptyUsername)
        );
        assert_eq!(
            parse("al ice:$1$abcdefgh$MPPZJeod4Sk89awLhwv591"),
            Err(EntryError::UsernameWhitespace)
        );

        let long = format!("{}:$1$abcdefgh$MPPZJeod4Sk89awLhwv591", "u".repeat(33));
        assert_eq!(
            parse(&long),
            Err(EntryError::UsernameTooLong { len: 33, max: 32 })
        );
    }

    #[test]
    fn test_parse_rejects_other_schemes() {
        assert_eq!(
            parse("alice:$6$abcdefgh$MPPZJeod4Sk89awLhwv591"),
            Err(EntryError::MissingMagic)
        );
    }

    #[test]
    fn test_parse_rejects_bad_salts() {
        assert!(matches!(
            parse("alice:$1$abcdefg$MPPZJeod4Sk89awLhwv591"),
            Err(EntryError::InvalidSalt(_))
        ));
        assert!(matches!(
            parse("alice:$1$abcdefghi$MPPZJeod4Sk89awLhwv591"),
            Err(EntryError::InvalidSalt(_))
        ));
        assert!(matches!(
            parse("alice:$1$abc efgh$MPPZJeod4Sk89awLhwv591"),
            Err(EntryError::InvalidSalt(_))
        ));
        assert!(matches!(
            parse("alice:$1$abcdefghMPPZJeod4Sk89awLhwv591"),
            Err(EntryError::InvalidSalt(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_hashes() {
        assert!(matches!(
            parse("alice:$1$abcdefgh$MPPZJeod4Sk89awLhwv59"),
            Err(EntryError::InvalidHash(_))
        ));
        assert!(matches!(
            parse("alice:$1$abcdefgh$MPPZJeod4Sk89awLhwv5911"),
            Err(EntryError::InvalidHash(_))
        ));
        assert!(matches!(
            parse("alice:$1$abcdefgh$MPPZJeod4Sk89awLhwv59!"),
            Err(EntryError::InvalidHash(_))
        ));
        assert!(matches!(
            parse("alice:$1$abcdefgh$MPPZJeod4Sk89awLhwv591 trailing"),
            Err(EntryError::InvalidHash(_))
        ));
    }

    #[test]
    fn test_parse_rejects_long_line() {
        let line = format!("{ALICE}:{}", "x".repeat(MAX_LINE_LENGTH));
        assert!(matches!(parse(&line), Err(EntryError::LineTooLong { .. })));
    }

    #[test]
    fn test_entry_matches() {
        let entry = parse(ALICE).unwrap();
        assert!(entry.matches("abc123").unwrap());
        assert!(!entry.matches("abc12").unwrap());
    }

    #[test]
    fn test_store_from_reader() {
        let input = format!("{ALICE}\n\nbob:$1$rVu9zC1N$JKUg1ByWFvKwjFHwMFLcD1\r\n");
        let store = CredentialStore::from_reader(Cursor::new(input), DEFAULT_MAX_ENTRIES).unwrap();

        let names: Vec<_> = store.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob"]);
        assert_eq!(store.entries()[1].hash, "JKUg1ByWFvKwjFHwMFLcD1");
    }

    #[test]
    fn test_store_reports_line_number() {
        let input = format!("{ALICE}\nbroken line\n");
        let err = CredentialStore::from_reader(Cursor::new(input), DEFAULT_MAX_ENTRIES).unwrap_err();
        match err {
            ShadowError::InvalidEntry { line, source } => {
                assert_eq!(line, 2);
                assert_eq!(source, EntryError::MissingSeparator);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_store_entry_limit() {
        let input = format!("{ALICE}\n{ALICE}\n");
        assert_eq!(
            CredentialStore::from_reader(Cursor::new(input.clone()), 2)
                .unwrap()
                .len(),
            2
        );
        assert!(matches!(
            CredentialStore::from_reader(Cursor::new(input), 1),
            Err(ShadowError::TooManyEntries { max: 1 })
        ));
    }

    fn salt_strategy() -> impl Strategy<Value = String> {
        "[!-#%-9;-~]{8}"
    }

    fn hash_strategy() -> impl Strategy<Value = String> {
        "[./0-9A-Za-z]{22}"
    }

    proptest! {
        /// Parsing never panics on arbitrary input
        #[test]
        fn parse_never_panics(line in "\\PC*") {
            let _ = line.parse::<ShadowEntry>();
        }

        /// Every well-formed entry survives a display/parse cycle
        #[test]
        fn display_then_parse(
            username in "[a-z_][a-z0-9_-]{0,31}",
            salt in salt_strategy(),
            hash in hash_strategy(),
        ) {
            let entry = ShadowEntry { username, salt, hash };
            let parsed = entry.to_string().parse::<ShadowEntry>();
            prop_assert_eq!(parsed, Ok(entry));
        }
    }
}
