//! MD5-crypt (`$1$`) password derivation
//!
//! The derivation runs in three stages, each hashing a freshly built
//! single-block message:
//!
//! 1. the *alternate hash* of `password ++ salt ++ password`,
//! 2. the *first intermediate hash*, mixing in the magic string, the alternate
//!    hash and a byte pattern driven by the bits of the password length,
//! 3. 1000 rounds of stretching whose message layout depends on the round
//!    number's parity and divisibility by 3 and 7.
//!
//! The final digest is rendered with [`hash64::encode`](crate::hash64::encode).
//!
//! Passwords are limited to [`PASSWORD_LIMIT`] bytes and salts to
//! [`SALT_LENGTH`] bytes, which keeps every stage inside one MD5 block.
//! Longer inputs are rejected rather than truncated.

use crate::block::Block;
use crate::error::CryptError;
use crate::hash64;
use crate::md5::{DIGEST_SIZE, Digest, md5_hash};

/// Maximum salt length in bytes
pub const SALT_LENGTH: usize = 8;

/// Maximum password length in bytes
pub const PASSWORD_LIMIT: usize = 15;

/// Number of stretching rounds
pub const ITERATIONS: usize = 1000;

/// Magic prefix identifying MD5-crypt hashes
pub const MAGIC: &str = "$1$";

fn check_bounds(password: &[u8], salt: &[u8]) -> Result<(), CryptError> {
    if password.len() > PASSWORD_LIMIT {
        return Err(CryptError::PasswordTooLong {
            len: password.len(),
            max: PASSWORD_LIMIT,
        });
    }
    if salt.len() > SALT_LENGTH {
        return Err(CryptError::SaltTooLong {
            len: salt.len(),
            max: SALT_LENGTH,
        });
    }
    Ok(())
}

/// Compute the alternate hash, `MD5(password ++ salt ++ password)`
pub fn alternate_hash(password: &[u8], salt: &[u8]) -> Result<Digest, CryptError> {
    check_bounds(password, salt)?;

    let mut block = Block::new();
    block.append_bytes(password)?;
    block.append_bytes(salt)?;
    block.append_bytes(password)?;
    md5_hash(block)
}

/// Build the message hashed into the first intermediate hash
fn first_intermediate_block(
    password: &[u8],
    salt: &[u8],
    alternate: &Digest,
) -> Result<Block, CryptError> {
    let mut block = Block::new();
    block.append_bytes(password)?;
    block.append_bytes(MAGIC.as_bytes())?;
    block.append_bytes(salt)?;

    // One alternate-hash byte per password byte, repeating after 16
    let mut remaining = password.len();
    while remaining > 0 {
        let take = remaining.min(DIGEST_SIZE);
        block.append_bytes(&alternate.as_bytes()[..take])?;
        remaining -= take;
    }

    // One byte per significant bit of the length, lowest bit first
    let first = password.first().copied().unwrap_or_default();
    let mut len = password.len();
    while len > 0 {
        block.append_byte(if len & 1 == 1 { 0x00 } else { first })?;
        len >>= 1;
    }

    Ok(block)
}

/// Compute the first intermediate hash from the alternate hash
pub fn first_intermediate(
    password: &[u8],
    salt: &[u8],
    alternate: &Digest,
) -> Result<Digest, CryptError> {
    check_bounds(password, salt)?;
    md5_hash(first_intermediate_block(password, salt, alternate)?)
}

/// Build the message hashed in stretching round `inum`
fn next_intermediate_block(
    password: &[u8],
    salt: &[u8],
    inum: usize,
    current: &Digest,
) -> Result<Block, CryptError> {
    let even = inum % 2 == 0;
    let mut block = Block::new();

    if even {
        block.append_bytes(current.as_bytes())?;
    } else {
        block.append_bytes(password)?;
    }
    if inum % 3 != 0 {
        block.append_bytes(salt)?;
    }
    if inum % 7 != 0 {
        block.append_bytes(password)?;
    }
    if even {
        block.append_bytes(password)?;
    } else {
        block.append_bytes(current.as_bytes())?;
    }

    Ok(block)
}

/// Compute the intermediate hash that follows `current` in round `inum`
pub fn next_intermediate(
    password: &[u8],
    salt: &[u8],
    inum: usize,
    current: &Digest,
) -> Result<Digest, CryptError> {
    check_bounds(password, salt)?;
    md5_hash(next_intermediate_block(password, salt, inum, current)?)
}

/// Run the full derivation and return the final digest before encoding
pub fn derive_digest(
    password: impl AsRef<[u8]>,
    salt: impl AsRef<[u8]>,
) -> Result<Digest, CryptError> {
    let (password, salt) = (password.as_ref(), salt.as_ref());

    let alternate = alternate_hash(password, salt)?;
    let mut current = first_intermediate(password, salt, &alternate)?;
    for inum in 0..ITERATIONS {
        current = md5_hash(next_intermediate_block(password, salt, inum, &current)?)?;
    }
    Ok(current)
}

/// Hash `password` with `salt`, returning the 22-character hash string
///
/// # Examples
///
/// ```
/// use pwcrack_crypto::hash_password;
///
/// let hash = hash_password("abc123", "abcdefgh").unwrap();
/// assert_eq!(hash, "MPPZJeod4Sk89awLhwv591");
/// ```
pub fn hash_password(
    password: impl AsRef<[u8]>,
    salt: impl AsRef<[u8]>,
) -> Result<String, CryptError> {
    derive_digest(password, salt).map(|digest| hash64::encode(&digest))
}

/// Hash `password` and format it as a full `$1$salt$hash` crypt string
///
/// The salt is text so the rendered string always reproduces the hash.
pub fn crypt_string(password: impl AsRef<[u8]>, salt: &str) -> Result<String, CryptError> {
    let hash = hash_password(password, salt)?;
    Ok(format!("{MAGIC}{salt}${hash}"))
}

/// Check whether `password` hashes to `expected` under `salt`
pub fn verify_password(
    password: impl AsRef<[u8]>,
    salt: impl AsRef<[u8]>,
    expected: &str,
) -> Result<bool, CryptError> {
    Ok(hash_password(password, salt)? == expected)
}
