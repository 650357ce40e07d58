//! Fixed-capacity byte block fed to the MD5 engine
//!
//! Every hash computed by this crate fits in a single 64-byte MD5 block. A
//! [`Block`] is filled with content, padded exactly once and then consumed by
//! [`md5_hash`](crate::md5::md5_hash).

use crate::error::CryptError;

/// Size of a block processed by MD5, in bytes
pub const BLOCK_SIZE: usize = 64;

/// Offset of the 8-byte bit-length trailer written by [`Block::pad`]
pub const LENGTH_OFFSET: usize = 56;

/// Padding marker appended directly after the content
const PAD_MARKER: u8 = 0x80;

/// A partially filled block of up to 64 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    data: [u8; BLOCK_SIZE],
    len: usize,
    padded: bool,
}

impl Block {
    /// Create an empty block
    pub const fn new() -> Self {
        Self {
            data: [0u8; BLOCK_SIZE],
            len: 0,
            padded: false,
        }
    }

    /// Number of bytes currently in use
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the block holds no bytes
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether [`pad`](Self::pad) has already been applied
    pub const fn is_padded(&self) -> bool {
        self.padded
    }

    /// The bytes currently in use
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Append a single byte at the end of the block
    pub fn append_byte(&mut self, b: u8) -> Result<(), CryptError> {
        self.ensure_room(1)?;
        self.data[self.len] = b;
        self.len += 1;
        Ok(())
    }

    /// Append all bytes of `src` at the end of the block
    ///
    /// Nothing is written when `src` does not fit.
    pub fn append_bytes(&mut self, src: &[u8]) -> Result<(), CryptError> {
        self.ensure_room(src.len())?;
        self.data[self.len..self.len + src.len()].copy_from_slice(src);
        self.len += src.len();
        Ok(())
    }

    /// Apply MD5 padding, bringing the block to exactly 64 bytes
    ///
    /// Appends `0x80`, zero-fills up to byte 56 and stores the original
    /// content length in bits as a little-endian `u64` in the last 8 bytes.
    pub fn pad(&mut self) -> Result<(), CryptError> {
        if self.len >= LENGTH_OFFSET {
            return Err(CryptError::PaddingOverflow {
                len: self.len,
                max: LENGTH_OFFSET - 1,
            });
        }

        let bit_len = (self.len as u64) * 8;
        self.data[self.len] = PAD_MARKER;
        self.data[self.len + 1..LENGTH_OFFSET].fill(0);
        self.data[LENGTH_OFFSET..].copy_from_slice(&bit_len.to_le_bytes());
        self.len = BLOCK_SIZE;
        self.padded = true;
        Ok(())
    }

    /// Full 64-byte contents, regardless of the current length
    pub(crate) const fn data(&self) -> &[u8; BLOCK_SIZE] {
        &self.data
    }

    fn ensure_room(&self, extra: usize) -> Result<(), CryptError> {
        let requested = self.len + extra;
        if requested > BLOCK_SIZE {
            return Err(CryptError::BlockOverflow {
                capacity: BLOCK_SIZE,
                requested,
            });
        }
        Ok(())
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::new()
    }
}
