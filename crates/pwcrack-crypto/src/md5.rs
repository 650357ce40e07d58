//! Single-block MD5 engine
//!
//! Implements the RFC 1321 compression function over one padded 64-byte
//! [`Block`]. Longer messages are never needed for MD5-crypt with bounded
//! passwords and salts, so there is no multi-block streaming here.

use crate::block::{BLOCK_SIZE, Block};
use crate::error::CryptError;
use std::fmt;

/// Size of an MD5 digest in bytes
pub const DIGEST_SIZE: usize = 16;

/// Number of 32-bit message words in a block
pub const BLOCK_WORDS: usize = BLOCK_SIZE / 4;

/// Number of compression steps per block
pub const STEPS: usize = 64;

/// Initial values for the four state words
pub const INITIAL_STATE: Md5State = Md5State {
    a: 0x6745_2301,
    b: 0xefcd_ab89,
    c: 0x98ba_dcfe,
    d: 0x1032_5476,
};

/// Left-rotation amount for each step
const SHIFT: [u32; STEPS] = [
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, //
    5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, //
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, //
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

/// Additive constants, `floor(2^32 * abs(sin(i + 1)))`
const NOISE: [u32; STEPS] = [
    0xd76a_a478, 0xe8c7_b756, 0x2420_70db, 0xc1bd_ceee, 0xf57c_0faf, 0x4787_c62a, 0xa830_4613,
    0xfd46_9501, 0x6980_98d8, 0x8b44_f7af, 0xffff_5bb1, 0x895c_d7be, 0x6b90_1122, 0xfd98_7193,
    0xa679_438e, 0x49b4_0821, 0xf61e_2562, 0xc040_b340, 0x265e_5a51, 0xe9b6_c7aa, 0xd62f_105d,
    0x0244_1453, 0xd8a1_e681, 0xe7d3_fbc8, 0x21e1_cde6, 0xc337_07d6, 0xf4d5_0d87, 0x455a_14ed,
    0xa9e3_e905, 0xfcef_a3f8, 0x676f_02d9, 0x8d2a_4c8a, 0xfffa_3942, 0x8771_f681, 0x6d9d_6122,
    0xfde5_380c, 0xa4be_ea44, 0x4bde_cfa9, 0xf6bb_4b60, 0xbebf_bc70, 0x289b_7ec6, 0xeaa1_27fa,
    0xd4ef_3085, 0x0488_1d05, 0xd9d4_d039, 0xe6db_99e5, 0x1fa2_7cf8, 0xc4ac_5665, 0xf429_2244,
    0x432a_ff97, 0xab94_23a7, 0xfc93_a039, 0x655b_59c3, 0x8f0c_cc92, 0xffef_f47d, 0x8584_5dd1,
    0x6fa8_7e4f, 0xfe2c_e6e0, 0xa301_4314, 0x4e08_11a1, 0xf753_7e82, 0xbd3a_f235, 0x2ad7_d2bb,
    0xeb86_d391,
];

/// The four working words of the MD5 state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Md5State {
    /// Word A
    pub a: u32,
    /// Word B
    pub b: u32,
    /// Word C
    pub c: u32,
    /// Word D
    pub d: u32,
}

impl Md5State {
    fn wrapping_add(self, other: Self) -> Self {
        Self {
            a: self.a.wrapping_add(other.a),
            b: self.b.wrapping_add(other.b),
            c: self.c.wrapping_add(other.c),
            d: self.d.wrapping_add(other.d),
        }
    }

    fn to_digest(self) -> Digest {
        let mut bytes = [0u8; DIGEST_SIZE];
        bytes[0..4].copy_from_slice(&self.a.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.b.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.c.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.d.to_le_bytes());
        Digest(bytes)
    }
}

/// One of the four MD5 rounds, each covering 16 consecutive steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round {
    /// Steps 0..16
    F,
    /// Steps 16..32
    G,
    /// Steps 32..48
    H,
    /// Steps 48..64
    I,
}

impl Round {
    /// Round that owns step `i`
    pub const fn for_step(i: usize) -> Self {
        match i {
            0..16 => Self::F,
            16..32 => Self::G,
            32..48 => Self::H,
            _ => Self::I,
        }
    }

    /// Nonlinear mixing function of this round
    pub const fn mix(self, b: u32, c: u32, d: u32) -> u32 {
        match self {
            Self::F => (b & c) | (!b & d),
            Self::G => (b & d) | (c & !d),
            Self::H => b ^ c ^ d,
            Self::I => c ^ (b | !d),
        }
    }

    /// Index of the message word consumed at step `i`
    pub const fn word_index(self, i: usize) -> usize {
        match self {
            Self::F => i,
            Self::G => (5 * i + 1) % BLOCK_WORDS,
            Self::H => (3 * i + 5) % BLOCK_WORDS,
            Self::I => (7 * i) % BLOCK_WORDS,
        }
    }
}

/// MD5 digest of a single block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    /// Create a digest from raw bytes
    pub const fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parse a digest from a 32-character hex string
    pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; DIGEST_SIZE];
        hex::decode_to_slice(hex, &mut bytes)?;
        Ok(Self(bytes))
    }

    /// Get raw bytes
    pub const fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Perform step `i` of the compression function on `state`
///
/// After the step the state is rotated so that `(A, B, C, D)` becomes
/// `(D, new, B, C)`.
///
/// # Panics
///
/// Panics if `i` is not a step index, i.e. `i >= STEPS`.
pub fn md5_iteration(words: &[u32; BLOCK_WORDS], state: &mut Md5State, i: usize) {
    assert!(i < STEPS, "MD5 step index {i} out of range 0..{STEPS}");
    let round = Round::for_step(i);
    let holder = state
        .a
        .wrapping_add(round.mix(state.b, state.c, state.d))
        .wrapping_add(NOISE[i])
        .wrapping_add(words[round.word_index(i)])
        .rotate_left(SHIFT[i])
        .wrapping_add(state.b);

    state.a = state.d;
    state.d = state.c;
    state.c = state.b;
    state.b = holder;
}

/// Interpret a padded block as sixteen little-endian words
fn message_words(data: &[u8; BLOCK_SIZE]) -> [u32; BLOCK_WORDS] {
    let mut words = [0u32; BLOCK_WORDS];
    for (word, chunk) in words.iter_mut().zip(data.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

/// Pad `block` and reduce it to its MD5 digest
///
/// The block is consumed; build a fresh one for every hash.
pub fn md5_hash(mut block: Block) -> Result<Digest, CryptError> {
    block.pad()?;
    let words = message_words(block.data());

    let mut state = INITIAL_STATE;
    for i in 0..STEPS {
        md5_iteration(&words, &mut state, i);
    }

    Ok(INITIAL_STATE.wrapping_add(state).to_digest())
}

/// Compute the MD5 digest of a short message
///
/// Only messages that fit in one padded block (at most 55 bytes) are
/// accepted.
pub fn md5_digest(data: &[u8]) -> Result<Digest, CryptError> {
    let mut block = Block::new();
    block.append_bytes(data)?;
    md5_hash(block)
}
