//! Printable encoding of the final MD5-crypt digest
//!
//! The digest bytes are first reordered through a fixed permutation and then
//! read as a little-endian bit stream, six bits per output character. The
//! 128-bit digest yields 21 full characters plus one character carrying the
//! last two bits.

use crate::md5::{DIGEST_SIZE, Digest};

/// Length of the encoded hash string
pub const HASH_LENGTH: usize = 22;

/// Characters used to encode six bits each
pub const ALPHABET: &[u8; 64] = b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Source index in the digest for each position of the permuted digest
pub const PERMUTATION: [usize; DIGEST_SIZE] = [12, 6, 0, 13, 7, 1, 14, 8, 2, 15, 9, 3, 5, 10, 4, 11];

const BITS_PER_CHAR: usize = 6;
const TOTAL_BITS: usize = DIGEST_SIZE * 8;

/// Whether `c` belongs to the encoding alphabet
pub fn is_hash64_char(c: char) -> bool {
    c.is_ascii() && ALPHABET.contains(&(c as u8))
}

/// Reorder the digest bytes through [`PERMUTATION`]
pub fn permute(digest: &Digest) -> [u8; DIGEST_SIZE] {
    let bytes = digest.as_bytes();
    let mut permuted = [0u8; DIGEST_SIZE];
    for (dst, &src) in permuted.iter_mut().zip(PERMUTATION.iter()) {
        *dst = bytes[src];
    }
    permuted
}

fn bit_at(bytes: &[u8; DIGEST_SIZE], index: usize) -> u8 {
    (bytes[index / 8] >> (index % 8)) & 1
}

/// Encode a digest as the 22-character MD5-crypt hash string
pub fn encode(digest: &Digest) -> String {
    let permuted = permute(digest);
    let mut out = String::with_capacity(HASH_LENGTH);

    let mut bit = 0;
    while bit + BITS_PER_CHAR <= TOTAL_BITS {
        let mut index = 0u8;
        for k in 0..BITS_PER_CHAR {
            index |= bit_at(&permuted, bit + k) << k;
        }
        out.push(char::from(ALPHABET[usize::from(index)]));
        bit += BITS_PER_CHAR;
    }

    // Two bits remain after 21 full groups
    let tail = (permuted[DIGEST_SIZE - 1] >> 6) & 0x03;
    out.push(char::from(ALPHABET[usize::from(tail)]));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_first_vector() {
        let digest = Digest::from_bytes([
            0x95, 0xA7, 0x2B, 0x5F, 0x1F, 0x2D, 0xB6, 0x4A, 0x07, 0xC9, 0xBF, 0xCB, 0xD8, 0x95,
            0x86, 0x8B,
        ]);
        assert_eq!(encode(&digest), "MPPZJeod4Sk89awLhwv591");
    }

    #[test]
    fn test_encode_second_vector() {
        let digest = Digest::from_bytes([
            0xB2, 0x8B, 0xF1, 0xF1, 0xA1, 0x58, 0x05, 0xE3, 0x6E, 0x34, 0x74, 0xCF, 0x95, 0x43,
            0xD1, 0x6F,
        ]);
        assert_eq!(encode(&digest), "JKUg1ByWFvKwjFHwMFLcD1");
    }

    #[test]
    fn test_encode_extremes() {
        let zeros = Digest::from_bytes([0u8; DIGEST_SIZE]);
        assert_eq!(encode(&zeros), "......................");

        let ones = Digest::from_bytes([0xFF; DIGEST_SIZE]);
        assert_eq!(encode(&ones), "zzzzzzzzzzzzzzzzzzzzz1");
    }

    #[test]
    fn test_encode_length_and_alphabet() {
        let digest = Digest::from_bytes(*b"0123456789abcdef");
        let encoded = encode(&digest);
        assert_eq!(encoded.len(), HASH_LENGTH);
        assert!(encoded.chars().all(is_hash64_char));
    }

    #[test]
    fn test_permutation_is_bijective() {
        let mut seen = [false; DIGEST_SIZE];
        for &i in &PERMUTATION {
            assert!(!seen[i], "index {i} repeated");
            seen[i] = true;
        }
    }

    #[test]
    fn test_permute() {
        let mut bytes = [0u8; DIGEST_SIZE];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        let permuted = permute(&Digest::from_bytes(bytes));
        assert_eq!(permuted, [12, 6, 0, 13, 7, 1, 14, 8, 2, 15, 9, 3, 5, 10, 4, 11]);
    }

    #[test]
    fn test_is_hash64_char() {
        assert!(is_hash64_char('.'));
        assert!(is_hash64_char('/'));
        assert!(is_hash64_char('z'));
        assert!(!is_hash64_char('$'));
        assert!(!is_hash64_char(':'));
        assert!(!is_hash64_char('é'));
    }
}
