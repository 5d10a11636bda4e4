//! The shared ARX (add-rotate-xor) block core behind `ChaCha20` and `Salsa20`.
//!
//! Both ciphers operate on sixteen little-endian 32-bit words. A block is produced by running
//! the cipher's permutation over a copy of the input state for a fixed number of rounds, adding
//! the input state back word-wise (mod 2<sup>32</sup>), and serializing the sum little-endian.
//!
//! The functions here are pure. The stateful keystream generators built on top of them live in
//! [`chacha`] and [`salsa`].
//!
//! [`chacha`]: crate::chacha
//! [`salsa`]: crate::salsa

#[macro_use]
mod api;
pub(crate) mod keystream;
pub mod state;

use core::convert::TryFrom;
use crate::sealed::Sealed;
use crate::Error;

/// The working state shared by `ChaCha20` and `Salsa20`.
pub type Words = [u32; 16];

/// The size of one keystream block in bytes.
pub const BLOCK_SIZE: usize = 64;

/// `"expand 32-byte k"`, used with 256-bit keys.
pub const SIGMA: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

/// `"expand 16-byte k"`, used with 128-bit keys.
pub const TAU: [u32; 4] = [0x6170_7865, 0x3120_646e, 0x7962_2d36, 0x6b20_6574];

/// The number of rounds applied by the block function.
///
/// `R20` is the standard variant, `R12` and `R8` are the reduced-round variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Rounds {
    /// 8 rounds (4 double rounds).
    R8,
    /// 12 rounds (6 double rounds).
    R12,
    /// 20 rounds (10 double rounds).
    #[default]
    R20,
}

impl Rounds {
    /// Returns the number of rounds.
    #[inline]
    pub const fn count(self) -> u32 {
        match self {
            Self::R8 => 8,
            Self::R12 => 12,
            Self::R20 => 20,
        }
    }

    #[inline]
    const fn double_rounds(self) -> usize {
        (self.count() / 2) as usize
    }
}

impl TryFrom<u32> for Rounds {
    type Error = Error;

    /// # Errors
    ///
    /// [`Error::InvalidRounds`] unless `value` is 8, 12, or 20.
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            8 => Ok(Self::R8),
            12 => Ok(Self::R12),
            20 => Ok(Self::R20),
            other => {
                trace!(warn, rounds = other, "rejected round count");
                Err(Error::InvalidRounds(other))
            }
        }
    }
}

/// An ARX permutation over [`Words`], along with where its block counter lives.
///
/// This trait is sealed, the only implementors are [`ChaChaCore`] and [`SalsaCore`].
pub trait Core : Sealed {
    /// Index of the low block-counter word. The high word (64-bit counters) directly follows.
    const COUNTER: usize;

    /// Applies `rounds` rounds of the permutation in place, without the final feed-forward.
    fn permute(words: &mut Words, rounds: Rounds);
}

/// A stream cipher in its streaming state, XORing keystream over data across any number of
/// calls.
///
/// This trait is sealed, it is implemented for `ChaCha20<Streaming>`, `Salsa20<Streaming>`, and
/// `XSalsa20<Streaming>`.
pub trait StreamCipher : Sealed {
    /// XORs `input` with the next `input.len()` keystream bytes into the front of `output`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSize`] if `output` is shorter than `input`.
    /// - [`Error::KeystreamExhausted`] if the block counter cannot cover `input`.
    ///
    /// Either way nothing is written and no keystream is consumed.
    fn apply_keystream(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), Error>;

    /// XORs the next `in_out.len()` keystream bytes over `in_out`.
    ///
    /// # Errors
    ///
    /// [`Error::KeystreamExhausted`] if the block counter cannot cover `in_out`.
    fn apply_keystream_in_place(&mut self, in_out: &mut [u8]) -> Result<(), Error>;
}

/// The `ChaCha` permutation: column rounds followed by diagonal rounds.
pub struct ChaChaCore;

/// The `Salsa` permutation: column rounds followed by row rounds.
pub struct SalsaCore;

impl Sealed for ChaChaCore {}
impl Sealed for SalsaCore {}

#[inline(always)]
fn chacha_qr(s: &mut Words, a: usize, b: usize, c: usize, d: usize) {
    s[a] = s[a].wrapping_add(s[b]); s[d] ^= s[a]; s[d] = s[d].rotate_left(16);
    s[c] = s[c].wrapping_add(s[d]); s[b] ^= s[c]; s[b] = s[b].rotate_left(12);
    s[a] = s[a].wrapping_add(s[b]); s[d] ^= s[a]; s[d] = s[d].rotate_left(8);
    s[c] = s[c].wrapping_add(s[d]); s[b] ^= s[c]; s[b] = s[b].rotate_left(7);
}

#[inline(always)]
fn salsa_qr(s: &mut Words, a: usize, b: usize, c: usize, d: usize) {
    s[b] ^= s[a].wrapping_add(s[d]).rotate_left(7);
    s[c] ^= s[b].wrapping_add(s[a]).rotate_left(9);
    s[d] ^= s[c].wrapping_add(s[b]).rotate_left(13);
    s[a] ^= s[d].wrapping_add(s[c]).rotate_left(18);
}

impl Core for ChaChaCore {
    const COUNTER: usize = 12;

    fn permute(words: &mut Words, rounds: Rounds) {
        for _ in 0..rounds.double_rounds() {
            // columns
            chacha_qr(words, 0, 4, 8, 12);
            chacha_qr(words, 1, 5, 9, 13);
            chacha_qr(words, 2, 6, 10, 14);
            chacha_qr(words, 3, 7, 11, 15);
            // diagonals
            chacha_qr(words, 0, 5, 10, 15);
            chacha_qr(words, 1, 6, 11, 12);
            chacha_qr(words, 2, 7, 8, 13);
            chacha_qr(words, 3, 4, 9, 14);
        }
    }
}

impl Core for SalsaCore {
    const COUNTER: usize = 8;

    fn permute(words: &mut Words, rounds: Rounds) {
        for _ in 0..rounds.double_rounds() {
            // columns
            salsa_qr(words, 0, 4, 8, 12);
            salsa_qr(words, 5, 9, 13, 1);
            salsa_qr(words, 10, 14, 2, 6);
            salsa_qr(words, 15, 3, 7, 11);
            // rows
            salsa_qr(words, 0, 1, 2, 3);
            salsa_qr(words, 5, 6, 7, 4);
            salsa_qr(words, 10, 11, 8, 9);
            salsa_qr(words, 15, 12, 13, 14);
        }
    }
}

/// Serializes the sixteen words little-endian.
#[inline]
pub fn serialize(words: &Words) -> [u8; BLOCK_SIZE] {
    let mut out = [0u8; BLOCK_SIZE];
    for (chunk, word) in out.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}

/// Reads little-endian words from `bytes` into `out`, `bytes` must hold `4 * out.len()` bytes.
#[inline]
pub(crate) fn load_words(bytes: &[u8], out: &mut [u32]) {
    debug_assert_eq!(bytes.len(), out.len() * 4);
    for (word, chunk) in out.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
}

/// Computes one keystream block for the given input state.
///
/// The input is permuted on a copy, added back word-wise, and serialized little-endian. This
/// is a pure function of `input` and `rounds`.
pub fn block<C: Core>(input: &Words, rounds: Rounds) -> [u8; BLOCK_SIZE] {
    let mut working = *input;
    C::permute(&mut working, rounds);

    for (w, i) in working.iter_mut().zip(input) {
        *w = w.wrapping_add(*i);
    }

    let out = serialize(&working);
    zeroize::Zeroize::zeroize(&mut working);
    out
}

/// The `ChaCha` block function, see [`block`].
#[inline]
pub fn chacha_block(input: &Words, rounds: Rounds) -> [u8; BLOCK_SIZE] {
    block::<ChaChaCore>(input, rounds)
}

/// The `Salsa` block function, see [`block`].
#[inline]
pub fn salsa_block(input: &Words, rounds: Rounds) -> [u8; BLOCK_SIZE] {
    block::<SalsaCore>(input, rounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chacha_quarter_round() {
        // RFC 8439 2.1.1
        let mut s = [0u32; 16];
        s[0] = 0x1111_1111;
        s[1] = 0x0102_0304;
        s[2] = 0x9b8d_6f43;
        s[3] = 0x0123_4567;

        chacha_qr(&mut s, 0, 1, 2, 3);

        assert_eq!(&s[..4], &[0xea2a_92f4, 0xcb1c_f8ce, 0x4581_472e, 0x5881_c4bb]);
    }

    #[test]
    fn salsa_quarter_round() {
        let mut s = [0u32; 16];
        s[0] = 1;

        salsa_qr(&mut s, 0, 1, 2, 3);

        assert_eq!(&s[..4], &[0x0800_8145, 0x0000_0080, 0x0001_0200, 0x2050_0000]);
    }

    #[test]
    fn additions_wrap() {
        let mut s = [u32::MAX; 16];
        chacha_qr(&mut s, 0, 4, 8, 12);
        salsa_qr(&mut s, 0, 4, 8, 12);
    }

    #[test]
    fn rounds_from_int() {
        assert_eq!(Rounds::try_from(8), Ok(Rounds::R8));
        assert_eq!(Rounds::try_from(12), Ok(Rounds::R12));
        assert_eq!(Rounds::try_from(20), Ok(Rounds::R20));
        assert_eq!(Rounds::try_from(10), Err(Error::InvalidRounds(10)));
        assert_eq!(Rounds::default().count(), 20);
    }

    #[test]
    fn block_is_pure() {
        let mut input = [0u32; 16];
        input[..4].copy_from_slice(&SIGMA);
        input[12] = 7;

        let snapshot = input;
        assert_eq!(chacha_block(&input, Rounds::R20), chacha_block(&input, Rounds::R20));
        assert_eq!(input, snapshot);
        assert_ne!(chacha_block(&input, Rounds::R20), chacha_block(&input, Rounds::R8));
        assert_ne!(chacha_block(&input, Rounds::R20), salsa_block(&input, Rounds::R20));
    }

    #[test]
    fn zero_state_is_fixed_point() {
        // every ARX step maps all-zero words to zero, so the block is zero as well.
        assert_eq!(chacha_block(&[0; 16], Rounds::R20), [0u8; 64]);
        assert_eq!(salsa_block(&[0; 16], Rounds::R12), [0u8; 64]);
    }

    #[test]
    fn serialize_is_little_endian() {
        let mut words = [0u32; 16];
        words[0] = 0x0403_0201;
        words[15] = 0xdead_beef;

        let out = serialize(&words);
        assert_eq!(&out[..4], &[1, 2, 3, 4]);
        assert_eq!(&out[60..], &[0xef, 0xbe, 0xad, 0xde]);
    }
}
