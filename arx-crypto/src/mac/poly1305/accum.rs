//! The Poly1305 accumulator.
//!
//! `h` and `r` are held as five 26-bit limbs so every partial product fits in a `u64`. The
//! multiplication by `r` folds the limbs above 2^130 back in multiplied by 5, since
//! `2^130 = 5 (mod 2^130 - 5)`.

use zeroize::Zeroize;
use crate::aead::Tag;

const BLOCK: usize = 16;
const LIMB: u32 = 0x3ff_ffff;
/// 2^128 in the top limb, set for every full 16-byte block.
const HIBIT: u32 = 1 << 24;

#[inline(always)]
fn le32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

pub(crate) struct Accumulator {
    r: [u32; 5],
    h: [u32; 5],
    pad: [u32; 4],
    buffer: [u8; BLOCK],
    leftover: usize
}

impl Accumulator {
    /// Splits and clamps the one-time key.
    pub fn new(key: &[u8; 32]) -> Self {
        Self {
            r: [
                le32(key, 0) & 0x3ff_ffff,
                (le32(key, 3) >> 2) & 0x3ff_ff03,
                (le32(key, 6) >> 4) & 0x3ff_c0ff,
                (le32(key, 9) >> 6) & 0x3f0_3fff,
                (le32(key, 12) >> 8) & 0x00f_ffff
            ],
            h: [0; 5],
            pad: [le32(key, 16), le32(key, 20), le32(key, 24), le32(key, 28)],
            buffer: [0; BLOCK],
            leftover: 0
        }
    }

    /// `h = (h + block) * r mod 2^130 - 5`
    fn absorb(&mut self, block: &[u8], hibit: u32) {
        let [r0, r1, r2, r3, r4] = self.r.map(u64::from);
        let (s1, s2, s3, s4) = (r1 * 5, r2 * 5, r3 * 5, r4 * 5);

        let h0 = u64::from(self.h[0] + (le32(block, 0) & LIMB));
        let h1 = u64::from(self.h[1] + ((le32(block, 3) >> 2) & LIMB));
        let h2 = u64::from(self.h[2] + ((le32(block, 6) >> 4) & LIMB));
        let h3 = u64::from(self.h[3] + ((le32(block, 9) >> 6) & LIMB));
        let h4 = u64::from(self.h[4] + ((le32(block, 12) >> 8) | hibit));

        let d0 = h0 * r0 + h1 * s4 + h2 * s3 + h3 * s2 + h4 * s1;
        let mut d1 = h0 * r1 + h1 * r0 + h2 * s4 + h3 * s3 + h4 * s2;
        let mut d2 = h0 * r2 + h1 * r1 + h2 * r0 + h3 * s4 + h4 * s3;
        let mut d3 = h0 * r3 + h1 * r2 + h2 * r1 + h3 * r0 + h4 * s4;
        let mut d4 = h0 * r4 + h1 * r3 + h2 * r2 + h3 * r1 + h4 * r0;

        d1 += d0 >> 26;
        d2 += d1 >> 26;
        d3 += d2 >> 26;
        d4 += d3 >> 26;

        let mut h0 = (d0 as u32 & LIMB) + (d4 >> 26) as u32 * 5;
        let h1 = (d1 as u32 & LIMB) + (h0 >> 26);
        h0 &= LIMB;

        self.h = [h0, h1, d2 as u32 & LIMB, d3 as u32 & LIMB, d4 as u32 & LIMB];
    }

    /// Absorbs `input`, staging any trailing partial block until more input arrives.
    pub fn update(&mut self, mut input: &[u8]) {
        if self.leftover != 0 {
            let take = core::cmp::min(BLOCK - self.leftover, input.len());
            self.buffer[self.leftover..self.leftover + take].copy_from_slice(&input[..take]);
            self.leftover += take;
            input = &input[take..];

            if self.leftover < BLOCK {
                return;
            }

            let mut block = self.buffer;
            self.absorb(&block, HIBIT);
            block.zeroize();
            self.leftover = 0;
        }

        let mut blocks = input.chunks_exact(BLOCK);
        for block in &mut blocks {
            self.absorb(block, HIBIT);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.leftover = rest.len();
    }

    /// Zero-fills a pending partial block and absorbs it as a full block, a no-op on a 16-byte
    /// boundary.
    pub fn pad(&mut self) {
        if self.leftover == 0 {
            return;
        }

        self.buffer[self.leftover..].zeroize();
        let mut block = self.buffer;
        self.absorb(&block, HIBIT);
        block.zeroize();
        self.leftover = 0;
    }

    /// Absorbs two lengths as little-endian `u64`s.
    pub fn encode_sizes(&mut self, first: u64, second: u64) {
        self.update(&first.to_le_bytes());
        self.update(&second.to_le_bytes());
    }

    /// Produces `(h + s) mod 2^128`. The accumulator is zeroed when it drops.
    pub fn finalize(mut self) -> Tag {
        if self.leftover != 0 {
            self.buffer[self.leftover] = 1;
            self.buffer[self.leftover + 1..].zeroize();
            let mut block = self.buffer;
            self.absorb(&block, 0);
            block.zeroize();
        }

        let [mut h0, mut h1, mut h2, mut h3, mut h4] = self.h;

        // full carry
        h2 += h1 >> 26; h1 &= LIMB;
        h3 += h2 >> 26; h2 &= LIMB;
        h4 += h3 >> 26; h3 &= LIMB;
        h0 += (h4 >> 26) * 5; h4 &= LIMB;
        h1 += h0 >> 26; h0 &= LIMB;

        // g = h + 5 - 2^130
        let mut g0 = h0 + 5;
        let mut g1 = h1 + (g0 >> 26); g0 &= LIMB;
        let mut g2 = h2 + (g1 >> 26); g1 &= LIMB;
        let mut g3 = h3 + (g2 >> 26); g2 &= LIMB;
        let mut g4 = (h4 + (g3 >> 26)).wrapping_sub(1 << 26); g3 &= LIMB;

        // all ones when g did not borrow, meaning h >= p
        let select = (g4 >> 31).wrapping_sub(1);
        g0 &= select; g1 &= select; g2 &= select; g3 &= select; g4 &= select;
        let keep = !select;
        h0 = (h0 & keep) | g0;
        h1 = (h1 & keep) | g1;
        h2 = (h2 & keep) | g2;
        h3 = (h3 & keep) | g3;
        h4 = (h4 & keep) | g4;

        let words = [
            h0 | (h1 << 26),
            (h1 >> 6) | (h2 << 20),
            (h2 >> 12) | (h3 << 14),
            (h3 >> 18) | (h4 << 8)
        ];

        let mut tag = Tag::new_zeroed();
        let mut carry = 0u64;

        for ((out, word), pad) in tag.as_mut_slice().chunks_exact_mut(4).zip(words).zip(self.pad) {
            carry += u64::from(word) + u64::from(pad);
            out.copy_from_slice(&(carry as u32).to_le_bytes());
            carry >>= 32;
        }

        tag
    }
}

impl Zeroize for Accumulator {
    fn zeroize(&mut self) {
        self.r.zeroize();
        self.h.zeroize();
        self.pad.zeroize();
        self.buffer.zeroize();
        self.leftover.zeroize();
    }
}

impl Drop for Accumulator {
    #[inline]
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const RFC_KEY: [u8; 32] = hex!(
        "85d6be7857556d337f4452fe42d506a80103808afb0db2fd4abff6af4149f51b"
    );

    #[test]
    fn clamps_r() {
        let acc = Accumulator::new(&[0xff; 32]);
        // r & 0x0ffffffc0ffffffc0ffffffc0fffffff, split into 26-bit limbs
        assert_eq!(acc.r, [0x3ff_ffff, 0x3ff_ff03, 0x3ff_c0ff, 0x3f0_3fff, 0x00f_ffff]);
    }

    #[test]
    fn rfc8439_2_5_2() {
        let mut acc = Accumulator::new(&RFC_KEY);
        acc.update(b"Cryptographic Forum Research Group");
        assert_eq!(acc.finalize().take(), hex!("a8061dc1305136c6c22b8baf0c0127a9"));
    }

    #[test]
    fn byte_at_a_time() {
        let mut acc = Accumulator::new(&RFC_KEY);
        for byte in b"Cryptographic Forum Research Group" {
            acc.update(core::slice::from_ref(byte));
        }
        assert_eq!(acc.finalize().take(), hex!("a8061dc1305136c6c22b8baf0c0127a9"));
    }

    #[test]
    fn empty_is_pad() {
        let acc = Accumulator::new(&RFC_KEY);
        assert_eq!(acc.finalize().as_slice(), &RFC_KEY[16..]);
    }

    #[test]
    fn pad_on_boundary_is_noop() {
        let mut a = Accumulator::new(&RFC_KEY);
        let mut b = Accumulator::new(&RFC_KEY);
        a.update(&[9u8; 32]);
        b.update(&[9u8; 32]);
        b.pad();
        assert_eq!(a.finalize(), b.finalize());
    }

    #[test]
    fn pad_equals_explicit_zeroes() {
        let mut a = Accumulator::new(&RFC_KEY);
        let mut b = Accumulator::new(&RFC_KEY);
        a.update(&[9u8; 5]);
        a.pad();
        b.update(&[9u8; 5]);
        b.update(&[0u8; 11]);
        assert_eq!(a.finalize(), b.finalize());
    }

    #[test]
    fn final_reduction_of_p() {
        // r = 1 and s = 0, so the tag is the message sum mod p, truncated to 128 bits.
        let mut key = [0u8; 32];
        key[0] = 1;
        let mut acc = Accumulator::new(&key);

        // (2^128 - 5) + 2^128
        let mut first = [0xff; 16];
        first[0] = 0xfb;
        // (2^128 - 256) + 2^128
        let mut second = [0xff; 16];
        second[0] = 0;

        acc.update(&first);
        acc.update(&second);
        // 0 + 2^8, the sum is now exactly 2^130 - 5
        acc.update(&[0]);

        assert_eq!(acc.finalize().take(), [0u8; 16]);
    }
}
