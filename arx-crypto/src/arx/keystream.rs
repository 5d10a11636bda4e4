use core::marker::PhantomData;
use zeroize::Zeroize;
use super::{block, Core, Rounds, Words, BLOCK_SIZE};
use crate::Error;

/// How many words of the state make up the block counter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum CounterWidth {
    /// One word, the IETF `ChaCha20` layout.
    U32,
    /// Two words, low word first. The original `ChaCha20` layout and all of `Salsa20`.
    U64,
}

impl CounterWidth {
    /// The number of distinct counter values.
    #[inline]
    const fn span(self) -> u128 {
        match self {
            Self::U32 => 1 << 32,
            Self::U64 => 1 << 64,
        }
    }
}

/// A position-tracking keystream over some [`Core`].
///
/// Holds the input state (whose counter word(s) always name the *next* block to generate), the
/// most recently generated block, and how much of that block has been consumed. A fresh
/// generator has consumed its (nonexistent) block entirely, so the first byte requested
/// generates block `counter`.
pub(crate) struct Keystream<C: Core> {
    state: Words,
    block: [u8; BLOCK_SIZE],
    cursor: usize,
    rounds: Rounds,
    width: CounterWidth,
    /// Set once the counter has wrapped, the state no longer names a usable block.
    wrapped: bool,
    _core: PhantomData<C>,
}

impl<C: Core> Keystream<C> {
    pub(crate) const fn new(state: Words, width: CounterWidth, rounds: Rounds) -> Self {
        Self {
            state,
            block: [0u8; BLOCK_SIZE],
            cursor: BLOCK_SIZE,
            rounds,
            width,
            wrapped: false,
            _core: PhantomData,
        }
    }

    /// A generator with no key or nonce, it refuses to produce anything.
    ///
    /// Used while a cipher waits for its next nonce, it only remembers the round count.
    pub(crate) const fn empty(rounds: Rounds) -> Self {
        Self {
            state: [0u32; 16],
            block: [0u8; BLOCK_SIZE],
            cursor: BLOCK_SIZE,
            rounds,
            width: CounterWidth::U32,
            wrapped: true,
            _core: PhantomData,
        }
    }

    #[inline]
    pub(crate) const fn rounds(&self) -> Rounds {
        self.rounds
    }

    /// The counter of the next block to be generated.
    #[inline]
    fn counter(&self) -> u64 {
        let low = u64::from(self.state[C::COUNTER]);
        match self.width {
            CounterWidth::U32 => low,
            CounterWidth::U64 => low | (u64::from(self.state[C::COUNTER + 1]) << 32),
        }
    }

    /// The number of keystream bytes which can still be produced before the counter wraps.
    pub(crate) fn remaining(&self) -> u128 {
        let buffered = (BLOCK_SIZE - self.cursor) as u128;
        if self.wrapped {
            buffered
        } else {
            buffered + (self.width.span() - u128::from(self.counter())) * BLOCK_SIZE as u128
        }
    }

    /// Checks that `len` more bytes of keystream exist.
    ///
    /// # Errors
    ///
    /// [`Error::KeystreamExhausted`] if producing `len` bytes would require wrapping the block
    /// counter.
    #[inline]
    pub(crate) fn check(&self, len: usize) -> Result<(), Error> {
        if len as u128 <= self.remaining() {
            Ok(())
        } else {
            trace!(warn, requested = len, "keystream exhausted for this key and nonce");
            Err(Error::KeystreamExhausted)
        }
    }

    /// Generates the next block and advances the counter.
    fn refill(&mut self) {
        debug_assert!(!self.wrapped, "refill after counter wrap, `check` must precede processing");

        self.block = block::<C>(&self.state, self.rounds);
        self.cursor = 0;

        let (low, carry) = self.state[C::COUNTER].overflowing_add(1);
        self.state[C::COUNTER] = low;

        if carry {
            match self.width {
                CounterWidth::U32 => self.wrapped = true,
                CounterWidth::U64 => {
                    let (high, carry) = self.state[C::COUNTER + 1].overflowing_add(1);
                    self.state[C::COUNTER + 1] = high;
                    self.wrapped = carry;
                }
            }
        }
    }

    /// XORs the keystream over `data`, `data` must already have passed [`check`].
    ///
    /// [`check`]: Self::check
    fn xor_unchecked(&mut self, data: &mut [u8]) {
        let mut pos = 0;
        while pos < data.len() {
            if self.cursor == BLOCK_SIZE { self.refill(); }

            let take = core::cmp::min(BLOCK_SIZE - self.cursor, data.len() - pos);
            let stream = &self.block[self.cursor..self.cursor + take];

            for (byte, k) in data[pos..pos + take].iter_mut().zip(stream) {
                *byte ^= k;
            }

            self.cursor += take;
            pos += take;
        }
    }

    /// XORs `input` with the keystream into the front of `output`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSize`] if `output` is shorter than `input`.
    /// - [`Error::KeystreamExhausted`] if the counter cannot cover `input`.
    ///
    /// Either way nothing is written and the position is unchanged.
    pub(crate) fn apply(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), Error> {
        if input.len() > output.len() { return Err(Error::InvalidSize) }
        self.check(input.len())?;

        let output = &mut output[..input.len()];
        output.copy_from_slice(input);
        self.xor_unchecked(output);
        Ok(())
    }

    /// XORs the keystream over `in_out`.
    ///
    /// # Errors
    ///
    /// [`Error::KeystreamExhausted`], in which case `in_out` is untouched.
    #[inline]
    pub(crate) fn apply_in_place(&mut self, in_out: &mut [u8]) -> Result<(), Error> {
        self.check(in_out.len())?;
        self.xor_unchecked(in_out);
        Ok(())
    }

    /// Writes raw keystream into `out`.
    ///
    /// # Errors
    ///
    /// [`Error::KeystreamExhausted`], in which case `out` is untouched.
    pub(crate) fn fill(&mut self, out: &mut [u8]) -> Result<(), Error> {
        self.check(out.len())?;
        out.zeroize();
        self.xor_unchecked(out);
        Ok(())
    }
}

impl<C: Core> Zeroize for Keystream<C> {
    fn zeroize(&mut self) {
        self.state.zeroize();
        self.block.zeroize();
        self.cursor = BLOCK_SIZE;
    }
}

impl<C: Core> Drop for Keystream<C> {
    #[inline]
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arx::{ChaChaCore, SalsaCore, chacha_block, SIGMA};

    fn state(counter_low: u32, counter_high: u32) -> Words {
        let mut s = [0u32; 16];
        s[..4].copy_from_slice(&SIGMA);
        for (i, w) in s[4..12].iter_mut().enumerate() { *w = i as u32; }
        s[12] = counter_low;
        s[13] = counter_high;
        s[14] = 0xaaaa_aaaa;
        s[15] = 0x5555_5555;
        s
    }

    #[test]
    fn first_byte_generates_first_block() {
        let s = state(5, 0);
        let mut ks = Keystream::<ChaChaCore>::new(s, CounterWidth::U32, Rounds::R20);

        let mut out = [0u8; 64];
        ks.fill(&mut out).unwrap();

        assert_eq!(out, chacha_block(&s, Rounds::R20));
        assert_eq!(ks.counter(), 6);
    }

    #[test]
    fn split_requests_are_contiguous() {
        let s = state(0, 0);
        let mut whole = [0u8; 200];
        Keystream::<ChaChaCore>::new(s, CounterWidth::U32, Rounds::R12).fill(&mut whole).unwrap();

        let mut ks = Keystream::<ChaChaCore>::new(s, CounterWidth::U32, Rounds::R12);
        let mut parts = [0u8; 200];
        for range in [0..1, 1..63, 63..64, 64..65, 65..129, 129..200] {
            ks.fill(&mut parts[range]).unwrap();
        }

        assert_eq!(whole, parts);
    }

    #[test]
    fn u64_counter_carries_into_high_word() {
        let s = state(u32::MAX, 0);
        let mut ks = Keystream::<ChaChaCore>::new(s, CounterWidth::U64, Rounds::R20);

        let mut out = [0u8; 128];
        ks.fill(&mut out).unwrap();

        assert_eq!(&out[..64], &chacha_block(&state(u32::MAX, 0), Rounds::R20));
        assert_eq!(&out[64..], &chacha_block(&state(0, 1), Rounds::R20));
    }

    #[test]
    fn u32_counter_exhausts() {
        let s = state(u32::MAX, 0);
        let mut ks = Keystream::<ChaChaCore>::new(s, CounterWidth::U32, Rounds::R20);

        let mut out = [0u8; 65];
        assert_eq!(ks.fill(&mut out), Err(Error::KeystreamExhausted));
        assert_eq!(out, [0u8; 65]);

        ks.fill(&mut out[..60]).unwrap();
        ks.fill(&mut out[60..64]).unwrap();
        assert_eq!(&out[..64], &chacha_block(&s, Rounds::R20));

        assert_eq!(ks.fill(&mut out[..1]), Err(Error::KeystreamExhausted));
        assert_eq!(ks.remaining(), 0);
    }

    #[test]
    fn apply_checks_output_size() {
        let mut ks = Keystream::<SalsaCore>::new(state(0, 0), CounterWidth::U64, Rounds::R20);
        let mut out = [0u8; 3];
        assert_eq!(ks.apply(&[1, 2, 3, 4], &mut out), Err(Error::InvalidSize));
        assert_eq!(out, [0u8; 3]);

        let mut wide = [0u8; 8];
        ks.apply(&[1, 2, 3, 4], &mut wide).unwrap();
        assert_eq!(&wide[4..], &[0u8; 4]);
    }

    #[test]
    fn empty_produces_nothing() {
        let mut ks = Keystream::<ChaChaCore>::empty(Rounds::R8);
        assert!(ks.fill(&mut []).is_ok());
        assert_eq!(ks.fill(&mut [0u8; 1]), Err(Error::KeystreamExhausted));
        assert_eq!(ks.rounds(), Rounds::R8);
    }
}
