//! The `ChaCha20` Stream Cipher

mod key;

pub use key::{Key, KeyRef, GenericKey, KEY_SIZE};

use core::marker::PhantomData;
use crate::arx::keystream::{CounterWidth, Keystream};
use crate::arx::state::{State, CanProcess, Init, NeedsIv, Ready, Streaming};
use crate::arx::{load_words, ChaChaCore, Rounds, Words, SIGMA};
use crate::buf::{GenericIv, U12, U8};
use crate::Error;

/// Lays out the input state: constants, key, counter, nonce.
///
/// A 12-byte nonce leaves one word for the counter, an 8-byte nonce leaves two (low word first).
/// `nonce` must be one of those two lengths, and `counter` must fit the counter words.
fn init_state(key: &[u8; KEY_SIZE], nonce: &[u8], counter: u64) -> (Words, CounterWidth) {
    let mut words = [0u32; 16];
    words[..4].copy_from_slice(&SIGMA);
    load_words(key, &mut words[4..12]);

    if nonce.len() == U12::SIZE {
        debug_assert!(u32::try_from(counter).is_ok());
        words[12] = counter as u32;
        load_words(nonce, &mut words[13..16]);
        (words, CounterWidth::U32)
    } else {
        debug_assert_eq!(nonce.len(), U8::SIZE);
        words[12] = counter as u32;
        words[13] = (counter >> 32) as u32;
        load_words(nonce, &mut words[14..16]);
        (words, CounterWidth::U64)
    }
}

/// The `ChaCha20` Stream Cipher
///
/// # Warning
///
/// `ChaCha20` alone does not ensure that the ciphertext is authentic, unless you have a reason
/// for using this directly, it is generally recommended to use `ChaCha20-Poly1305`.
///
/// # Generic `S`
///
/// This `ChaCha20` implementation is implemented as a state machine, this is to better enforce
/// best practices such as avoiding initialization vector reuse. The generic `S` represents the
/// current state.
///
/// The state machine takes the following form:
///
/// ```text
///      +----------+
///      |   Init   |
///      +----------+
///        |
///        |
///        v
///      +----------+      `finish()`
///   +> | Needs IV | <----------------------+
///   |  +----------+                        |
///   |    |                                 |
///   |    |                                 |
///   |    v                                 |
///   |  +--------------------------+      +-----------+
///   |  |                          |      |           | ---+
///   |  |          Ready           |      | Streaming |    |
///   |  |                          | ---> |           | <--+
///   |  +--------------------------+      +-----------+
///   |    |           ^    |
///   |    |           |    |
///   |    v           |    v
///   |  +----------+  |  +---------+
///   +- | Encrypt  |  +- | Decrypt |
///      +----------+     +---------+
/// ```
///
/// # Nonces and Counters
///
/// The 96-bit IETF nonce ([`set_iv`]) leaves a 32-bit block counter, so at most 256 GiB can be
/// processed under one nonce. The original 64-bit nonce ([`set_legacy_iv`]) leaves a 64-bit
/// counter. Requests which would need the counter to wrap fail with
/// [`Error::KeystreamExhausted`] before anything is written.
///
/// # Example
///
/// ```
/// use arx_crypto::chacha::ChaCha20;
///
/// let (output, mut chacha) = ChaCha20::new(&[7u8; 32])
///     .set_iv(&[3u8; 12])
///     .encrypt_exact(b"hello world")
///     .unwrap();
///
/// let plaintext = chacha.set_iv(&[3u8; 12])
///     .decrypt_exact(&output)
///     .unwrap();
///
/// assert_eq!(b"hello world", &plaintext);
/// ```
///
/// [`set_iv`]: ChaCha20::set_iv
/// [`set_legacy_iv`]: ChaCha20::set_legacy_iv
pub struct ChaCha20<S: State = Init> {
    key: Key,
    keystream: Keystream<ChaChaCore>,
    _state: PhantomData<S>
}

impl ChaCha20<Init> {
    /// Create a new `ChaCha20` instance.
    ///
    /// # Arguments
    ///
    /// * `key` - The 256-bit key material.
    ///
    /// # Returns
    ///
    /// A new `ChaCha20` instance in the [`NeedsIv`] state.
    #[inline]
    pub fn new<K: GenericKey>(key: K) -> ChaCha20<NeedsIv> {
        Self::new_with_rounds(key, Rounds::R20)
    }

    /// Create a new `ChaCha` instance with a reduced (or explicit) number of rounds.
    ///
    /// # Example
    ///
    /// ```
    /// use arx_crypto::{chacha::ChaCha20, Rounds};
    ///
    /// let mut chacha8 = ChaCha20::new_with_rounds(&[1u8; 32], Rounds::R8)
    ///     .set_iv([0u8; 12])
    ///     .stream();
    ///
    /// let mut ks = [0u8; 64];
    /// chacha8.keystream_into(&mut ks).unwrap();
    /// ```
    pub fn new_with_rounds<K: GenericKey>(key: K, rounds: Rounds) -> ChaCha20<NeedsIv> {
        ChaCha20::<NeedsIv> {
            key: Key::new(*key.bytes()),
            keystream: Keystream::empty(rounds),
            _state: PhantomData
        }
    }

    /// Constructs a `ChaCha20` instance from runtime-sized inputs.
    ///
    /// # Arguments
    ///
    /// * `key` - The key, exactly 32 bytes.
    /// * `nonce` - A 12-byte (32-bit counter) or 8-byte (64-bit counter) nonce.
    /// * `counter` - The block counter to start from, generally zero.
    /// * `rounds` - The number of rounds.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidKeyLength`] if `key` is not 32 bytes.
    /// - [`Error::InvalidNonceLength`] if `nonce` is neither 8 nor 12 bytes.
    /// - [`Error::KeystreamExhausted`] if `nonce` is 12 bytes and `counter` does not fit in
    ///   32 bits.
    pub fn from_slices(
        key: &[u8],
        nonce: &[u8],
        counter: u64,
        rounds: Rounds
    ) -> Result<ChaCha20<Ready>, Error> {
        let key = KeyRef::try_from(key)?;

        match nonce.len() {
            U12::SIZE => {
                let counter = u32::try_from(counter).map_err(|_| {
                    trace!(warn, counter, "initial counter exceeds the 32-bit block counter");
                    Error::KeystreamExhausted
                })?;
                Ok(Self::new_with_rounds(key, rounds).install(nonce, u64::from(counter)))
            },
            U8::SIZE => Ok(Self::new_with_rounds(key, rounds).install(nonce, counter)),
            len => {
                trace!(warn, len, "rejected ChaCha20 nonce length");
                Err(Error::InvalidNonceLength(len))
            }
        }
    }
}

impl_fmt! { ChaCha20: Init }

impl ChaCha20<NeedsIv> {
    #[inline]
    fn install(self, nonce: &[u8], counter: u64) -> ChaCha20<Ready> {
        let (words, width) = init_state(self.key.bytes(), nonce, counter);
        let rounds = self.keystream.rounds();

        ChaCha20::<Ready> {
            key: self.key,
            keystream: Keystream::new(words, width, rounds),
            _state: PhantomData
        }
    }

    /// Set the initialization vector to use for the next [`Ready`] state.
    ///
    /// # Arguments
    ///
    /// * `iv` - The 96-bit initialization vector.
    /// * `counter` - The value at which the block counter should start, generally zero.
    ///
    /// # Returns
    ///
    /// The `ChaCha20` instance in the [`Ready`] state.
    #[inline]
    pub fn set_iv_with_ctr<IV>(self, iv: IV, counter: u32) -> ChaCha20<Ready>
        where IV: GenericIv<Size = U12>
    {
        self.install(iv.as_slice(), u64::from(counter))
    }

    /// Set the initialization vector to use for the next [`Ready`] state.
    ///
    /// # Arguments
    ///
    /// * `iv` - The 96-bit initialization vector.
    ///
    /// # Returns
    ///
    /// The `ChaCha20` instance in the [`Ready`] state.
    #[inline]
    pub fn set_iv<IV: GenericIv<Size = U12>>(self, iv: IV) -> ChaCha20<Ready> {
        self.set_iv_with_ctr(iv, 0)
    }

    /// Set the original 64-bit initialization vector, leaving a 64-bit block counter.
    ///
    /// # Arguments
    ///
    /// * `iv` - The 64-bit initialization vector.
    /// * `counter` - The value at which the block counter should start, generally zero.
    #[inline]
    pub fn set_legacy_iv_with_ctr<IV>(self, iv: IV, counter: u64) -> ChaCha20<Ready>
        where IV: GenericIv<Size = U8>
    {
        self.install(iv.as_slice(), counter)
    }

    /// Set the original 64-bit initialization vector, leaving a 64-bit block counter.
    #[inline]
    pub fn set_legacy_iv<IV: GenericIv<Size = U8>>(self, iv: IV) -> ChaCha20<Ready> {
        self.set_legacy_iv_with_ctr(iv, 0)
    }
}

stream_cipher_api! { ChaCha20 }

impl<S: CanProcess> ChaCha20<S> {
    /// Fails unless `len` more bytes of keystream are available.
    #[inline]
    pub(crate) fn ensure_available(&self, len: usize) -> Result<(), Error> {
        self.keystream.check(len)
    }
}
