//! The `Salsa20` and `XSalsa20` Stream Ciphers
//!
//! `Salsa20` takes a 64-bit nonce and keeps a 64-bit block counter. [`XSalsa20`] extends the
//! nonce to 192 bits by first deriving a one-time subkey with [`hsalsa20`].

mod key;
mod xsalsa;

pub use key::{Key, KeyRef, GenericKey};
pub use xsalsa::{XSalsa20, hsalsa20};

use core::marker::PhantomData;
use crate::arx::keystream::{CounterWidth, Keystream};
use crate::arx::state::{State, CanProcess, Init, NeedsIv, Ready, Streaming};
use crate::arx::{load_words, Rounds, SalsaCore, Words, SIGMA, TAU};
use crate::buf::{GenericIv, U8};
use crate::Error;

/// Lays out the constants and key, leaving words 6 through 9 (nonce and counter) zero.
///
/// ```text
/// c0  k0  k1  k2
/// k3  c1  n0  n1
/// b0  b1  c2  k4
/// k5  k6  k7  c3
/// ```
///
/// With a 128-bit key the same 16 bytes fill both `k0..k3` and `k4..k7`.
pub(crate) fn key_state(key: &[u8]) -> Words {
    let mut words = [0u32; 16];
    let (constants, high) = if key.len() == 32 {
        (SIGMA, &key[16..])
    } else {
        (TAU, key)
    };

    words[0] = constants[0];
    words[5] = constants[1];
    words[10] = constants[2];
    words[15] = constants[3];

    load_words(&key[..16], &mut words[1..5]);
    load_words(&high[..16], &mut words[11..15]);
    words
}

/// Lays out the full input state, the counter is little-endian across words 8 and 9.
fn init_state(key: &[u8], nonce: &[u8], counter: u64) -> Words {
    let mut words = key_state(key);
    load_words(nonce, &mut words[6..8]);
    words[8] = counter as u32;
    words[9] = (counter >> 32) as u32;
    words
}

/// The `Salsa20` Stream Cipher
///
/// # Warning
///
/// `Salsa20` alone does not ensure that the ciphertext is authentic.
///
/// # Generic `S`
///
/// The same state machine as [`ChaCha20`], see its documentation.
///
/// # Example
///
/// ```
/// use arx_crypto::salsa::Salsa20;
///
/// let (output, mut salsa) = Salsa20::new(&[7u8; 32])
///     .set_iv(&[3u8; 8])
///     .encrypt_exact(b"hello world")
///     .unwrap();
///
/// let plaintext = salsa.set_iv(&[3u8; 8])
///     .decrypt_exact(&output)
///     .unwrap();
///
/// assert_eq!(b"hello world", &plaintext);
/// ```
///
/// [`ChaCha20`]: crate::chacha::ChaCha20
pub struct Salsa20<S: State = Init> {
    key: Key,
    keystream: Keystream<SalsaCore>,
    _state: PhantomData<S>
}

impl Salsa20<Init> {
    /// Create a new `Salsa20` instance.
    ///
    /// # Arguments
    ///
    /// * `key` - The 128-bit or 256-bit key material.
    #[inline]
    pub fn new<K: GenericKey>(key: K) -> Salsa20<NeedsIv> {
        Self::new_with_rounds(key, Rounds::R20)
    }

    /// Create a new `Salsa` instance with a reduced (or explicit) number of rounds.
    pub fn new_with_rounds<K: GenericKey>(key: K, rounds: Rounds) -> Salsa20<NeedsIv> {
        Salsa20::<NeedsIv> {
            key: key.to_key(),
            keystream: Keystream::empty(rounds),
            _state: PhantomData
        }
    }

    /// Constructs a `Salsa20` instance from runtime-sized inputs.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidKeyLength`] if `key` is neither 16 nor 32 bytes.
    /// - [`Error::InvalidNonceLength`] if `nonce` is not 8 bytes.
    pub fn from_slices(
        key: &[u8],
        nonce: &[u8],
        counter: u64,
        rounds: Rounds
    ) -> Result<Salsa20<Ready>, Error> {
        let key = KeyRef::try_from(key)?;
        let nonce = crate::buf::LegacyNonce::try_from(nonce).map_err(|err| {
            trace!(warn, len = nonce.len(), "rejected Salsa20 nonce length");
            err
        })?;

        Ok(Self::new_with_rounds(key, rounds).set_iv_with_ctr(nonce, counter))
    }
}

impl_fmt! { Salsa20: Init }

impl Salsa20<NeedsIv> {
    /// Set the initialization vector to use for the next [`Ready`] state.
    ///
    /// # Arguments
    ///
    /// * `iv` - The 64-bit initialization vector.
    /// * `counter` - The value at which the 64-bit block counter should start, generally zero.
    pub fn set_iv_with_ctr<IV>(self, iv: IV, counter: u64) -> Salsa20<Ready>
        where IV: GenericIv<Size = U8>
    {
        let words = init_state(self.key.as_slice(), iv.as_slice(), counter);
        let rounds = self.keystream.rounds();

        Salsa20::<Ready> {
            key: self.key,
            keystream: Keystream::new(words, CounterWidth::U64, rounds),
            _state: PhantomData
        }
    }

    /// Set the initialization vector to use for the next [`Ready`] state.
    #[inline]
    pub fn set_iv<IV: GenericIv<Size = U8>>(self, iv: IV) -> Salsa20<Ready> {
        self.set_iv_with_ctr(iv, 0)
    }
}

stream_cipher_api! { Salsa20 }
