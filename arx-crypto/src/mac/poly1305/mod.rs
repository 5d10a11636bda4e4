//! The `Poly1305` One-Time Message Authentication Code
//!
//! `Poly1305` evaluates the message as a polynomial over `GF(2^130 - 5)` at the secret point `r`
//! and masks the result with the secret pad `s`. It is only secure when each key authenticates
//! a single message, which is why every finishing operation consumes the instance.

mod accum;
mod key;
pub mod state;

pub use key::{GenericKey, Key, KeyRef, KEY_SIZE};

use accum::Accumulator;
use state::{State, Init, Ready, Streaming};
use core::marker::PhantomData;
use subtle::ConstantTimeEq;
use crate::aead::Tag;
use crate::Error;

/// The `Poly1305` Message Authentication Code (MAC)
///
/// # Example
///
/// ```
/// use arx_crypto::mac::{Poly1305, poly1305::Key};
///
/// let key: Key = [7u8; 32].into();
///
/// let tag = Poly1305::new(key.as_ref())
///     .update(b"hello world")
///     .update(b", how are you")
///     .finalize();
///
/// let o_tag = Poly1305::new(key.as_ref())
///     .mac(b"hello world, how are you");
///
/// assert_eq!(tag, o_tag);
/// ```
pub struct Poly1305<S: State = Init> {
    accum: Accumulator,
    _state: PhantomData<S>
}

opaque_dbg! { Poly1305<S: State> }

impl Poly1305<Init> {
    /// Creates a new `Poly1305` instance with the provided key.
    ///
    /// # Arguments
    ///
    /// * `key` - The one-time key, the first 16 bytes are clamped to form `r`.
    ///
    /// # Example
    ///
    /// ```
    /// use arx_crypto::mac::{Poly1305, poly1305::Key};
    ///
    /// let key: Key = [0u8; 32].into();
    /// let poly = Poly1305::new(key.as_ref());
    /// # drop(poly);
    /// ```
    pub fn new<K: GenericKey>(key: K) -> Poly1305<Ready> {
        Poly1305::<Ready> {
            accum: Accumulator::new(key.bytes()),
            _state: PhantomData
        }
    }

    /// Creates a new `Poly1305` instance from a key of run-time length.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKeyLength`] if `key` is not exactly 32 bytes.
    pub fn from_slice(key: &[u8]) -> Result<Poly1305<Ready>, Error> {
        KeyRef::try_from(key).map(Self::new)
    }
}

impl<S: State> Poly1305<S> {
    #[inline]
    fn with_state<N: State>(self) -> Poly1305<N> {
        Poly1305::<N> { accum: self.accum, _state: PhantomData }
    }
}

impl Poly1305<Ready> {
    /// Computes the MAC of `input`.
    ///
    /// # Example
    ///
    /// ```
    /// use arx_crypto::mac::{Poly1305, poly1305::Key};
    ///
    /// let key: Key = [0u8; 32].into();
    /// let tag = Poly1305::new(key.as_ref()).mac(b"message");
    /// # let _ = tag;
    /// ```
    #[inline]
    pub fn mac(mut self, input: &[u8]) -> Tag {
        self.accum.update(input);
        self.accum.finalize()
    }

    /// Computes the MAC the way `ChaCha20-Poly1305` does.
    ///
    /// The authenticated message is `additional`, zero padding to 16 bytes, `input`, zero
    /// padding to 16 bytes, then both lengths as little-endian `u64`s.
    ///
    /// # Arguments
    ///
    /// * `input` - The ciphertext.
    /// * `additional` - The additional authenticated data (AAD).
    pub fn aead_mac(self, input: &[u8], additional: &[u8]) -> Tag {
        self.update(additional)
            .pad()
            .update(input)
            .pad()
            .encode_sizes(additional.len() as u64, input.len() as u64)
            .finalize()
    }

    /// Computes the MAC of `input` and compares it against `tag` in constant time.
    ///
    /// # Errors
    ///
    /// [`Error::Authentication`] if the tags differ.
    ///
    /// # Example
    ///
    /// ```
    /// use arx_crypto::{mac::{Poly1305, poly1305::Key}, Error};
    ///
    /// let key: Key = [3u8; 32].into();
    /// let tag = Poly1305::new(key.as_ref()).mac(b"message");
    ///
    /// assert!(Poly1305::new(key.as_ref()).verify(b"message", &tag).is_ok());
    /// assert_eq!(
    ///     Poly1305::new(key.as_ref()).verify(b"massage", &tag),
    ///     Err(Error::Authentication)
    /// );
    /// ```
    pub fn verify(self, input: &[u8], tag: &Tag) -> Result<(), Error> {
        let computed = self.mac(input);

        if bool::from(computed.ct_eq(tag)) {
            Ok(())
        } else {
            Err(Error::Authentication)
        }
    }

    /// Absorbs `input`, transitioning into the [`Streaming`] state.
    ///
    /// # Example
    ///
    /// ```
    /// use arx_crypto::mac::{Poly1305, poly1305::Key};
    ///
    /// let key: Key = [0u8; 32].into();
    /// let tag = Poly1305::new(key.as_ref())
    ///     .update(b"chunk1")
    ///     .update(b"chunk2")
    ///     .finalize();
    /// # let _ = tag;
    /// ```
    #[inline]
    pub fn update(mut self, input: &[u8]) -> Poly1305<Streaming> {
        self.accum.update(input);
        self.with_state()
    }

    /// Transitions into the [`Streaming`] state without absorbing anything.
    #[inline]
    pub fn stream(self) -> Poly1305<Streaming> {
        self.with_state()
    }
}

impl Poly1305<Streaming> {
    /// Absorbs more input.
    #[inline]
    pub fn update(mut self, input: &[u8]) -> Self {
        self.absorb(input);
        self
    }

    /// Zero-pads the data absorbed so far up to a multiple of 16 bytes.
    ///
    /// On a 16-byte boundary this does nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use arx_crypto::mac::{Poly1305, poly1305::Key};
    ///
    /// let key: Key = [9u8; 32].into();
    ///
    /// let padded = Poly1305::new(key.as_ref()).update(b"abc").pad().finalize();
    /// let explicit = Poly1305::new(key.as_ref()).mac(&[b'a', b'b', b'c', 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    ///
    /// assert_eq!(padded, explicit);
    /// ```
    #[inline]
    pub fn pad(mut self) -> Self {
        self.pad_block();
        self
    }

    /// Absorbs two lengths, each as a little-endian `u64`.
    #[inline]
    pub fn encode_sizes(mut self, first: u64, second: u64) -> Self {
        self.absorb_sizes(first, second);
        self
    }

    /// Finishes the computation, returning the [`Tag`].
    ///
    /// A pending partial block is padded with a single `1` byte and zeroes. The accumulator
    /// and key material are zeroed once the tag is produced.
    #[inline]
    pub fn finalize(self) -> Tag {
        self.accum.finalize()
    }

    #[inline]
    pub(crate) fn absorb(&mut self, input: &[u8]) {
        self.accum.update(input);
    }

    #[inline]
    pub(crate) fn pad_block(&mut self) {
        self.accum.pad();
    }

    #[inline]
    pub(crate) fn absorb_sizes(&mut self, first: u64, second: u64) {
        self.accum.encode_sizes(first, second);
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::test_utils::{AnyList, BoundList};
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(5_000))]

        #[test]
        fn chunking_is_irrelevant(
            inputs in any::<AnyList<16, BoundList<64>>>(),
            key in any::<Key>()
        ) {
            let mut poly = Poly1305::new(key.as_ref()).stream();
            for chunk in inputs.as_slice() {
                poly = poly.update(chunk.as_slice());
            }

            prop_assert_eq!(poly.finalize(), Poly1305::new(key).mac(&inputs.join()));
        }

        #[test]
        fn key_change_changes_tag(
            input in any::<BoundList<256>>(),
            key in any::<[u8; 32]>(),
            flip in 0usize..16
        ) {
            // only s, which is never clamped
            let mut other = key;
            other[16 + flip] ^= 1;

            prop_assert_ne!(
                Poly1305::new(&key).mac(input.as_slice()),
                Poly1305::new(&other).mac(input.as_slice())
            );
        }
    }
}
