use core::marker::PhantomData;
use crate::arx::keystream::{CounterWidth, Keystream};
use crate::arx::state::{State, CanProcess, Init, NeedsIv, Ready, Streaming};
use crate::arx::{Core, Rounds, SalsaCore};
use crate::buf::{GenericIv, XNonce, U24};
use crate::Error;
use super::{init_state, key_state, GenericKey, Key, KeyRef};

/// Derives a 256-bit subkey from `key` and 16 bytes of `input` (`HSalsa20`).
///
/// `input` takes the place of the nonce and counter words. The state is permuted without the
/// final feed-forward, and words 0, 5, 10, 15, 6, 7, 8, 9 are serialized as the subkey.
///
/// # Example
///
/// ```
/// use arx_crypto::{salsa::hsalsa20, Rounds};
///
/// let subkey = hsalsa20(&[0u8; 32], &[0u8; 16], Rounds::R20);
/// assert_eq!(subkey.len(), 32);
/// ```
pub fn hsalsa20<K: GenericKey>(key: K, input: &[u8; 16], rounds: Rounds) -> Key {
    let mut words = key_state(key.slice());
    crate::arx::load_words(input, &mut words[6..10]);

    SalsaCore::permute(&mut words, rounds);

    let mut subkey = [0u8; 32];
    for (chunk, idx) in subkey.chunks_exact_mut(4).zip([0, 5, 10, 15, 6, 7, 8, 9]) {
        chunk.copy_from_slice(&words[idx].to_le_bytes());
    }

    zeroize::Zeroize::zeroize(&mut words);
    Key::B256(subkey)
}

/// The `XSalsa20` Stream Cipher
///
/// `Salsa20` keyed with a per-nonce subkey: the first 16 bytes of the 192-bit nonce feed
/// [`hsalsa20`], the last 8 become the `Salsa20` nonce. A 192-bit nonce is large enough to be
/// chosen at random.
///
/// # Example
///
/// ```
/// use arx_crypto::salsa::XSalsa20;
///
/// let (output, mut xsalsa) = XSalsa20::new(&[7u8; 32])
///     .set_iv(&[3u8; 24])
///     .encrypt_exact(b"hello world")
///     .unwrap();
///
/// let plaintext = xsalsa.set_iv(&[3u8; 24])
///     .decrypt_exact(&output)
///     .unwrap();
///
/// assert_eq!(b"hello world", &plaintext);
/// ```
pub struct XSalsa20<S: State = Init> {
    key: Key,
    keystream: Keystream<SalsaCore>,
    _state: PhantomData<S>
}

impl XSalsa20<Init> {
    /// Create a new `XSalsa20` instance.
    ///
    /// # Arguments
    ///
    /// * `key` - The 128-bit or 256-bit key material.
    #[inline]
    pub fn new<K: GenericKey>(key: K) -> XSalsa20<NeedsIv> {
        Self::new_with_rounds(key, Rounds::R20)
    }

    /// Create a new `XSalsa` instance with a reduced (or explicit) number of rounds. The subkey
    /// derivation runs the same number of rounds.
    pub fn new_with_rounds<K: GenericKey>(key: K, rounds: Rounds) -> XSalsa20<NeedsIv> {
        XSalsa20::<NeedsIv> {
            key: key.to_key(),
            keystream: Keystream::empty(rounds),
            _state: PhantomData
        }
    }

    /// Constructs an `XSalsa20` instance from runtime-sized inputs.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidKeyLength`] if `key` is neither 16 nor 32 bytes.
    /// - [`Error::InvalidNonceLength`] if `nonce` is not 24 bytes.
    pub fn from_slices(
        key: &[u8],
        nonce: &[u8],
        counter: u64,
        rounds: Rounds
    ) -> Result<XSalsa20<Ready>, Error> {
        let key = KeyRef::try_from(key)?;
        let nonce = XNonce::try_from(nonce).map_err(|err| {
            trace!(warn, len = nonce.len(), "rejected XSalsa20 nonce length");
            err
        })?;

        Ok(Self::new_with_rounds(key, rounds).set_iv_with_ctr(nonce, counter))
    }
}

impl_fmt! { XSalsa20: Init }

impl XSalsa20<NeedsIv> {
    /// Set the initialization vector to use for the next [`Ready`] state.
    ///
    /// # Arguments
    ///
    /// * `iv` - The 192-bit initialization vector.
    /// * `counter` - The value at which the 64-bit block counter should start, generally zero.
    pub fn set_iv_with_ctr<IV>(self, iv: IV, counter: u64) -> XSalsa20<Ready>
        where IV: GenericIv<Size = U24>
    {
        let (head, tail) = iv.as_slice().split_at(16);
        let mut input = [0u8; 16];
        input.copy_from_slice(head);

        let rounds = self.keystream.rounds();
        let subkey = hsalsa20(&self.key, &input, rounds);
        let words = init_state(subkey.as_slice(), tail, counter);

        XSalsa20::<Ready> {
            key: self.key,
            keystream: Keystream::new(words, CounterWidth::U64, rounds),
            _state: PhantomData
        }
    }

    /// Set the initialization vector to use for the next [`Ready`] state.
    #[inline]
    pub fn set_iv<IV: GenericIv<Size = U24>>(self, iv: IV) -> XSalsa20<Ready> {
        self.set_iv_with_ctr(iv, 0)
    }
}

stream_cipher_api! { XSalsa20 }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::salsa::Salsa20;
    use hex_literal::hex;

    #[test]
    fn hsalsa20_nacl() {
        let key = hex!("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742");
        let subkey = hsalsa20(&key, &[0u8; 16], Rounds::R20);

        assert_eq!(
            subkey.as_slice(),
            hex!("1b27556473e985d462cd51197a9a46c76009549eac6474f206c4ee0844f68389")
        );
    }

    #[test]
    fn hello_world() {
        let (ct, _) = XSalsa20::new(b"this is 32-byte key for xsalsa20")
            .set_iv(b"24-byte nonce for xsalsa")
            .encrypt_exact(b"Hello world!")
            .unwrap();

        assert_eq!(ct, hex!("002d4513843fc240c401e541"));
    }

    #[test]
    fn is_salsa20_under_subkey() {
        let key = [0x42u8; 32];
        let nonce: [u8; 24] = core::array::from_fn(|i| i as u8);

        let mut x = XSalsa20::new(&key).set_iv_with_ctr(&nonce, 7);
        let mut xs = [0u8; 150];
        x.keystream_into(&mut xs).unwrap();

        let mut input = [0u8; 16];
        input.copy_from_slice(&nonce[..16]);
        let subkey = hsalsa20(&key, &input, Rounds::R20);

        let mut tail = [0u8; 8];
        tail.copy_from_slice(&nonce[16..]);
        let mut s = Salsa20::new(subkey).set_iv_with_ctr(tail, 7);
        let mut ss = [0u8; 150];
        s.keystream_into(&mut ss).unwrap();

        assert_eq!(xs, ss);
    }

    #[test]
    fn from_slices_validates() {
        assert_eq!(
            XSalsa20::from_slices(&[0u8; 32], &[0u8; 8], 0, Rounds::R20).unwrap_err(),
            Error::InvalidNonceLength(8)
        );
        assert_eq!(
            XSalsa20::from_slices(&[0u8; 31], &[0u8; 24], 0, Rounds::R20).unwrap_err(),
            Error::InvalidKeyLength(31)
        );
    }
}

#[cfg(test)]
mod property_tests {
    use crate::test_utils::BoundList;
    use proptest::prelude::*;
    use crate::salsa::{XSalsa20, Key};
    use crate::buf::XNonce;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(2_000))]

        #[test]
        fn in_place_bijectivity(
            input in any::<BoundList<1024>>(),
            key in any::<Key>(),
            iv in any::<XNonce>()
        ) {
            let mut in_out = input;

            XSalsa20::new(key.as_ref())
                .set_iv(iv.copy())
                .encrypt_in_place(in_out.as_mut_slice())
                .unwrap();

            if in_out.len() >= 3 {
                prop_assert_ne!(in_out, input);
            }

            XSalsa20::new(key)
                .set_iv(iv)
                .decrypt_in_place(in_out.as_mut_slice())
                .unwrap();

            prop_assert_eq!(in_out, input);
        }

        #[test]
        fn nonce_separates_streams(
            key in any::<Key>(),
            a in any::<XNonce>(),
            b in any::<XNonce>()
        ) {
            prop_assume!(a.slice() != b.slice());

            let mut ka = [0u8; 64];
            let mut kb = [0u8; 64];
            XSalsa20::new(key.as_ref()).set_iv(a).keystream_into(&mut ka).unwrap();
            XSalsa20::new(key).set_iv(b).keystream_into(&mut kb).unwrap();

            prop_assert_ne!(ka, kb);
        }
    }
}
