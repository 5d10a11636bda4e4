//! The `ChaCha20-Poly1305` AEAD (RFC 8439)
//!
//! The first block of `ChaCha20` keystream (counter `0`) supplies the one-time `Poly1305` key,
//! the payload is encrypted starting at counter `1`. The tag authenticates
//!
//! ```text
//! aad || pad16(aad) || ciphertext || pad16(ciphertext) || le64(len(aad)) || le64(len(ciphertext))
//! ```
//!
//! Opening verifies the tag before a single byte of plaintext is produced.

pub mod states;

use states::{State, Init, EncryptAad, CanUpdate, CanUpdateAad};

#[doc(inline)]
pub use states::Encrypt;

use core::marker::PhantomData;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;
use crate::aead::{Aad, Tag};
use crate::arx::state::Streaming;
use crate::buf::{GenericIv, Nonce, U12};
use crate::chacha::{ChaCha20, GenericKey, KeyRef};
use crate::mac::Poly1305;
use crate::mac::poly1305::state::Streaming as MacStreaming;
use crate::Error;

opaque_dbg! { ChaCha20Poly1305<S: State> }

/// Encrypts `plain` into `out`, returning the authentication tag.
///
/// # Errors
///
/// - [`Error::InvalidSize`] if `out` is shorter than `plain`.
/// - [`Error::KeystreamExhausted`] if `plain` exceeds the 256 GiB a single nonce can cover.
///
/// # Example
///
/// ```
/// use arx_crypto::aead::chacha20_poly1305::{encrypt, decrypt};
///
/// let key = [7u8; 32];
/// let nonce = [3u8; 12];
/// let mut cipher = [0u8; 11];
///
/// let tag = encrypt(&key, &nonce, b"hello world", &mut cipher, "header").unwrap();
///
/// let mut plain = [0u8; 11];
/// decrypt(&key, &nonce, &cipher, &mut plain, "header", tag).unwrap();
/// assert_eq!(&plain, b"hello world");
/// ```
pub fn encrypt<K, IV, A>(
    key: K, iv: IV,
    plain: &[u8], out: &mut [u8],
    aad: A
) -> Result<Tag, Error>
    where
        K: GenericKey,
        IV: GenericIv<Size = U12>,
        A: Aad
{
    ChaCha20Poly1305::new(key, iv).seal_into(plain, out, aad)
}

/// Encrypts `in_out` in place, returning the authentication tag.
///
/// # Errors
///
/// [`Error::KeystreamExhausted`] if `in_out` exceeds what a single nonce can cover, in which case
/// `in_out` is untouched.
pub fn encrypt_in_place<K, IV, A>(key: K, iv: IV, in_out: &mut [u8], aad: A) -> Result<Tag, Error>
    where
        K: GenericKey,
        IV: GenericIv<Size = U12>,
        A: Aad
{
    ChaCha20Poly1305::new(key, iv).seal_in_place(in_out, aad)
}

/// Verifies `tag` and, only if it matches, decrypts `cipher` into `out`.
///
/// # Errors
///
/// - [`Error::InvalidSize`] if `out` is shorter than `cipher`.
/// - [`Error::KeystreamExhausted`] if `cipher` exceeds what a single nonce can cover.
/// - [`Error::Authentication`] if the tag does not match. `out` is left untouched.
pub fn decrypt<K, IV, A>(
    key: K, iv: IV,
    cipher: &[u8], out: &mut [u8],
    aad: A, tag: Tag
) -> Result<(), Error>
    where
        K: GenericKey,
        IV: GenericIv<Size = U12>,
        A: Aad
{
    ChaCha20Poly1305::new(key, iv).open_into(cipher, out, aad, tag)
}

/// Verifies `tag` and, only if it matches, decrypts `in_out` in place.
///
/// # Errors
///
/// - [`Error::KeystreamExhausted`] if `in_out` exceeds what a single nonce can cover.
/// - [`Error::Authentication`] if the tag does not match. `in_out` still holds the ciphertext.
pub fn decrypt_in_place<K, IV, A>(
    key: K, iv: IV,
    in_out: &mut [u8],
    aad: A, tag: Tag
) -> Result<(), Error>
where
    K: GenericKey,
    IV: GenericIv<Size = U12>,
    A: Aad
{
    ChaCha20Poly1305::new(key, iv).open_in_place(in_out, aad, tag)
}

/// Authenticates `aad` and `cipher`, consuming the MAC.
fn compute_tag(poly: Poly1305<MacStreaming>, aad: &[u8], cipher: &[u8]) -> Tag {
    poly.update(aad)
        .pad()
        .update(cipher)
        .pad()
        .encode_sizes(aad.len() as u64, cipher.len() as u64)
        .finalize()
}

/// Fills `out` with the one-time `Poly1305` key, consuming keystream block `0`.
fn derive_mac_key(chacha: &mut ChaCha20<Streaming>, out: &mut [u8; 32]) {
    let mut block = [0u8; 64];

    // a fresh 32-bit counter always has its first block.
    let _res = chacha.keystream_into(&mut block);
    debug_assert!(_res.is_ok());

    out.copy_from_slice(&block[..32]);
    block.zeroize();
}

/// The `ChaCha20-Poly1305` Authenticated Encryption with Associated Data (AEAD)
///
/// An instance is bound to a single (key, nonce) pair and produces exactly one tag. The one-shot
/// operations ([`seal_in_place`], [`open_in_place`], ...) consume it, as does [`finalize`] at the
/// end of a streaming seal.
///
/// # Warning
///
/// Never seal two messages under the same key and nonce. Doing so reveals the XOR of the
/// plaintexts and the one-time `Poly1305` key, allowing forgeries.
///
/// # Example
///
/// ```
/// use arx_crypto::aead::ChaCha20Poly1305;
///
/// let key = [7u8; 32];
/// let nonce = [3u8; 12];
///
/// let mut in_out = *b"hello world";
/// let tag = ChaCha20Poly1305::new(&key, &nonce)
///     .seal_in_place(&mut in_out, "header")
///     .unwrap();
///
/// // the streaming interface produces the same ciphertext and tag.
/// let mut streamed = [0u8; 11];
/// let s_tag = ChaCha20Poly1305::new(&key, &nonce)
///     .update_aad("head")
///     .update_aad("er")
///     .finish()
///     .update(b"hello ", &mut streamed[..6]).unwrap()
///     .update(b"world", &mut streamed[6..]).unwrap()
///     .finalize();
///
/// assert_eq!(tag, s_tag);
/// assert_eq!(in_out, streamed);
///
/// ChaCha20Poly1305::new(&key, &nonce)
///     .open_in_place(&mut in_out, "header", tag)
///     .unwrap();
///
/// assert_eq!(&in_out, b"hello world");
/// ```
///
/// [`seal_in_place`]: ChaCha20Poly1305::seal_in_place
/// [`open_in_place`]: ChaCha20Poly1305::open_in_place
/// [`finalize`]: ChaCha20Poly1305::finalize
#[must_use]
pub struct ChaCha20Poly1305<S: State = Init> {
    chacha: ChaCha20<Streaming>,
    poly: Poly1305<MacStreaming>,
    aad_len: u64,
    data_len: u64,
    _state: PhantomData<S>
}

impl ChaCha20Poly1305<Init> {
    /// Creates a new instance, deriving the one-time `Poly1305` key.
    ///
    /// # Arguments
    ///
    /// * `key` - The 256-bit key.
    /// * `iv` - The 96-bit nonce, never reused with the same key.
    pub fn new<K, IV>(key: K, iv: IV) -> Self
        where
            K: GenericKey,
            IV: GenericIv<Size = U12>
    {
        let mut chacha = ChaCha20::new(key).set_iv(iv).stream();
        let mut mac_key = [0u8; 32];
        derive_mac_key(&mut chacha, &mut mac_key);

        let poly = Poly1305::new(&mac_key).stream();
        mac_key.zeroize();

        Self {
            chacha,
            poly,
            aad_len: 0,
            data_len: 0,
            _state: PhantomData
        }
    }

    /// Creates a new instance from a key and nonce of run-time length.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidKeyLength`] if `key` is not 32 bytes.
    /// - [`Error::InvalidNonceLength`] if `nonce` is not 12 bytes.
    pub fn from_slices(key: &[u8], nonce: &[u8]) -> Result<Self, Error> {
        let key = KeyRef::try_from(key)?;
        let nonce = Nonce::try_from(nonce).map_err(|err| {
            trace!(warn, len = nonce.len(), "rejected ChaCha20-Poly1305 nonce length");
            err
        })?;

        Ok(Self::new(key, nonce))
    }

    /// Encrypts `in_out` in place and returns the tag.
    ///
    /// # Errors
    ///
    /// [`Error::KeystreamExhausted`] if `in_out` exceeds what a single nonce can cover, in which
    /// case `in_out` is untouched.
    pub fn seal_in_place<A: Aad>(mut self, in_out: &mut [u8], aad: A) -> Result<Tag, Error> {
        self.chacha.encrypt_in_place(in_out)?;
        Ok(compute_tag(self.poly, aad.as_bytes(), in_out))
    }

    /// Encrypts `plain` into `out` and returns the tag.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSize`] if `out` is shorter than `plain`.
    /// - [`Error::KeystreamExhausted`] if `plain` exceeds what a single nonce can cover.
    pub fn seal_into<A: Aad>(mut self, plain: &[u8], out: &mut [u8], aad: A) -> Result<Tag, Error> {
        self.chacha.encrypt_into(plain, out)?;
        Ok(compute_tag(self.poly, aad.as_bytes(), &out[..plain.len()]))
    }

    alloc! {
        /// Encrypts `plain`, returning the ciphertext and the tag.
        ///
        /// # Errors
        ///
        /// [`Error::KeystreamExhausted`] if `plain` exceeds what a single nonce can cover.
        pub fn seal<A: Aad>(self, plain: &[u8], aad: A) -> Result<(alloc::vec::Vec<u8>, Tag), Error> {
            let mut out = alloc::vec![0u8; plain.len()];
            self.seal_into(plain, &mut out, aad).map(move |tag| (out, tag))
        }
    }

    /// Verifies `tag`, then decrypts `in_out` in place.
    ///
    /// # Errors
    ///
    /// - [`Error::KeystreamExhausted`] if `in_out` exceeds what a single nonce can cover.
    /// - [`Error::Authentication`] if the tag does not match. `in_out` still holds the
    ///   ciphertext, no plaintext is ever produced for an unauthenticated message.
    pub fn open_in_place<A: Aad>(self, in_out: &mut [u8], aad: A, tag: Tag) -> Result<(), Error> {
        let (mut this, poly) = self.split();
        this.verify(poly, in_out, aad.as_bytes(), &tag)?;
        this.chacha.decrypt_in_place(in_out).map(|_| ())
    }

    /// Verifies `tag`, then decrypts `cipher` into `out`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSize`] if `out` is shorter than `cipher`.
    /// - [`Error::KeystreamExhausted`] if `cipher` exceeds what a single nonce can cover.
    /// - [`Error::Authentication`] if the tag does not match. `out` is left untouched.
    pub fn open_into<A: Aad>(
        self,
        cipher: &[u8],
        out: &mut [u8],
        aad: A,
        tag: Tag
    ) -> Result<(), Error> {
        if out.len() < cipher.len() {
            return Err(Error::InvalidSize);
        }

        let (mut this, poly) = self.split();
        this.verify(poly, cipher, aad.as_bytes(), &tag)?;
        this.chacha.decrypt_into(cipher, out)
    }

    alloc! {
        /// Verifies `tag`, then returns the decrypted `cipher`.
        ///
        /// # Errors
        ///
        /// - [`Error::KeystreamExhausted`] if `cipher` exceeds what a single nonce can cover.
        /// - [`Error::Authentication`] if the tag does not match.
        pub fn open<A: Aad>(self, cipher: &[u8], aad: A, tag: Tag) -> Result<alloc::vec::Vec<u8>, Error> {
            let mut out = alloc::vec![0u8; cipher.len()];
            self.open_into(cipher, &mut out, aad, tag).map(move |()| out)
        }
    }

    /// Sets the complete AAD, moving straight to encryption.
    #[inline]
    pub fn set_aad<A: Aad>(self, aad: A) -> ChaCha20Poly1305<Encrypt> {
        self.update_aad(aad).finish()
    }
}

/// The cipher half of an instance, once its MAC has been taken out.
struct Opening {
    chacha: ChaCha20<Streaming>
}

impl Opening {
    /// Recomputes the tag over `cipher` and compares it with `tag` in constant time.
    fn verify(&mut self, poly: Poly1305<MacStreaming>, cipher: &[u8], aad: &[u8], tag: &Tag) -> Result<(), Error> {
        self.chacha.ensure_available(cipher.len())?;

        let computed = compute_tag(poly, aad, cipher);

        if bool::from(computed.ct_eq(tag)) {
            Ok(())
        } else {
            trace!(debug, len = cipher.len(), "ChaCha20-Poly1305 authentication failed");
            Err(Error::Authentication)
        }
    }
}

impl<S: State> ChaCha20Poly1305<S> {
    #[inline]
    fn with_state<N: State>(self) -> ChaCha20Poly1305<N> {
        ChaCha20Poly1305::<N> {
            chacha: self.chacha,
            poly: self.poly,
            aad_len: self.aad_len,
            data_len: self.data_len,
            _state: PhantomData
        }
    }

    #[inline]
    fn split(self) -> (Opening, Poly1305<MacStreaming>) {
        (Opening { chacha: self.chacha }, self.poly)
    }
}

impl<S: CanUpdateAad> ChaCha20Poly1305<S> {
    /// Absorbs more AAD. Call [`finish`] once the AAD is complete.
    ///
    /// [`finish`]: ChaCha20Poly1305::finish
    pub fn update_aad<A: Aad>(mut self, aad: A) -> ChaCha20Poly1305<EncryptAad> {
        let aad = aad.as_bytes();
        self.poly.absorb(aad);
        self.aad_len += aad.len() as u64;
        self.with_state()
    }
}

impl ChaCha20Poly1305<EncryptAad> {
    /// Ends the AAD, padding it to a 16-byte boundary.
    pub fn finish(mut self) -> ChaCha20Poly1305<Encrypt> {
        self.poly.pad_block();
        self.with_state()
    }
}

impl<S: CanUpdate> ChaCha20Poly1305<S> {
    /// Encrypts `plain` into `cipher` and authenticates the result.
    ///
    /// # Errors
    ///
    /// If `cipher` is shorter than `plain`, or the keystream cannot cover `plain`, the instance
    /// is handed back and nothing is written.
    pub fn update(mut self, plain: &[u8], cipher: &mut [u8]) -> Result<ChaCha20Poly1305<Encrypt>, Self> {
        if self.chacha.encrypt_into(plain, cipher).is_err() {
            return Err(self);
        }

        self.poly.absorb(&cipher[..plain.len()]);
        self.data_len += plain.len() as u64;
        Ok(self.with_state())
    }

    /// Encrypts `in_out` in place and authenticates the result.
    ///
    /// # Errors
    ///
    /// If the keystream cannot cover `in_out` the instance is handed back and `in_out` is
    /// untouched.
    pub fn update_in_place(mut self, in_out: &mut [u8]) -> Result<ChaCha20Poly1305<Encrypt>, Self> {
        match self.chacha.encrypt_in_place(in_out) {
            Ok(cipher) => {
                self.poly.absorb(cipher);
                self.data_len += cipher.len() as u64;
                Ok(self.with_state())
            },
            Err(_) => Err(self)
        }
    }
}

impl ChaCha20Poly1305<Encrypt> {
    /// Completes the seal, returning the tag.
    pub fn finalize(self) -> Tag {
        self.poly
            .pad()
            .encode_sizes(self.aad_len, self.data_len)
            .finalize()
    }
}
