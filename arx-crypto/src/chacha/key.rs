//! The 256-bit `ChaCha20` key.
use core::convert::TryFrom;
use zeroize::Zeroize;
use crate::sealed::Sealed;
use crate::Error;

/// The size of a `ChaCha20` key in bytes.
pub const KEY_SIZE: usize = 32;

/// A sealed trait for anything usable as a `ChaCha20` key.
pub trait GenericKey : Sealed {
    /// The raw key material.
    fn bytes(&self) -> &[u8; KEY_SIZE];
}

/// A 256-bit `ChaCha20` key, zeroed from memory on drop.
#[repr(transparent)]
#[must_use]
pub struct Key {
    inner: [u8; KEY_SIZE]
}

arb_key! { struct Key::new([u8; 32]) }

impl Key {
    /// Creates a new `Key` from a 32-byte array.
    pub const fn new(inner: [u8; KEY_SIZE]) -> Self {
        Self { inner }
    }

    /// Returns a reference to the key as a `KeyRef`.
    #[inline]
    pub const fn as_ref(&self) -> KeyRef {
        KeyRef::new(&self.inner)
    }

    #[inline]
    pub const fn as_slice(&self) -> &[u8] {
        self.inner.as_slice()
    }

    /// Creates a copy of the key.
    ///
    /// `Key` is purposefully not `Clone`, copies of secret material should be explicit.
    #[inline]
    pub const fn copy(&self) -> Self {
        Self::new(self.inner)
    }
}

impl Zeroize for Key {
    #[inline]
    fn zeroize(&mut self) {
        self.inner.zeroize();
    }
}

impl Drop for Key {
    #[inline]
    fn drop(&mut self) {
        self.zeroize();
    }
}

opaque_dbg! { Key }

impl Sealed for Key {}

impl GenericKey for Key {
    #[inline]
    fn bytes(&self) -> &[u8; KEY_SIZE] {
        &self.inner
    }
}

impl<'r> Sealed for &'r Key {}

impl<'r> GenericKey for &'r Key {
    #[inline]
    fn bytes(&self) -> &[u8; KEY_SIZE] {
        &self.inner
    }
}

impl From<[u8; KEY_SIZE]> for Key {
    #[inline]
    fn from(value: [u8; KEY_SIZE]) -> Self {
        Self::new(value)
    }
}

impl<'s> TryFrom<&'s [u8]> for Key {
    type Error = Error;

    /// # Errors
    ///
    /// [`Error::InvalidKeyLength`] unless `value` is exactly 32 bytes.
    fn try_from(value: &'s [u8]) -> Result<Self, Self::Error> {
        KeyRef::try_from(value).map(|key| key.copy())
    }
}

/// A borrowed 256-bit `ChaCha20` key.
#[repr(transparent)]
#[must_use]
pub struct KeyRef<'r> {
    inner: &'r [u8; KEY_SIZE]
}

impl<'r> KeyRef<'r> {
    /// Creates a new `KeyRef` borrowing the 32-byte array.
    #[inline]
    pub const fn new(inner: &'r [u8; KEY_SIZE]) -> Self {
        Self { inner }
    }

    /// Copies the borrowed key material into an owned [`Key`].
    #[inline]
    pub const fn copy(&self) -> Key {
        Key::new(*self.inner)
    }
}

opaque_dbg! { KeyRef<'r> }

impl<'r> Sealed for KeyRef<'r> {}

impl<'r> GenericKey for KeyRef<'r> {
    #[inline]
    fn bytes(&self) -> &[u8; KEY_SIZE] {
        self.inner
    }
}

impl<'r> From<&'r [u8; KEY_SIZE]> for KeyRef<'r> {
    #[inline]
    fn from(value: &'r [u8; KEY_SIZE]) -> Self {
        Self::new(value)
    }
}

impl<'r> TryFrom<&'r [u8]> for KeyRef<'r> {
    type Error = Error;

    /// # Errors
    ///
    /// [`Error::InvalidKeyLength`] unless `value` is exactly 32 bytes.
    fn try_from(value: &'r [u8]) -> Result<Self, Self::Error> {
        match <&'r [u8; KEY_SIZE]>::try_from(value) {
            Ok(inner) => Ok(Self::new(inner)),
            Err(_) => {
                trace!(warn, len = value.len(), "rejected ChaCha20 key length");
                Err(Error::InvalidKeyLength(value.len()))
            }
        }
    }
}

// shared by the salsa and poly1305 `GenericKey` impls for 32-byte arrays
impl<'r> Sealed for &'r [u8; KEY_SIZE] {}

impl<'r> GenericKey for &'r [u8; KEY_SIZE] {
    #[inline]
    fn bytes(&self) -> &[u8; KEY_SIZE] {
        self
    }
}
