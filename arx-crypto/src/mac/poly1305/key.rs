//! Key management for the `Poly1305` MAC.
//!
//! # Key Structures
//!
//! - `Key`: Represents a 32-byte secret key used for MAC computations.
//! - `KeyRef`: A reference to a `Key`, allowing for efficient key handling without ownership.
//!
//! # Traits
//!
//! - `GenericKey`: A sealed trait for generic key types, providing access to the key's bytes.
//!
//! The first half of the key is the multiplier `r` (clamped on use), the second half is the
//! pad `s` added to the final accumulator. A key must only ever authenticate one message.

use core::convert::TryFrom;
use zeroize::Zeroize;
use crate::sealed::Sealed;
use crate::Error;

/// The size of the Poly1305 key in bytes.
pub const KEY_SIZE: usize = 32;

/// A sealed trait for generic key types used in Poly1305.
///
/// This trait is sealed and cannot be implemented outside of this crate.
pub trait GenericKey : Sealed {
    #[doc(hidden)]
    fn bytes(&self) -> &[u8; KEY_SIZE];
}

/// Represents a 32-byte secret key for `Poly1305`.
///
/// This struct ensures that the key material is securely managed and zeroed from memory when
/// dropped.
#[repr(transparent)]
pub struct Key {
    inner: [u8; KEY_SIZE]
}

arb_key! { struct Key::new([u8; 32]) }

impl Key {
    /// Creates a new `Key` from a 32-byte array.
    ///
    /// # Example
    ///
    /// ```rust
    /// use arx_crypto::mac::poly1305::Key;
    ///
    /// let key = Key::new([0u8; 32]);
    /// # drop(key);
    /// ```
    pub const fn new(inner: [u8; KEY_SIZE]) -> Self {
        Self { inner }
    }

    /// Returns a reference to the key as a `KeyRef`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use arx_crypto::mac::poly1305::{Key, KeyRef};
    ///
    /// let key = Key::new([0u8; 32]);
    /// let key_ref: KeyRef = key.as_ref();
    /// # drop(key_ref); drop(key);
    /// ```
    pub const fn as_ref(&self) -> KeyRef {
        KeyRef::new(&self.inner)
    }
}

impl Zeroize for Key {
    /// Zeroes the key material in memory.
    #[inline]
    fn zeroize(&mut self) {
        self.inner.zeroize();
    }
}

opaque_dbg! { Key }

impl Sealed for Key {}

impl GenericKey for Key {
    #[doc(hidden)]
    #[inline]
    fn bytes(&self) -> &[u8; KEY_SIZE] {
        &self.inner
    }
}

impl From<[u8; KEY_SIZE]> for Key {
    /// Converts a 32-byte array into a `Key`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use arx_crypto::mac::poly1305::Key;
    ///
    /// let key: Key = [1u8; 32].into();
    /// # drop(key);
    /// ```
    #[inline]
    fn from(value: [u8; KEY_SIZE]) -> Self {
        Self::new(value)
    }
}

impl<'s> TryFrom<&'s [u8]> for Key {
    type Error = Error;

    /// # Errors
    ///
    /// [`Error::InvalidKeyLength`] if the slice is not exactly 32 bytes.
    #[inline]
    fn try_from(value: &'s [u8]) -> Result<Self, Self::Error> {
        KeyRef::try_from(value).map(|key| key.copy())
    }
}

impl Drop for Key {
    /// Drops the `Key`, ensuring that the key material is zeroed from memory.
    #[inline]
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// A reference to a [`Key`], allowing for efficient key handling without ownership.
#[repr(transparent)]
pub struct KeyRef<'r> {
    inner: &'r [u8; KEY_SIZE]
}

impl<'r> KeyRef<'r> {
    /// Creates a new `KeyRef` from a reference to a 32-byte array.
    pub const fn new(inner: &'r [u8; KEY_SIZE]) -> Self {
        Self { inner }
    }

    /// Creates a copy of the key as a [`Key`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use arx_crypto::mac::poly1305::{Key, KeyRef};
    ///
    /// let key_ref: KeyRef = (&[7u8; 32]).into();
    /// let owned_key = key_ref.copy();
    /// # drop(key_ref); drop(owned_key);
    /// ```
    pub const fn copy(&self) -> Key {
        Key::new(*self.inner)
    }
}

opaque_dbg! { KeyRef<'r> }

impl<'r> Sealed for KeyRef<'r> {}

impl<'r> GenericKey for KeyRef<'r> {
    #[doc(hidden)]
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

    /// Attempts to convert a slice of bytes into a `KeyRef`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKeyLength`] if the slice is not exactly 32 bytes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use arx_crypto::mac::poly1305::KeyRef;
    ///
    /// let key_slice = [5u8; 32];
    /// let key_ref = KeyRef::try_from(key_slice.as_slice()).unwrap();
    /// # drop(key_ref);
    /// ```
    #[inline]
    fn try_from(value: &'r [u8]) -> Result<Self, Self::Error> {
        match <&'r [u8; KEY_SIZE]>::try_from(value) {
            Ok(inner) => Ok(Self::new(inner)),
            Err(_) => {
                trace!(warn, len = value.len(), "rejected Poly1305 key length");
                Err(Error::InvalidKeyLength(value.len()))
            }
        }
    }
}

impl<'r> GenericKey for &'r [u8; KEY_SIZE] {
    #[doc(hidden)]
    #[inline]
    fn bytes(&self) -> &[u8; KEY_SIZE] {
        self
    }
}
