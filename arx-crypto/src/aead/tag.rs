use core::convert::TryFrom;
use core::fmt;
use subtle::{Choice, ConstantTimeEq};
use crate::Error;

/// Represents the authentication tag for AEADs and the `Poly1305` MAC.
#[must_use = "You must use the tag, or Poly1305 is doing nothing for you"]
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Tag {
    inner: [u8; 16],
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_fmt(format_args!("Tag({:?})", &self.inner))
    }
}

impl Tag {
    /// The size of the authentication tag in bytes.
    pub const CAPACITY: usize = 16;

    /// Creates a new `Tag` instance from a 16-byte array.
    pub const fn new(inner: [u8; Self::CAPACITY]) -> Self {
        Self { inner }
    }

    /// Creates a new `Tag` instance filled with zeros.
    ///
    /// # Example
    ///
    /// ```
    /// use arx_crypto::aead::Tag;
    ///
    /// let tag = Tag::new_zeroed();
    /// assert_eq!(tag.as_slice(), &[0u8; 16]);
    /// ```
    pub const fn new_zeroed() -> Self {
        Self::new([0u8; Self::CAPACITY])
    }

    /// Consumes the `Tag` and returns the underlying 16-byte array.
    #[inline]
    pub const fn take(self) -> [u8; Self::CAPACITY] {
        self.inner
    }

    /// Returns a reference to the tag as a byte slice.
    pub const fn as_slice(&self) -> &[u8] {
        self.inner.as_slice()
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        self.inner.as_mut_slice()
    }
}

impl ConstantTimeEq for Tag {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.inner[..].ct_eq(&other.inner[..])
    }
}

impl PartialEq for Tag {
    /// Constant Time Equivalence
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Tag {}

impl From<[u8; Tag::CAPACITY]> for Tag {
    #[inline]
    fn from(value: [u8; Tag::CAPACITY]) -> Self {
        Self::new(value)
    }
}

impl<'s> TryFrom<&'s [u8]> for Tag {
    type Error = Error;

    /// # Errors
    ///
    /// [`Error::InvalidSize`] unless `value` is exactly 16 bytes.
    fn try_from(value: &'s [u8]) -> Result<Self, Self::Error> {
        <[u8; Self::CAPACITY]>::try_from(value)
            .map(Self::new)
            .map_err(|_| Error::InvalidSize)
    }
}
