use core::convert::TryFrom;
use crate::sealed::Sealed;
use crate::Error;
use zeroize::Zeroize;
use core::fmt;

/// A sealed trait for anything usable as a `Salsa20` / `XSalsa20` key.
pub trait GenericKey : Sealed {
    /// The raw key material, 16 or 32 bytes.
    fn slice(&self) -> &[u8];

    /// Copies the key material into an owned [`Key`].
    fn to_key(&self) -> Key;
}

macro_rules! basic_key_api {
    ($ident:ident $($lt:lifetime)?) => {
        impl $(<$lt>)? $ident $(<$lt>)? {
            #[inline]
            pub const fn new_128(key: $(&$lt)? [u8; 16]) -> Self {
                Self::B128(key)
            }

            #[inline]
            pub const fn new_256(key: $(&$lt)? [u8; 32]) -> Self {
                Self::B256(key)
            }

            /// The key length in bytes.
            #[inline]
            pub const fn len(&self) -> usize {
                match self {
                    Self::B256(_) => 32,
                    Self::B128(_) => 16
                }
            }

            #[doc = " Returns a friendly identifier for the key."]
            #[doc = ""]
            #[doc = " # Returns"]
            #[doc = ""]
            #[doc = concat!(" - `256` bit key: `\"", stringify!($ident), "::256\"`")]
            #[doc = concat!(" - `128` bit key: `\"", stringify!($ident), "::128\"`")]
            pub const fn ident(&self) -> &'static str {
                match self {
                    Self::B256(_) => concat!(stringify!($ident), "::256"),
                    Self::B128(_) => concat!(stringify!($ident), "::128"),
                }
            }

            #[inline]
            pub const fn as_slice(&self) -> &[u8] {
                match self {
                    Self::B256(array) => array.as_slice(),
                    Self::B128(array) => array.as_slice()
                }
            }
        }

        impl $(<$lt>)? fmt::Debug for $ident $(<$lt>)? {
            #[doc = "This writes the following to the `Formatter` (depending on the variant): "]
            #[doc = ""]
            #[doc = concat!(" - `256` bit key: `\"", stringify!($ident), "::256\"`")]
            #[doc = concat!(" - `128` bit key: `\"", stringify!($ident), "::128\"`")]
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.ident())
            }
        }

        impl $(<$lt>)? Sealed for $ident $(<$lt>)? {}

        impl $(<$lt>)? GenericKey for $ident $(<$lt>)? {
            #[inline]
            fn slice(&self) -> &[u8] {
                self.as_slice()
            }

            #[inline]
            fn to_key(&self) -> Key {
                self.copy()
            }
        }
    };
}

/// A 128-bit or 256-bit `Salsa20` key, zeroed from memory on drop.
///
/// 128-bit keys are expanded with the `"expand 16-byte k"` constants, the 16 key bytes filling
/// both key halves of the state.
#[must_use]
pub enum Key {
    B128([u8; 16]),
    B256([u8; 32])
}

basic_key_api! { Key }

impl Key {
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Self::B256(array) => array.as_mut_slice(),
            Self::B128(array) => array.as_mut_slice()
        }
    }

    /// Creates a copy of the key.
    ///
    /// `Key` is purposefully not `Clone`, copies of secret material should be explicit.
    #[inline]
    pub const fn copy(&self) -> Self {
        match self {
            Self::B128(raw) => Self::B128(*raw),
            Self::B256(raw) => Self::B256(*raw)
        }
    }

    #[inline]
    pub const fn as_ref(&self) -> KeyRef {
        match self {
            Self::B128(raw) => KeyRef::B128(raw),
            Self::B256(raw) => KeyRef::B256(raw)
        }
    }
}

impl Zeroize for Key {
    #[inline]
    fn zeroize(&mut self) {
        self.as_mut_slice().zeroize();
    }
}

impl Drop for Key {
    #[inline]
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl From<[u8; 16]> for Key {
    #[inline]
    fn from(value: [u8; 16]) -> Self {
        Self::B128(value)
    }
}

impl From<[u8; 32]> for Key {
    #[inline]
    fn from(value: [u8; 32]) -> Self {
        Self::B256(value)
    }
}

impl<'s> TryFrom<&'s [u8]> for Key {
    type Error = Error;

    /// # Errors
    ///
    /// [`Error::InvalidKeyLength`] unless `value` is 16 or 32 bytes.
    fn try_from(value: &'s [u8]) -> Result<Self, Self::Error> {
        KeyRef::try_from(value).map(|key| key.to_key())
    }
}

#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Key {
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        use proptest::prelude::*;
        prop_oneof![
            any::<[u8; 32]>().prop_map(Key::B256),
            any::<[u8; 16]>().prop_map(Key::B128)
        ].boxed()
    }

    type Strategy = proptest::strategy::BoxedStrategy<Self>;
}

/// A borrowed 128-bit or 256-bit `Salsa20` key.
#[must_use]
pub enum KeyRef<'r> {
    B128(&'r [u8; 16]),
    B256(&'r [u8; 32])
}

impl<'r> KeyRef<'r> {
    /// Copies the borrowed key material into an owned [`Key`].
    #[inline]
    pub const fn copy(&self) -> Key {
        match *self {
            Self::B128(raw) => Key::B128(*raw),
            Self::B256(raw) => Key::B256(*raw)
        }
    }
}

basic_key_api! { KeyRef 'r }

impl<'r> From<&'r [u8; 16]> for KeyRef<'r> {
    #[inline]
    fn from(value: &'r [u8; 16]) -> Self {
        Self::B128(value)
    }
}

impl<'r> From<&'r [u8; 32]> for KeyRef<'r> {
    #[inline]
    fn from(value: &'r [u8; 32]) -> Self {
        Self::B256(value)
    }
}

impl<'r> TryFrom<&'r [u8]> for KeyRef<'r> {
    type Error = Error;

    /// # Errors
    ///
    /// [`Error::InvalidKeyLength`] unless `value` is 16 or 32 bytes.
    fn try_from(value: &'r [u8]) -> Result<Self, Self::Error> {
        if let Ok(raw) = <&'r [u8; 32]>::try_from(value) {
            Ok(Self::B256(raw))
        } else if let Ok(raw) = <&'r [u8; 16]>::try_from(value) {
            Ok(Self::B128(raw))
        } else {
            trace!(warn, len = value.len(), "rejected Salsa20 key length");
            Err(Error::InvalidKeyLength(value.len()))
        }
    }
}

impl<'kr> Sealed for &'kr Key {}

impl<'kr> GenericKey for &'kr Key {
    #[inline]
    fn slice(&self) -> &[u8] {
        self.as_slice()
    }

    #[inline]
    fn to_key(&self) -> Key {
        self.copy()
    }
}

impl<'kr> Sealed for &'kr [u8; 16] {}

impl<'kr> GenericKey for &'kr [u8; 16] {
    #[inline]
    fn slice(&self) -> &[u8] {
        self.as_slice()
    }

    #[inline]
    fn to_key(&self) -> Key {
        Key::B128(**self)
    }
}

impl<'kr> GenericKey for &'kr [u8; 32] {
    #[inline]
    fn slice(&self) -> &[u8] {
        self.as_slice()
    }

    #[inline]
    fn to_key(&self) -> Key {
        Key::B256(**self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_sizes() {
        assert_eq!(Key::try_from([1u8; 16].as_slice()).unwrap().len(), 16);
        assert_eq!(Key::try_from([1u8; 32].as_slice()).unwrap().len(), 32);
        assert_eq!(
            Key::try_from([1u8; 24].as_slice()).unwrap_err(),
            Error::InvalidKeyLength(24)
        );
    }

    #[test]
    fn debug_names_size_only() {
        assert_eq!(std::format!("{:?}", Key::from([0xAA; 16])), "Key::128");
        assert_eq!(std::format!("{:?}", KeyRef::from(&[0xAA; 32])), "KeyRef::256");
    }
}
