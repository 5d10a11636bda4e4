//! Nonce Types and Sizes
use zeroize::Zeroize;
use core::convert::TryFrom;
use crate::Error;

/// A trait for types that represent nonce (IV) sizes.
///
/// This trait is sealed and can only be implemented within this crate.
pub trait IvSize : crate::sealed::Sealed {
    /// Returns the size of the nonce in bytes.
    fn size() -> usize;
}

macro_rules! make_iv_size {
    ($ident:ident = $size:literal) => {
        #[doc = concat!("Represents a `", stringify!($size), "` byte nonce size.")]
        pub struct $ident;

        impl $ident {
            #[doc = concat!(
                "The size of the nonce as a usize constant (`", stringify!($size), "`)"
            )]
            pub const SIZE: usize = $size;
        }

        impl $crate::sealed::Sealed for $ident {}

        impl $crate::buf::IvSize for $ident {
            #[doc = concat!("Returns the size of the nonce in bytes. (`", stringify!($size), "`)")]
            #[inline]
            fn size() -> usize {
                Self::SIZE
            }
        }
    };
}

make_iv_size! { U8 = 8 }
make_iv_size! { U12 = 12 }
make_iv_size! { U24 = 24 }

/// A trait for types that can be used as generic nonces.
pub trait GenericIv {
    /// The associated size type for this nonce.
    type Size : IvSize;

    /// Returns a reference to the nonce as a byte slice.
    fn as_slice(&self) -> &[u8];
}

macro_rules! def_nonce {
    ($(#[$meta:meta])* $ident:ident, $size:ident) => {
        $(#[$meta])*
        #[doc = ""]
        #[doc = concat!("Size: [`", stringify!($size), "`].")]
        #[doc = ""]
        #[doc = concat!("[`", stringify!($size), "`]: crate::buf::", stringify!($size))]
        #[repr(transparent)]
        #[cfg_attr(test, derive(Debug))]
        pub struct $ident {
            inner: [u8; $size::SIZE]
        }

        impl $ident {
            /// The size type for this nonce.
            pub const SIZE: $size = $size;

            #[doc = "Creates a new nonce"]
            pub const fn new(inner: [u8; $size::SIZE]) -> Self {
                Self { inner }
            }

            /// Returns a reference to the nonce as a slice.
            #[inline]
            pub const fn slice(&self) -> &[u8] {
                self.inner.as_slice()
            }

            /// Zeros out the contents of the nonce.
            #[inline]
            pub fn zero(&mut self) {
                self.inner.as_mut_slice().zeroize();
            }

            /// Creates a copy of the nonce.
            ///
            /// This type purposefully does not derive the `Copy` trait, to ensure that nonce
            /// reuse is explicit.
            #[inline]
            #[must_use]
            pub const fn copy(&self) -> Self {
                Self::new(self.inner)
            }
        }

        impl GenericIv for $ident {
            type Size = $size;

            #[inline]
            fn as_slice(&self) -> &[u8] {
                self.inner.as_slice()
            }
        }

        impl<'r> GenericIv for &'r $ident {
            type Size = $size;

            #[inline]
            fn as_slice(&self) -> &[u8] {
                self.inner.as_slice()
            }
        }

        impl GenericIv for [u8; $size::SIZE] {
            type Size = $size;

            #[inline]
            fn as_slice(&self) -> &[u8] {
                self
            }
        }

        impl<'r> GenericIv for &'r [u8; $size::SIZE] {
            type Size = $size;

            #[inline]
            fn as_slice(&self) -> &[u8] {
                *self
            }
        }

        impl From<[u8; $size::SIZE]> for $ident {
            fn from(value: [u8; $size::SIZE]) -> Self {
                Self::new(value)
            }
        }

        impl<'s> From<&'s [u8; $size::SIZE]> for $ident {
            fn from(value: &'s [u8; $size::SIZE]) -> Self {
                Self::new(*value)
            }
        }

        impl<'s> TryFrom<&'s [u8]> for $ident {
            type Error = Error;

            /// # Errors
            ///
            #[doc = concat!("[`Error::InvalidNonceLength`] unless `value` is exactly `", stringify!($size), "` bytes.")]
            fn try_from(value: &'s [u8]) -> Result<Self, Self::Error> {
                value.try_into()
                    .map(Self::new)
                    .map_err(|_| Error::InvalidNonceLength(value.len()))
            }
        }

        #[cfg(test)]
        impl proptest::arbitrary::Arbitrary for $ident {
            type Parameters = ();

            fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
                use proptest::strategy::Strategy as _;
                proptest::arbitrary::any::<[u8; $size::SIZE]>().prop_map($ident::new).boxed()
            }

            type Strategy = proptest::prelude::BoxedStrategy<Self>;
        }
    };
}

def_nonce!(
    /// The 96-bit IETF nonce used by `ChaCha20` (32-bit block counter) and `ChaCha20-Poly1305`.
    Nonce, U12
);
def_nonce!(
    /// The original 64-bit nonce used by `Salsa20` and by `ChaCha20` with a 64-bit block counter.
    LegacyNonce, U8
);
def_nonce!(
    /// The extended 192-bit nonce used by `XSalsa20`.
    XNonce, U24
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_from_checks_length() {
        assert!(Nonce::try_from([0u8; 12].as_slice()).is_ok());
        assert_eq!(
            Nonce::try_from([0u8; 8].as_slice()).unwrap_err(),
            Error::InvalidNonceLength(8)
        );
        assert_eq!(
            XNonce::try_from([0u8; 25].as_slice()).unwrap_err(),
            Error::InvalidNonceLength(25)
        );
        assert!(LegacyNonce::try_from([1u8; 8].as_slice()).is_ok());
    }

    #[test]
    fn zero_clears() {
        let mut nonce = XNonce::new([0xAA; 24]);
        nonce.zero();
        assert_eq!(nonce.slice(), &[0u8; 24]);
    }
}
