use core::fmt;

/// A generic error type representing an unspecified failure in cryptographic operations.
///
/// In cryptographic contexts, it is often necessary to hide the specific reason for
/// an operation's failure to prevent leaking sensitive information to potential attackers.
/// `Unspecified` serves this purpose by providing a simple, non-descriptive error type
/// that can be used in situations where the cause of the failure should not be exposed.
///
/// Any [`Error`] can be collapsed into `Unspecified` through `From`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Unspecified;

impl fmt::Display for Unspecified {
    /// Writes "Unspecified" to the formatter.
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Unspecified")
    }
}

std! { impl std::error::Error for Unspecified {} }

/// The failure conditions of this crate.
///
/// Construction errors (`InvalidKeyLength`, `InvalidNonceLength`, `InvalidRounds`) are raised
/// before any key schedule exists, so no output is ever produced alongside them. Processing
/// errors (`InvalidSize`, `KeystreamExhausted`) are detected before the first byte is written.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// The key length (in bytes) is not accepted by the algorithm.
    ///
    /// `ChaCha20`, `Poly1305`, and `ChaCha20-Poly1305` require exactly 32 bytes, the `Salsa20`
    /// family accepts 16 or 32 bytes.
    InvalidKeyLength(usize),
    /// The nonce length (in bytes) is not accepted by the algorithm.
    ///
    /// `ChaCha20` accepts 8 or 12 bytes, `Salsa20` 8 bytes, `XSalsa20` 24 bytes, and
    /// `ChaCha20-Poly1305` 12 bytes.
    InvalidNonceLength(usize),
    /// The round count is not one of 8, 12, or 20.
    InvalidRounds(u32),
    /// The output buffer is smaller than the input.
    InvalidSize,
    /// The block counter cannot produce the requested amount of keystream without wrapping.
    KeystreamExhausted,
    /// The authentication tag did not match, the associated plaintext was discarded.
    Authentication,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKeyLength(len) => write!(f, "invalid key length: {len} bytes"),
            Self::InvalidNonceLength(len) => write!(f, "invalid nonce length: {len} bytes"),
            Self::InvalidRounds(rounds) => write!(f, "invalid round count: {rounds}"),
            Self::InvalidSize => f.write_str("output buffer is smaller than the input"),
            Self::KeystreamExhausted => f.write_str("keystream exhausted for this key and nonce"),
            Self::Authentication => f.write_str("authentication failed"),
        }
    }
}

std! { impl std::error::Error for Error {} }

impl From<Error> for Unspecified {
    #[inline]
    fn from(_value: Error) -> Self {
        Self
    }
}
