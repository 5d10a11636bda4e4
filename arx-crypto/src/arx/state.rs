//! State marker types and traits for the stream ciphers.
//!
//! [`ChaCha20`], [`Salsa20`], and [`XSalsa20`] share the same state machine, so they share the
//! same markers.
//!
//! [`ChaCha20`]: crate::chacha::ChaCha20
//! [`Salsa20`]: crate::salsa::Salsa20
//! [`XSalsa20`]: crate::salsa::XSalsa20

use crate::sealed::Sealed;

/// Represents the possible states that a stream cipher may be in.
pub trait State: Sealed {}

/// Represents the states which **can** process (encrypt / decrypt) data.
pub trait CanProcess: State {}

define_state! {
    /// The ingress state, where the key is set and the instance is constructed.
    Init,
    /// The instance requires a new initialization vector (IV).
    NeedsIv,
    /// The instance is ready to perform encryption / decryption.
    Ready,
    /// The instance is encrypting some stream of unknown length.
    Streaming
}

impl CanProcess for Ready {}
impl CanProcess for Streaming {}
