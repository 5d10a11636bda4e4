//! The states a [`Poly1305`] instance moves through.
//!
//! - `Init`: no key installed.
//! - `Ready`: keyed, nothing absorbed yet. One-shot operations consume it.
//! - `Streaming`: input is being absorbed incrementally, ended by `finalize`.
//!
//! Every terminal operation takes `self`, so an accumulator can never be updated after its tag
//! was produced.
//!
//! [`Poly1305`]: super::Poly1305

use crate::sealed::Sealed;

/// Represents the state of a `Poly1305` instance.
///
/// This trait is sealed and cannot be implemented outside of this crate.
pub trait State : Sealed {}

define_state! {
    /// The initial state of a `Poly1305` instance before any operations.
    Init,
    /// The keyed state, ready for a one-shot MAC or the first streaming update.
    Ready,
    /// The streaming state of a `Poly1305` instance during updates.
    Streaming,
}
