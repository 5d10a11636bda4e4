//! The states of a [`ChaCha20Poly1305`] instance.
//!
//! ```text
//!   Init --set_aad--------------------> Encrypt --update--> Encrypt --finalize--> Tag
//!    |  \--update_aad--> EncryptAad --finish--^
//!    \----update------------------------------^
//! ```
//!
//! `Init` also offers the one-shot `seal` and `open` operations, which consume the instance.
//!
//! [`ChaCha20Poly1305`]: super::ChaCha20Poly1305

use crate::sealed::Sealed;

pub trait State: Sealed {}

define_state! {
    /// Freshly keyed, no AAD or data processed.
    Init,
    /// Absorbing AAD across multiple calls.
    EncryptAad,
    /// Encrypting data, the AAD is complete.
    Encrypt,
}

/// States which may absorb more AAD.
pub trait CanUpdateAad: State {}

/// States which may encrypt data.
pub trait CanUpdate: State {}

impl CanUpdateAad for Init {}
impl CanUpdateAad for EncryptAad {}

impl CanUpdate for Init {}
impl CanUpdate for Encrypt {}
