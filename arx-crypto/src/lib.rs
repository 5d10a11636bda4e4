#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]
#![warn(
    clippy::pedantic,
    clippy::nursery,
    clippy::all
)]
// word / limb truncation is the point of most of this crate.
#![allow(clippy::cast_possible_truncation)]
// stupid lint IMO
#![allow(clippy::module_name_repetitions)]
// this devalues things which actually require the must-use attribute
#![allow(clippy::must_use_candidate)]
// Keys and nonces are passed by value on purpose, consuming them makes reuse explicit.
#![allow(clippy::needless_pass_by_value)]
// I don't need a linter lecturing me on performance
#![allow(clippy::inline_always)]
// the quarter rounds read far better with the RFC's single letter names.
#![allow(clippy::many_single_char_names)]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod sealed;
mod error;
pub mod buf;

#[macro_use]
pub mod arx;
pub mod chacha;
pub mod salsa;

pub mod aead;
pub mod mac;

std! {
    pub mod io;
}

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{Error, Unspecified};
pub use arx::Rounds;
