#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![allow(non_snake_case)]
#![forbid(unsafe_code)]
#![warn(
    clippy::unwrap_used,
    clippy::mod_module_files,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused,
    unused_attributes,
    unused_imports,
    unused_mut,
    unused_must_use
)]

// Internal macros. Must come first!
#[macro_use]
pub(crate) mod macros;

pub use rand_core;
pub use subtle;

mod ecdh;
mod error;
mod field;
mod montgomery;
mod scalar;

pub use crate::{
    ecdh::{KEY_SIZE, PublicKey, Secret, SharedSecret, X25519_BASEPOINT_BYTES, x25519},
    error::{Error, Result},
    montgomery::MontgomeryPoint,
    scalar::clamp_integer,
};
