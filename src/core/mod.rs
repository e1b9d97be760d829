//! Core library components.
//!
//! Everything the keychain provider needs apart from the command line:
//! configuration, file name encoding, the cipher tool runner, and the key
//! store built on top of them.

pub mod cipher;
pub mod codec;
pub mod config;
pub mod constants;
pub mod provider;
pub mod runner;
pub mod store;
