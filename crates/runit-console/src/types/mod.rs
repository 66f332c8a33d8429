//! Shared console types
//!
//! Error handling and the credential newtype used across the session, API
//! client and auth controller.

pub mod credential;
pub mod error;

pub use credential::Credential;
pub use error::{Error, ErrorKind, Result};
