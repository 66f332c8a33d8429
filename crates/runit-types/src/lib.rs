//! Common types for the Run.it console.
//!
//! This crate defines the request and response structures exchanged with the
//! Run.it backend API, along with the small set of domain enums (token kinds,
//! cost-incurring operation tags) that both the console library and its
//! terminal front-end share.

/// Account, identity and profile types.
pub mod account;
/// Smart contract, token and NFT types.
pub mod assets;
/// Authentication request and response types.
pub mod auth;
/// Dashboard, transaction history and service health types.
pub mod dashboard;
/// Tags for operations that incur ledger fees.
pub mod operation;

pub use account::*;
pub use assets::*;
pub use auth::*;
pub use dashboard::*;
pub use operation::{OperationTag, ParseOperationTagError};
