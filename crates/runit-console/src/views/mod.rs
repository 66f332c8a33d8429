//! Feature views
//!
//! Each view owns its last-fetched collection and, where it can write, a
//! draft. Views never touch the session directly: they borrow the
//! [`AuthController`] for backend access and notifications, and hand it
//! every failure so a rejected credential ends the session.

pub mod contracts;
pub mod dashboard;
pub mod draft;
pub mod nfts;
pub mod profile;
pub mod tokens;

pub use contracts::{ContractForm, ContractsView};
pub use dashboard::DashboardView;
pub use draft::{DraftSlot, FormFields};
pub use nfts::{MintForm, NftsView};
pub use profile::{ProfileForm, ProfileView};
pub use tokens::{TokenForm, TokensView, TransferForm};

use crate::{
	core::auth::AuthController,
	types::error::{Error, Result},
};

/// Reports a failed request and passes the outcome through
pub(crate) fn reported<T>(auth: &AuthController, outcome: Result<T>, failure: &str) -> Result<T> {
	if let Err(e) = &outcome {
		auth.observe(e);
		auth.toaster().error(e.notice(failure));
	}
	outcome
}

/// Reports input rejected before any request was issued
pub(crate) fn refused<T>(auth: &AuthController, err: Error) -> Result<T> {
	auth.toaster().error(err.to_string());
	Err(err)
}
