//! Sign-in lifecycle
//!
//! [`AuthController`] is the only writer of the session. It drives the
//! transitions between [`AuthState`]s: restoring a persisted credential at
//! start-up, logging in or registering, logging out, and invalidating a
//! session the backend stopped accepting.
//!
//! Whatever the path, a failed sign-in leaves no credential (in memory or on
//! disk) and no cached profile behind.

use crate::{
	core::{
		api::BackendApi,
		notify::Toaster,
		session::{AuthState, SessionReader, SessionStore},
	},
	types::{
		credential::Credential,
		error::{Error, ErrorKind, Result},
	},
};
use chrono::{DateTime, Utc};
use runit_types::{AccessToken, LoginRequest, RegisterRequest, UserProfile};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Notice shown on the login screen after the backend refuses a session
pub const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";

/// Input of the registration form
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
	pub username: String,
	pub email: String,
	pub password: String,
	/// Repeated password; checked only when given
	pub confirm_password: Option<String>,
	pub full_name: String,
}

impl RegistrationForm {
	fn validate(&self) -> Result<()> {
		require("username", &self.username)?;
		require("email", &self.email)?;
		require("password", &self.password)?;
		require("full name", &self.full_name)?;

		match &self.confirm_password {
			Some(confirm) if confirm != &self.password => Err(Error::PasswordMismatch),
			_ => Ok(()),
		}
	}
}

fn require(field: &'static str, value: &str) -> Result<()> {
	if value.trim().is_empty() {
		Err(Error::MissingField(field))
	} else {
		Ok(())
	}
}

/// Owner of the session and its transitions
pub struct AuthController {
	session: SessionStore,
	api: Arc<dyn BackendApi>,
	toaster: Toaster,
}

impl AuthController {
	pub fn new(session: SessionStore, api: Arc<dyn BackendApi>, toaster: Toaster) -> Self {
		Self {
			session,
			api,
			toaster,
		}
	}

	pub fn reader(&self) -> SessionReader {
		self.session.reader()
	}

	pub fn state(&self) -> AuthState {
		self.session.auth_state()
	}

	pub fn api(&self) -> &dyn BackendApi {
		self.api.as_ref()
	}

	pub fn toaster(&self) -> &Toaster {
		&self.toaster
	}

	/// Expiry stated by the current credential, when it is a JWT
	pub fn credential_expiry(&self) -> Option<DateTime<Utc>> {
		self.session.credential().and_then(|c| c.expires_at())
	}

	/// Verifies a credential restored from disk
	///
	/// Only acts while the session is still in its start-up
	/// [`AuthState::Authenticating`] state. The profile is fetched once; any
	/// failure discards the credential and leaves the session
	/// [`AuthState::Unauthenticated`]. Returns the resulting state.
	#[instrument(skip(self))]
	pub async fn bootstrap(&self) -> AuthState {
		if !self.session.is_bootstrapping() {
			return self.state();
		}

		let Some(credential) = self.session.credential() else {
			self.session.clear(AuthState::Unauthenticated, None);
			return self.state();
		};

		if credential.is_expired_at(Utc::now()) {
			info!("Stored credential has expired");
			self.session.clear(AuthState::Unauthenticated, None);
			return self.state();
		}

		match self.api.dashboard().await {
			Ok(dashboard) => {
				info!(username = %dashboard.user.username, "Session restored");
				self.session.authenticate(dashboard.user);
			},
			Err(e) => {
				warn!(error = %e, "Stored credential rejected");
				self.session.clear(AuthState::Unauthenticated, None);
			},
		}

		self.state()
	}

	/// Signs in with a username and password
	///
	/// # Errors
	/// - [`Error::InvalidState`] unless signed out or invalidated
	/// - [`Error::MissingField`] when either field is empty; nothing is sent
	/// - [`Error::AuthRejected`] when the backend refuses the credentials or
	///   the profile cannot be fetched afterwards
	#[instrument(skip(self, password))]
	pub async fn login(&self, username: &str, password: &str) -> Result<UserProfile> {
		self.ensure_signed_out()?;
		if let Err(e) = require("username", username).and(require("password", password)) {
			self.toaster.error(e.to_string());
			return Err(e);
		}

		self.session.begin_authentication();
		let request = LoginRequest {
			username: username.to_string(),
			password: password.to_string(),
		};
		let issued = self.api.login(&request).await;

		self.establish(issued, "Login successful!", "Login failed")
			.await
	}

	/// Creates an account and signs in with it
	///
	/// # Errors
	/// Same as [`AuthController::login`], plus [`Error::PasswordMismatch`]
	/// when a confirmation password is given and differs.
	#[instrument(skip_all, fields(username = %form.username))]
	pub async fn register(&self, form: &RegistrationForm) -> Result<UserProfile> {
		self.ensure_signed_out()?;
		if let Err(e) = form.validate() {
			self.toaster.error(e.to_string());
			return Err(e);
		}

		self.session.begin_authentication();
		let request = RegisterRequest {
			username: form.username.clone(),
			email: form.email.clone(),
			password: form.password.clone(),
			full_name: form.full_name.clone(),
		};
		let issued = self.api.register(&request).await;

		self.establish(issued, "Registration successful!", "Registration failed")
			.await
	}

	/// Signs out. Always succeeds.
	#[instrument(skip(self))]
	pub fn logout(&self) {
		self.session.clear(AuthState::Unauthenticated, None);
		self.toaster.success("Logged out successfully");
		info!("Logged out");
	}

	/// Drops a session the backend no longer accepts
	///
	/// The shell then shows the login screen with `reason`. Does nothing
	/// when no session is active.
	#[instrument(skip(self))]
	pub fn invalidate(&self, reason: &str) {
		match self.state() {
			AuthState::Authenticated | AuthState::Authenticating => {
				warn!("Session invalidated by backend");
				self.session
					.clear(AuthState::SessionInvalid, Some(reason.to_string()));
				self.toaster.error(reason);
			},
			AuthState::Unauthenticated | AuthState::SessionInvalid => {
				debug!("No active session to invalidate");
			},
		}
	}

	/// Inspects a failed feature request; a 401 ends the session
	pub fn observe(&self, error: &Error) {
		if error.is_unauthorized() {
			self.invalidate(SESSION_EXPIRED);
		}
	}

	fn ensure_signed_out(&self) -> Result<()> {
		match self.state() {
			AuthState::Unauthenticated | AuthState::SessionInvalid => Ok(()),
			state => Err(Error::InvalidState(state.describe().to_string())),
		}
	}

	async fn establish(
		&self,
		issued: Result<AccessToken>,
		success: &str,
		fallback: &str,
	) -> Result<UserProfile> {
		match self.try_establish(issued).await {
			Ok(profile) => {
				info!(username = %profile.username, "Signed in");
				self.toaster.success(success);
				Ok(profile)
			},
			Err(e) => {
				warn!(error = %e, "Sign-in failed");
				self.session.clear(AuthState::Unauthenticated, None);
				let notice = e.notice(fallback);
				self.toaster.error(notice.clone());
				match e.kind() {
					ErrorKind::Local => Err(e),
					_ => Err(Error::AuthRejected(notice)),
				}
			},
		}
	}

	async fn try_establish(&self, issued: Result<AccessToken>) -> Result<UserProfile> {
		let token = issued?;
		self.session
			.establish_credential(Credential::new(token.access_token))?;

		let dashboard = self.api.dashboard().await?;
		self.session.authenticate(dashboard.user.clone());
		Ok(dashboard.user)
	}
}

#[cfg(test)]
pub(crate) mod test_support {
	use super::*;
	use crate::core::storage::Storage;
	use std::path::Path;

	pub fn profile() -> UserProfile {
		UserProfile {
			username: "alice".to_string(),
			email: "alice@example.com".to_string(),
			wallet_connected: false,
			hedera_account: None,
		}
	}

	/// Controller over `dir` with an already accepted session
	pub fn signed_in(api: Arc<dyn BackendApi>, dir: &Path) -> AuthController {
		let session = SessionStore::open(Storage::open(dir).unwrap()).unwrap();
		session
			.establish_credential(Credential::new("test-token"))
			.unwrap();
		session.authenticate(profile());
		AuthController::new(session, api, Toaster::new())
	}

	/// Controller over `dir` with nothing stored
	pub fn signed_out(api: Arc<dyn BackendApi>, dir: &Path) -> AuthController {
		let session = SessionStore::open(Storage::open(dir).unwrap()).unwrap();
		AuthController::new(session, api, Toaster::new())
	}
}
