//! Session state and credential persistence
//!
//! [`SessionStore`] is the single writer of the session: it is owned by the
//! auth controller and is the only place the credential is persisted or
//! cleared. Every other component holds a [`SessionReader`], a cheap clone
//! over the same shared state that can look but not touch.
//!
//! Credential and cached profile live behind one lock, so clearing them is a
//! single write. A request built after [`SessionStore::clear`] returns can
//! never observe the old credential.

use crate::{
	constants::CREDENTIAL_KEY,
	core::storage::Storage,
	types::{credential::Credential, error::Result},
};
use chrono::{DateTime, Utc};
use runit_types::UserProfile;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

/// Lifecycle state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
	/// No credential; the login screen is shown
	Unauthenticated,
	/// A credential is being obtained or verified
	Authenticating,
	/// Credential accepted and exactly one profile cached
	Authenticated,
	/// The backend refused a credential mid-session; it has been discarded
	SessionInvalid,
}

impl AuthState {
	pub fn describe(&self) -> &'static str {
		match self {
			AuthState::Unauthenticated => "signed out",
			AuthState::Authenticating => "signing in",
			AuthState::Authenticated => "signed in",
			AuthState::SessionInvalid => "session expired",
		}
	}
}

/// On-disk form of the credential
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedCredential {
	access_token: Credential,
	stored_at: DateTime<Utc>,
}

#[derive(Debug)]
struct SessionState {
	auth: AuthState,
	bootstrapping: bool,
	credential: Option<Credential>,
	profile: Option<UserProfile>,
	notice: Option<String>,
}

/// Read-only view of the session, without the credential
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
	pub auth: AuthState,
	/// Set while the start-up profile check for a persisted credential runs
	pub bootstrapping: bool,
	pub profile: Option<UserProfile>,
	pub has_credential: bool,
	/// Why the session was invalidated, if it was
	pub notice: Option<String>,
}

fn read_state(lock: &RwLock<SessionState>) -> RwLockReadGuard<'_, SessionState> {
	lock.read().unwrap_or_else(PoisonError::into_inner)
}

/// Shared read handle on the session
#[derive(Debug, Clone)]
pub struct SessionReader {
	state: Arc<RwLock<SessionState>>,
}

impl SessionReader {
	pub fn snapshot(&self) -> SessionSnapshot {
		let state = read_state(&self.state);
		SessionSnapshot {
			auth: state.auth,
			bootstrapping: state.bootstrapping,
			profile: state.profile.clone(),
			has_credential: state.credential.is_some(),
			notice: state.notice.clone(),
		}
	}

	pub fn auth_state(&self) -> AuthState {
		read_state(&self.state).auth
	}

	pub fn profile(&self) -> Option<UserProfile> {
		read_state(&self.state).profile.clone()
	}

	pub fn is_authenticated(&self) -> bool {
		self.auth_state() == AuthState::Authenticated
	}

	/// Current credential, read fresh for every request
	pub(crate) fn credential(&self) -> Option<Credential> {
		read_state(&self.state).credential.clone()
	}
}

/// Owner of the session state and its persisted credential
#[derive(Debug)]
pub struct SessionStore {
	state: Arc<RwLock<SessionState>>,
	storage: Storage,
}

impl SessionStore {
	/// Opens the session, restoring a persisted credential if one exists
	///
	/// With a stored credential the session starts in
	/// [`AuthState::Authenticating`] awaiting bootstrap, otherwise in
	/// [`AuthState::Unauthenticated`]. An unreadable credential file is
	/// discarded rather than trusted.
	pub fn open(storage: Storage) -> Result<Self> {
		let credential = match storage.load::<PersistedCredential>(CREDENTIAL_KEY) {
			Ok(stored) => stored.map(|p| p.access_token),
			Err(e) => {
				warn!(error = %e, "Discarding unreadable stored credential");
				storage.remove(CREDENTIAL_KEY)?;
				None
			},
		};

		let auth = if credential.is_some() {
			AuthState::Authenticating
		} else {
			AuthState::Unauthenticated
		};
		debug!(state = ?auth, "Session opened");

		Ok(Self {
			state: Arc::new(RwLock::new(SessionState {
				auth,
				bootstrapping: credential.is_some(),
				credential,
				profile: None,
				notice: None,
			})),
			storage,
		})
	}

	pub fn reader(&self) -> SessionReader {
		SessionReader {
			state: self.state.clone(),
		}
	}

	pub fn auth_state(&self) -> AuthState {
		read_state(&self.state).auth
	}

	pub fn is_bootstrapping(&self) -> bool {
		read_state(&self.state).bootstrapping
	}

	pub(crate) fn credential(&self) -> Option<Credential> {
		read_state(&self.state).credential.clone()
	}

	fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
		self.state.write().unwrap_or_else(PoisonError::into_inner)
	}

	/// Marks a sign-in attempt as in flight
	pub(in crate::core) fn begin_authentication(&self) {
		let mut state = self.write();
		state.auth = AuthState::Authenticating;
		state.bootstrapping = false;
		state.notice = None;
	}

	/// Persists `credential` and makes it the one attached to requests
	pub(in crate::core) fn establish_credential(&self, credential: Credential) -> Result<()> {
		self.storage.save(
			CREDENTIAL_KEY,
			&PersistedCredential {
				access_token: credential.clone(),
				stored_at: Utc::now(),
			},
		)?;
		self.write().credential = Some(credential);
		Ok(())
	}

	/// Completes sign-in with the fetched profile
	pub(in crate::core) fn authenticate(&self, profile: UserProfile) {
		let mut state = self.write();
		state.auth = AuthState::Authenticated;
		state.bootstrapping = false;
		state.profile = Some(profile);
		state.notice = None;
	}

	/// Drops credential and profile in one step, then forgets the stored key
	///
	/// Never fails: a stored file that cannot be removed is logged and left
	/// for the next bootstrap to reject.
	pub(in crate::core) fn clear(&self, next: AuthState, notice: Option<String>) {
		{
			let mut state = self.write();
			state.credential = None;
			state.profile = None;
			state.auth = next;
			state.bootstrapping = false;
			state.notice = notice;
		}

		if let Err(e) = self.storage.remove(CREDENTIAL_KEY) {
			warn!(error = %e, "Failed to remove stored credential");
		}
	}
}
