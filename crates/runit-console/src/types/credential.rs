//! Bearer credential issued by the backend
//!
//! The console treats the token as opaque. When it happens to be a JWT the
//! `exp` claim is read without signature validation, only to tell the user
//! when the session lapses and to skip a doomed bootstrap request.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque bearer token. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

#[derive(Deserialize)]
struct ExpiryClaim {
	exp: i64,
}

impl Credential {
	pub fn new(token: impl Into<String>) -> Self {
		Self(token.into())
	}

	/// Raw token for the `Authorization` header
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Expiry from the JWT `exp` claim, if the token is a JWT
	pub fn expires_at(&self) -> Option<DateTime<Utc>> {
		let mut parts = self.0.split('.');
		let (_, payload, _) = (parts.next()?, parts.next()?, parts.next()?);
		if parts.next().is_some() {
			return None;
		}

		let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
		let claim: ExpiryClaim = serde_json::from_slice(&bytes).ok()?;
		DateTime::from_timestamp(claim.exp, 0)
	}

	/// True only when the token states an expiry that has already passed
	pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
		self.expires_at().is_some_and(|exp| exp <= now)
	}
}

impl fmt::Debug for Credential {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Credential(<redacted>)")
	}
}
