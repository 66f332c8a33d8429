//! Account, identity and profile types.
//!
//! Two distinct records describe a user. [`UserProfile`] is the identity the
//! session caches once a credential is accepted (it is embedded in the
//! dashboard payload). [`ProfileDetails`] is the optional personal profile a
//! user fills in explicitly through `POST /api/profile`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ledger account provisioned for a user at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerAccount {
	pub account_id: String,
	#[serde(default)]
	pub public_key: Option<String>,
}

/// Identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
	pub username: String,
	pub email: String,
	#[serde(default)]
	pub wallet_connected: bool,
	#[serde(default)]
	pub hedera_account: Option<LedgerAccount>,
}

impl UserProfile {
	/// Ledger account identifier, if one was provisioned.
	pub fn ledger_account_id(&self) -> Option<&str> {
		self.hedera_account
			.as_ref()
			.map(|account| account.account_id.as_str())
	}
}

/// Personal profile as stored by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDetails {
	#[serde(rename = "_id", default)]
	pub id: Option<String>,
	#[serde(default)]
	pub first_name: String,
	#[serde(default)]
	pub last_name: String,
	#[serde(default)]
	pub nickname: Option<String>,
	#[serde(default)]
	pub phone: Option<String>,
	#[serde(default)]
	pub nationality: Option<String>,
	#[serde(default = "default_role_code")]
	pub role_code: String,
	#[serde(default)]
	pub interests: Vec<String>,
	#[serde(default)]
	pub kyc_approved: bool,
}

/// Body of `POST /api/profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRequest {
	pub first_name: String,
	pub last_name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub nickname: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub nationality: Option<String>,
	pub role_code: String,
	pub interests: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub privacy_settings: Option<HashMap<String, bool>>,
}

/// Answer to `POST /api/profile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveProfileResponse {
	pub status: String,
	#[serde(default)]
	pub profile_id: Option<String>,
}

/// Ledger balance of the operator account (`GET /api/account/balance`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalance {
	pub hbar_balance: String,
	#[serde(default)]
	pub token_balances: HashMap<String, i64>,
	pub account_id: String,
}

/// Role code assigned when the user does not pick one.
pub fn default_role_code() -> String {
	"P".to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_profile_tolerates_missing_wallet_fields() {
		let profile: UserProfile = serde_json::from_value(serde_json::json!({
			"username": "alice",
			"email": "alice@example.com"
		}))
		.unwrap();

		assert!(!profile.wallet_connected);
		assert_eq!(profile.ledger_account_id(), None);
	}

	#[test]
	fn profile_details_default_role_code() {
		let details: ProfileDetails = serde_json::from_value(serde_json::json!({
			"_id": "p-1",
			"first_name": "Alice",
			"last_name": "Liddell"
		}))
		.unwrap();

		assert_eq!(details.id.as_deref(), Some("p-1"));
		assert_eq!(details.role_code, "P");
		assert!(details.interests.is_empty());
	}

	#[test]
	fn profile_request_omits_empty_optionals() {
		let request = ProfileRequest {
			first_name: "Alice".to_string(),
			last_name: "Liddell".to_string(),
			nickname: None,
			phone: None,
			nationality: None,
			role_code: default_role_code(),
			interests: vec![],
			privacy_settings: None,
		};

		let value = serde_json::to_value(&request).unwrap();
		assert!(value.get("nickname").is_none());
		assert_eq!(value["role_code"], "P");
	}
}
