//! Authentication types for the Run.it API.
//!
//! Login and registration both answer with an [`AccessToken`]; the token is
//! then presented as a bearer credential on every other endpoint.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
	pub username: String,
	pub password: String,
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
	pub username: String,
	pub email: String,
	pub password: String,
	pub full_name: String,
}

/// Token pair returned by the login and registration endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
	pub access_token: String,
	/// Always `"bearer"` for the current backend
	#[serde(default = "default_token_type")]
	pub token_type: String,
}

fn default_token_type() -> String {
	"bearer".to_string()
}

/// Body of `POST /api/auth/wallet-connect`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConnectRequest {
	pub account_id: String,
	pub public_key: String,
	pub signature: String,
}

/// Generic `{ "status": ..., "message": ... }` acknowledgement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusMessage {
	pub status: String,
	#[serde(default)]
	pub message: Option<String>,
}
