//! Error types and result handling for the console
//!
//! Every fallible library operation returns [`Result`]. Callers that only
//! need to decide how to react (return to login, show a toast, fix input)
//! match on [`Error::kind`] instead of individual variants.

use runit_types::OperationTag;
use std::path::PathBuf;

/// Convenience Result type alias using the local Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Credential missing, expired or refused; the session falls back to login
	AuthRejected,
	/// Any other read or write against the backend failed
	RequestFailed,
	/// Input was rejected locally before any request was issued
	Validation,
	/// Local persistence, configuration or I/O failure
	Local,
}

/// Console error type
#[derive(thiserror::Error, Debug)]
pub enum Error {
	// Auth errors
	#[error("Authentication rejected: {0}")]
	AuthRejected(String),

	#[error("Operation not allowed while {0}")]
	InvalidState(String),

	// API errors
	#[error("Request failed with status {status}{}", detail_suffix(.detail))]
	RequestFailed { status: u16, detail: Option<String> },

	#[error("Invalid API response: {0}")]
	InvalidApiResponse(String),

	#[error("HTTP error: {0}")]
	Http(#[from] reqwest::Error),

	// Validation errors
	#[error("{0} is required")]
	MissingField(&'static str),

	#[error("Passwords do not match")]
	PasswordMismatch,

	#[error("{0}")]
	Invalid(String),

	#[error("Confirmation required before {0}")]
	GateLocked(OperationTag),

	// Storage errors
	#[error("Storage error: {0}")]
	StorageError(String),

	#[error("Failed to create directory: {0}")]
	DirectoryCreationFailed(PathBuf),

	// Config errors
	#[error("Configuration file not found: {0}")]
	ConfigNotFound(PathBuf),

	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

fn detail_suffix(detail: &Option<String>) -> String {
	detail
		.as_deref()
		.map(|d| format!(": {d}"))
		.unwrap_or_default()
}

impl Error {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Error::AuthRejected(_) => ErrorKind::AuthRejected,
			Error::RequestFailed { .. } | Error::InvalidApiResponse(_) | Error::Http(_) => {
				ErrorKind::RequestFailed
			},
			Error::MissingField(_)
			| Error::PasswordMismatch
			| Error::Invalid(_)
			| Error::GateLocked(_)
			| Error::InvalidState(_) => ErrorKind::Validation,
			Error::StorageError(_)
			| Error::DirectoryCreationFailed(_)
			| Error::ConfigNotFound(_)
			| Error::InvalidConfig(_)
			| Error::Io(_)
			| Error::Json(_)
			| Error::Toml(_)
			| Error::Other(_) => ErrorKind::Local,
		}
	}

	/// HTTP status of a backend rejection, if this error carries one
	pub fn status(&self) -> Option<u16> {
		match self {
			Error::RequestFailed { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// True when the backend refused the presented credential
	pub fn is_unauthorized(&self) -> bool {
		matches!(self.status(), Some(401))
	}

	pub fn is_not_found(&self) -> bool {
		matches!(self.status(), Some(404))
	}

	/// Message supplied by the server, if any
	pub fn server_detail(&self) -> Option<&str> {
		match self {
			Error::RequestFailed { detail, .. } => detail.as_deref(),
			Error::AuthRejected(detail) => Some(detail.as_str()),
			_ => None,
		}
	}

	/// Text for a user notification: the server message when present,
	/// otherwise `fallback`. Local validation errors describe themselves.
	pub fn notice(&self, fallback: &str) -> String {
		match self.kind() {
			ErrorKind::Validation => self.to_string(),
			_ => self
				.server_detail()
				.map(str::to_string)
				.unwrap_or_else(|| fallback.to_string()),
		}
	}
}

impl From<String> for Error {
	fn from(msg: String) -> Self {
		Error::Other(anyhow::anyhow!("{msg}"))
	}
}

impl From<&'static str> for Error {
	fn from(msg: &'static str) -> Self {
		Error::Other(anyhow::anyhow!("{msg}"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn request_failed_display_includes_detail() {
		let err = Error::RequestFailed {
			status: 400,
			detail: Some("Username or email already registered".to_string()),
		};
		assert_eq!(
			err.to_string(),
			"Request failed with status 400: Username or email already registered"
		);
	}

	#[test]
	fn notice_prefers_server_detail() {
		let err = Error::RequestFailed {
			status: 500,
			detail: Some("Token creation failed: insufficient balance".to_string()),
		};
		assert_eq!(
			err.notice("Failed to create token"),
			"Token creation failed: insufficient balance"
		);

		let bare = Error::RequestFailed {
			status: 502,
			detail: None,
		};
		assert_eq!(bare.notice("Failed to create token"), "Failed to create token");
	}

	#[test]
	fn validation_errors_describe_themselves() {
		let err = Error::MissingField("symbol");
		assert_eq!(err.kind(), ErrorKind::Validation);
		assert_eq!(err.notice("ignored"), "symbol is required");
	}

	#[test]
	fn unauthorized_is_detected_from_status() {
		let err = Error::RequestFailed {
			status: 401,
			detail: Some("Could not validate credentials".to_string()),
		};
		assert!(err.is_unauthorized());
		assert!(!err.is_not_found());
		assert_eq!(err.kind(), ErrorKind::RequestFailed);
	}
}
