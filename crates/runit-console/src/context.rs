//! Wiring of configuration, session and backend client

use crate::{
	core::{
		api::ApiClient,
		auth::AuthController,
		config::{ConsoleConfig, Network},
		notify::Toaster,
		session::{AuthState, SessionStore},
		storage::Storage,
	},
	shell::{render, Screen, ShellUi},
	types::error::{Error, Result},
};
use std::{path::Path, sync::Arc};
use tracing::debug;

/// Everything a command needs to talk to the backend
pub struct Context {
	pub config: ConsoleConfig,
	auth: AuthController,
}

impl Context {
	/// Loads configuration from `config_path` (or defaults) and opens the session
	pub fn load(config_path: Option<&Path>) -> Result<Self> {
		Self::with_config(ConsoleConfig::load(config_path)?)
	}

	pub fn with_config(config: ConsoleConfig) -> Result<Self> {
		let storage = Storage::open(&config.data_dir)?;
		let session = SessionStore::open(storage)?;
		let api = ApiClient::new(
			&config.api_base_url,
			config.request_timeout(),
			session.reader(),
		)?;
		debug!(
			api = %config.api_base_url,
			network = %config.network,
			data_dir = %config.data_dir.display(),
			"Context ready"
		);

		Ok(Self {
			auth: AuthController::new(session, Arc::new(api), Toaster::new()),
			config,
		})
	}

	pub fn auth(&self) -> &AuthController {
		&self.auth
	}

	pub fn network(&self) -> Network {
		self.config.network
	}

	/// Screen the shell shows for the current session
	pub fn screen(&self, ui: &ShellUi) -> Screen {
		render(&self.auth.reader().snapshot(), ui)
	}

	/// Bootstraps a stored session and requires it to be accepted
	///
	/// # Errors
	/// [`Error::InvalidState`] when no accepted session exists afterwards
	pub async fn require_session(&self) -> Result<()> {
		match self.auth.bootstrap().await {
			AuthState::Authenticated => Ok(()),
			state => Err(Error::InvalidState(state.describe().to_string())),
		}
	}

	/// Bootstraps a stored session ahead of a login or registration
	///
	/// A stored credential the backend no longer accepts is discarded here,
	/// leaving the session signed out.
	///
	/// # Errors
	/// [`Error::InvalidState`] when the stored session is still accepted
	pub async fn require_signed_out(&self) -> Result<()> {
		match self.auth.bootstrap().await {
			AuthState::Authenticated => Err(Error::InvalidState(
				AuthState::Authenticated.describe().to_string(),
			)),
			_ => Ok(()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::shell::AuthForm;
	use tempfile::TempDir;
	use wiremock::matchers::{header, method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn config(server: &MockServer, dir: &TempDir) -> ConsoleConfig {
		ConsoleConfig {
			api_base_url: server.uri(),
			data_dir: dir.path().to_path_buf(),
			..ConsoleConfig::default()
		}
	}

	#[tokio::test]
	async fn login_persists_across_contexts() {
		let server = MockServer::start().await;
		let dir = TempDir::new().unwrap();

		Mock::given(method("POST"))
			.and(path("/api/auth/login"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"access_token": "persisted-token",
				"token_type": "bearer"
			})))
			.mount(&server)
			.await;
		Mock::given(method("GET"))
			.and(path("/api/dashboard"))
			.and(header("authorization", "Bearer persisted-token"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"stats": {"contracts": 0, "tokens": 0, "nfts": 0, "transactions": 0},
				"recent_transactions": [],
				"user": {"username": "alice", "email": "alice@example.com"}
			})))
			.mount(&server)
			.await;

		{
			let ctx = Context::with_config(config(&server, &dir)).unwrap();
			ctx.auth().login("alice", "pw").await.unwrap();
		}

		let ctx = Context::with_config(config(&server, &dir)).unwrap();
		assert_eq!(ctx.screen(&ShellUi::default()), Screen::Loading);
		ctx.require_session().await.unwrap();
		assert!(matches!(ctx.screen(&ShellUi::default()), Screen::App(_)));
	}

	#[tokio::test]
	async fn expired_stored_credential_lands_on_login() {
		let server = MockServer::start().await;
		let dir = TempDir::new().unwrap();

		Mock::given(method("POST"))
			.and(path("/api/auth/login"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"access_token": "soon-stale",
				"token_type": "bearer"
			})))
			.mount(&server)
			.await;
		Mock::given(method("GET"))
			.and(path("/api/dashboard"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"user": {"username": "alice", "email": "alice@example.com"}
			})))
			.up_to_n_times(1)
			.mount(&server)
			.await;

		{
			let ctx = Context::with_config(config(&server, &dir)).unwrap();
			ctx.auth().login("alice", "pw").await.unwrap();
		}

		server.reset().await;
		Mock::given(method("GET"))
			.and(path("/api/dashboard"))
			.respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
				"detail": "Could not validate credentials"
			})))
			.mount(&server)
			.await;

		let ctx = Context::with_config(config(&server, &dir)).unwrap();
		assert!(ctx.require_session().await.is_err());
		assert_eq!(
			ctx.screen(&ShellUi::default()),
			Screen::Auth {
				form: AuthForm::Login,
				notice: None
			}
		);
		assert!(!dir.path().join("token.json").exists());
	}

	#[tokio::test]
	async fn stale_stored_credential_does_not_block_login() {
		let server = MockServer::start().await;
		let dir = TempDir::new().unwrap();
		std::fs::write(
			dir.path().join("token.json"),
			serde_json::json!({"access_token": "stale", "stored_at": "2026-01-01T00:00:00Z"})
				.to_string(),
		)
		.unwrap();

		Mock::given(method("GET"))
			.and(path("/api/dashboard"))
			.and(header("authorization", "Bearer stale"))
			.respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
				"detail": "Could not validate credentials"
			})))
			.mount(&server)
			.await;
		Mock::given(method("POST"))
			.and(path("/api/auth/login"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"access_token": "fresh",
				"token_type": "bearer"
			})))
			.expect(1)
			.mount(&server)
			.await;
		Mock::given(method("GET"))
			.and(path("/api/dashboard"))
			.and(header("authorization", "Bearer fresh"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"user": {"username": "alice", "email": "alice@example.com"}
			})))
			.mount(&server)
			.await;

		let ctx = Context::with_config(config(&server, &dir)).unwrap();
		assert_eq!(ctx.auth().state(), AuthState::Authenticating);

		ctx.require_signed_out().await.unwrap();
		assert_eq!(ctx.auth().state(), AuthState::Unauthenticated);

		let profile = ctx.auth().login("alice", "pw").await.unwrap();
		assert_eq!(profile.username, "alice");
		assert_eq!(ctx.auth().state(), AuthState::Authenticated);
	}

	#[tokio::test]
	async fn accepted_stored_session_refuses_another_sign_in() {
		let server = MockServer::start().await;
		let dir = TempDir::new().unwrap();

		Mock::given(method("POST"))
			.and(path("/api/auth/login"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"access_token": "kept",
				"token_type": "bearer"
			})))
			.expect(1)
			.mount(&server)
			.await;
		Mock::given(method("GET"))
			.and(path("/api/dashboard"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"user": {"username": "alice", "email": "alice@example.com"}
			})))
			.mount(&server)
			.await;

		{
			let ctx = Context::with_config(config(&server, &dir)).unwrap();
			ctx.auth().login("alice", "pw").await.unwrap();
		}

		let ctx = Context::with_config(config(&server, &dir)).unwrap();
		assert!(matches!(
			ctx.require_signed_out().await,
			Err(Error::InvalidState(_))
		));
		assert_eq!(ctx.auth().state(), AuthState::Authenticated);
	}
}
