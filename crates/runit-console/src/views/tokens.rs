//! Fungible tokens and NFT collections: listing, creation and transfers

use crate::{
	core::auth::AuthController,
	types::error::Result,
	views::{
		draft::{blank, DraftSlot, FormFields},
		refused, reported,
	},
};
use runit_types::{
	CreateTokenRequest, CreateTokenResponse, Token, TokenType, TransferTokenRequest,
	TransferTokenResponse,
};
use tracing::{debug, instrument};

pub const DEFAULT_DECIMALS: u32 = 2;
pub const DEFAULT_INITIAL_SUPPLY: u64 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct TokenForm {
	pub name: String,
	pub symbol: String,
	pub decimals: u32,
	/// Maximum supply for NFT collections
	pub initial_supply: u64,
	pub token_type: TokenType,
}

impl Default for TokenForm {
	fn default() -> Self {
		Self {
			name: String::new(),
			symbol: String::new(),
			decimals: DEFAULT_DECIMALS,
			initial_supply: DEFAULT_INITIAL_SUPPLY,
			token_type: TokenType::Fungible,
		}
	}
}

impl FormFields for TokenForm {
	fn missing_field(&self) -> Option<&'static str> {
		if blank(&self.name) {
			Some("name")
		} else if blank(&self.symbol) {
			Some("symbol")
		} else {
			None
		}
	}
}

impl TokenForm {
	fn to_request(&self) -> CreateTokenRequest {
		CreateTokenRequest {
			name: self.name.trim().to_string(),
			symbol: self.symbol.trim().to_string(),
			// NFT serials are indivisible
			decimals: match self.token_type {
				TokenType::Nft => 0,
				_ => self.decimals,
			},
			initial_supply: self.initial_supply,
			token_type: self.token_type,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferForm {
	pub token_id: String,
	pub to_account: String,
	pub amount: u64,
}

impl FormFields for TransferForm {
	fn missing_field(&self) -> Option<&'static str> {
		if blank(&self.token_id) {
			Some("token id")
		} else if blank(&self.to_account) {
			Some("recipient account")
		} else if self.amount == 0 {
			Some("amount")
		} else {
			None
		}
	}
}

#[derive(Debug, Clone, Default)]
pub struct TokensView {
	tokens: Vec<Token>,
	create: DraftSlot<TokenForm>,
	transfer: DraftSlot<TransferForm>,
}

impl TokensView {
	pub fn new() -> Self {
		Self::default()
	}

	#[instrument(skip_all)]
	pub async fn activate(&mut self, auth: &AuthController) -> Result<&[Token]> {
		self.tokens = reported(auth, auth.api().tokens().await, "Failed to fetch tokens")?;
		Ok(&self.tokens)
	}

	pub fn tokens(&self) -> &[Token] {
		&self.tokens
	}

	pub fn create_draft(&mut self) -> &mut DraftSlot<TokenForm> {
		&mut self.create
	}

	pub fn transfer_draft(&mut self) -> &mut DraftSlot<TransferForm> {
		&mut self.transfer
	}

	/// Creates the drafted token, then re-fetches the list
	#[instrument(skip_all)]
	pub async fn submit_create(&mut self, auth: &AuthController) -> Result<CreateTokenResponse> {
		let request = match self.create.validated() {
			Ok(form) => form.to_request(),
			Err(e) => return refused(auth, e),
		};

		let outcome = auth.api().create_token(&request).await;
		self.create.settle(&outcome);
		let created = reported(auth, outcome, "Failed to create token")?;

		auth.toaster().success("Token created successfully");
		// The write went through; a failed re-read is already toasted
		if let Err(e) = self.activate(auth).await {
			debug!(error = %e, "Re-fetch after write failed");
		}
		Ok(created)
	}

	/// Sends the drafted transfer, then re-fetches the list
	#[instrument(skip_all)]
	pub async fn submit_transfer(
		&mut self,
		auth: &AuthController,
	) -> Result<TransferTokenResponse> {
		let request = match self.transfer.validated() {
			Ok(form) => TransferTokenRequest {
				token_id: form.token_id.trim().to_string(),
				to_account: form.to_account.trim().to_string(),
				amount: form.amount,
			},
			Err(e) => return refused(auth, e),
		};

		let outcome = auth.api().transfer_token(&request).await;
		self.transfer.settle(&outcome);
		let sent = reported(auth, outcome, "Failed to transfer tokens")?;

		auth.toaster().success("Tokens transferred successfully");
		// The write went through; a failed re-read is already toasted
		if let Err(e) = self.activate(auth).await {
			debug!(error = %e, "Re-fetch after write failed");
		}
		Ok(sent)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::{api::MockBackendApi, auth::test_support::*};
	use crate::types::error::Error;
	use std::sync::{Arc, Mutex};
	use tempfile::TempDir;

	fn stored(request: &CreateTokenRequest, status: &str) -> Token {
		Token {
			id: Some("t1".to_string()),
			token_name: request.name.clone(),
			token_symbol: request.symbol.clone(),
			token_id: Some("0.0.7007".to_string()),
			token_type: request.token_type,
			decimals: request.decimals,
			initial_supply: request.initial_supply,
			created_at: None,
			status: status.to_string(),
		}
	}

	#[test]
	fn form_defaults() {
		let form = TokenForm::default();
		assert_eq!(form.decimals, 2);
		assert_eq!(form.initial_supply, 1000);
		assert_eq!(form.token_type, TokenType::Fungible);
	}

	#[test]
	fn nft_collections_have_no_decimals() {
		let form = TokenForm {
			name: "Art".to_string(),
			symbol: "ART".to_string(),
			token_type: TokenType::Nft,
			..TokenForm::default()
		};
		assert_eq!(form.to_request().decimals, 0);
	}

	#[tokio::test]
	async fn created_coin_appears_in_refetched_list() {
		let dir = TempDir::new().unwrap();
		let backend: Arc<Mutex<Vec<Token>>> = Arc::default();
		let created = backend.clone();
		let listed = backend.clone();

		let mut api = MockBackendApi::new();
		api.expect_create_token()
			.withf(|req| {
				req.name == "Coin"
					&& req.symbol == "CN"
					&& req.decimals == 2
					&& req.initial_supply == 1000
					&& req.token_type == TokenType::Fungible
			})
			.times(1)
			.returning(move |req| {
				created.lock().unwrap().push(stored(req, "created"));
				Ok(CreateTokenResponse {
					status: "success".to_string(),
					token_id: Some("0.0.7007".to_string()),
					transaction_id: None,
				})
			});
		api.expect_tokens()
			.times(1)
			.returning(move || Ok(listed.lock().unwrap().clone()));
		let auth = signed_in(Arc::new(api), dir.path());

		let mut view = TokensView::new();
		let form = view.create_draft().open();
		form.name = "Coin".to_string();
		form.symbol = "CN".to_string();

		let response = view.submit_create(&auth).await.unwrap();

		assert_eq!(response.status, "success");
		assert!(!view.create_draft().is_open());
		assert_eq!(view.tokens().len(), 1);
		assert_eq!(view.tokens()[0].token_type, TokenType::Fungible);
		assert_eq!(view.tokens()[0].status, "created");
		assert_eq!(
			auth.toaster().pending()[0].message,
			"Token created successfully"
		);
	}

	#[tokio::test]
	async fn failed_create_keeps_draft_and_list() {
		let dir = TempDir::new().unwrap();
		let mut api = MockBackendApi::new();
		api.expect_tokens().times(1).returning(|| Ok(Vec::new()));
		api.expect_create_token().returning(|_| {
			Err(Error::RequestFailed {
				status: 502,
				detail: None,
			})
		});
		let auth = signed_in(Arc::new(api), dir.path());

		let mut view = TokensView::new();
		view.activate(&auth).await.unwrap();
		let form = view.create_draft().open();
		form.name = "Coin".to_string();
		form.symbol = "CN".to_string();
		form.decimals = 8;
		let typed = form.clone();

		assert!(view.submit_create(&auth).await.is_err());
		assert_eq!(view.create_draft().get(), Some(&typed));
		assert_eq!(
			auth.toaster().last().unwrap().message,
			"Failed to create token"
		);
	}

	#[tokio::test]
	async fn transfer_requires_positive_amount() {
		let dir = TempDir::new().unwrap();
		let mut api = MockBackendApi::new();
		api.expect_transfer_token().never();
		let auth = signed_in(Arc::new(api), dir.path());

		let mut view = TokensView::new();
		let form = view.transfer_draft().open();
		form.token_id = "0.0.7007".to_string();
		form.to_account = "0.0.42".to_string();

		assert!(matches!(
			view.submit_transfer(&auth).await,
			Err(Error::MissingField("amount"))
		));
	}

	#[tokio::test]
	async fn transfer_success_clears_draft() {
		let dir = TempDir::new().unwrap();
		let mut api = MockBackendApi::new();
		api.expect_transfer_token()
			.withf(|req| req.amount == 25 && req.to_account == "0.0.42")
			.times(1)
			.returning(|_| {
				Ok(TransferTokenResponse {
					status: "success".to_string(),
					transaction_id: Some("0.0.2@1700000000.0".to_string()),
				})
			});
		api.expect_tokens().times(1).returning(|| Ok(Vec::new()));
		let auth = signed_in(Arc::new(api), dir.path());

		let mut view = TokensView::new();
		view.transfer_draft().open_with(TransferForm {
			token_id: "0.0.7007".to_string(),
			to_account: " 0.0.42 ".to_string(),
			amount: 25,
		});

		view.submit_transfer(&auth).await.unwrap();
		assert!(!view.transfer_draft().is_open());
	}

	#[tokio::test]
	async fn create_with_empty_required_field_sends_nothing() {
		let dir = TempDir::new().unwrap();
		let mut api = MockBackendApi::new();
		api.expect_create_token().never();
		api.expect_tokens().never();
		let auth = signed_in(Arc::new(api), dir.path());

		let mut view = TokensView::new();
		view.create_draft().open().symbol = "CN".to_string();
		assert!(matches!(
			view.submit_create(&auth).await,
			Err(Error::MissingField("name"))
		));
		assert!(view.create_draft().is_open());

		let form = view.create_draft().open();
		form.name = "Coin".to_string();
		form.symbol = " ".to_string();
		let typed = form.clone();
		assert!(matches!(
			view.submit_create(&auth).await,
			Err(Error::MissingField("symbol"))
		));
		assert_eq!(view.create_draft().get(), Some(&typed));
	}
}
