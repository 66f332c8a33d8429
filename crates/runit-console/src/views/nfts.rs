//! NFTs: minted items and the collections they can be minted into

use crate::{
	core::auth::AuthController,
	types::error::{Error, Result},
	views::{
		draft::{blank, DraftSlot, FormFields},
		refused, reported,
	},
};
use futures::future::try_join;
use runit_types::{MintNftRequest, MintNftResponse, Nft, NftMetadata, Token};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MintForm {
	/// Collection to mint into
	pub token_id: String,
	pub name: String,
	pub description: String,
	pub image: String,
	pub attributes: Vec<serde_json::Value>,
}

impl FormFields for MintForm {
	fn missing_field(&self) -> Option<&'static str> {
		if blank(&self.token_id) {
			Some("collection")
		} else if blank(&self.name) {
			Some("name")
		} else {
			None
		}
	}
}

impl MintForm {
	fn to_request(&self) -> MintNftRequest {
		MintNftRequest {
			token_id: self.token_id.trim().to_string(),
			metadata: NftMetadata {
				name: self.name.trim().to_string(),
				description: self.description.clone(),
				image: self.image.clone(),
				attributes: self.attributes.clone(),
			},
		}
	}
}

#[derive(Debug, Clone, Default)]
pub struct NftsView {
	nfts: Vec<Nft>,
	collections: Vec<Token>,
	draft: DraftSlot<MintForm>,
}

impl NftsView {
	pub fn new() -> Self {
		Self::default()
	}

	/// Fetches minted NFTs and NFT collections concurrently
	///
	/// Both lists are replaced only when both reads succeed.
	#[instrument(skip_all)]
	pub async fn activate(&mut self, auth: &AuthController) -> Result<()> {
		let api = auth.api();
		let (nfts, tokens) = reported(
			auth,
			try_join(api.nfts(), api.tokens()).await,
			"Failed to fetch NFT data",
		)?;

		self.nfts = nfts;
		self.collections = tokens
			.into_iter()
			.filter(Token::is_nft_collection)
			.collect();
		Ok(())
	}

	pub fn nfts(&self) -> &[Nft] {
		&self.nfts
	}

	pub fn collections(&self) -> &[Token] {
		&self.collections
	}

	/// Minting needs at least one NFT collection
	pub fn can_mint(&self) -> bool {
		!self.collections.is_empty()
	}

	pub fn draft(&mut self) -> &mut DraftSlot<MintForm> {
		&mut self.draft
	}

	/// The drafted mint, once a collection exists and required fields are filled
	///
	/// # Errors
	/// [`Error::Invalid`] without a collection to mint into, otherwise the
	/// draft's own validation error
	pub fn ready(&self) -> Result<&MintForm> {
		if !self.can_mint() {
			return Err(Error::Invalid(
				"You need to create an NFT collection first before minting NFTs.".to_string(),
			));
		}
		self.draft.validated()
	}

	/// Mints the drafted NFT, then re-fetches both lists
	#[instrument(skip_all)]
	pub async fn submit(&mut self, auth: &AuthController) -> Result<MintNftResponse> {
		let request = match self.ready() {
			Ok(form) => form.to_request(),
			Err(e) => return refused(auth, e),
		};

		let outcome = auth.api().mint_nft(&request).await;
		self.draft.settle(&outcome);
		let minted = reported(auth, outcome, "Failed to mint NFT")?;

		auth.toaster().success("NFT minted successfully");
		// The write went through; a failed re-read is already toasted
		if let Err(e) = self.activate(auth).await {
			debug!(error = %e, "Re-fetch after write failed");
		}
		Ok(minted)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::{api::MockBackendApi, auth::test_support::*};
	use runit_types::TokenType;
	use std::sync::Arc;
	use tempfile::TempDir;

	fn token(id: &str, token_type: TokenType) -> Token {
		Token {
			id: None,
			token_name: format!("Token {id}"),
			token_symbol: id.to_uppercase(),
			token_id: Some(id.to_string()),
			token_type,
			decimals: 0,
			initial_supply: 10,
			created_at: None,
			status: "created".to_string(),
		}
	}

	fn nft(serial: i64) -> Nft {
		Nft {
			id: None,
			token_id: "0.0.9".to_string(),
			serial_number: Some(serial),
			metadata: NftMetadata {
				name: format!("Piece #{serial}"),
				..NftMetadata::default()
			},
			owner_account: None,
			minted_at: None,
			transaction_id: None,
		}
	}

	#[tokio::test]
	async fn keeps_only_nft_collections() {
		let dir = TempDir::new().unwrap();
		let mut api = MockBackendApi::new();
		api.expect_nfts().times(1).returning(|| Ok(vec![nft(1)]));
		api.expect_tokens().times(1).returning(|| {
			Ok(vec![
				token("0.0.8", TokenType::Fungible),
				token("0.0.9", TokenType::Nft),
			])
		});
		let auth = signed_in(Arc::new(api), dir.path());

		let mut view = NftsView::new();
		view.activate(&auth).await.unwrap();

		assert_eq!(view.nfts().len(), 1);
		assert_eq!(view.collections().len(), 1);
		assert_eq!(view.collections()[0].token_id.as_deref(), Some("0.0.9"));
		assert!(view.can_mint());
	}

	#[tokio::test]
	async fn one_failed_read_leaves_both_lists_untouched() {
		let dir = TempDir::new().unwrap();
		let mut api = MockBackendApi::new();
		api.expect_nfts().returning(|| Ok(vec![nft(1), nft(2)]));
		api.expect_tokens().returning(|| {
			Err(Error::RequestFailed {
				status: 500,
				detail: None,
			})
		});
		let auth = signed_in(Arc::new(api), dir.path());

		let mut view = NftsView::new();
		assert!(view.activate(&auth).await.is_err());
		assert!(view.nfts().is_empty());
		assert!(view.collections().is_empty());
		assert_eq!(
			auth.toaster().last().unwrap().message,
			"Failed to fetch NFT data"
		);
	}

	#[tokio::test]
	async fn minting_without_collection_sends_nothing() {
		let dir = TempDir::new().unwrap();
		let mut api = MockBackendApi::new();
		api.expect_mint_nft().never();
		let auth = signed_in(Arc::new(api), dir.path());

		let mut view = NftsView::new();
		view.draft().open_with(MintForm {
			token_id: "0.0.9".to_string(),
			name: "Piece".to_string(),
			..MintForm::default()
		});

		assert!(matches!(view.submit(&auth).await, Err(Error::Invalid(_))));
		assert!(view.draft().is_open());
	}

	#[tokio::test]
	async fn mint_success_refetches_and_clears_draft() {
		let dir = TempDir::new().unwrap();
		let mut api = MockBackendApi::new();
		let mut fetches = 0;
		api.expect_nfts().times(2).returning(move || {
			fetches += 1;
			Ok((1..fetches).map(nft).collect())
		});
		api.expect_tokens()
			.times(2)
			.returning(|| Ok(vec![token("0.0.9", TokenType::Nft)]));
		api.expect_mint_nft()
			.withf(|req| req.token_id == "0.0.9" && req.metadata.name == "Piece #1")
			.times(1)
			.returning(|_| {
				Ok(MintNftResponse {
					status: "success".to_string(),
					serial_number: Some(1),
					transaction_id: None,
				})
			});
		let auth = signed_in(Arc::new(api), dir.path());

		let mut view = NftsView::new();
		view.activate(&auth).await.unwrap();
		assert!(view.nfts().is_empty());

		view.draft().open_with(MintForm {
			token_id: "0.0.9".to_string(),
			name: "Piece #1".to_string(),
			..MintForm::default()
		});
		let minted = view.submit(&auth).await.unwrap();

		assert_eq!(minted.serial_number, Some(1));
		assert!(!view.draft().is_open());
		assert_eq!(view.nfts().len(), 1);
	}

	#[tokio::test]
	async fn blank_name_is_refused_before_sending() {
		let dir = TempDir::new().unwrap();
		let mut api = MockBackendApi::new();
		api.expect_nfts().times(1).returning(|| Ok(Vec::new()));
		api.expect_tokens()
			.times(1)
			.returning(|| Ok(vec![token("0.0.9", TokenType::Nft)]));
		api.expect_mint_nft().never();
		let auth = signed_in(Arc::new(api), dir.path());

		let mut view = NftsView::new();
		view.activate(&auth).await.unwrap();
		let typed = MintForm {
			token_id: "0.0.9".to_string(),
			name: "  ".to_string(),
			description: "kept".to_string(),
			..MintForm::default()
		};
		view.draft().open_with(typed.clone());

		assert!(matches!(view.ready(), Err(Error::MissingField("name"))));
		assert!(matches!(
			view.submit(&auth).await,
			Err(Error::MissingField("name"))
		));
		assert_eq!(view.draft().get(), Some(&typed));
		assert_eq!(auth.toaster().last().unwrap().message, "name is required");
	}
}
