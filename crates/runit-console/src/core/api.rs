//! HTTP API client for the Run.it backend
//!
//! [`BackendApi`] is the seam every controller and view talks through;
//! [`ApiClient`] implements it over `reqwest`. The client never stores a
//! credential of its own. It reads the session's current credential each
//! time it builds a request, so a cleared session stops authorizing
//! requests immediately.

use crate::{
	core::session::SessionReader,
	types::error::{Error, Result},
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use runit_types::{
	AccessToken, AccountBalance, Contract, CreateTokenRequest, CreateTokenResponse,
	DashboardData, DeployContractRequest, DeployContractResponse, HealthStatus, LoginRequest,
	MintNftRequest, MintNftResponse, Nft, ProfileDetails, ProfileRequest, RegisterRequest,
	SaveProfileResponse, StatusMessage, Token, TransactionRecord, TransferTokenRequest,
	TransferTokenResponse, WalletConnectRequest,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Operations offered by the backend
///
/// All methods except `login`, `register` and `health` require a credential;
/// when the session holds none the request is sent without an
/// `Authorization` header and the backend answers 401/403.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait BackendApi: Send + Sync {
	/// `POST /api/auth/login`
	async fn login(&self, request: &LoginRequest) -> Result<AccessToken>;

	/// `POST /api/auth/register`
	async fn register(&self, request: &RegisterRequest) -> Result<AccessToken>;

	/// `POST /api/auth/wallet-connect`
	async fn connect_wallet(&self, request: &WalletConnectRequest) -> Result<StatusMessage>;

	/// `GET /api/dashboard`, which also carries the signed-in identity
	async fn dashboard(&self) -> Result<DashboardData>;

	/// `GET /api/profile`
	async fn profile(&self) -> Result<ProfileDetails>;

	/// `POST /api/profile`
	async fn save_profile(&self, request: &ProfileRequest) -> Result<SaveProfileResponse>;

	/// `GET /api/contracts`
	async fn contracts(&self) -> Result<Vec<Contract>>;

	/// `POST /api/contracts/deploy`
	async fn deploy_contract(
		&self,
		request: &DeployContractRequest,
	) -> Result<DeployContractResponse>;

	/// `GET /api/tokens`
	async fn tokens(&self) -> Result<Vec<Token>>;

	/// `POST /api/tokens/create`
	async fn create_token(&self, request: &CreateTokenRequest) -> Result<CreateTokenResponse>;

	/// `POST /api/tokens/transfer`
	async fn transfer_token(
		&self,
		request: &TransferTokenRequest,
	) -> Result<TransferTokenResponse>;

	/// `GET /api/nfts`
	async fn nfts(&self) -> Result<Vec<Nft>>;

	/// `POST /api/nfts/mint`
	async fn mint_nft(&self, request: &MintNftRequest) -> Result<MintNftResponse>;

	/// `GET /api/account/balance`
	async fn account_balance(&self) -> Result<AccountBalance>;

	/// `GET /api/transactions`
	async fn transactions(&self) -> Result<Vec<TransactionRecord>>;

	/// `GET /api/health`
	async fn health(&self) -> Result<HealthStatus>;
}

/// Error body produced by the backend framework
#[derive(Deserialize)]
struct ErrorBody {
	detail: serde_json::Value,
}

/// `reqwest` implementation of [`BackendApi`]
#[derive(Debug, Clone)]
pub struct ApiClient {
	client: Client,
	base_url: String,
	session: SessionReader,
}

impl ApiClient {
	/// Creates a client for `base_url` that authorizes with `session`
	///
	/// # Arguments
	/// * `base_url` - Backend root; a trailing slash is dropped
	/// * `timeout` - Per-request timeout
	/// * `session` - Read side of the session, consulted on every request
	///
	/// # Errors
	/// Returns error if the HTTP client cannot be constructed
	pub fn new(base_url: &str, timeout: Duration, session: SessionReader) -> Result<Self> {
		let client = Client::builder().timeout(timeout).build()?;

		Ok(Self {
			client,
			base_url: base_url.trim_end_matches('/').to_string(),
			session,
		})
	}

	/// Backend root every path is joined to
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Attaches the session's current credential, if any
	///
	/// The credential is read at call time, so a cleared session sends no
	/// `Authorization` header.
	fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
		match self.session.credential() {
			Some(credential) => request.bearer_auth(credential.expose()),
			None => request,
		}
	}

	/// Sends `body` as JSON to `path`
	///
	/// # Arguments
	/// * `path` - Endpoint path relative to the base URL
	/// * `body` - Request payload
	///
	/// # Returns
	/// The decoded response body
	///
	/// # Errors
	/// Returns error if the request cannot be sent, the backend answers with
	/// a non-success status, or the body does not decode
	async fn post<Req, Res>(&self, path: &str, body: &Req) -> Result<Res>
	where
		Req: Serialize + Sync,
		Res: DeserializeOwned,
	{
		let url = format!("{}{}", self.base_url, path);
		debug!(%url, "POST");

		let request = self.authorize(self.client.post(&url).json(body));
		let response = request.send().await?;
		Self::handle_response(response).await
	}

	/// Fetches `path`
	///
	/// # Arguments
	/// * `path` - Endpoint path relative to the base URL
	///
	/// # Returns
	/// The decoded response body
	///
	/// # Errors
	/// Same as [`ApiClient::post`]
	async fn get<Res>(&self, path: &str) -> Result<Res>
	where
		Res: DeserializeOwned,
	{
		let url = format!("{}{}", self.base_url, path);
		debug!(%url, "GET");

		let request = self.authorize(self.client.get(&url));
		let response = request.send().await?;
		Self::handle_response(response).await
	}

	/// Decodes a successful response or turns a failed one into an error
	///
	/// # Arguments
	/// * `response` - Raw HTTP response
	///
	/// # Returns
	/// The body decoded as `T`
	///
	/// # Errors
	/// [`Error::RequestFailed`] for non-success statuses, carrying the
	/// backend's `detail` text when the body has one;
	/// [`Error::InvalidApiResponse`] when a success body does not decode
	async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
		let status = response.status();
		if !status.is_success() {
			let text = response.text().await.unwrap_or_default();
			let detail = serde_json::from_str::<ErrorBody>(&text)
				.ok()
				.and_then(|body| match body.detail {
					serde_json::Value::String(message) => Some(message),
					serde_json::Value::Null => None,
					other => Some(other.to_string()),
				});
			debug!(status = status.as_u16(), ?detail, "Backend rejected request");
			return Err(Error::RequestFailed {
				status: status.as_u16(),
				detail,
			});
		}

		response
			.json::<T>()
			.await
			.map_err(|e| Error::InvalidApiResponse(e.to_string()))
	}
}

#[async_trait]
impl BackendApi for ApiClient {
	#[instrument(skip_all, fields(username = %request.username))]
	async fn login(&self, request: &LoginRequest) -> Result<AccessToken> {
		self.post("/api/auth/login", request).await
	}

	#[instrument(skip_all, fields(username = %request.username))]
	async fn register(&self, request: &RegisterRequest) -> Result<AccessToken> {
		self.post("/api/auth/register", request).await
	}

	#[instrument(skip_all, fields(account_id = %request.account_id))]
	async fn connect_wallet(&self, request: &WalletConnectRequest) -> Result<StatusMessage> {
		self.post("/api/auth/wallet-connect", request).await
	}

	async fn dashboard(&self) -> Result<DashboardData> {
		self.get("/api/dashboard").await
	}

	async fn profile(&self) -> Result<ProfileDetails> {
		self.get("/api/profile").await
	}

	async fn save_profile(&self, request: &ProfileRequest) -> Result<SaveProfileResponse> {
		self.post("/api/profile", request).await
	}

	async fn contracts(&self) -> Result<Vec<Contract>> {
		self.get("/api/contracts").await
	}

	#[instrument(skip_all, fields(contract = %request.contract_name))]
	async fn deploy_contract(
		&self,
		request: &DeployContractRequest,
	) -> Result<DeployContractResponse> {
		self.post("/api/contracts/deploy", request).await
	}

	async fn tokens(&self) -> Result<Vec<Token>> {
		self.get("/api/tokens").await
	}

	#[instrument(skip_all, fields(symbol = %request.symbol, token_type = %request.token_type))]
	async fn create_token(&self, request: &CreateTokenRequest) -> Result<CreateTokenResponse> {
		self.post("/api/tokens/create", request).await
	}

	#[instrument(skip_all, fields(token_id = %request.token_id, amount = request.amount))]
	async fn transfer_token(
		&self,
		request: &TransferTokenRequest,
	) -> Result<TransferTokenResponse> {
		self.post("/api/tokens/transfer", request).await
	}

	async fn nfts(&self) -> Result<Vec<Nft>> {
		self.get("/api/nfts").await
	}

	#[instrument(skip_all, fields(token_id = %request.token_id))]
	async fn mint_nft(&self, request: &MintNftRequest) -> Result<MintNftResponse> {
		self.post("/api/nfts/mint", request).await
	}

	async fn account_balance(&self) -> Result<AccountBalance> {
		self.get("/api/account/balance").await
	}

	async fn transactions(&self) -> Result<Vec<TransactionRecord>> {
		self.get("/api/transactions").await
	}

	async fn health(&self) -> Result<HealthStatus> {
		self.get("/api/health").await
	}
}
