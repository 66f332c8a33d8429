//! Smart contract, token and NFT types.
//!
//! Collections are returned by the backend as plain JSON arrays of stored
//! documents; every document carries a `_id` and the owner's `user_id`, which
//! the console keeps but never interprets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of token a collection represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
	/// Divisible token with decimals and an initial supply
	#[default]
	Fungible,
	/// Collection of unique tokens minted one serial at a time
	Nft,
	/// Anything the backend stored that this client does not know
	#[serde(other)]
	Unknown,
}

impl TokenType {
	pub fn as_str(&self) -> &'static str {
		match self {
			TokenType::Fungible => "fungible",
			TokenType::Nft => "nft",
			TokenType::Unknown => "unknown",
		}
	}
}

impl fmt::Display for TokenType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Deployed smart contract record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
	#[serde(rename = "_id", default)]
	pub id: Option<String>,
	pub contract_name: String,
	#[serde(default)]
	pub contract_id: Option<String>,
	#[serde(default)]
	pub contract_address: Option<String>,
	#[serde(default)]
	pub bytecode_file_id: Option<String>,
	#[serde(default)]
	pub deployed_at: Option<String>,
	#[serde(default)]
	pub status: String,
}

/// Body of `POST /api/contracts/deploy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployContractRequest {
	pub contract_name: String,
	/// Hex encoded bytecode, with or without a `0x` prefix
	pub bytecode: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub constructor_params: Option<String>,
}

/// Answer to `POST /api/contracts/deploy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployContractResponse {
	pub status: String,
	#[serde(default)]
	pub contract_id: Option<String>,
	#[serde(default)]
	pub contract_address: Option<String>,
	#[serde(default)]
	pub transaction_id: Option<String>,
}

/// Token or NFT collection record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
	#[serde(rename = "_id", default)]
	pub id: Option<String>,
	pub token_name: String,
	pub token_symbol: String,
	#[serde(default)]
	pub token_id: Option<String>,
	#[serde(default)]
	pub token_type: TokenType,
	#[serde(default)]
	pub decimals: u32,
	#[serde(default)]
	pub initial_supply: u64,
	#[serde(default)]
	pub created_at: Option<String>,
	#[serde(default)]
	pub status: String,
}

impl Token {
	pub fn is_nft_collection(&self) -> bool {
		self.token_type == TokenType::Nft
	}
}

/// Body of `POST /api/tokens/create`.
///
/// For NFT collections `initial_supply` is the maximum supply and `decimals`
/// is ignored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTokenRequest {
	pub name: String,
	pub symbol: String,
	pub decimals: u32,
	pub initial_supply: u64,
	pub token_type: TokenType,
}

/// Answer to `POST /api/tokens/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTokenResponse {
	pub status: String,
	#[serde(default)]
	pub token_id: Option<String>,
	#[serde(default)]
	pub transaction_id: Option<String>,
}

/// Body of `POST /api/tokens/transfer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferTokenRequest {
	pub token_id: String,
	pub to_account: String,
	pub amount: u64,
}

/// Answer to `POST /api/tokens/transfer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferTokenResponse {
	pub status: String,
	#[serde(default)]
	pub transaction_id: Option<String>,
}

/// Free-form metadata attached to a minted NFT.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NftMetadata {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub image: String,
	#[serde(default)]
	pub attributes: Vec<serde_json::Value>,
}

/// Minted NFT record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nft {
	#[serde(rename = "_id", default)]
	pub id: Option<String>,
	pub token_id: String,
	#[serde(default)]
	pub serial_number: Option<i64>,
	#[serde(default)]
	pub metadata: NftMetadata,
	#[serde(default)]
	pub owner_account: Option<String>,
	#[serde(default)]
	pub minted_at: Option<String>,
	#[serde(default)]
	pub transaction_id: Option<String>,
}

/// Body of `POST /api/nfts/mint`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MintNftRequest {
	pub token_id: String,
	pub metadata: NftMetadata,
}

/// Answer to `POST /api/nfts/mint`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintNftResponse {
	pub status: String,
	#[serde(default)]
	pub serial_number: Option<i64>,
	#[serde(default)]
	pub transaction_id: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn token_type_round_trips_lowercase() {
		assert_eq!(
			serde_json::to_value(TokenType::Fungible).unwrap(),
			serde_json::json!("fungible")
		);
		let parsed: TokenType = serde_json::from_value(serde_json::json!("nft")).unwrap();
		assert_eq!(parsed, TokenType::Nft);
	}

	#[test]
	fn unknown_token_type_does_not_fail_the_collection() {
		let token: Token = serde_json::from_value(serde_json::json!({
			"_id": "t-1",
			"token_name": "Coin",
			"token_symbol": "CN",
			"token_type": "semi-fungible",
			"status": "active"
		}))
		.unwrap();

		assert_eq!(token.token_type, TokenType::Unknown);
		assert!(!token.is_nft_collection());
	}

	#[test]
	fn nft_metadata_defaults_when_absent() {
		let nft: Nft = serde_json::from_value(serde_json::json!({
			"token_id": "0.0.5005",
			"serial_number": 3
		}))
		.unwrap();

		assert_eq!(nft.serial_number, Some(3));
		assert!(nft.metadata.name.is_empty());
	}
}
