//! Tags for operations that spend ledger fees.
//!
//! Every cost-incurring request the console can submit is identified by an
//! [`OperationTag`]. The tag selects the warning content of the confirmation
//! gate and is what an approval is bound to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Operation that costs real network fees on mainnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationTag {
	/// Upload bytecode and create a smart contract
	ContractDeploy,
	/// Create a fungible token or an NFT collection
	TokenCreate,
	/// Mint one NFT serial into an existing collection
	NftMint,
	/// Move fungible tokens to another account
	TokenTransfer,
}

impl OperationTag {
	pub const ALL: [OperationTag; 4] = [
		OperationTag::ContractDeploy,
		OperationTag::TokenCreate,
		OperationTag::NftMint,
		OperationTag::TokenTransfer,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			OperationTag::ContractDeploy => "contract-deploy",
			OperationTag::TokenCreate => "token-create",
			OperationTag::NftMint => "nft-mint",
			OperationTag::TokenTransfer => "token-transfer",
		}
	}
}

impl fmt::Display for OperationTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when a string names no known operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown operation: {0}")]
pub struct ParseOperationTagError(pub String);

impl FromStr for OperationTag {
	type Err = ParseOperationTagError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		OperationTag::ALL
			.into_iter()
			.find(|tag| tag.as_str() == s || tag.as_str().replace('-', "_") == s)
			.ok_or_else(|| ParseOperationTagError(s.to_string()))
	}
}
