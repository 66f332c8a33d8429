//! Confirmation gate for operations that spend real funds
//!
//! A [`ConfirmationGate`] never runs the operation itself. It collects two
//! independent acknowledgments and, once both are given, hands out an
//! [`Approval`] the caller presents as proof that the user agreed. Cancelling
//! is possible in every state.
//!
//! The cost and balance figures shown are fixed placeholders; the gate has
//! no pricing or balance source.

use crate::types::error::{Error, Result};
use runit_types::OperationTag;
use tracing::info;

/// Placeholder estimate shown when the caller supplies none
pub const DEFAULT_USD_ESTIMATE: &str = "$1-20";
pub const DEFAULT_HBAR_ESTIMATE: &str = "1-20 ℏ";
/// Placeholder balance line
pub const PLACEHOLDER_BALANCE: &str = "~75 ℏ (~$1,800 USD)";

pub const COST_ACKNOWLEDGMENT: &str =
	"I understand this operation will cost real HBAR (real money) and cannot be undone.";
pub const RESPONSIBILITY_ACKNOWLEDGMENT: &str =
	"I accept full responsibility for this transaction and any associated costs.";

/// Estimated cost of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostEstimate {
	pub usd: String,
	pub hbar: String,
}

impl Default for CostEstimate {
	fn default() -> Self {
		Self {
			usd: DEFAULT_USD_ESTIMATE.to_string(),
			hbar: DEFAULT_HBAR_ESTIMATE.to_string(),
		}
	}
}

/// What the gate shows for one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateContent {
	pub title: &'static str,
	pub description: &'static str,
	pub risks: &'static [&'static str],
	pub estimate: CostEstimate,
	pub balance: &'static str,
}

fn describe(tag: OperationTag) -> (&'static str, &'static str, &'static [&'static str]) {
	match tag {
		OperationTag::ContractDeploy => (
			"Deploy Smart Contract",
			"Deploy a smart contract to Hedera Mainnet",
			&[
				"This will cost real HBAR (real money)",
				"Transaction cannot be undone or refunded",
				"Gas fees apply for contract execution",
				"Contract will be permanently on mainnet",
			],
		),
		OperationTag::TokenCreate => (
			"Create Token/NFT Collection",
			"Create a new token or NFT collection on Hedera Mainnet",
			&[
				"This will cost real HBAR (real money)",
				"Token creation is permanent and irreversible",
				"You will be responsible for token management",
				"Additional costs for token operations",
			],
		),
		OperationTag::NftMint => (
			"Mint NFT",
			"Mint a new NFT on Hedera Mainnet",
			&[
				"This will cost real HBAR (real money)",
				"NFT will be permanently created",
				"Metadata cannot be changed after minting",
				"Transfer costs apply for moving NFTs",
			],
		),
		OperationTag::TokenTransfer => (
			"Transfer Tokens",
			"Transfer tokens to another account on Hedera Mainnet",
			&[
				"This will cost real HBAR (real money)",
				"Transfer is immediate and irreversible",
				"Ensure recipient address is correct",
				"You cannot recover sent tokens",
			],
		),
	}
}

/// Proof that both acknowledgments were given for `tag`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Approval {
	tag: OperationTag,
}

impl Approval {
	pub fn tag(&self) -> OperationTag {
		self.tag
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationGate {
	tag: OperationTag,
	estimate: CostEstimate,
	cost_acknowledged: bool,
	responsibility_accepted: bool,
}

impl ConfirmationGate {
	pub fn new(tag: OperationTag) -> Self {
		Self {
			tag,
			estimate: CostEstimate::default(),
			cost_acknowledged: false,
			responsibility_accepted: false,
		}
	}

	/// Replaces the placeholder estimate
	pub fn with_estimate(mut self, estimate: CostEstimate) -> Self {
		self.estimate = estimate;
		self
	}

	pub fn tag(&self) -> OperationTag {
		self.tag
	}

	pub fn content(&self) -> GateContent {
		let (title, description, risks) = describe(self.tag);
		GateContent {
			title,
			description,
			risks,
			estimate: self.estimate.clone(),
			balance: PLACEHOLDER_BALANCE,
		}
	}

	pub fn set_cost_acknowledged(&mut self, value: bool) {
		self.cost_acknowledged = value;
	}

	pub fn set_responsibility_accepted(&mut self, value: bool) {
		self.responsibility_accepted = value;
	}

	pub fn cost_acknowledged(&self) -> bool {
		self.cost_acknowledged
	}

	pub fn responsibility_accepted(&self) -> bool {
		self.responsibility_accepted
	}

	/// Whether the proceed action is enabled
	pub fn can_proceed(&self) -> bool {
		self.cost_acknowledged && self.responsibility_accepted
	}

	/// Consumes the gate and authorizes the operation
	///
	/// # Errors
	/// Returns [`Error::GateLocked`] unless both acknowledgments are given
	pub fn proceed(self) -> Result<Approval> {
		if !self.can_proceed() {
			return Err(Error::GateLocked(self.tag));
		}
		info!(operation = %self.tag, "Mainnet operation confirmed");
		Ok(Approval { tag: self.tag })
	}

	/// Closes the gate without authorizing anything
	pub fn cancel(self) {
		info!(operation = %self.tag, "Mainnet operation cancelled");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn proceed_needs_both_acknowledgments_for_every_tag() {
		for tag in OperationTag::ALL {
			for (cost, responsibility) in [(false, false), (true, false), (false, true)] {
				let mut gate = ConfirmationGate::new(tag);
				gate.set_cost_acknowledged(cost);
				gate.set_responsibility_accepted(responsibility);

				assert!(!gate.can_proceed(), "{tag} enabled with {cost}/{responsibility}");
				assert!(matches!(gate.proceed(), Err(Error::GateLocked(t)) if t == tag));
			}

			let mut gate = ConfirmationGate::new(tag);
			gate.set_cost_acknowledged(true);
			gate.set_responsibility_accepted(true);
			assert!(gate.can_proceed());
			assert_eq!(gate.proceed().unwrap().tag(), tag);
		}
	}

	#[test]
	fn unticking_disables_proceed_again() {
		let mut gate = ConfirmationGate::new(OperationTag::NftMint);
		gate.set_cost_acknowledged(true);
		gate.set_responsibility_accepted(true);
		gate.set_cost_acknowledged(false);
		assert!(!gate.can_proceed());
	}

	#[test]
	fn cancel_is_available_in_any_state() {
		ConfirmationGate::new(OperationTag::ContractDeploy).cancel();

		let mut ready = ConfirmationGate::new(OperationTag::TokenTransfer);
		ready.set_cost_acknowledged(true);
		ready.set_responsibility_accepted(true);
		ready.cancel();
	}

	#[test]
	fn content_is_a_static_lookup() {
		let content = ConfirmationGate::new(OperationTag::ContractDeploy).content();
		assert_eq!(content.title, "Deploy Smart Contract");
		assert_eq!(content.description, "Deploy a smart contract to Hedera Mainnet");
		assert_eq!(content.risks.len(), 4);
		assert_eq!(content.estimate, CostEstimate::default());
		assert_eq!(content.balance, PLACEHOLDER_BALANCE);

		for tag in OperationTag::ALL {
			let content = ConfirmationGate::new(tag).content();
			assert_eq!(content.risks[0], "This will cost real HBAR (real money)");
		}
	}

	#[test]
	fn custom_estimate_replaces_placeholder() {
		let estimate = CostEstimate {
			usd: "$2".to_string(),
			hbar: "0.5 ℏ".to_string(),
		};
		let gate = ConfirmationGate::new(OperationTag::TokenCreate).with_estimate(estimate.clone());
		assert_eq!(gate.content().estimate, estimate);
		assert_eq!(gate.content().title, "Create Token/NFT Collection");
	}
}
