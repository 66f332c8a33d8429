//! Token command arguments

use super::ConfirmArgs;
use crate::views::tokens::{DEFAULT_DECIMALS, DEFAULT_INITIAL_SUPPLY};
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct TokenCommand {
	#[command(subcommand)]
	pub command: TokenSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TokenSubcommand {
	/// List tokens and NFT collections
	List,

	/// Create a fungible token or an NFT collection
	Create {
		#[arg(long)]
		name: String,

		#[arg(long)]
		symbol: String,

		/// Ignored for NFT collections
		#[arg(long, default_value_t = DEFAULT_DECIMALS)]
		decimals: u32,

		/// Initial supply, or maximum supply for NFT collections
		#[arg(long, default_value_t = DEFAULT_INITIAL_SUPPLY)]
		initial_supply: u64,

		/// Create an NFT collection instead of a fungible token
		#[arg(long)]
		nft: bool,

		#[command(flatten)]
		confirm: ConfirmArgs,
	},

	/// Transfer fungible tokens to another account
	Transfer {
		/// Ledger token id, e.g. 0.0.1234
		#[arg(long)]
		token_id: String,

		/// Recipient ledger account id
		#[arg(long)]
		to: String,

		#[arg(long)]
		amount: u64,

		#[command(flatten)]
		confirm: ConfirmArgs,
	},
}
