//! Argument structures for each subcommand

mod account;
mod auth;
mod contract;
mod nft;
mod profile;
mod token;

pub use account::{AccountCommand, AccountSubcommand};
pub use auth::{LoginArgs, RegisterArgs};
pub use contract::{ContractCommand, ContractSubcommand};
pub use nft::{NftCommand, NftSubcommand};
pub use profile::{ProfileCommand, ProfileSubcommand};
pub use token::{TokenCommand, TokenSubcommand};

use clap::Args;

/// Non-interactive answers to the mainnet confirmation gate
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ConfirmArgs {
	/// Acknowledge that the operation costs real HBAR and cannot be undone
	#[arg(long)]
	pub acknowledge_cost: bool,

	/// Accept full responsibility for the transaction and its costs
	#[arg(long)]
	pub accept_responsibility: bool,
}
