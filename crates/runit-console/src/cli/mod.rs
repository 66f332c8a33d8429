//! Command-line interface definitions and parsing

pub mod commands;
pub mod output;

use crate::{constants::env_vars, shell::Page};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Run.it Console: manage Hedera smart contracts, tokens and NFTs
#[derive(Parser, Debug)]
#[command(name = "runit-console")]
#[command(about = "Run.it Console - Manage Hedera smart contracts, tokens and NFTs")]
#[command(version)]
pub struct Cli {
	/// Path to a TOML configuration file
	#[arg(long, global = true, env = env_vars::CONFIG)]
	pub config: Option<PathBuf>,

	/// Enable debug logging
	#[arg(long, global = true)]
	pub debug: bool,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Show the current session and what the console would display
	Status {
		/// Page to mark active in the navigation
		#[arg(long, default_value = "dashboard")]
		page: Page,
	},

	/// Sign in with username and password
	Login(commands::LoginArgs),

	/// Create an account and sign in
	Register(commands::RegisterArgs),

	/// Sign out and forget the stored credential
	Logout,

	/// Show asset counts and recent transactions
	Dashboard,

	/// Personal profile
	Profile(commands::ProfileCommand),

	/// Smart contract operations
	Contract(commands::ContractCommand),

	/// Token and NFT collection operations
	Token(commands::TokenCommand),

	/// NFT operations
	Nft(commands::NftCommand),

	/// Ledger account operations
	Account(commands::AccountCommand),

	/// Check backend health
	Health,
}
