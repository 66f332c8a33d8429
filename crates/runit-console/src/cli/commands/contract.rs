use super::ConfirmArgs;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ContractCommand {
	#[command(subcommand)]
	pub command: ContractSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ContractSubcommand {
	/// List deployed contracts
	List,

	/// Deploy a contract from hex bytecode
	Deploy {
		#[arg(long)]
		name: String,

		/// Hex bytecode, inline
		#[arg(long, conflicts_with = "bytecode_file", required_unless_present = "bytecode_file")]
		bytecode: Option<String>,

		/// File containing hex bytecode
		#[arg(long)]
		bytecode_file: Option<PathBuf>,

		/// Encoded constructor parameters
		#[arg(long)]
		constructor_params: Option<String>,

		#[command(flatten)]
		confirm: ConfirmArgs,
	},
}
