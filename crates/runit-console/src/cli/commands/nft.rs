use super::ConfirmArgs;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct NftCommand {
	#[command(subcommand)]
	pub command: NftSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum NftSubcommand {
	/// List minted NFTs and available collections
	List,

	/// Mint an NFT into an existing collection
	Mint {
		/// Collection token id
		#[arg(long)]
		token_id: String,

		#[arg(long)]
		name: String,

		#[arg(long, default_value = "")]
		description: String,

		/// Image URL
		#[arg(long, default_value = "")]
		image: String,

		#[command(flatten)]
		confirm: ConfirmArgs,
	},
}
