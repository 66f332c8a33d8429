use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct AccountCommand {
	#[command(subcommand)]
	pub command: AccountSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AccountSubcommand {
	/// Show the HBAR and token balances of the ledger account
	Balance,

	/// List recorded transactions
	Transactions,

	/// Link an external wallet to the signed-in user
	ConnectWallet {
		#[arg(long)]
		account_id: String,

		#[arg(long)]
		public_key: String,

		/// Signature proving control of the account
		#[arg(long)]
		signature: String,
	},
}
