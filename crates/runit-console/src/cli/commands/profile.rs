use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct ProfileCommand {
	#[command(subcommand)]
	pub command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfileSubcommand {
	/// Show the stored profile
	Show,

	/// Create or update the profile; omitted fields keep their stored value
	Save {
		#[arg(long)]
		first_name: Option<String>,

		#[arg(long)]
		last_name: Option<String>,

		#[arg(long)]
		nickname: Option<String>,

		#[arg(long)]
		phone: Option<String>,

		#[arg(long)]
		nationality: Option<String>,

		/// Role code (P, C, ...)
		#[arg(long)]
		role_code: Option<String>,

		/// Comma-separated interests
		#[arg(long, value_delimiter = ',')]
		interests: Option<Vec<String>>,
	},
}
