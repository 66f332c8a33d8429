//! Sign-in arguments. Passwords are prompted for when omitted.

use clap::Args;

#[derive(Args, Debug)]
pub struct LoginArgs {
	#[arg(long, short)]
	pub username: String,

	/// Read from the terminal when omitted
	#[arg(long)]
	pub password: Option<String>,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
	#[arg(long, short)]
	pub username: String,

	#[arg(long)]
	pub email: String,

	#[arg(long)]
	pub full_name: String,

	/// Read from the terminal, with confirmation, when omitted
	#[arg(long)]
	pub password: Option<String>,
}
