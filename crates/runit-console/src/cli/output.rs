//! Terminal output formatting
//!
//! Every line the binary prints goes through [`Display`]: status lines with
//! a coloured marker, labelled values, lists, the shell screen and the
//! mainnet warning. Diagnostics go to tracing on stderr instead.

use crate::{
	gate::GateContent,
	shell::{AuthForm, Screen},
};
use colored::{ColoredString, Colorize};
use std::fmt;

/// Terminal display helpers
pub struct Display;

impl Display {
	/// Prints a page title underlined to its width
	///
	/// # Arguments
	/// * `text` - Title to print
	pub fn header(text: &str) {
		let rule = "─".repeat(text.chars().count());
		println!("\n{}\n{}", text.bold().cyan(), rule.cyan());
	}

	/// Reports a completed action
	///
	/// # Arguments
	/// * `message` - What completed
	pub fn success(message: &str) {
		println!("{}", Self::marked("✓".green().bold(), message.normal()));
	}

	/// Reports a failure on stderr
	///
	/// # Arguments
	/// * `message` - What failed and why
	pub fn error(message: &str) {
		eprintln!("{}", Self::marked("✗".red().bold(), message.red()));
	}

	/// Reports something the user should act on
	///
	/// # Arguments
	/// * `message` - Warning text
	pub fn warning(message: &str) {
		println!("{}", Self::marked("⚠".yellow().bold(), message.yellow()));
	}

	/// Prints a neutral remark, such as an empty list
	///
	/// # Arguments
	/// * `message` - Remark text
	pub fn info(message: &str) {
		println!("{}", Self::marked("ℹ".blue().bold(), message.normal()));
	}

	/// Prints an indented `label: value` line
	///
	/// # Arguments
	/// * `label` - Bold label, printed with a trailing colon
	/// * `value` - Anything displayable
	pub fn kv(label: &str, value: impl fmt::Display) {
		println!("  {} {value}", format!("{label}:").bold());
	}

	/// Starts a titled block inside a page
	pub fn section(title: &str) {
		println!("\n{} {}", "▸".bold(), title.bold());
	}

	/// One bulleted entry of a list
	pub fn item(text: &str) {
		println!("  • {text}");
	}

	/// Numbered suggestions for what to run next
	///
	/// # Arguments
	/// * `steps` - Commands or actions, in the order to try them
	pub fn next_steps(steps: &[&str]) {
		Self::section("Next Steps");
		for (number, step) in (1..).zip(steps) {
			println!("  {number}. {step}");
		}
	}

	fn marked(marker: ColoredString, message: ColoredString) -> String {
		format!("{marker} {message}")
	}

	/// Prints what the shell would show
	pub fn screen(screen: &Screen) {
		match screen {
			Screen::Loading => Self::info("Checking stored session..."),
			Screen::Auth { form, notice } => {
				if let Some(notice) = notice {
					Self::warning(notice);
				}
				let form = match form {
					AuthForm::Login => "Sign in",
					AuthForm::Register => "Create account",
				};
				Self::kv("Screen", form);
				Self::next_steps(&[
					"Sign in with 'runit-console login --username <name>'",
					"Or create an account with 'runit-console register'",
				]);
			},
			Screen::App(frame) => {
				Self::kv("User", &frame.username);
				Self::kv("Email", &frame.email);
				Self::kv(
					"Ledger account",
					frame.ledger_account.as_deref().unwrap_or("not provisioned"),
				);
				Self::section("Pages");
				for item in &frame.nav {
					let label = if item.coming_soon {
						format!("{} {}", item.page.label(), "(coming soon)".dimmed())
					} else {
						item.page.label().to_string()
					};
					if item.active {
						println!("  {} {}", "▸".cyan(), label.bold());
					} else {
						println!("    {}", label);
					}
				}
			},
		}
	}

	/// Prints the mainnet confirmation warning
	pub fn gate(content: &GateContent) {
		println!("\n{}", "⚠ MAINNET OPERATION WARNING".red().bold());
		println!("{}", content.title.bold());
		println!("{}", content.description);

		Self::section("Risks and costs");
		for risk in content.risks {
			println!("  {} {}", "•".red(), risk);
		}

		Self::section("Estimated cost");
		Self::kv("USD", &content.estimate.usd);
		Self::kv("HBAR", &content.estimate.hbar);
		println!(
			"  {}",
			"Actual costs may vary with network congestion and transaction complexity".dimmed()
		);
		Self::kv("Current balance", content.balance);
		println!();
	}
}
