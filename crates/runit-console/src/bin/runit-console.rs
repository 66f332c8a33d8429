//! Terminal front-end for the Run.it Console
//!
//! Parses arguments, sets up logging and configuration, dispatches to a
//! handler per command and finally prints the notifications the command
//! queued.

use anyhow::Result;
use clap::Parser;
use runit_console::{
	cli::{
		commands::{
			AccountCommand, AccountSubcommand, ConfirmArgs, ContractCommand, ContractSubcommand,
			LoginArgs, NftCommand, NftSubcommand, ProfileCommand, ProfileSubcommand,
			RegisterArgs, TokenCommand, TokenSubcommand,
		},
		output::Display,
		Cli, Commands,
	},
	core::{
		logging::{init_logging, operation_error, operation_start, operation_warning, show_notifications},
		Level,
	},
	gate::{COST_ACKNOWLEDGMENT, RESPONSIBILITY_ACKNOWLEDGMENT},
	views::{ContractsView, DashboardView, MintForm, NftsView, ProfileView, TokensView, TransferForm},
	Approval, ConfirmationGate, Context, Error, OperationTag, Page, RegistrationForm, ShellUi,
};
use runit_types::{TokenType, WalletConnectRequest};
use std::io::{BufRead, Write};
use tracing::{info, instrument};

type CmdResult<T = ()> = runit_console::Result<T>;

#[tokio::main]
async fn main() -> Result<()> {
	// Load environment variables from .env file if it exists
	let _ = dotenvy::dotenv();

	let cli = Cli::parse();
	init_logging(cli.debug);

	let ctx = match Context::load(cli.config.as_deref()) {
		Ok(ctx) => ctx,
		Err(e) => {
			operation_error("Loading configuration", &e);
			std::process::exit(1);
		},
	};

	let name = command_name(&cli.command);
	let outcome = dispatch(&ctx, cli.command).await;

	let notifications = ctx.auth().toaster().drain();
	let surfaced = notifications.iter().any(|n| n.level == Level::Error);
	show_notifications(&notifications);

	if let Err(e) = outcome {
		if !surfaced {
			operation_error(name, &e);
		}
		std::process::exit(1);
	}
	Ok(())
}

fn command_name(command: &Commands) -> &'static str {
	match command {
		Commands::Status { .. } => "Status",
		Commands::Login(_) => "Login",
		Commands::Register(_) => "Registration",
		Commands::Logout => "Logout",
		Commands::Dashboard => "Dashboard",
		Commands::Profile(_) => "Profile",
		Commands::Contract(_) => "Contract",
		Commands::Token(_) => "Token",
		Commands::Nft(_) => "NFT",
		Commands::Account(_) => "Account",
		Commands::Health => "Health check",
	}
}

async fn dispatch(ctx: &Context, command: Commands) -> CmdResult {
	match command {
		Commands::Status { page } => handle_status(ctx, page).await,
		Commands::Login(args) => handle_login(ctx, args).await,
		Commands::Register(args) => handle_register(ctx, args).await,
		Commands::Logout => {
			ctx.auth().logout();
			Ok(())
		},
		Commands::Dashboard => handle_dashboard(ctx).await,
		Commands::Profile(cmd) => handle_profile(ctx, cmd).await,
		Commands::Contract(cmd) => handle_contract(ctx, cmd).await,
		Commands::Token(cmd) => handle_token(ctx, cmd).await,
		Commands::Nft(cmd) => handle_nft(ctx, cmd).await,
		Commands::Account(cmd) => handle_account(ctx, cmd).await,
		Commands::Health => handle_health(ctx).await,
	}
}

/// Runs the mainnet confirmation gate for `tag`
///
/// Callers check the draft first so the gate only appears for a request
/// that would actually be sent.
///
/// Off mainnet nothing is asked and `None` is returned. With both flags set
/// the gate is answered non-interactively; otherwise the user is prompted.
fn confirm_cost(ctx: &Context, tag: OperationTag, flags: ConfirmArgs) -> CmdResult<Option<Approval>> {
	if !ctx.network().requires_confirmation() {
		return Ok(None);
	}

	let mut gate = ConfirmationGate::new(tag);
	Display::gate(&gate.content());

	if flags.acknowledge_cost && flags.accept_responsibility {
		gate.set_cost_acknowledged(true);
		gate.set_responsibility_accepted(true);
	} else {
		gate.set_cost_acknowledged(flags.acknowledge_cost || ask(COST_ACKNOWLEDGMENT)?);
		if !gate.cost_acknowledged() {
			gate.cancel();
			return Err(Error::GateLocked(tag));
		}
		gate.set_responsibility_accepted(
			flags.accept_responsibility || ask(RESPONSIBILITY_ACKNOWLEDGMENT)?,
		);
	}

	gate.proceed().map(Some)
}

/// Yes/no question on the terminal, defaulting to no
fn ask(question: &str) -> CmdResult<bool> {
	print!("{question} [y/N] ");
	std::io::stdout().flush()?;

	let mut answer = String::new();
	std::io::stdin().lock().read_line(&mut answer)?;
	Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Lets the session react to a failed direct API call
fn checked<T>(ctx: &Context, outcome: CmdResult<T>) -> CmdResult<T> {
	if let Err(e) = &outcome {
		ctx.auth().observe(e);
	}
	outcome
}

#[instrument(skip(ctx))]
async fn handle_status(ctx: &Context, page: Page) -> CmdResult {
	Display::header("Run.it Console");
	Display::kv("Backend", &ctx.config.api_base_url);
	Display::kv("Network", ctx.network().as_str());

	let state = ctx.auth().bootstrap().await;
	Display::kv("Session", state.describe());
	if let Some(expires) = ctx.auth().credential_expiry() {
		Display::kv("Expires", expires.to_rfc3339());
	}

	Display::screen(&ctx.screen(&ShellUi {
		active: page,
		..ShellUi::default()
	}));
	Ok(())
}

#[instrument(skip_all, fields(username = %args.username))]
async fn handle_login(ctx: &Context, args: LoginArgs) -> CmdResult {
	ctx.require_signed_out().await?;
	let password = match args.password {
		Some(password) => password,
		None => rpassword::prompt_password("Password: ")?,
	};

	ctx.auth().login(&args.username, &password).await?;
	Display::screen(&ctx.screen(&ShellUi::default()));
	Ok(())
}

#[instrument(skip_all, fields(username = %args.username))]
async fn handle_register(ctx: &Context, args: RegisterArgs) -> CmdResult {
	ctx.require_signed_out().await?;
	let (password, confirm_password) = match args.password {
		Some(password) => (password, None),
		None => {
			let password = rpassword::prompt_password("Password: ")?;
			let confirm = rpassword::prompt_password("Confirm password: ")?;
			(password, Some(confirm))
		},
	};

	let form = RegistrationForm {
		username: args.username,
		email: args.email,
		password,
		confirm_password,
		full_name: args.full_name,
	};
	let profile = ctx.auth().register(&form).await?;

	if let Some(account) = profile.ledger_account_id() {
		Display::kv("Ledger account", account);
	}
	Ok(())
}

#[instrument(skip(ctx))]
async fn handle_dashboard(ctx: &Context) -> CmdResult {
	ctx.require_session().await?;

	let mut view = DashboardView::new();
	view.activate(ctx.auth()).await?;

	Display::header("Dashboard");
	let stats = view.stats();
	Display::kv("Contracts", stats.contracts);
	Display::kv("Tokens", stats.tokens);
	Display::kv("NFTs", stats.nfts);
	Display::kv("Transactions", stats.transactions);

	Display::section("Recent transactions");
	if view.recent_transactions().is_empty() {
		Display::info("No transactions yet");
	}
	for tx in view.recent_transactions() {
		Display::item(&format!(
			"{} {} [{}] {}",
			tx.transaction_type,
			tx.token_id.as_deref().unwrap_or("-"),
			tx.status,
			tx.timestamp.as_deref().unwrap_or(""),
		));
	}
	Ok(())
}

#[instrument(skip_all)]
async fn handle_profile(ctx: &Context, cmd: ProfileCommand) -> CmdResult {
	ctx.require_session().await?;
	let mut view = ProfileView::new();
	view.activate(ctx.auth()).await?;

	match cmd.command {
		ProfileSubcommand::Show => {
			Display::header("Profile");
			match view.profile() {
				Some(profile) => {
					Display::kv("Name", &format!("{} {}", profile.first_name, profile.last_name));
					if let Some(nickname) = &profile.nickname {
						Display::kv("Nickname", nickname);
					}
					if let Some(phone) = &profile.phone {
						Display::kv("Phone", phone);
					}
					if let Some(nationality) = &profile.nationality {
						Display::kv("Nationality", nationality);
					}
					Display::kv("Role", &profile.role_code);
					if !profile.interests.is_empty() {
						Display::kv("Interests", &profile.interests.join(", "));
					}
					Display::kv("KYC approved", if profile.kyc_approved { "yes" } else { "no" });
				},
				None => Display::next_steps(&[
					"Create your profile with 'runit-console profile save --first-name <first> --last-name <last>'",
				]),
			}
		},
		ProfileSubcommand::Save {
			first_name,
			last_name,
			nickname,
			phone,
			nationality,
			role_code,
			interests,
		} => {
			let form = view.edit();
			if let Some(v) = first_name {
				form.first_name = v;
			}
			if let Some(v) = last_name {
				form.last_name = v;
			}
			if let Some(v) = nickname {
				form.nickname = v;
			}
			if let Some(v) = phone {
				form.phone = v;
			}
			if let Some(v) = nationality {
				form.nationality = v;
			}
			if let Some(v) = role_code {
				form.role_code = v;
			}
			if let Some(v) = interests {
				form.interests = v;
			}

			let saved = view.submit(ctx.auth()).await?;
			info!(profile_id = ?saved.profile_id, "Profile saved");
		},
	}
	Ok(())
}

#[instrument(skip_all)]
async fn handle_contract(ctx: &Context, cmd: ContractCommand) -> CmdResult {
	ctx.require_session().await?;
	let mut view = ContractsView::new();

	match cmd.command {
		ContractSubcommand::List => {
			view.activate(ctx.auth()).await?;
			Display::header("Smart Contracts");
			if view.contracts().is_empty() {
				Display::info("No contracts deployed yet");
			}
			for contract in view.contracts() {
				Display::item(&format!(
					"{} {} [{}]",
					contract.contract_name,
					contract.contract_id.as_deref().unwrap_or("pending"),
					contract.status,
				));
			}
		},
		ContractSubcommand::Deploy {
			name,
			bytecode,
			bytecode_file,
			constructor_params,
			confirm,
		} => {
			let bytecode = match (bytecode, bytecode_file) {
				(Some(inline), _) => inline,
				(None, Some(path)) => std::fs::read_to_string(&path)?.trim().to_string(),
				(None, None) => String::new(),
			};

			let form = view.draft().open();
			form.contract_name = name;
			form.bytecode = bytecode;
			form.constructor_params = constructor_params.unwrap_or_default();

			view.draft().validated()?;
			confirm_cost(ctx, OperationTag::ContractDeploy, confirm)?;
			operation_start("Contract deployment", &ctx.network().to_string());
			let deployed = view.submit(ctx.auth()).await?;

			if let Some(id) = &deployed.contract_id {
				Display::kv("Contract id", id);
			}
			if let Some(address) = &deployed.contract_address {
				Display::kv("Address", address);
			}
		},
	}
	Ok(())
}

#[instrument(skip_all)]
async fn handle_token(ctx: &Context, cmd: TokenCommand) -> CmdResult {
	ctx.require_session().await?;
	let mut view = TokensView::new();

	match cmd.command {
		TokenSubcommand::List => {
			view.activate(ctx.auth()).await?;
			Display::header("Tokens");
			if view.tokens().is_empty() {
				Display::info("No tokens created yet");
			}
			for token in view.tokens() {
				Display::item(&format!(
					"{} ({}) {} {} [{}]",
					token.token_name,
					token.token_symbol,
					token.token_id.as_deref().unwrap_or("pending"),
					token.token_type,
					token.status,
				));
			}
		},
		TokenSubcommand::Create {
			name,
			symbol,
			decimals,
			initial_supply,
			nft,
			confirm,
		} => {
			let form = view.create_draft().open();
			form.name = name;
			form.symbol = symbol;
			form.decimals = decimals;
			form.initial_supply = initial_supply;
			form.token_type = if nft {
				TokenType::Nft
			} else {
				TokenType::Fungible
			};

			view.create_draft().validated()?;
			confirm_cost(ctx, OperationTag::TokenCreate, confirm)?;
			operation_start("Token creation", &ctx.network().to_string());
			let created = view.submit_create(ctx.auth()).await?;
			if let Some(id) = &created.token_id {
				Display::kv("Token id", id);
			}
		},
		TokenSubcommand::Transfer {
			token_id,
			to,
			amount,
			confirm,
		} => {
			view.transfer_draft().open_with(TransferForm {
				token_id,
				to_account: to,
				amount,
			});

			view.transfer_draft().validated()?;
			confirm_cost(ctx, OperationTag::TokenTransfer, confirm)?;
			operation_start("Token transfer", &ctx.network().to_string());
			let sent = view.submit_transfer(ctx.auth()).await?;
			if let Some(tx) = &sent.transaction_id {
				Display::kv("Transaction", tx);
			}
		},
	}
	Ok(())
}

#[instrument(skip_all)]
async fn handle_nft(ctx: &Context, cmd: NftCommand) -> CmdResult {
	ctx.require_session().await?;
	let mut view = NftsView::new();
	view.activate(ctx.auth()).await?;

	match cmd.command {
		NftSubcommand::List => {
			Display::header("NFTs");
			if !view.can_mint() {
				operation_warning(
					"NFT listing",
					"You need to create an NFT collection first before minting NFTs.",
				);
			}
			for nft in view.nfts() {
				Display::item(&format!(
					"{} serial {} of {}",
					nft.metadata.name,
					nft.serial_number
						.map(|s| s.to_string())
						.unwrap_or_else(|| "?".to_string()),
					nft.token_id,
				));
			}
			Display::section("Collections");
			for collection in view.collections() {
				Display::item(&format!(
					"{} ({}) {}",
					collection.token_name,
					collection.token_symbol,
					collection.token_id.as_deref().unwrap_or("pending"),
				));
			}
		},
		NftSubcommand::Mint {
			token_id,
			name,
			description,
			image,
			confirm,
		} => {
			view.draft().open_with(MintForm {
				token_id,
				name,
				description,
				image,
				attributes: Vec::new(),
			});

			view.ready()?;
			confirm_cost(ctx, OperationTag::NftMint, confirm)?;
			operation_start("NFT mint", &ctx.network().to_string());
			let minted = view.submit(ctx.auth()).await?;
			if let Some(serial) = minted.serial_number {
				Display::kv("Serial", serial);
			}
		},
	}
	Ok(())
}

#[instrument(skip_all)]
async fn handle_account(ctx: &Context, cmd: AccountCommand) -> CmdResult {
	ctx.require_session().await?;
	let api = ctx.auth().api();

	match cmd.command {
		AccountSubcommand::Balance => {
			let balance = checked(ctx, api.account_balance().await)?;
			Display::header("Account Balance");
			Display::kv("Account", &balance.account_id);
			Display::kv("HBAR", &balance.hbar_balance);
			for (token, amount) in &balance.token_balances {
				Display::kv(token, amount);
			}
		},
		AccountSubcommand::Transactions => {
			let transactions = checked(ctx, api.transactions().await)?;
			Display::header("Transactions");
			if transactions.is_empty() {
				Display::info("No transactions yet");
			}
			for tx in &transactions {
				Display::item(&format!(
					"{} {} -> {} {} [{}]",
					tx.transaction_type,
					tx.from_account.as_deref().unwrap_or("-"),
					tx.to_account.as_deref().unwrap_or("-"),
					tx.amount.map(|a| a.to_string()).unwrap_or_default(),
					tx.status,
				));
			}
		},
		AccountSubcommand::ConnectWallet {
			account_id,
			public_key,
			signature,
		} => {
			let request = WalletConnectRequest {
				account_id,
				public_key,
				signature,
			};
			let reply = checked(ctx, api.connect_wallet(&request).await)?;
			Display::success(reply.message.as_deref().unwrap_or("Wallet connected"));
		},
	}
	Ok(())
}

#[instrument(skip(ctx))]
async fn handle_health(ctx: &Context) -> CmdResult {
	let health = ctx.auth().api().health().await?;

	Display::header("Backend Health");
	Display::kv("Status", &health.status);
	if let Some(db) = &health.mongodb {
		Display::kv("Database", db);
	}
	if let Some(ledger) = &health.hedera {
		Display::kv("Ledger", ledger);
	}
	if !health.is_healthy() {
		operation_warning("Health check", "Backend reports degraded health");
	}
	Ok(())
}
