//! Page shell
//!
//! [`render`] decides what the user sees from a session snapshot alone: a
//! loading indicator while a stored credential is checked, the sign-in forms
//! while signed out, or the application frame with its navigation.

use crate::core::session::{AuthState, SessionSnapshot};
use std::{fmt, str::FromStr};

/// Top-level pages reachable from the navigation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Page {
	#[default]
	Dashboard,
	Profile,
	Contracts,
	Tokens,
	Nfts,
	Analytics,
	Settings,
}

impl Page {
	/// Navigation order
	pub const ALL: [Page; 7] = [
		Page::Dashboard,
		Page::Profile,
		Page::Contracts,
		Page::Tokens,
		Page::Nfts,
		Page::Analytics,
		Page::Settings,
	];

	pub fn label(&self) -> &'static str {
		match self {
			Page::Dashboard => "Dashboard",
			Page::Profile => "Profile",
			Page::Contracts => "Smart Contracts",
			Page::Tokens => "Tokens",
			Page::Nfts => "NFTs",
			Page::Analytics => "Analytics",
			Page::Settings => "Settings",
		}
	}

	/// Pages without content yet
	pub fn is_placeholder(&self) -> bool {
		matches!(self, Page::Analytics | Page::Settings)
	}
}

impl fmt::Display for Page {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

impl FromStr for Page {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"dashboard" => Ok(Page::Dashboard),
			"profile" => Ok(Page::Profile),
			"contracts" | "smart-contracts" => Ok(Page::Contracts),
			"tokens" => Ok(Page::Tokens),
			"nfts" => Ok(Page::Nfts),
			"analytics" => Ok(Page::Analytics),
			"settings" => Ok(Page::Settings),
			other => Err(format!("Unknown page: {other}")),
		}
	}
}

/// Which form the sign-in screen shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthForm {
	#[default]
	Login,
	Register,
}

/// Shell state owned by the front-end rather than the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShellUi {
	pub active: Page,
	pub auth_form: AuthForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
	pub page: Page,
	pub active: bool,
	pub coming_soon: bool,
}

/// Frame around the signed-in application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppFrame {
	pub nav: Vec<NavItem>,
	pub active: Page,
	pub username: String,
	pub email: String,
	pub ledger_account: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
	Loading,
	Auth {
		form: AuthForm,
		notice: Option<String>,
	},
	App(AppFrame),
}

/// Maps the session to the screen to show
pub fn render(snapshot: &SessionSnapshot, ui: &ShellUi) -> Screen {
	match snapshot.auth {
		AuthState::Authenticating if snapshot.bootstrapping => Screen::Loading,
		AuthState::Unauthenticated | AuthState::Authenticating => Screen::Auth {
			form: ui.auth_form,
			notice: None,
		},
		AuthState::SessionInvalid => Screen::Auth {
			form: AuthForm::Login,
			notice: snapshot.notice.clone(),
		},
		AuthState::Authenticated => match &snapshot.profile {
			Some(profile) => Screen::App(AppFrame {
				nav: Page::ALL
					.iter()
					.map(|&page| NavItem {
						page,
						active: page == ui.active,
						coming_soon: page.is_placeholder(),
					})
					.collect(),
				active: ui.active,
				username: profile.username.clone(),
				email: profile.email.clone(),
				ledger_account: profile.ledger_account_id().map(str::to_string),
			}),
			None => Screen::Loading,
		},
	}
}
