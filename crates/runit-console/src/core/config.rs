//! Console configuration
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! an optional TOML file, and `RUNIT_*` environment variables. String values
//! in the file may reference the environment as `${VAR}` or
//! `${VAR:-default}`.

use crate::{
	constants::{env_vars, DEFAULT_API_URL, DEFAULT_DATA_DIR, DEFAULT_REQUEST_TIMEOUT_SECS},
	types::error::{Error, Result},
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{
	fmt,
	path::{Path, PathBuf},
	str::FromStr,
	time::Duration,
};

/// Ledger network the backend is operating against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
	#[default]
	Testnet,
	Mainnet,
}

impl Network {
	pub fn as_str(&self) -> &'static str {
		match self {
			Network::Testnet => "testnet",
			Network::Mainnet => "mainnet",
		}
	}

	/// Operations here spend real funds and must be confirmed first
	pub fn requires_confirmation(&self) -> bool {
		matches!(self, Network::Mainnet)
	}
}

impl fmt::Display for Network {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Network {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s.trim().to_ascii_lowercase().as_str() {
			"testnet" => Ok(Network::Testnet),
			"mainnet" => Ok(Network::Mainnet),
			other => Err(Error::InvalidConfig(format!(
				"Unknown network '{other}' (expected testnet or mainnet)"
			))),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
	/// Backend base URL, without the `/api` prefix
	pub api_base_url: String,
	pub network: Network,
	/// Where the credential file is kept
	pub data_dir: PathBuf,
	pub request_timeout_secs: u64,
}

impl Default for ConsoleConfig {
	fn default() -> Self {
		Self {
			api_base_url: DEFAULT_API_URL.to_string(),
			network: Network::default(),
			data_dir: PathBuf::from(DEFAULT_DATA_DIR),
			request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
		}
	}
}

impl ConsoleConfig {
	/// Loads the configuration
	///
	/// Reads `path` when given, then applies environment overrides and
	/// validates the result.
	///
	/// # Errors
	/// Returns error if the file is missing or malformed, a referenced
	/// environment variable has no value or default, or a setting is invalid
	pub fn load(path: Option<&Path>) -> Result<Self> {
		let mut config = match path {
			Some(path) => {
				if !path.exists() {
					return Err(Error::ConfigNotFound(path.to_path_buf()));
				}
				let raw = std::fs::read_to_string(path)?;
				Self::from_toml_str(&raw)?
			},
			None => Self::default(),
		};

		config.apply_overrides(|name| std::env::var(name).ok())?;
		config.validate()?;
		Ok(config)
	}

	/// Parses TOML after substituting environment references
	pub fn from_toml_str(raw: &str) -> Result<Self> {
		let resolved = resolve_env_vars(raw)?;
		Ok(toml::from_str(&resolved)?)
	}

	/// Applies `RUNIT_*` overrides as returned by `lookup`
	pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(url) = lookup(env_vars::API_URL) {
			self.api_base_url = url;
		}
		if let Some(network) = lookup(env_vars::NETWORK) {
			self.network = network.parse()?;
		}
		if let Some(dir) = lookup(env_vars::DATA_DIR) {
			self.data_dir = PathBuf::from(dir);
		}
		Ok(())
	}

	pub fn validate(&self) -> Result<()> {
		if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
		{
			return Err(Error::InvalidConfig(format!(
				"api_base_url must be an http(s) URL, got '{}'",
				self.api_base_url
			)));
		}
		if self.request_timeout_secs == 0 {
			return Err(Error::InvalidConfig(
				"request_timeout_secs must be greater than zero".to_string(),
			));
		}
		Ok(())
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout_secs)
	}
}

/// Replaces `${VAR}` and `${VAR:-default}` with values from the environment
pub(crate) fn resolve_env_vars(input: &str) -> Result<String> {
	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| Error::InvalidConfig(format!("Regex error: {e}")))?;

	let mut missing = None;
	let resolved = re.replace_all(input, |caps: &regex::Captures<'_>| {
		let name = &caps[1];
		match (std::env::var(name), caps.get(2)) {
			(Ok(value), _) => value,
			(Err(_), Some(default)) => default.as_str().to_string(),
			(Err(_), None) => {
				missing.get_or_insert_with(|| name.to_string());
				String::new()
			},
		}
	});

	match missing {
		Some(name) => Err(Error::InvalidConfig(format!(
			"Environment variable '{name}' not found"
		))),
		None => Ok(resolved.into_owned()),
	}
}
