//! Constants used throughout the console
//!
//! Storage keys, environment variable names and defaults for configuration.

/// Storage key under which the bearer credential is persisted
pub const CREDENTIAL_KEY: &str = "token";

/// Backend used when neither the config file nor the environment names one
pub const DEFAULT_API_URL: &str = "http://localhost:8001";

/// Data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = ".runit-console";

/// Per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable names recognised by the console
pub mod env_vars {
	/// Path to the TOML configuration file
	pub const CONFIG: &str = "RUNIT_CONFIG";

	/// Backend base URL override
	pub const API_URL: &str = "RUNIT_API_URL";

	/// Network override (`testnet` or `mainnet`)
	pub const NETWORK: &str = "RUNIT_NETWORK";

	/// Data directory override
	pub const DATA_DIR: &str = "RUNIT_DATA_DIR";
}
