//! Run.it Console
//!
//! Client library for the Run.it asset-management backend. It owns the
//! sign-in lifecycle ([`AuthController`]), decides what to show
//! ([`shell::render`]), keeps per-page state in [`views`], and guards
//! mainnet operations that spend real funds ([`ConfirmationGate`]).

pub mod cli;
pub mod constants;
pub mod context;
pub mod core;
pub mod gate;
pub mod shell;
pub mod types;
pub mod views;

pub use context::Context;
pub use crate::core::{
	ApiClient, AuthController, AuthState, BackendApi, ConsoleConfig, Network, RegistrationForm,
	SessionReader, SessionSnapshot, Toaster,
};
pub use gate::{Approval, ConfirmationGate};
pub use shell::{Page, Screen, ShellUi};
pub use types::{Credential, Error, ErrorKind, Result};

pub use runit_types::OperationTag;
