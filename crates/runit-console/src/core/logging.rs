//! Logging setup and user-facing operation reporting
//!
//! The helpers here pair terminal output with a structured tracing event, so
//! what the user saw can be found again in the logs.

use crate::{
	cli::output::Display,
	core::notify::{Level, Notification},
	types::error::Error,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber
///
/// `RUST_LOG` wins when set. Otherwise the console logs at info (debug when
/// `debug` is true) and other crates at warn. Output goes to stderr so it
/// never mixes with command output.
pub fn init_logging(debug: bool) {
	use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

	let default = if debug {
		"runit_console=debug,runit_types=debug,warn"
	} else {
		"runit_console=info,warn"
	};
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

	let _ = tracing_subscriber::registry()
		.with(
			fmt::layer()
				.with_writer(std::io::stderr)
				.with_target(true)
				.with_thread_ids(false)
				.with_file(false)
				.with_line_number(false)
				.compact(),
		)
		.with(env_filter)
		.try_init();
}

/// Logs the start of an operation that talks to the ledger
///
/// # Arguments
/// * `operation` - Human-readable operation name
/// * `context` - Where it runs, usually the network
pub fn operation_start(operation: &str, context: &str) {
	info!(operation, context, "Operation started");
}

/// Reports a failed operation to the user and the logs
///
/// # Arguments
/// * `operation` - Human-readable operation name
/// * `err` - The failure; its kind is recorded on the event
pub fn operation_error(operation: &str, err: &Error) {
	Display::error(&format!("{operation} failed: {err}"));
	error!(operation, error = %err, kind = ?err.kind(), "Operation failed");
}

/// Shows a warning and records it with the operation it belongs to
pub fn operation_warning(operation: &str, message: &str) {
	Display::warning(message);
	warn!(operation, message, "Operation warning");
}

/// Prints queued notifications in order
pub fn show_notifications(notifications: &[Notification]) {
	for notification in notifications {
		match notification.level {
			Level::Success => Display::success(&notification.message),
			Level::Error => Display::error(&notification.message),
		}
	}
}
