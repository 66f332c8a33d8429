//! Transient user notifications
//!
//! Controllers and views queue short messages here; the front-end drains and
//! prints them after each command. Every queued message is also recorded as a
//! tracing event.

use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
	Success,
	Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
	pub level: Level,
	pub message: String,
}

/// Shared notification queue
#[derive(Debug, Clone, Default)]
pub struct Toaster {
	queue: Arc<Mutex<Vec<Notification>>>,
}

impl Toaster {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&self, level: Level, message: impl Into<String>) {
		let message = message.into();
		match level {
			Level::Success => info!(%message, "Notification"),
			Level::Error => warn!(%message, "Notification"),
		}
		self.queue
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.push(Notification { level, message });
	}

	pub fn success(&self, message: impl Into<String>) {
		self.push(Level::Success, message);
	}

	pub fn error(&self, message: impl Into<String>) {
		self.push(Level::Error, message);
	}

	/// Removes and returns everything queued so far, oldest first
	pub fn drain(&self) -> Vec<Notification> {
		std::mem::take(&mut *self.queue.lock().unwrap_or_else(PoisonError::into_inner))
	}

	/// Copy of the queue, for inspection without consuming it
	pub fn pending(&self) -> Vec<Notification> {
		self.queue
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}

	pub fn last(&self) -> Option<Notification> {
		self.queue
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.last()
			.cloned()
	}
}
