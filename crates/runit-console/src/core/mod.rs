//! Core services: session, persistence, backend access and notifications

pub mod api;
pub mod auth;
pub mod config;
pub mod logging;
pub mod notify;
pub mod session;
pub mod storage;

pub use api::{ApiClient, BackendApi};
pub use auth::{AuthController, RegistrationForm, SESSION_EXPIRED};
pub use config::{ConsoleConfig, Network};
pub use notify::{Level, Notification, Toaster};
pub use session::{AuthState, SessionReader, SessionSnapshot, SessionStore};
pub use storage::Storage;

#[cfg(any(test, feature = "testing"))]
pub use api::MockBackendApi;
