//! Account overview: asset counts and recent transactions

use crate::{core::auth::AuthController, types::error::Result, views::reported};
use runit_types::{DashboardData, DashboardStats, TransactionRecord};
use tracing::instrument;

#[derive(Debug, Clone, Default)]
pub struct DashboardView {
	data: Option<DashboardData>,
}

impl DashboardView {
	pub fn new() -> Self {
		Self::default()
	}

	/// Fetches the overview, replacing the previous one on success
	#[instrument(skip_all)]
	pub async fn activate(&mut self, auth: &AuthController) -> Result<&DashboardData> {
		let data = reported(
			auth,
			auth.api().dashboard().await,
			"Failed to fetch dashboard data",
		)?;
		Ok(self.data.insert(data))
	}

	pub fn data(&self) -> Option<&DashboardData> {
		self.data.as_ref()
	}

	/// Counts, zero until the first successful fetch
	pub fn stats(&self) -> DashboardStats {
		self.data.as_ref().map(|d| d.stats).unwrap_or_default()
	}

	pub fn recent_transactions(&self) -> &[TransactionRecord] {
		self.data
			.as_ref()
			.map(|d| d.recent_transactions.as_slice())
			.unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::{api::MockBackendApi, auth::test_support::*, session::AuthState};
	use crate::types::error::Error;
	use runit_types::DashboardData;
	use std::sync::Arc;
	use tempfile::TempDir;

	fn data(contracts: u64) -> DashboardData {
		DashboardData {
			stats: DashboardStats {
				contracts,
				tokens: 2,
				nfts: 3,
				transactions: 4,
			},
			recent_transactions: Vec::new(),
			user: profile(),
		}
	}

	#[tokio::test]
	async fn failed_refresh_keeps_previous_overview() {
		let dir = TempDir::new().unwrap();
		let mut api = MockBackendApi::new();
		let mut calls = 0;
		api.expect_dashboard().times(2).returning(move || {
			calls += 1;
			if calls == 1 {
				Ok(data(1))
			} else {
				Err(Error::RequestFailed {
					status: 500,
					detail: None,
				})
			}
		});
		let auth = signed_in(Arc::new(api), dir.path());
		let mut view = DashboardView::new();

		view.activate(&auth).await.unwrap();
		assert!(view.activate(&auth).await.is_err());

		assert_eq!(view.stats().contracts, 1);
		assert_eq!(
			auth.toaster().last().unwrap().message,
			"Failed to fetch dashboard data"
		);
		assert_eq!(auth.state(), AuthState::Authenticated);
	}

	#[tokio::test]
	async fn unauthorized_fetch_ends_session() {
		let dir = TempDir::new().unwrap();
		let mut api = MockBackendApi::new();
		api.expect_dashboard().returning(|| {
			Err(Error::RequestFailed {
				status: 401,
				detail: Some("Could not validate credentials".to_string()),
			})
		});
		let auth = signed_in(Arc::new(api), dir.path());

		let mut view = DashboardView::new();
		assert!(view.activate(&auth).await.is_err());

		assert_eq!(auth.state(), AuthState::SessionInvalid);
		assert_eq!(view.stats(), DashboardStats::default());
	}
}
