//! Dashboard, transaction history and service health types.

use crate::account::UserProfile;
use serde::{Deserialize, Serialize};

/// Per-user resource counters shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
	#[serde(default)]
	pub contracts: u64,
	#[serde(default)]
	pub tokens: u64,
	#[serde(default)]
	pub nfts: u64,
	#[serde(default)]
	pub transactions: u64,
}

/// A ledger transaction recorded by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
	#[serde(rename = "_id", default)]
	pub id: Option<String>,
	pub transaction_type: String,
	#[serde(default)]
	pub token_id: Option<String>,
	#[serde(default)]
	pub from_account: Option<String>,
	#[serde(default)]
	pub to_account: Option<String>,
	#[serde(default)]
	pub amount: Option<i64>,
	#[serde(default)]
	pub transaction_id: Option<String>,
	#[serde(default)]
	pub timestamp: Option<String>,
	#[serde(default)]
	pub status: String,
}

/// Payload of `GET /api/dashboard`.
///
/// The embedded `user` is also what the session caches as the signed-in
/// identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
	#[serde(default)]
	pub stats: DashboardStats,
	#[serde(default)]
	pub recent_transactions: Vec<TransactionRecord>,
	pub user: UserProfile,
}

/// Payload of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
	pub status: String,
	#[serde(default)]
	pub mongodb: Option<String>,
	#[serde(default)]
	pub hedera: Option<String>,
	#[serde(default)]
	pub timestamp: Option<String>,
}

impl HealthStatus {
	pub fn is_healthy(&self) -> bool {
		self.status == "healthy"
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dashboard_defaults_missing_stats() {
		let data: DashboardData = serde_json::from_value(serde_json::json!({
			"user": { "username": "alice", "email": "alice@example.com" }
		}))
		.unwrap();

		assert_eq!(data.stats, DashboardStats::default());
		assert!(data.recent_transactions.is_empty());
		assert_eq!(data.user.username, "alice");
	}
}
