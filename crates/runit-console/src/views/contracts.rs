//! Smart contracts: listing and deployment

use crate::{
	core::auth::AuthController,
	types::error::Result,
	views::{
		draft::{blank, DraftSlot, FormFields},
		refused, reported,
	},
};
use runit_types::{Contract, DeployContractRequest, DeployContractResponse};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractForm {
	pub contract_name: String,
	/// Hex bytecode
	pub bytecode: String,
	pub constructor_params: String,
}

impl FormFields for ContractForm {
	fn missing_field(&self) -> Option<&'static str> {
		if blank(&self.contract_name) {
			Some("contract name")
		} else if blank(&self.bytecode) {
			Some("bytecode")
		} else {
			None
		}
	}
}

impl ContractForm {
	fn to_request(&self) -> DeployContractRequest {
		DeployContractRequest {
			contract_name: self.contract_name.trim().to_string(),
			bytecode: self.bytecode.trim().to_string(),
			constructor_params: (!blank(&self.constructor_params))
				.then(|| self.constructor_params.trim().to_string()),
		}
	}
}

#[derive(Debug, Clone, Default)]
pub struct ContractsView {
	contracts: Vec<Contract>,
	draft: DraftSlot<ContractForm>,
}

impl ContractsView {
	pub fn new() -> Self {
		Self::default()
	}

	#[instrument(skip_all)]
	pub async fn activate(&mut self, auth: &AuthController) -> Result<&[Contract]> {
		self.contracts = reported(
			auth,
			auth.api().contracts().await,
			"Failed to fetch contracts",
		)?;
		Ok(&self.contracts)
	}

	pub fn contracts(&self) -> &[Contract] {
		&self.contracts
	}

	pub fn draft(&mut self) -> &mut DraftSlot<ContractForm> {
		&mut self.draft
	}

	/// Deploys the drafted contract, then re-fetches the list
	#[instrument(skip_all)]
	pub async fn submit(&mut self, auth: &AuthController) -> Result<DeployContractResponse> {
		let request = match self.draft.validated() {
			Ok(form) => form.to_request(),
			Err(e) => return refused(auth, e),
		};

		let outcome = auth.api().deploy_contract(&request).await;
		self.draft.settle(&outcome);
		let deployed = reported(auth, outcome, "Failed to deploy contract")?;

		auth.toaster().success("Contract deployed successfully");
		// The write went through; a failed re-read is already toasted
		if let Err(e) = self.activate(auth).await {
			debug!(error = %e, "Re-fetch after write failed");
		}
		Ok(deployed)
	}
}
