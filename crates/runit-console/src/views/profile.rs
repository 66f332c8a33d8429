//! Personal profile
//!
//! A user without a stored profile gets an empty form to fill in instead of
//! an error.

use crate::{
	core::auth::AuthController,
	types::error::Result,
	views::{
		draft::{blank, DraftSlot, FormFields},
		refused, reported,
	},
};
use runit_types::{default_role_code, ProfileDetails, ProfileRequest, SaveProfileResponse};
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileForm {
	pub first_name: String,
	pub last_name: String,
	pub nickname: String,
	pub phone: String,
	pub nationality: String,
	pub role_code: String,
	pub interests: Vec<String>,
}

impl Default for ProfileForm {
	fn default() -> Self {
		Self {
			first_name: String::new(),
			last_name: String::new(),
			nickname: String::new(),
			phone: String::new(),
			nationality: String::new(),
			role_code: default_role_code(),
			interests: Vec::new(),
		}
	}
}

impl FormFields for ProfileForm {
	fn missing_field(&self) -> Option<&'static str> {
		if blank(&self.first_name) {
			Some("first name")
		} else if blank(&self.last_name) {
			Some("last name")
		} else {
			None
		}
	}
}

fn optional(value: &str) -> Option<String> {
	(!blank(value)).then(|| value.trim().to_string())
}

impl ProfileForm {
	fn to_request(&self) -> ProfileRequest {
		ProfileRequest {
			first_name: self.first_name.trim().to_string(),
			last_name: self.last_name.trim().to_string(),
			nickname: optional(&self.nickname),
			phone: optional(&self.phone),
			nationality: optional(&self.nationality),
			role_code: if blank(&self.role_code) {
				default_role_code()
			} else {
				self.role_code.clone()
			},
			interests: self.interests.clone(),
			privacy_settings: None,
		}
	}
}

impl From<&ProfileDetails> for ProfileForm {
	fn from(details: &ProfileDetails) -> Self {
		Self {
			first_name: details.first_name.clone(),
			last_name: details.last_name.clone(),
			nickname: details.nickname.clone().unwrap_or_default(),
			phone: details.phone.clone().unwrap_or_default(),
			nationality: details.nationality.clone().unwrap_or_default(),
			role_code: details.role_code.clone(),
			interests: details.interests.clone(),
		}
	}
}

#[derive(Debug, Clone, Default)]
pub struct ProfileView {
	profile: Option<ProfileDetails>,
	draft: DraftSlot<ProfileForm>,
}

impl ProfileView {
	pub fn new() -> Self {
		Self::default()
	}

	/// Fetches the profile
	///
	/// When the backend has none (404) an empty draft is opened and the call
	/// succeeds with `None`.
	#[instrument(skip_all)]
	pub async fn activate(&mut self, auth: &AuthController) -> Result<Option<&ProfileDetails>> {
		match auth.api().profile().await {
			Ok(details) => {
				self.profile = Some(details);
				Ok(self.profile.as_ref())
			},
			Err(e) if e.is_not_found() => {
				debug!("No profile yet, opening an empty form");
				self.profile = None;
				self.draft.open();
				Ok(None)
			},
			Err(e) => reported(auth, Err(e), "Failed to fetch profile"),
		}
	}

	pub fn profile(&self) -> Option<&ProfileDetails> {
		self.profile.as_ref()
	}

	pub fn is_editing(&self) -> bool {
		self.draft.is_open()
	}

	/// Opens the form prefilled from the current profile
	pub fn edit(&mut self) -> &mut ProfileForm {
		let form = self
			.profile
			.as_ref()
			.map(ProfileForm::from)
			.unwrap_or_default();
		self.draft.open_with(form)
	}

	pub fn draft(&mut self) -> &mut DraftSlot<ProfileForm> {
		&mut self.draft
	}

	/// Saves the draft, then re-fetches the profile
	#[instrument(skip_all)]
	pub async fn submit(&mut self, auth: &AuthController) -> Result<SaveProfileResponse> {
		let request = match self.draft.validated() {
			Ok(form) => form.to_request(),
			Err(e) => return refused(auth, e),
		};

		let outcome = auth.api().save_profile(&request).await;
		self.draft.settle(&outcome);
		let saved = reported(auth, outcome, "Failed to save profile")?;

		auth.toaster().success("Profile saved successfully");
		// The write went through; a failed re-read is already toasted
		if let Err(e) = self.activate(auth).await {
			debug!(error = %e, "Re-fetch after write failed");
		}
		Ok(saved)
	}
}
