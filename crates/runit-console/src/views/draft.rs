//! Form drafts
//!
//! A [`DraftSlot`] holds at most one in-progress form. Submitting a draft
//! is a two-step affair: [`DraftSlot::validated`] checks required fields
//! before anything is sent, and [`DraftSlot::settle`] applies the outcome,
//! discarding the draft on success and leaving it untouched on failure.

use crate::types::error::{Error, Result};

/// Form input with presence-checked required fields
pub trait FormFields: Clone + Default {
	/// Name of the first required field that is empty, if any
	fn missing_field(&self) -> Option<&'static str>;
}

/// True when `value` is empty or only whitespace
pub(crate) fn blank(value: &str) -> bool {
	value.trim().is_empty()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftSlot<F> {
	draft: Option<F>,
}

impl<F: FormFields> DraftSlot<F> {
	pub fn new() -> Self {
		Self { draft: None }
	}

	/// Opens a draft with default values, keeping one already open
	pub fn open(&mut self) -> &mut F {
		self.draft.get_or_insert_with(F::default)
	}

	/// Opens a draft prefilled with `form`, replacing any open one
	pub fn open_with(&mut self, form: F) -> &mut F {
		self.draft.insert(form)
	}

	pub fn is_open(&self) -> bool {
		self.draft.is_some()
	}

	pub fn get(&self) -> Option<&F> {
		self.draft.as_ref()
	}

	pub fn get_mut(&mut self) -> Option<&mut F> {
		self.draft.as_mut()
	}

	/// Discards the draft, returning it
	pub fn cancel(&mut self) -> Option<F> {
		self.draft.take()
	}

	/// The draft, if one is open and every required field is filled
	///
	/// # Errors
	/// [`Error::Invalid`] when no draft is open, [`Error::MissingField`] for
	/// the first empty required field
	pub fn validated(&self) -> Result<&F> {
		let form = self
			.draft
			.as_ref()
			.ok_or_else(|| Error::Invalid("No form is open".to_string()))?;
		match form.missing_field() {
			Some(field) => Err(Error::MissingField(field)),
			None => Ok(form),
		}
	}

	/// Applies a submit outcome: success discards the draft
	pub fn settle<T>(&mut self, outcome: &Result<T>) {
		if outcome.is_ok() {
			self.draft = None;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Debug, Clone, Default, PartialEq)]
	struct NameForm {
		name: String,
		note: String,
	}

	impl FormFields for NameForm {
		fn missing_field(&self) -> Option<&'static str> {
			blank(&self.name).then_some("name")
		}
	}

	#[test]
	fn open_keeps_existing_draft() {
		let mut slot = DraftSlot::<NameForm>::new();
		slot.open().name = "first".to_string();
		assert_eq!(slot.open().name, "first");

		slot.open_with(NameForm::default());
		assert_eq!(slot.get().unwrap().name, "");
	}

	#[test]
	fn validation_reports_first_missing_field() {
		let mut slot = DraftSlot::<NameForm>::new();
		assert!(matches!(slot.validated(), Err(Error::Invalid(_))));

		slot.open().name = "   ".to_string();
		assert!(matches!(slot.validated(), Err(Error::MissingField("name"))));

		slot.open().name = "ok".to_string();
		assert!(slot.validated().is_ok());
	}

	#[test]
	fn failure_keeps_draft_verbatim_and_success_clears_it() {
		let mut slot = DraftSlot::<NameForm>::new();
		let form = NameForm {
			name: "kept".to_string(),
			note: "as typed".to_string(),
		};
		slot.open_with(form.clone());

		slot.settle::<()>(&Err(Error::RequestFailed {
			status: 500,
			detail: None,
		}));
		assert_eq!(slot.get(), Some(&form));

		slot.settle(&Ok(()));
		assert!(!slot.is_open());
	}

	#[test]
	fn cancel_discards() {
		let mut slot = DraftSlot::<NameForm>::new();
		slot.open();
		assert!(slot.cancel().is_some());
		assert!(slot.get().is_none());
	}
}
