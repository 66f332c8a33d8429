//! Persistent JSON key-value storage
//!
//! Plays the role a browser's local storage plays for a web client: a flat
//! namespace of keys, each holding one JSON document, surviving restarts.
//! Every key maps to `<root>/<key>.json`.

use crate::types::error::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File-backed key-value store rooted in the console data directory
#[derive(Debug, Clone)]
pub struct Storage {
	root: Arc<PathBuf>,
}

impl Storage {
	/// Opens (creating if needed) a store rooted at `root`
	///
	/// # Errors
	/// Returns error if the directory cannot be created
	pub fn open(root: &Path) -> Result<Self> {
		if !root.exists() {
			std::fs::create_dir_all(root)
				.map_err(|_| Error::DirectoryCreationFailed(root.to_path_buf()))?;
		}

		Ok(Self {
			root: Arc::new(root.to_path_buf()),
		})
	}

	/// Writes `value` under `key`, replacing any previous document
	///
	/// The document is written to a sibling temp file first and renamed into
	/// place, so a reader never observes a half-written value.
	pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
		let path = self.path_for(key);
		let tmp = self.root.join(format!(".{key}.json.tmp"));

		let bytes = serde_json::to_vec_pretty(value)
			.map_err(|e| Error::StorageError(format!("Failed to encode {key}: {e}")))?;
		std::fs::write(&tmp, bytes)
			.map_err(|e| Error::StorageError(format!("Failed to write {key}: {e}")))?;
		std::fs::rename(&tmp, &path)
			.map_err(|e| Error::StorageError(format!("Failed to store {key}: {e}")))?;

		Ok(())
	}

	/// Reads the document stored under `key`, `None` when absent
	///
	/// # Errors
	/// Returns error if the file exists but cannot be read or decoded
	pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
		let path = self.path_for(key);

		if !path.exists() {
			return Ok(None);
		}

		let bytes = std::fs::read(&path)
			.map_err(|e| Error::StorageError(format!("Failed to open {key}: {e}")))?;

		serde_json::from_slice(&bytes)
			.map(Some)
			.map_err(|e| Error::StorageError(format!("Failed to read {key}: {e}")))
	}

	pub fn exists(&self, key: &str) -> bool {
		self.path_for(key).exists()
	}

	/// Removes `key`; removing an absent key succeeds
	pub fn remove(&self, key: &str) -> Result<()> {
		match std::fs::remove_file(self.path_for(key)) {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(Error::StorageError(format!("Failed to delete {key}: {e}"))),
		}
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	fn path_for(&self, key: &str) -> PathBuf {
		self.root.join(format!("{key}.json"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde::Deserialize;
	use tempfile::TempDir;

	#[derive(Debug, Serialize, Deserialize, PartialEq)]
	struct Entry {
		value: String,
	}

	#[test]
	fn save_load_remove() {
		let temp_dir = TempDir::new().unwrap();
		let storage = Storage::open(temp_dir.path()).unwrap();

		let entry = Entry {
			value: "abc".to_string(),
		};
		storage.save("entry", &entry).unwrap();
		assert!(storage.exists("entry"));
		assert_eq!(storage.load::<Entry>("entry").unwrap(), Some(entry));

		storage.remove("entry").unwrap();
		assert!(!storage.exists("entry"));
		assert_eq!(storage.load::<Entry>("entry").unwrap(), None);
	}

	#[test]
	fn removing_absent_key_is_ok() {
		let temp_dir = TempDir::new().unwrap();
		let storage = Storage::open(temp_dir.path()).unwrap();
		storage.remove("never-written").unwrap();
	}

	#[test]
	fn corrupt_document_is_an_error() {
		let temp_dir = TempDir::new().unwrap();
		let storage = Storage::open(temp_dir.path()).unwrap();
		std::fs::write(temp_dir.path().join("broken.json"), b"{not json").unwrap();

		let err = storage.load::<Entry>("broken").unwrap_err();
		assert!(matches!(err, Error::StorageError(_)));
	}

	#[test]
	fn open_creates_nested_root() {
		let temp_dir = TempDir::new().unwrap();
		let nested = temp_dir.path().join("a").join("b");
		let storage = Storage::open(&nested).unwrap();
		assert_eq!(storage.root(), nested.as_path());
		assert!(nested.is_dir());
	}
}
