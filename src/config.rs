//! Application configuration and constants

use std::path::PathBuf;

use crate::error::{Error, Result};

// === Catalog Store ===
pub const GALLERY_TABLE: &str = "catalog_product_entity_media_gallery";
pub const DEFAULT_DATABASE: &str = "catalog.db";
pub const DEFAULT_BATCH_SIZE: usize = 100;

// === Media Directory ===
pub const DEFAULT_MEDIA_ROOT: &str = "pub/media/catalog/product";
pub const CACHE_SEGMENT: &str = "cache";

// === Output ===
pub const BANNER: &str = "======================================";
pub const EMPTY_PATH_LABEL: &str = "(empty)";

/// Resolved runtime settings, built once from CLI arguments and environment
#[derive(Debug, Clone)]
pub struct Settings {
	pub media_root: PathBuf,
	pub database: PathBuf,
	pub table: String,
	pub batch_size: usize,
}

impl Settings {
	pub fn new(media_root: PathBuf, database: PathBuf, table: String, batch_size: usize) -> Result<Self> {
		let settings = Self { media_root, database, table, batch_size };
		settings.validate()?;
		Ok(settings)
	}

	fn validate(&self) -> Result<()> {
		if self.batch_size == 0 {
			return Err(Error::Config("batch size must be at least 1".into()));
		}

		if self.table.is_empty() || !self.table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
			return Err(Error::Config(format!("invalid gallery table name '{}'", self.table)));
		}

		if !self.media_root.is_dir() {
			return Err(Error::Config(format!(
				"media root {} is not a directory",
				self.media_root.display()
			)));
		}

		crate::ui::debug(&format!("Media root: {}", self.media_root.display()));
		crate::ui::debug(&format!("Catalog database: {}", self.database.display()));

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn media_dir() -> tempfile::TempDir {
		tempfile::tempdir().unwrap()
	}

	#[test]
	fn accepts_defaults() {
		let dir = media_dir();
		let settings = Settings::new(
			dir.path().to_path_buf(),
			PathBuf::from(DEFAULT_DATABASE),
			GALLERY_TABLE.to_string(),
			DEFAULT_BATCH_SIZE,
		);
		assert!(settings.is_ok());
	}

	#[test]
	fn rejects_zero_batch_size() {
		let dir = media_dir();
		let err = Settings::new(dir.path().to_path_buf(), PathBuf::from("x.db"), GALLERY_TABLE.into(), 0)
			.unwrap_err();
		assert!(matches!(err, Error::Config(_)));
	}

	#[test]
	fn rejects_table_name_with_sql() {
		let dir = media_dir();
		let err = Settings::new(dir.path().to_path_buf(), PathBuf::from("x.db"), "gallery; DROP".into(), 10)
			.unwrap_err();
		assert!(err.to_string().contains("invalid gallery table name"));
	}

	#[test]
	fn rejects_missing_media_root() {
		let dir = media_dir();
		let root = dir.path().join("nope");
		let err = Settings::new(root, PathBuf::from("x.db"), GALLERY_TABLE.into(), 10).unwrap_err();
		assert!(err.to_string().contains("not a directory"));
	}
}
