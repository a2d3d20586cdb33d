//! Gallery records, physical files and the per-run snapshot of both

use serde::Serialize;
use std::collections::HashSet;

use crate::core::FileHash;
use crate::error::Result;
use crate::storage::{GalleryStore, MediaStore};
use crate::ui;

/// One catalog image reference (`value_id` → `value`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryRecord {
	pub id: i64,
	pub path: String,
}

impl GalleryRecord {
	pub fn new(id: i64, path: impl Into<String>) -> Self {
		Self { id, path: path.into() }
	}

	pub fn media_key(&self) -> &str {
		media_key(&self.path)
	}

	/// Same path style as this record (leading slash or not), pointing at `relative_path`
	pub fn restyle(&self, relative_path: &str) -> String {
		if self.path.starts_with('/') {
			format!("/{}", relative_path)
		} else {
			relative_path.to_string()
		}
	}
}

/// Catalog paths are stored as `/a/b/abc.jpg`; files are keyed as `a/b/abc.jpg`
pub fn media_key(path: &str) -> &str {
	path.trim_start_matches('/')
}

/// A regular file under the media root, outside any `cache` directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhysicalFile {
	pub relative_path: String,
	pub content_hash: FileHash,
	pub size: u64,
}

/// Which inventories a command needs loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sources {
	pub database: bool,
	pub physical: bool,
}

impl Sources {
	pub fn merge(self, other: Sources) -> Sources {
		Sources {
			database: self.database || other.database,
			physical: self.physical || other.physical,
		}
	}
}

/// Read every gallery row using keyset batches of the store's batch size
pub fn load_database_images(store: &dyn GalleryStore) -> Result<Vec<GalleryRecord>> {
	let limit = store.batch_size();
	let mut records = Vec::new();
	let mut after = None;

	loop {
		let batch = store.fetch_batch(after, limit)?;
		let Some(last) = batch.last() else { break };
		after = Some(last.id);

		let fetched = batch.len();
		ui::debug(&format!("Fetched {} gallery records (up to id {})", fetched, last.id));
		records.extend(batch);

		if fetched < limit {
			break;
		}
	}

	Ok(records)
}

/// Walk the media root, hashing and sizing each file
pub fn load_physical_images(media: &dyn MediaStore) -> Result<Vec<PhysicalFile>> {
	let paths = media.walk()?;
	let mut files = Vec::with_capacity(paths.len());

	for relative_path in paths {
		let content_hash = media.hash(&relative_path)?;
		let size = media.size(&relative_path)?;
		ui::trace(&format!("Hashed {} -> {}", relative_path, content_hash.short()));

		files.push(PhysicalFile { relative_path, content_hash, size });
	}

	ui::debug(&format!("Hashed {} files under {}", files.len(), media.root().display()));
	Ok(files)
}

/// Both inventories, loaded once per command and passed to every category
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
	pub records: Vec<GalleryRecord>,
	pub files: Vec<PhysicalFile>,
}

impl Snapshot {
	pub fn new(records: Vec<GalleryRecord>, files: Vec<PhysicalFile>) -> Self {
		Self { records, files }
	}

	pub fn load(sources: Sources, gallery: &dyn GalleryStore, media: &dyn MediaStore) -> Result<Self> {
		let records = if sources.database {
			load_database_images(gallery)?
		} else {
			Vec::new()
		};

		let files = if sources.physical {
			load_physical_images(media)?
		} else {
			Vec::new()
		};

		Ok(Self { records, files })
	}

	/// Drop records deleted from the store
	pub fn forget_records(&mut self, ids: &[i64]) {
		let ids: HashSet<i64> = ids.iter().copied().collect();
		self.records.retain(|r| !ids.contains(&r.id));
	}

	/// Drop a file deleted from disk
	pub fn forget_file(&mut self, relative_path: &str) {
		self.files.retain(|f| f.relative_path != relative_path);
	}

	/// Record a path rewrite applied in the store
	pub fn redirect(&mut self, id: i64, path: &str) {
		if let Some(record) = self.records.iter_mut().find(|r| r.id == id) {
			record.path = path.to_string();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn media_key_strips_leading_slashes() {
		assert_eq!(media_key("/a/b/c.jpg"), "a/b/c.jpg");
		assert_eq!(media_key("a/b/c.jpg"), "a/b/c.jpg");
		assert_eq!(media_key(""), "");
	}

	#[test]
	fn restyle_keeps_record_convention() {
		assert_eq!(GalleryRecord::new(1, "/y.jpg").restyle("x.jpg"), "/x.jpg");
		assert_eq!(GalleryRecord::new(1, "y.jpg").restyle("x.jpg"), "x.jpg");
	}

	#[test]
	fn snapshot_updates() {
		let mut snapshot = Snapshot::new(
			vec![GalleryRecord::new(1, "a.jpg"), GalleryRecord::new(2, "b.jpg")],
			vec![PhysicalFile {
				relative_path: "a.jpg".into(),
				content_hash: FileHash::from_bytes(b"a"),
				size: 1,
			}],
		);

		snapshot.forget_records(&[1]);
		snapshot.redirect(2, "a.jpg");
		snapshot.forget_file("a.jpg");

		assert_eq!(snapshot.records, vec![GalleryRecord::new(2, "a.jpg")]);
		assert!(snapshot.files.is_empty());
	}
}
