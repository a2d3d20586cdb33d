//! Media directory access

use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::config::CACHE_SEGMENT;
use crate::core::{media_key, FileHash};
use crate::error::{Error, Result};
use crate::ui;

/// Product image files on disk, addressed by path relative to the root
pub trait MediaStore {
	fn root(&self) -> &Path;

	/// Relative paths (`/`-separated) of every regular file outside `cache` directories, sorted
	fn walk(&self) -> Result<Vec<String>>;

	fn hash(&self, relative_path: &str) -> Result<FileHash>;

	fn size(&self, relative_path: &str) -> Result<u64>;

	fn delete(&self, relative_path: &str) -> Result<()>;
}

pub struct MediaDirectory {
	root: PathBuf,
}

impl MediaDirectory {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn full_path(&self, relative_path: &str) -> PathBuf {
		self.root.join(media_key(relative_path))
	}
}

fn is_cache_dir(entry: &walkdir::DirEntry) -> bool {
	entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == CACHE_SEGMENT
}

/// `/`-joined key for a path under the root; `None` when a segment isn't UTF-8
fn relative_key(path: &Path) -> Option<String> {
	let mut parts = Vec::new();
	for component in path.components() {
		if let Component::Normal(part) = component {
			parts.push(part.to_str()?);
		}
	}
	Some(parts.join("/"))
}

/// Dangling links and link cycles are skipped; anything else fails the walk
fn is_broken_link(err: &walkdir::Error) -> bool {
	err.loop_ancestor().is_some()
		|| err
			.path()
			.and_then(|p| fs::symlink_metadata(p).ok())
			.is_some_and(|m| m.file_type().is_symlink())
}

impl MediaStore for MediaDirectory {
	fn root(&self) -> &Path {
		&self.root
	}

	fn walk(&self) -> Result<Vec<String>> {
		let walker = WalkDir::new(&self.root)
			.follow_links(true)
			.sort_by_file_name()
			.into_iter()
			.filter_entry(|e| !is_cache_dir(e));

		let mut paths = Vec::new();
		for entry in walker {
			let entry = match entry {
				Ok(entry) => entry,
				Err(err) if is_broken_link(&err) => {
					ui::warn(&format!("Skipping broken link: {}", err));
					continue;
				}
				Err(err) => return Err(err.into()),
			};
			if !entry.file_type().is_file() {
				continue;
			}

			let Ok(relative) = entry.path().strip_prefix(&self.root) else { continue };
			match relative_key(relative) {
				Some(key) => paths.push(key),
				None => ui::warn(&format!("Skipping file with non UTF-8 name: {}", relative.display())),
			}
		}

		paths.sort();
		ui::debug(&format!("Found {} files under {}", paths.len(), self.root.display()));
		Ok(paths)
	}

	fn hash(&self, relative_path: &str) -> Result<FileHash> {
		let path = self.full_path(relative_path);
		FileHash::compute(&path).map_err(|e| Error::filesystem(path, e))
	}

	fn size(&self, relative_path: &str) -> Result<u64> {
		let path = self.full_path(relative_path);
		fs::metadata(&path).map(|m| m.len()).map_err(|e| Error::filesystem(path, e))
	}

	fn delete(&self, relative_path: &str) -> Result<()> {
		let path = self.full_path(relative_path);
		fs::remove_file(&path).map_err(|e| Error::filesystem(&path, e))?;
		ui::debug(&format!("Deleted: {}", path.display()));
		Ok(())
	}
}
