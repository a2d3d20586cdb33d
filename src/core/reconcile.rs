//! Missing, unused and duplicate image detection

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::inventory::{media_key, GalleryRecord, PhysicalFile};
use super::FileHash;

/// Files sharing one content hash; the lexicographically first path is kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
	pub hash: FileHash,
	/// Sorted, at least two entries
	pub paths: Vec<String>,
}

impl DuplicateGroup {
	pub fn keeper(&self) -> &str {
		&self.paths[0]
	}

	pub fn redundant(&self) -> &[String] {
		&self.paths[1..]
	}
}

/// Records whose path has no file on disk, in id order.
///
/// Empty and NULL paths never match a file, so they are always missing.
pub fn missing(records: &[GalleryRecord], files: &[PhysicalFile]) -> Vec<GalleryRecord> {
	let physical: HashSet<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();

	let mut missing: Vec<GalleryRecord> = records
		.iter()
		.filter(|r| r.media_key().is_empty() || !physical.contains(r.media_key()))
		.cloned()
		.collect();
	missing.sort_by_key(|r| r.id);
	missing
}

/// Physical paths no record references (plain path difference, hashes ignored)
pub fn unused(records: &[GalleryRecord], files: &[PhysicalFile]) -> Vec<String> {
	let referenced: HashSet<&str> = records.iter().map(GalleryRecord::media_key).collect();

	files
		.iter()
		.map(|f| f.relative_path.as_str())
		.filter(|p| !referenced.contains(p))
		.collect::<BTreeSet<_>>()
		.into_iter()
		.map(str::to_string)
		.collect()
}

/// Group files by content hash, keeping groups with more than one member
pub fn duplicates(files: &[PhysicalFile]) -> Vec<DuplicateGroup> {
	let mut by_hash: BTreeMap<&FileHash, Vec<String>> = BTreeMap::new();
	for file in files {
		by_hash.entry(&file.content_hash).or_default().push(file.relative_path.clone());
	}

	let mut groups: Vec<DuplicateGroup> = by_hash
		.into_iter()
		.filter(|(_, paths)| paths.len() > 1)
		.map(|(hash, mut paths)| {
			paths.sort();
			DuplicateGroup { hash: hash.clone(), paths }
		})
		.collect();
	groups.sort_by(|a, b| a.keeper().cmp(b.keeper()));
	groups
}

/// Redundant copies only: every group's keeper is excluded
pub fn duplicate_count(groups: &[DuplicateGroup]) -> usize {
	groups.iter().map(|g| g.paths.len()).sum::<usize>() - groups.len()
}

/// Distinct paths, sorted
pub fn unique_paths(records: &[GalleryRecord]) -> Vec<&str> {
	records
		.iter()
		.map(|r| r.path.as_str())
		.collect::<BTreeSet<_>>()
		.into_iter()
		.collect()
}

/// Number of records referencing `path`
pub fn uses(records: &[GalleryRecord], path: &str) -> usize {
	records.iter().filter(|r| r.path == path).count()
}

/// Records whose media key is `relative_path`
pub fn referencing<'a>(records: &'a [GalleryRecord], relative_path: &str) -> Vec<&'a GalleryRecord> {
	records
		.iter()
		.filter(|r| !relative_path.is_empty() && r.media_key() == media_key(relative_path))
		.collect()
}
