//! Content-based file hashing

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use xxhash_rust::xxh3::Xxh3;

const HASH_BUFFER_SIZE: usize = 65536; // 64KB

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FileHash(String);

impl FileHash {
	/// Compute hash over the whole file, streamed in 64KB chunks
	pub fn compute(path: &Path) -> std::io::Result<Self> {
		let mut file = File::open(path)?;
		let mut hasher = Xxh3::new();
		let mut buffer = vec![0u8; HASH_BUFFER_SIZE];

		loop {
			let n = file.read(&mut buffer)?;
			if n == 0 {
				break;
			}
			hasher.update(&buffer[..n]);
		}

		Ok(Self::from_digest(hasher.digest()))
	}

	pub fn from_bytes(bytes: &[u8]) -> Self {
		Self::from_digest(xxhash_rust::xxh3::xxh3_64(bytes))
	}

	fn from_digest(digest: u64) -> Self {
		Self(format!("{:016x}", digest))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn short(&self) -> &str {
		&self.0[..8]
	}
}

impl std::fmt::Display for FileHash {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	#[test]
	fn identical_content_hashes_equal() {
		let dir = tempfile::tempdir().unwrap();
		let a = dir.path().join("a.jpg");
		let b = dir.path().join("b.jpg");
		fs::write(&a, b"same bytes").unwrap();
		fs::write(&b, b"same bytes").unwrap();

		assert_eq!(FileHash::compute(&a).unwrap(), FileHash::compute(&b).unwrap());
	}

	#[test]
	fn covers_bytes_past_first_chunk() {
		let dir = tempfile::tempdir().unwrap();
		let a = dir.path().join("a.jpg");
		let b = dir.path().join("b.jpg");
		let mut bytes = vec![7u8; HASH_BUFFER_SIZE * 2];
		fs::write(&a, &bytes).unwrap();
		*bytes.last_mut().unwrap() = 8;
		fs::write(&b, &bytes).unwrap();

		assert_ne!(FileHash::compute(&a).unwrap(), FileHash::compute(&b).unwrap());
	}

	#[test]
	fn streamed_matches_one_shot() {
		let dir = tempfile::tempdir().unwrap();
		let a = dir.path().join("a.jpg");
		let bytes: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
		fs::write(&a, &bytes).unwrap();

		let hash = FileHash::compute(&a).unwrap();
		assert_eq!(hash, FileHash::from_bytes(&bytes));
		assert_eq!(hash.as_str().len(), 16);
		assert_eq!(hash.short().len(), 8);
	}
}
