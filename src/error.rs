//! Library error type

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("filesystem error at {}: {source}", .path.display())]
	Filesystem {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("failed to walk media directory: {0}")]
	Walk(#[from] walkdir::Error),

	#[error("catalog store error: {0}")]
	Store(#[from] rusqlite::Error),

	#[error("console error: {0}")]
	Console(#[from] io::Error),

	#[error("failed to encode report: {0}")]
	Report(#[from] serde_json::Error),

	#[error("invalid configuration: {0}")]
	Config(String),
}

impl Error {
	pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
		Self::Filesystem { path: path.into(), source }
	}
}
