//! # Command Implementations
//!
//! Each submodule handles one CLI command. Commands share a [`Context`]
//! holding the catalog store, the media directory and the report console,
//! and resolve their category flags through a fixed [`Category`] table.

pub mod clean;
pub mod info;
pub mod remediate;

use crate::core::{Snapshot, Sources};
use crate::error::Result;
use crate::storage::{GalleryStore, MediaStore};
use crate::ui::Console;

pub use clean::CleanCommand;
pub use info::InfoCommand;
pub use remediate::{Outcome, Phase};

/// Everything a command reads from or writes to
pub struct Context<'a> {
	pub gallery: &'a dyn GalleryStore,
	pub media: &'a dyn MediaStore,
	pub console: &'a mut dyn Console,
}

impl<'a> Context<'a> {
	pub fn new(gallery: &'a dyn GalleryStore, media: &'a dyn MediaStore, console: &'a mut dyn Console) -> Self {
		Self { gallery, media, console }
	}

	/// Load the inventories the given categories need, once
	pub fn snapshot(&self, categories: &[Category], mutating: bool) -> Result<Snapshot> {
		let sources = categories
			.iter()
			.map(|c| c.sources(mutating))
			.fold(Sources::default(), Sources::merge);
		Snapshot::load(sources, self.gallery, self.media)
	}
}

/// One report/remediation category, selectable by a CLI flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
	Database,
	Physical,
	Missing,
	Unused,
	Duplicate,
}

impl Category {
	/// Inventories needed to report (or, when `mutating`, to remediate) this category
	pub fn sources(self, mutating: bool) -> Sources {
		match self {
			Category::Database => Sources { database: true, physical: false },
			Category::Physical => Sources { database: false, physical: true },
			Category::Missing | Category::Unused => Sources { database: true, physical: true },
			// Redirecting duplicates needs the records that point at them
			Category::Duplicate => Sources { database: mutating, physical: true },
		}
	}
}

/// Flags given on the command line, in table order; no flags selects the whole table
pub fn select(table: &[Category], requested: &[Category]) -> Vec<Category> {
	if requested.is_empty() {
		return table.to_vec();
	}
	table.iter().copied().filter(|c| requested.contains(c)).collect()
}

/// Binary command result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
	Success,
	Failure,
}

impl From<ExitStatus> for std::process::ExitCode {
	fn from(status: ExitStatus) -> Self {
		match status {
			ExitStatus::Success => std::process::ExitCode::SUCCESS,
			ExitStatus::Failure => std::process::ExitCode::FAILURE,
		}
	}
}

/// A command handler that can be run against a [`Context`]
pub trait Runnable {
	fn name(&self) -> &'static str;

	fn run(&self, ctx: &mut Context<'_>) -> Result<ExitStatus>;
}
