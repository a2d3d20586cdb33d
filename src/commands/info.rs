//! Info command - read-only report on catalog and media images

use serde::Serialize;

use crate::config::{BANNER, EMPTY_PATH_LABEL};
use crate::core::reconcile::{self, DuplicateGroup};
use crate::core::{GalleryRecord, PhysicalFile, Snapshot};
use crate::error::Result;
use crate::ui::{Style, Table};

use super::{select, Category, Context, ExitStatus, Runnable};

pub struct InfoCommand {
	categories: Vec<Category>,
	json: bool,
}

/// Machine-readable report; only the selected categories are present
#[derive(Debug, Default, Serialize)]
pub struct InfoReport {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub database: Option<Vec<PathUses>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub physical: Option<Vec<PhysicalFile>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub missing: Option<Vec<PathUses>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub unused: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub duplicates: Option<Vec<DuplicateGroup>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub duplicate_count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PathUses {
	pub path: String,
	pub uses: usize,
}

fn path_uses(records: &[GalleryRecord]) -> Vec<PathUses> {
	reconcile::unique_paths(records)
		.into_iter()
		.map(|path| PathUses {
			path: path.to_string(),
			uses: reconcile::uses(records, path),
		})
		.collect()
}

fn display_path(path: &str) -> String {
	if path.is_empty() {
		EMPTY_PATH_LABEL.to_string()
	} else {
		path.to_string()
	}
}

fn uses_table(entries: &[PathUses]) -> Table {
	let mut table = Table::new(&["Filename", "Uses"]);
	for entry in entries {
		table.row([display_path(&entry.path), entry.uses.to_string()]);
	}
	table
}

fn filename_table(paths: &[String]) -> Table {
	let mut table = Table::new(&["Filename"]);
	for path in paths {
		table.row([path.as_str()]);
	}
	table
}

impl InfoCommand {
	pub const NAME: &'static str = "catalog:images:info";

	/// Categories in report order
	pub const CATEGORIES: &'static [Category] = &[
		Category::Database,
		Category::Physical,
		Category::Missing,
		Category::Unused,
		Category::Duplicate,
	];

	pub fn new(requested: &[Category], json: bool) -> Self {
		Self {
			categories: select(Self::CATEGORIES, requested),
			json,
		}
	}

	/// Compute the selected categories from one snapshot
	pub fn report(&self, snapshot: &Snapshot) -> InfoReport {
		let mut report = InfoReport::default();

		for category in &self.categories {
			match category {
				Category::Database => report.database = Some(path_uses(&snapshot.records)),
				Category::Physical => report.physical = Some(snapshot.files.clone()),
				Category::Missing => {
					let missing = reconcile::missing(&snapshot.records, &snapshot.files);
					let entries = reconcile::unique_paths(&missing)
						.into_iter()
						.map(|path| PathUses {
							path: path.to_string(),
							uses: reconcile::uses(&snapshot.records, path),
						})
						.collect();
					report.missing = Some(entries);
				}
				Category::Unused => report.unused = Some(reconcile::unused(&snapshot.records, &snapshot.files)),
				Category::Duplicate => {
					let groups = reconcile::duplicates(&snapshot.files);
					report.duplicate_count = Some(reconcile::duplicate_count(&groups));
					report.duplicates = Some(groups);
				}
			}
		}

		report
	}

	fn print(&self, ctx: &mut Context<'_>, report: &InfoReport) {
		let console = &mut *ctx.console;

		console.emit(Style::Banner, BANNER);
		console.emit(Style::Banner, "Catalog Product Image Information");
		console.emit(Style::Banner, BANNER);

		if let Some(database) = &report.database {
			console.emit(Style::Heading, &format!("{} Unique Images in Database", database.len()));
			console.table(&uses_table(database));
		}

		if let Some(physical) = &report.physical {
			console.emit(Style::Heading, &format!("{} Images in Filesystem", physical.len()));
			let paths: Vec<String> = physical.iter().map(|f| f.relative_path.clone()).collect();
			console.table(&filename_table(&paths));
		}

		if let Some(missing) = &report.missing {
			console.emit(Style::Heading, &format!("{} Missing Images", missing.len()));
			console.table(&uses_table(missing));
		}

		if let Some(unused) = &report.unused {
			console.emit(Style::Heading, &format!("{} Unused Images", unused.len()));
			console.table(&filename_table(unused));
		}

		if let Some(groups) = &report.duplicates {
			let count = report.duplicate_count.unwrap_or_else(|| reconcile::duplicate_count(groups));
			console.emit(Style::Heading, &format!("{} Duplicate Images", count));

			let mut table = Table::new(&["Filename", "Duplicate of"]);
			for group in groups {
				for path in group.redundant() {
					table.row([path.as_str(), group.keeper()]);
				}
			}
			console.table(&table);
		}
	}
}

impl Runnable for InfoCommand {
	fn name(&self) -> &'static str {
		Self::NAME
	}

	fn run(&self, ctx: &mut Context<'_>) -> Result<ExitStatus> {
		let snapshot = ctx.snapshot(&self.categories, false)?;
		let report = self.report(&snapshot);

		if self.json {
			let json = serde_json::to_string_pretty(&report)?;
			ctx.console.line(&json);
		} else {
			self.print(ctx, &report);
		}

		Ok(ExitStatus::Success)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::FileHash;

	fn file(path: &str, bytes: &[u8]) -> PhysicalFile {
		PhysicalFile {
			relative_path: path.to_string(),
			content_hash: FileHash::from_bytes(bytes),
			size: bytes.len() as u64,
		}
	}

	fn snapshot() -> Snapshot {
		Snapshot::new(
			vec![
				GalleryRecord::new(1, "a.jpg"),
				GalleryRecord::new(2, "b.jpg"),
				GalleryRecord::new(3, "b.jpg"),
			],
			vec![file("a.jpg", b"1"), file("c.jpg", b"1")],
		)
	}

	#[test]
	fn missing_counts_unique_paths() {
		let report = InfoCommand::new(&[Category::Missing], false).report(&snapshot());
		let missing = report.missing.unwrap();

		assert_eq!(missing.len(), 1);
		assert_eq!(missing[0].path, "b.jpg");
		assert_eq!(missing[0].uses, 2);
		assert!(report.database.is_none());
	}

	#[test]
	fn full_report() {
		let report = InfoCommand::new(&[], false).report(&snapshot());

		assert_eq!(report.database.unwrap().len(), 2);
		let physical: Vec<String> = report.physical.unwrap().into_iter().map(|f| f.relative_path).collect();
		assert_eq!(physical, vec!["a.jpg", "c.jpg"]);
		assert_eq!(report.unused.unwrap(), vec!["c.jpg"]);
		assert_eq!(report.duplicate_count, Some(1));
		assert_eq!(report.duplicates.unwrap()[0].keeper(), "a.jpg");
	}

	#[test]
	fn json_omits_unselected_categories() {
		let report = InfoCommand::new(&[Category::Unused], true).report(&snapshot());
		let json = serde_json::to_value(&report).unwrap();

		assert_eq!(json["unused"], serde_json::json!(["c.jpg"]));
		assert!(json.get("database").is_none());
	}
}
