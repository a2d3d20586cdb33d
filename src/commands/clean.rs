//! Clean command - remove missing records, unused files and duplicate files

use crate::config::{BANNER, EMPTY_PATH_LABEL};
use crate::core::reconcile;
use crate::core::{GalleryRecord, Snapshot};
use crate::error::Result;
use crate::ui::{self, Console, Style, Table};

use super::remediate::{self, Outcome, Remediation};
use super::{select, Category, Context, ExitStatus, Runnable};

pub struct CleanCommand {
	categories: Vec<Category>,
	dry_run: bool,
}

impl CleanCommand {
	pub const NAME: &'static str = "catalog:images:clean";

	/// Categories in the order they are cleaned
	pub const CATEGORIES: &'static [Category] = &[Category::Missing, Category::Unused, Category::Duplicate];

	pub fn new(requested: &[Category], dry_run: bool) -> Self {
		Self {
			categories: select(Self::CATEGORIES, requested),
			dry_run,
		}
	}

	fn plan(category: Category, snapshot: &Snapshot) -> Option<Box<dyn Remediation>> {
		match category {
			Category::Missing => Some(Box::new(MissingPlan::new(snapshot))),
			Category::Unused => Some(Box::new(UnusedPlan::new(snapshot))),
			Category::Duplicate => Some(Box::new(DuplicatePlan::new(snapshot))),
			Category::Database | Category::Physical => None,
		}
	}

	fn heading(category: Category) -> &'static str {
		match category {
			Category::Missing => "Missing Product Images",
			Category::Unused => "Unused Product Images",
			Category::Duplicate => "Duplicate Product Images",
			Category::Database | Category::Physical => "",
		}
	}
}

impl Runnable for CleanCommand {
	fn name(&self) -> &'static str {
		Self::NAME
	}

	fn run(&self, ctx: &mut Context<'_>) -> Result<ExitStatus> {
		ctx.console.emit(Style::Banner, BANNER);
		ctx.console.emit(Style::Banner, "Catalog Product Image Cleaning");
		ctx.console.emit(Style::Banner, BANNER);

		let mut snapshot = ctx.snapshot(&self.categories, true)?;
		let mut status = ExitStatus::Success;

		for &category in &self.categories {
			let Some(plan) = Self::plan(category, &snapshot) else { continue };

			ctx.console.blank();
			ctx.console.emit(Style::Heading, Self::heading(category));
			ctx.console.blank();

			let outcome = remediate::drive(plan.as_ref(), self.dry_run, ctx, &mut snapshot)?;
			match outcome {
				Outcome::Declined => status = ExitStatus::Failure,
				Outcome::Applied(count) => ui::debug(&format!("{:?}: {} changes applied", category, count)),
				Outcome::Reported | Outcome::NothingToDo => {}
			}

			ctx.console.blank();
			ctx.console.emit(Style::Banner, BANNER);
		}

		Ok(status)
	}
}

fn display_path(path: &str) -> &str {
	if path.is_empty() {
		EMPTY_PATH_LABEL
	} else {
		path
	}
}

fn progress(index: usize, total: usize, path: &str) -> String {
	format!("[{}/{}] {}", index + 1, total, path)
}

/// Gallery rows whose file is gone
struct MissingPlan {
	records: Vec<GalleryRecord>,
}

impl MissingPlan {
	fn new(snapshot: &Snapshot) -> Self {
		Self {
			records: reconcile::missing(&snapshot.records, &snapshot.files),
		}
	}

	fn table(&self) -> Table {
		let mut table = Table::new(&["value_id", "value"]);
		for record in &self.records {
			table.row([record.id.to_string(), display_path(&record.path).to_string()]);
		}
		table
	}
}

impl Remediation for MissingPlan {
	fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	fn preview(&self, console: &mut dyn Console) {
		console.line(&format!("{} Gallery records to be removed", self.records.len()));
		console.table(&self.table());
	}

	fn warnings(&self) -> &'static [&'static str] {
		&[
			"You are about to remove database Records.",
			"It is recommended to take a database backup before proceeding",
		]
	}

	fn nothing_to_do(&self) -> &'static str {
		"There are no missing image records to remove"
	}

	fn apply(&self, ctx: &mut Context<'_>, snapshot: &mut Snapshot) -> Result<usize> {
		ctx.console.line("Removing Gallery Records");
		ctx.console.table(&self.table());

		let ids: Vec<i64> = self.records.iter().map(|r| r.id).collect();
		let deleted = ctx.gallery.delete_ids(&ids)?;
		snapshot.forget_records(&ids);

		ctx.console.line(&format!("Removed {} gallery records", deleted));
		Ok(deleted)
	}
}

/// Files on disk nothing references
struct UnusedPlan {
	paths: Vec<String>,
}

impl UnusedPlan {
	fn new(snapshot: &Snapshot) -> Self {
		Self {
			paths: reconcile::unused(&snapshot.records, &snapshot.files),
		}
	}

	fn table(&self) -> Table {
		let mut table = Table::new(&["Filename"]);
		for path in &self.paths {
			table.row([path.as_str()]);
		}
		table
	}
}

impl Remediation for UnusedPlan {
	fn is_empty(&self) -> bool {
		self.paths.is_empty()
	}

	fn preview(&self, console: &mut dyn Console) {
		console.line(&format!("{} Catalog product image files to be deleted", self.paths.len()));
		console.table(&self.table());
	}

	fn warnings(&self) -> &'static [&'static str] {
		&[
			"You are about to remove catalog image files.",
			"It is recommended to take a media backup before proceeding",
		]
	}

	fn nothing_to_do(&self) -> &'static str {
		"There are no unused images to delete"
	}

	fn apply(&self, ctx: &mut Context<'_>, snapshot: &mut Snapshot) -> Result<usize> {
		ctx.console.line("Deleting catalog images");
		ctx.console.table(&self.table());

		let total = self.paths.len();
		for (index, path) in self.paths.iter().enumerate() {
			ctx.media.delete(path)?;
			snapshot.forget_file(path);
			ctx.console.emit(Style::Comment, &progress(index, total, path));
		}

		ctx.console.line(&format!("Deleted {} image files", total));
		Ok(total)
	}
}

/// One redundant copy and the records to point at its keeper
struct Redirect {
	path: String,
	keeper: String,
	records: Vec<GalleryRecord>,
}

struct DuplicatePlan {
	redirects: Vec<Redirect>,
}

impl DuplicatePlan {
	fn new(snapshot: &Snapshot) -> Self {
		let mut redirects = Vec::new();

		for group in reconcile::duplicates(&snapshot.files) {
			for path in group.redundant() {
				redirects.push(Redirect {
					path: path.clone(),
					keeper: group.keeper().to_string(),
					records: reconcile::referencing(&snapshot.records, path)
						.into_iter()
						.cloned()
						.collect(),
				});
			}
		}

		Self { redirects }
	}

	fn record_count(&self) -> usize {
		self.redirects.iter().map(|r| r.records.len()).sum()
	}

	fn table(&self) -> Table {
		let mut table = Table::new(&["Filename", "Duplicate of", "Database Records"]);
		for redirect in &self.redirects {
			table.row([
				redirect.path.clone(),
				redirect.keeper.clone(),
				redirect.records.len().to_string(),
			]);
		}
		table
	}
}

impl Remediation for DuplicatePlan {
	fn is_empty(&self) -> bool {
		self.redirects.is_empty()
	}

	fn preview(&self, console: &mut dyn Console) {
		console.line(&format!("{} Catalog product image files to be deleted", self.redirects.len()));
		console.line(&format!("and {} Database Records to be updated", self.record_count()));
		console.table(&self.table());
	}

	fn warnings(&self) -> &'static [&'static str] {
		&[
			"You are about to remove catalog image files and update database records.",
			"It is recommended to take a media and database backup before proceeding",
		]
	}

	fn nothing_to_do(&self) -> &'static str {
		"There are no duplicate images to delete or update"
	}

	fn apply(&self, ctx: &mut Context<'_>, snapshot: &mut Snapshot) -> Result<usize> {
		ctx.console.line("Deleting catalog images");
		ctx.console.table(&self.table());

		let total = self.redirects.len();
		let mut updated = 0;
		for (index, redirect) in self.redirects.iter().enumerate() {
			ctx.media.delete(&redirect.path)?;
			snapshot.forget_file(&redirect.path);

			for record in &redirect.records {
				let path = record.restyle(&redirect.keeper);
				ctx.gallery.update_path(record.id, &path)?;
				snapshot.redirect(record.id, &path);
				ui::debug(&format!("Updated record {}: {} -> {}", record.id, record.path, path));
				updated += 1;
			}

			ctx.console.emit(Style::Comment, &progress(index, total, &redirect.path));
		}

		ctx.console.line(&format!(
			"Deleted {} duplicate files and updated {} records",
			self.redirects.len(),
			updated
		));
		Ok(self.redirects.len() + updated)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::{FileHash, PhysicalFile};

	fn file(path: &str, bytes: &[u8]) -> PhysicalFile {
		PhysicalFile {
			relative_path: path.to_string(),
			content_hash: FileHash::from_bytes(bytes),
			size: bytes.len() as u64,
		}
	}

	#[test]
	fn duplicate_plan_maps_redundant_copies_to_records() {
		let snapshot = Snapshot::new(
			vec![
				GalleryRecord::new(1, "/x.jpg"),
				GalleryRecord::new(2, "/y.jpg"),
				GalleryRecord::new(3, "/y.jpg"),
			],
			vec![file("x.jpg", b"same"), file("y.jpg", b"same"), file("z.jpg", b"same")],
		);
		let plan = DuplicatePlan::new(&snapshot);

		assert_eq!(plan.redirects.len(), 2);
		assert_eq!(plan.redirects[0].path, "y.jpg");
		assert_eq!(plan.redirects[0].keeper, "x.jpg");
		assert_eq!(plan.redirects[0].records.len(), 2);
		assert_eq!(plan.redirects[1].path, "z.jpg");
		assert!(plan.redirects[1].records.is_empty());
		assert_eq!(plan.record_count(), 2);
	}

	#[test]
	fn missing_table_labels_empty_paths() {
		let snapshot = Snapshot::new(vec![GalleryRecord::new(7, "")], Vec::new());
		let plan = MissingPlan::new(&snapshot);

		assert!(plan.table().render()[3].contains(EMPTY_PATH_LABEL));
	}

	#[test]
	fn no_flags_cleans_all_three() {
		let command = CleanCommand::new(&[], true);
		assert_eq!(command.categories, CleanCommand::CATEGORIES.to_vec());
	}
}
