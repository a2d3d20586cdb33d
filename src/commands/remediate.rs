//! Dry-run / confirm / apply flow shared by every clean category

use crate::core::Snapshot;
use crate::error::Result;
use crate::ui::{Console, Style};

use super::Context;

pub const CONFIRM_QUESTION: &str = "Do you want to continue? [y/N]:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
	DryRun,
	Confirm,
	Apply,
	Done,
}

impl Phase {
	pub fn start(dry_run: bool) -> Self {
		if dry_run {
			Phase::DryRun
		} else {
			Phase::Confirm
		}
	}
}

/// How a category ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	/// Dry run: reported only
	Reported,
	NothingToDo,
	/// Number of files or records acted on
	Applied(usize),
	/// The operator said no (or could not be asked)
	Declined,
}

/// A planned set of changes for one category
pub trait Remediation {
	fn is_empty(&self) -> bool;

	/// Dry-run summary and table
	fn preview(&self, console: &mut dyn Console);

	/// Printed before asking for confirmation
	fn warnings(&self) -> &'static [&'static str];

	fn nothing_to_do(&self) -> &'static str;

	/// Perform the changes, keeping `snapshot` in step with what was done.
	/// The first failure stops the category; earlier changes stay applied.
	fn apply(&self, ctx: &mut Context<'_>, snapshot: &mut Snapshot) -> Result<usize>;
}

pub fn drive(
	plan: &dyn Remediation,
	dry_run: bool,
	ctx: &mut Context<'_>,
	snapshot: &mut Snapshot,
) -> Result<Outcome> {
	let mut phase = Phase::start(dry_run);
	let mut outcome = Outcome::NothingToDo;

	loop {
		phase = match phase {
			Phase::DryRun => {
				plan.preview(&mut *ctx.console);
				outcome = Outcome::Reported;
				Phase::Done
			}
			Phase::Confirm if plan.is_empty() => {
				ctx.console.line(plan.nothing_to_do());
				Phase::Done
			}
			Phase::Confirm => {
				ctx.console.blank();
				for warning in plan.warnings() {
					ctx.console.emit(Style::Comment, warning);
				}
				ctx.console.blank();

				if ctx.console.confirm(CONFIRM_QUESTION)? {
					Phase::Apply
				} else {
					ctx.console.emit(Style::Error, "Not Proceeding");
					outcome = Outcome::Declined;
					Phase::Done
				}
			}
			Phase::Apply => {
				outcome = Outcome::Applied(plan.apply(ctx, snapshot)?);
				Phase::Done
			}
			Phase::Done => return Ok(outcome),
		};
	}
}
