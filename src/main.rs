//! catalog-images - catalog product image reconciliation
//!
//! Compares the gallery table of a catalog database with the product media
//! directory, reports missing, unused and duplicate images, and cleans them.

use anyhow::{Context as _, Result};
use clap::Parser;
use std::process::ExitCode;

use catalog_images::cli::{Cli, Command};
use catalog_images::commands::{CleanCommand, Context, ExitStatus, InfoCommand, Runnable};
use catalog_images::config::Settings;
use catalog_images::storage::{MediaDirectory, SqliteGallery};
use catalog_images::ui::{self, Log, Terminal, Verbosity};

fn main() -> ExitCode {
	let cli = Cli::parse();

	let verbosity = Verbosity::from_count(cli.verbose);
	Log::set_verbosity(verbosity);

	match run(cli, verbosity) {
		Ok(status) => status.into(),
		Err(e) => {
			ui::error(&format!("{:#}", e));
			ExitCode::FAILURE
		}
	}
}

fn run(cli: Cli, verbosity: Verbosity) -> Result<ExitStatus> {
	print_header();

	let settings = Settings::new(cli.media_root, cli.database, cli.table, cli.batch_size)
		.context("Invalid settings")?;

	let gallery = SqliteGallery::open(&settings.database, &settings.table, settings.batch_size)
		.with_context(|| format!("Failed to open catalog database {}", settings.database.display()))?;
	let media = MediaDirectory::new(&settings.media_root);

	let requested = cli.command.requested();
	let (command, assume_yes): (Box<dyn Runnable>, bool) = match cli.command {
		Command::Info { json, .. } => (Box::new(InfoCommand::new(&requested, json)), false),
		Command::Clean { dry_run, yes, .. } => (Box::new(CleanCommand::new(&requested, dry_run)), yes),
	};

	let mut console = Terminal::new(verbosity).with_assume_yes(assume_yes);
	let mut ctx = Context::new(&gallery, &media, &mut console);

	ui::debug(&format!("Running {}", command.name()));
	let status = command
		.run(&mut ctx)
		.with_context(|| format!("{} failed", command.name()))?;

	Ok(status)
}

fn print_header() {
	if Log::is_verbose() {
		ui::header(&format!("─── catalog-images v{} ───", env!("CARGO_PKG_VERSION")));
	}
}
