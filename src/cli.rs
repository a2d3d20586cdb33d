use clap::{builder::Styles, ArgAction, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::commands::Category;
use crate::config::{DEFAULT_BATCH_SIZE, DEFAULT_DATABASE, DEFAULT_MEDIA_ROOT, GALLERY_TABLE};

fn parse_batch_size(s: &str) -> Result<usize, String> {
	let val: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	if val == 0 {
		Err("batch size must be at least 1".to_string())
	} else {
		Ok(val)
	}
}

fn styles() -> Styles {
	Styles::styled()
		.header(anstyle::Style::new().bold().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))))
		.usage(anstyle::Style::new().bold().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))))
		.literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))))
		.placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))))
		.valid(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))))
		.invalid(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))))
}

#[derive(Parser, Debug)]
#[command(
	name = "catalog-images",
	author,
	version,
	about = "Find and clean missing, unused and duplicate catalog product images",
	styles = styles(),
	after_help = format!(
		"{title}
  {bin} {info}   {info_args}          {info_desc}
  {bin} {info}   {info_dup_args}        {info_dup_desc}
  {bin} {clean}  {clean_args}   {clean_desc}
  {bin} {clean}  {clean_unused_args}         {clean_unused_desc}",
		title = "Examples:".bright_blue().bold(),
		bin = "catalog-images".bright_blue(),
		info = "catalog:images:info".yellow(),
		info_args = "-v",
		info_desc = "Report every category with tables".dimmed(),
		info_dup_args = "-t -m",
		info_dup_desc = "Duplicate and missing counts only".dimmed(),
		clean = "catalog:images:clean".yellow(),
		clean_args = "--dry-run -v",
		clean_desc = "Show what would be cleaned".dimmed(),
		clean_unused_args = "-u",
		clean_unused_desc = "Delete unused image files".dimmed(),
	),
)]
pub struct Cli {
	/// Increase output detail (-v tables, -vv changes, -vvv every file)
	#[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
	pub verbose: u8,

	/// Catalog product media directory
	#[arg(long = "media-root", env = "CATALOG_IMAGES_MEDIA_ROOT", default_value = DEFAULT_MEDIA_ROOT, global = true)]
	pub media_root: PathBuf,

	/// SQLite catalog database
	#[arg(long = "db", env = "CATALOG_IMAGES_DB", default_value = DEFAULT_DATABASE, global = true)]
	pub database: PathBuf,

	/// Gallery table name
	#[arg(long = "table", env = "CATALOG_IMAGES_TABLE", default_value = GALLERY_TABLE, global = true)]
	pub table: String,

	/// Rows per database fetch and ids per delete
	#[arg(
		long = "batch-size",
		env = "CATALOG_IMAGES_BATCH_SIZE",
		default_value_t = DEFAULT_BATCH_SIZE,
		value_parser = parse_batch_size,
		global = true
	)]
	pub batch_size: usize,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Information about unused, missing and duplicate images
	#[command(name = "catalog:images:info")]
	Info {
		/// Info on product images in the database
		#[arg(id = "info_database", short = 'd', long = "database")]
		database: bool,

		/// Info on product images in the filesystem
		#[arg(short = 'p', long = "physical")]
		physical: bool,

		/// Info on missing product images
		#[arg(short = 'm', long = "missing")]
		missing: bool,

		/// Info on unused product images
		#[arg(short = 'u', long = "unused")]
		unused: bool,

		/// Info on duplicate product images
		#[arg(short = 't', long = "duplicate")]
		duplicate: bool,

		/// Print the report as JSON
		#[arg(long = "json")]
		json: bool,
	},

	/// Delete unused and duplicate image files and/or remove records for missing images
	#[command(name = "catalog:images:clean")]
	Clean {
		/// Remove missing product image records
		#[arg(short = 'm', long = "missing")]
		missing: bool,

		/// Delete unused product images
		#[arg(short = 'u', long = "unused")]
		unused: bool,

		/// Remove duplicate product images and update database records
		#[arg(short = 't', long = "duplicate")]
		duplicate: bool,

		/// Dry run, don't make any changes
		#[arg(short = 'd', long = "dry-run")]
		dry_run: bool,

		/// Answer yes to every confirmation
		#[arg(short = 'y', long = "yes")]
		yes: bool,
	},
}

impl Command {
	/// Category flags that were set, resolved through a fixed flag table
	pub fn requested(&self) -> Vec<Category> {
		let flags: Vec<(bool, Category)> = match *self {
			Command::Info { database, physical, missing, unused, duplicate, .. } => vec![
				(database, Category::Database),
				(physical, Category::Physical),
				(missing, Category::Missing),
				(unused, Category::Unused),
				(duplicate, Category::Duplicate),
			],
			Command::Clean { missing, unused, duplicate, .. } => vec![
				(missing, Category::Missing),
				(unused, Category::Unused),
				(duplicate, Category::Duplicate),
			],
		};

		flags.into_iter().filter(|(set, _)| *set).map(|(_, c)| c).collect()
	}
}
