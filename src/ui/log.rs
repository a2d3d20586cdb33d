//! Unified logging system

use colored::*;
use std::sync::atomic::{AtomicU8, Ordering};

static VERBOSITY: AtomicU8 = AtomicU8::new(0);

/// Output verbosity, driven by the repeated `-v` flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
	#[default]
	Normal = 0,
	/// `-v`: per-category tables
	Verbose = 1,
	/// `-vv`: individual mutations and store activity
	VeryVerbose = 2,
	/// `-vvv`: everything, including per-file hashing
	Debug = 3,
}

impl Verbosity {
	pub fn from_count(count: u8) -> Self {
		match count {
			0 => Self::Normal,
			1 => Self::Verbose,
			2 => Self::VeryVerbose,
			_ => Self::Debug,
		}
	}
}

pub struct Log;

impl Log {
	pub fn set_verbosity(level: Verbosity) {
		VERBOSITY.store(level as u8, Ordering::Relaxed);
	}

	pub fn verbosity() -> Verbosity {
		Verbosity::from_count(VERBOSITY.load(Ordering::Relaxed))
	}

	pub fn is_verbose() -> bool {
		Self::verbosity() >= Verbosity::Verbose
	}
}

pub fn warn(msg: &str) {
	println!("{} {}", "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	eprintln!("{} {}", "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::verbosity() >= Verbosity::VeryVerbose {
		println!("{} {}", "⚙".bright_black().bold(), msg.dimmed());
	}
}

/// Per-file noise, only shown at `-vvv`
pub fn trace(msg: &str) {
	if Log::verbosity() >= Verbosity::Debug {
		println!("{} {}", "⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	println!("\n{}", text.bright_blue().bold());
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn verbosity_saturates_at_debug() {
		assert_eq!(Verbosity::from_count(0), Verbosity::Normal);
		assert_eq!(Verbosity::from_count(1), Verbosity::Verbose);
		assert_eq!(Verbosity::from_count(2), Verbosity::VeryVerbose);
		assert_eq!(Verbosity::from_count(3), Verbosity::Debug);
		assert_eq!(Verbosity::from_count(9), Verbosity::Debug);
	}

	#[test]
	fn levels_are_ordered() {
		assert!(Verbosity::Debug > Verbosity::Verbose);
		assert!(Verbosity::Normal < Verbosity::Verbose);
	}
}
