//! Line-oriented report sink with an interactive yes/no prompt

use colored::Colorize;
use std::io::{self, BufRead, IsTerminal, Write};

use super::log::Verbosity;
use super::table::Table;

/// How a report line should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
	Plain,
	Banner,
	Heading,
	Comment,
	Error,
}

pub trait Console {
	fn verbosity(&self) -> Verbosity;

	fn emit(&mut self, style: Style, text: &str);

	/// Ask a yes/no question; anything but an explicit yes is a no
	fn confirm(&mut self, question: &str) -> io::Result<bool>;

	fn line(&mut self, text: &str) {
		self.emit(Style::Plain, text);
	}

	fn blank(&mut self) {
		self.emit(Style::Plain, "");
	}

	fn is_verbose(&self) -> bool {
		self.verbosity() >= Verbosity::Verbose
	}

	/// Print a table, only at `-v` and above
	fn table(&mut self, table: &Table) {
		if self.is_verbose() && !table.is_empty() {
			for line in table.render() {
				self.emit(Style::Plain, &line);
			}
		}
	}
}

/// Console backed by stdout/stdin
pub struct Terminal {
	verbosity: Verbosity,
	assume_yes: bool,
}

impl Terminal {
	pub fn new(verbosity: Verbosity) -> Self {
		Self { verbosity, assume_yes: false }
	}

	pub fn with_assume_yes(mut self, assume_yes: bool) -> Self {
		self.assume_yes = assume_yes;
		self
	}
}

impl Console for Terminal {
	fn verbosity(&self) -> Verbosity {
		self.verbosity
	}

	fn emit(&mut self, style: Style, text: &str) {
		match style {
			Style::Plain => println!("{}", text),
			Style::Banner => println!("{}", text.bright_green().bold()),
			Style::Heading => println!("{}", text.green()),
			Style::Comment => println!("{}", text.yellow()),
			Style::Error => println!("{}", text.bright_red().bold()),
		}
	}

	fn confirm(&mut self, question: &str) -> io::Result<bool> {
		if self.assume_yes {
			return Ok(true);
		}

		let stdin = io::stdin();
		if !stdin.is_terminal() {
			super::warn("Not running interactively and --yes was not given");
			return Ok(false);
		}

		print!("{} ", question.black().on_cyan());
		io::stdout().flush()?;

		let mut input = String::new();
		stdin.lock().read_line(&mut input)?;

		Ok(is_yes(&input))
	}
}

fn is_yes(answer: &str) -> bool {
	let answer = answer.trim();
	answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// In-memory console that records every line and answers prompts with a fixed reply.
/// Used by tests only.
#[doc(hidden)]
#[derive(Debug, Default)]
pub struct Recorder {
	pub lines: Vec<String>,
	pub prompts: Vec<String>,
	verbosity: Verbosity,
	answer: bool,
}

impl Recorder {
	pub fn new(verbosity: Verbosity, answer: bool) -> Self {
		Self {
			verbosity,
			answer,
			..Self::default()
		}
	}

	pub fn output(&self) -> String {
		self.lines.join("\n")
	}

	pub fn contains(&self, needle: &str) -> bool {
		self.lines.iter().any(|l| l.contains(needle))
	}
}

impl Console for Recorder {
	fn verbosity(&self) -> Verbosity {
		self.verbosity
	}

	fn emit(&mut self, _style: Style, text: &str) {
		self.lines.push(text.to_string());
	}

	fn confirm(&mut self, question: &str) -> io::Result<bool> {
		self.prompts.push(question.to_string());
		Ok(self.answer)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_explicit_yes_confirms() {
		assert!(is_yes("y\n"));
		assert!(is_yes(" YES "));
		assert!(!is_yes(""));
		assert!(!is_yes("n"));
		assert!(!is_yes("yep"));
	}

	#[test]
	fn tables_hidden_at_normal_verbosity() {
		let mut table = Table::new(&["Filename"]);
		table.row(["a.jpg"]);

		let mut quiet = Recorder::new(Verbosity::Normal, false);
		quiet.table(&table);
		assert!(quiet.lines.is_empty());

		let mut verbose = Recorder::new(Verbosity::Verbose, false);
		verbose.table(&table);
		assert_eq!(verbose.lines.len(), 5);
	}
}
