//! Fixed-width bordered tables (`+---+---+`)

/// A text table; every column is as wide as the longest cell or header in the table
#[derive(Debug, Clone)]
pub struct Table {
	headers: Vec<String>,
	rows: Vec<Vec<String>>,
}

impl Table {
	pub fn new(headers: &[&str]) -> Self {
		Self {
			headers: headers.iter().map(|h| h.to_string()).collect(),
			rows: Vec::new(),
		}
	}

	/// Add a row; missing cells render blank, extra cells are dropped
	pub fn row<I, S>(&mut self, cells: I) -> &mut Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut row: Vec<String> = cells.into_iter().map(Into::into).take(self.headers.len()).collect();
		row.resize(self.headers.len(), String::new());
		self.rows.push(row);
		self
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	fn widths(&self) -> Vec<usize> {
		let width = self
			.rows
			.iter()
			.flatten()
			.chain(&self.headers)
			.map(|cell| cell.chars().count())
			.max()
			.unwrap_or(0);
		vec![width; self.headers.len()]
	}

	/// Render to lines: divider, titles, divider, rows, divider
	pub fn render(&self) -> Vec<String> {
		let widths = self.widths();
		let divider = divider(&widths);

		let mut lines = Vec::with_capacity(self.rows.len() + 4);
		lines.push(divider.clone());
		lines.push(line(&self.headers, &widths));
		lines.push(divider.clone());
		lines.extend(self.rows.iter().map(|row| line(row, &widths)));
		lines.push(divider);
		lines
	}
}

fn divider(widths: &[usize]) -> String {
	let cells: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
	format!("+-{}-+", cells.join("-+-"))
}

fn line(cells: &[String], widths: &[usize]) -> String {
	let cells: Vec<String> = cells
		.iter()
		.zip(widths)
		.map(|(cell, width)| format!("{:<width$}", cell, width = *width))
		.collect();
	format!("| {} |", cells.join(" | "))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn single_column_fits_longest_value() {
		let mut table = Table::new(&["Filename"]);
		table.row(["/a/b/long-name.jpg"]).row(["x.jpg"]);

		assert_eq!(
			table.render(),
			vec![
				"+--------------------+",
				"| Filename           |",
				"+--------------------+",
				"| /a/b/long-name.jpg |",
				"| x.jpg              |",
				"+--------------------+",
			]
		);
	}

	#[test]
	fn columns_share_one_width() {
		let mut table = Table::new(&["Filename", "Uses"]);
		table.row(["a.jpg", "2"]);

		assert_eq!(
			table.render(),
			vec![
				"+----------+----------+",
				"| Filename | Uses     |",
				"+----------+----------+",
				"| a.jpg    | 2        |",
				"+----------+----------+",
			]
		);
	}

	#[test]
	fn long_value_widens_every_column() {
		let mut table = Table::new(&["value_id", "value"]);
		table.row(["7", "/a/b/long-name.jpg"]);

		let lines = table.render();
		assert_eq!(lines[0], format!("+-{}-+-{}-+", "-".repeat(18), "-".repeat(18)));
		assert_eq!(lines[3], format!("| {:<18} | /a/b/long-name.jpg |", "7"));
	}

	#[test]
	fn short_rows_are_padded() {
		let mut table = Table::new(&["A", "B"]);
		table.row(["1"]);
		assert_eq!(table.render()[3], "| 1 |   |");
	}
}
