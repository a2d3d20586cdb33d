//! Gallery table access
//!
//! The catalog keeps one row per product image reference in the gallery
//! table (`value_id` primary key, `value` relative path). Rows are read with
//! keyset pagination so memory stays bounded on large catalogs.

use rusqlite::{params, params_from_iter, Connection, OpenFlags, OptionalExtension};
use std::path::Path;

use crate::core::GalleryRecord;
use crate::error::{Error, Result};
use crate::ui;

/// Catalog store holding gallery rows
pub trait GalleryStore {
	/// Rows per fetch and ids per delete statement
	fn batch_size(&self) -> usize;

	/// Up to `limit` records with id greater than `after`, ordered by id
	fn fetch_batch(&self, after: Option<i64>, limit: usize) -> Result<Vec<GalleryRecord>>;

	/// Delete rows by id, returning how many were removed
	fn delete_ids(&self, ids: &[i64]) -> Result<usize>;

	/// Point one row at a different path
	fn update_path(&self, id: i64, path: &str) -> Result<()>;
}

pub struct SqliteGallery {
	conn: Connection,
	table: String,
	batch_size: usize,
}

impl SqliteGallery {
	/// Open an existing catalog database; the gallery table must already exist
	pub fn open(path: &Path, table: &str, batch_size: usize) -> Result<Self> {
		let conn = Connection::open_with_flags(
			path,
			OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
		)?;
		let gallery = Self::from_connection(conn, table, batch_size);

		if !gallery.table_exists()? {
			return Err(Error::Config(format!(
				"table '{}' not found in {}",
				table,
				path.display()
			)));
		}

		ui::debug(&format!("Opened catalog database: {}", path.display()));
		Ok(gallery)
	}

	pub fn from_connection(conn: Connection, table: &str, batch_size: usize) -> Self {
		Self {
			conn,
			table: table.to_string(),
			batch_size: batch_size.max(1),
		}
	}

	fn table_exists(&self) -> Result<bool> {
		let found = self
			.conn
			.query_row(
				"SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
				[&self.table],
				|row| row.get::<_, String>(0),
			)
			.optional()?;
		Ok(found.is_some())
	}
}

impl GalleryStore for SqliteGallery {
	fn batch_size(&self) -> usize {
		self.batch_size
	}

	fn fetch_batch(&self, after: Option<i64>, limit: usize) -> Result<Vec<GalleryRecord>> {
		let mut stmt = self.conn.prepare_cached(&format!(
			"SELECT value_id, value FROM {} WHERE value_id > ?1 ORDER BY value_id LIMIT ?2",
			self.table
		))?;

		let limit = i64::try_from(limit).unwrap_or(i64::MAX);
		let rows = stmt.query_map(params![after.unwrap_or(i64::MIN), limit], |row| {
			Ok(GalleryRecord {
				id: row.get(0)?,
				path: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
			})
		})?;

		let mut records = Vec::new();
		for record in rows {
			records.push(record?);
		}

		Ok(records)
	}

	fn delete_ids(&self, ids: &[i64]) -> Result<usize> {
		let mut deleted = 0;

		for chunk in ids.chunks(self.batch_size) {
			let placeholders = vec!["?"; chunk.len()].join(", ");
			deleted += self.conn.execute(
				&format!("DELETE FROM {} WHERE value_id IN ({})", self.table, placeholders),
				params_from_iter(chunk.iter()),
			)?;
			ui::debug(&format!("Deleted {} gallery records", chunk.len()));
		}

		Ok(deleted)
	}

	fn update_path(&self, id: i64, path: &str) -> Result<()> {
		self.conn.execute(
			&format!("UPDATE {} SET value = ?1 WHERE value_id = ?2", self.table),
			params![path, id],
		)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::GALLERY_TABLE;

	fn gallery(batch_size: usize) -> SqliteGallery {
		let conn = Connection::open_in_memory().unwrap();
		conn.execute(
			&format!("CREATE TABLE {} (value_id INTEGER PRIMARY KEY AUTOINCREMENT, value VARCHAR(255))", GALLERY_TABLE),
			[],
		)
		.unwrap();
		SqliteGallery::from_connection(conn, GALLERY_TABLE, batch_size)
	}

	fn insert(store: &SqliteGallery, path: Option<&str>) -> i64 {
		store
			.conn
			.execute(&format!("INSERT INTO {} (value) VALUES (?1)", store.table), params![path])
			.unwrap();
		store.conn.last_insert_rowid()
	}

	#[test]
	fn fetch_pages_by_id() {
		let store = gallery(2);
		for path in ["/a.jpg", "/b.jpg", "/c.jpg"] {
			insert(&store, Some(path));
		}

		let first = store.fetch_batch(None, 2).unwrap();
		assert_eq!(first.len(), 2);
		let second = store.fetch_batch(Some(first[1].id), 2).unwrap();
		assert_eq!(second, vec![GalleryRecord::new(3, "/c.jpg")]);
		assert!(store.fetch_batch(Some(3), 2).unwrap().is_empty());
	}

	#[test]
	fn null_value_loads_as_empty() {
		let store = gallery(10);
		let id = insert(&store, None);

		assert_eq!(store.fetch_batch(None, 10).unwrap(), vec![GalleryRecord::new(id, "")]);
	}

	#[test]
	fn delete_spans_chunks() {
		let store = gallery(2);
		let ids: Vec<i64> = (0..5).map(|i| insert(&store, Some(format!("/{}.jpg", i).as_str()))).collect();

		assert_eq!(store.delete_ids(&ids[..4]).unwrap(), 4);
		assert_eq!(store.fetch_batch(None, 10).unwrap(), vec![GalleryRecord::new(ids[4], "/4.jpg")]);
	}

	#[test]
	fn update_rewrites_value() {
		let store = gallery(10);
		let id = insert(&store, Some("/y.jpg"));
		store.update_path(id, "/x.jpg").unwrap();

		assert_eq!(store.fetch_batch(None, 10).unwrap()[0].path, "/x.jpg");
	}

	#[test]
	fn open_requires_gallery_table() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("catalog.db");
		Connection::open(&path)
			.unwrap()
			.execute("CREATE TABLE other (id INTEGER)", [])
			.unwrap();

		let err = SqliteGallery::open(&path, GALLERY_TABLE, 10).err().unwrap();
		assert!(err.to_string().contains("not found"));
	}

	#[test]
	fn open_does_not_create_database() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("absent.db");

		assert!(SqliteGallery::open(&path, GALLERY_TABLE, 10).is_err());
		assert!(!path.exists());
	}
}
