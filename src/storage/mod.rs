//! Catalog store and media directory access

pub mod gallery;
pub mod media;

pub use gallery::{GalleryStore, SqliteGallery};
pub use media::{MediaDirectory, MediaStore};
