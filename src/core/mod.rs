//! Core domain types

pub mod hash;
pub mod inventory;
pub mod reconcile;

pub use hash::FileHash;
pub use inventory::{
	load_database_images, load_physical_images, media_key, GalleryRecord, PhysicalFile, Snapshot, Sources,
};
pub use reconcile::DuplicateGroup;
