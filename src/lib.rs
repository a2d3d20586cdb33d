//! # catalog-images
//!
//! Reconciles catalog gallery records against the product media directory.
//! Finds records whose file is gone, files nothing references, and files
//! with identical content, and cleans them up on request.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod storage;
pub mod ui;

pub use error::{Error, Result};
