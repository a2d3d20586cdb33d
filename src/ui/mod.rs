//! # User Interface
//!
//! Colored terminal logging, bordered report tables and the report console.

pub mod console;
pub mod log;
pub mod table;

pub use console::{Console, Style, Terminal};
#[doc(hidden)]
pub use console::Recorder;
pub use log::{debug, error, header, trace, warn, Log, Verbosity};
pub use table::Table;
