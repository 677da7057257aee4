//! In-memory source overlay for files with unsaved edits.
//!
//! This crate provides the [`UnsavedOverlay`] mapping filenames to editor
//! content, and the [`OverlaySnapshot`] handed to the parsing engine so that
//! analysis reflects what the user is typing rather than what is on disk.

#![warn(missing_docs)]

pub mod overlay;
pub mod snapshot;
pub mod unsaved_file;

pub use overlay::UnsavedOverlay;
pub use snapshot::OverlaySnapshot;
pub use unsaved_file::UnsavedFile;
