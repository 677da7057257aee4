//! Shared foundational types used across the cindex workspace.
//!
//! This crate provides the ordered compile-argument list that keys every cached
//! translation unit, the on-disk write time used for invalidation, the option
//! sets passed through to the parsing engine, and the extension-based
//! classification of C-family source files.

#![warn(missing_docs)]

pub mod args;
pub mod options;
pub mod source_kind;
pub mod write_time;

pub use args::CompileArgs;
pub use options::{GlobalOptions, ParseOptions};
pub use source_kind::{is_recognized_source_file, SourceKind};
pub use write_time::WriteTime;
