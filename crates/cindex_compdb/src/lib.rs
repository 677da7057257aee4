//! Compilation databases: where per-file compile arguments come from.
//!
//! The translation-unit cache asks a [`CompilationDatabase`] for each file's
//! ordered argument list before deciding whether a cached parse is still
//! valid. An empty list means the file is not part of any known build target.
//! This crate provides an in-memory database, a loader for clang-style
//! `compile_commands.json` files, and the layered [`ProjectDatabase`] built
//! from a `cindex.toml`.

#![warn(missing_docs)]

pub mod compile_commands;
pub mod database;
pub mod error;
pub mod project;

pub use compile_commands::{CompileCommand, CompileCommandsDatabase};
pub use database::{CompilationDatabase, StaticCompilationDatabase};
pub use error::CompdbError;
pub use project::ProjectDatabase;
