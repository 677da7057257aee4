//! Error types for setting up the translation-unit cache.

use cindex_compdb::CompdbError;
use cindex_config::ConfigError;

use crate::engine::EngineError;

/// Errors that can occur while creating the cache or its service.
///
/// Requests against a running cache never fail with an error: unbuildable
/// files, reparse failures and parse failures all end in a fallback or a
/// "no unit" result. This enum covers construction only.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The parsing engine could not create its context.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The compilation database could not be loaded.
    #[error(transparent)]
    CompilationDatabase(#[from] CompdbError),
}
