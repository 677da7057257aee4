//! The parsing engine boundary.
//!
//! The engine is an opaque service, usually a native library, that turns a
//! source file plus compile arguments into a translation unit. The cache owns
//! every unit the engine hands out and gives each back exactly once through
//! [`ParserEngine::dispose`].

use cindex_common::{CompileArgs, GlobalOptions, ParseOptions};
use cindex_source::OverlaySnapshot;

/// Errors reported by a [`ParserEngine`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The engine context could not be created.
    #[error("failed to create parser context: {reason}")]
    ContextCreation {
        /// Description of the failure.
        reason: String,
    },

    /// A full parse produced no translation unit.
    #[error("error parsing translation unit {filename}: {reason}")]
    ParseFailed {
        /// The file that failed to parse.
        filename: String,
        /// Description of the failure.
        reason: String,
    },

    /// An incremental reparse failed; the unit may be unusable.
    #[error("error re-parsing translation unit: {reason}")]
    ReparseFailed {
        /// Description of the failure.
        reason: String,
    },

    /// Releasing a unit or the context failed.
    #[error("error disposing parser resource: {reason}")]
    DisposeFailed {
        /// Description of the failure.
        reason: String,
    },

    /// The engine context has already been released.
    #[error("parser context is no longer available")]
    ContextUnavailable,
}

/// An opaque parsing service.
///
/// `Context` is the engine-wide index every parse belongs to. `Unit` is a
/// parsed translation unit; it is deliberately not `Clone` so ownership stays
/// with a single cache entry and disposal, which takes the unit by value,
/// cannot happen twice.
pub trait ParserEngine {
    /// The engine-wide context that parses are created in.
    type Context;

    /// A parsed translation unit.
    type Unit;

    /// Creates the engine context. Verbosity above zero asks the engine to
    /// print its own diagnostics.
    fn create_context(&mut self, verbosity: u8) -> Result<Self::Context, EngineError>;

    /// Parses `filename` from scratch with `args`, reading unsaved content
    /// from `overlay` in place of the disk.
    fn parse(
        &mut self,
        context: &Self::Context,
        filename: &str,
        args: &CompileArgs,
        overlay: &OverlaySnapshot<'_>,
        options: ParseOptions,
    ) -> Result<Self::Unit, EngineError>;

    /// Incrementally refreshes `unit` against the disk and `overlay`.
    ///
    /// On failure the unit should be considered unusable.
    fn reparse(&mut self, unit: &mut Self::Unit, overlay: &OverlaySnapshot<'_>) -> Result<(), EngineError>;

    /// Releases a unit.
    fn dispose(&mut self, unit: Self::Unit) -> Result<(), EngineError>;

    /// Releases the context. Called at most once, after every unit is gone.
    fn dispose_context(&mut self, context: Self::Context) -> Result<(), EngineError>;

    /// Reads the process-wide options register.
    fn global_options(&self, context: &Self::Context) -> GlobalOptions;

    /// Writes the process-wide options register. Affects future parses and
    /// reparses only.
    fn set_global_options(&mut self, context: &Self::Context, options: GlobalOptions);
}
