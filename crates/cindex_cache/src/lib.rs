//! Incrementally-maintained translation-unit cache.
//!
//! The [`TranslationUnitCache`] keeps one parsed representation per source
//! file and decides, on every request, whether that parse can be reused,
//! refreshed in place, or must be rebuilt. The decision is driven by the
//! file's compile arguments, its on-disk write time, and whether the caller
//! forces a refresh. Parsing itself is delegated to a [`ParserEngine`]; every
//! parse and reparse sees the current [`UnsavedOverlay`](cindex_source::UnsavedOverlay)
//! so results follow the editor rather than the disk.

#![warn(missing_docs)]

pub mod cache;
pub mod engine;
pub mod entry;
pub mod error;
pub mod refresh;
pub mod service;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod unit;
pub mod write_times;

pub use cache::TranslationUnitCache;
pub use cindex_common::{is_recognized_source_file, GlobalOptions, ParseOptions};
pub use engine::{EngineError, ParserEngine};
pub use entry::StoredUnit;
pub use error::CacheError;
pub use refresh::{RefreshPlan, RefreshReason, RefreshState};
pub use service::IndexService;
pub use unit::TranslationUnit;
pub use write_times::{DiskWriteTimes, WriteTimeSource};
