//! Process-level lifecycle for a translation-unit cache.
//!
//! `IndexService` is the front door for hosts: it creates the engine context,
//! serializes callers behind a mutex, and decides at shutdown whether engine
//! resources are released or left to the operating system.

use std::path::Path;

use cindex_compdb::{CompilationDatabase, ProjectDatabase};
use cindex_config::{load_config, IndexConfig, IndexSettings};
use parking_lot::Mutex;

use crate::cache::TranslationUnitCache;
use crate::engine::ParserEngine;
use crate::error::CacheError;
use crate::write_times::{DiskWriteTimes, WriteTimeSource};

/// A translation-unit cache shared between threads.
///
/// Only one call is in flight per service; others block on the lock.
pub struct IndexService<E: ParserEngine, D, W = DiskWriteTimes> {
    /// The cache, locked for the duration of each call.
    cache: Mutex<TranslationUnitCache<E, D, W>>,
}

impl<E, D, W> IndexService<E, D, W>
where
    E: ParserEngine,
    D: CompilationDatabase,
    W: WriteTimeSource,
{
    /// Creates the engine context and an empty cache.
    pub fn initialize(
        engine: E,
        database: D,
        write_times: W,
        settings: &IndexSettings,
    ) -> Result<Self, CacheError> {
        let cache = TranslationUnitCache::new(engine, database, write_times, settings)?;
        tracing::info!(verbosity = settings.verbosity, "index service initialized");
        Ok(Self {
            cache: Mutex::new(cache),
        })
    }

    /// Runs `f` with exclusive access to the cache.
    ///
    /// Translation units borrowed inside the closure cannot escape it.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut TranslationUnitCache<E, D, W>) -> R) -> R {
        let mut cache = self.cache.lock();
        f(&mut cache)
    }

    /// See [`TranslationUnitCache::prime_translation_unit`].
    pub fn prime_translation_unit(&self, filename: &str) {
        self.cache.lock().prime_translation_unit(filename);
    }

    /// See [`TranslationUnitCache::reprime_translation_unit`].
    pub fn reprime_translation_unit(&self, filename: &str) {
        self.cache.lock().reprime_translation_unit(filename);
    }

    /// See [`TranslationUnitCache::remove_translation_unit`].
    pub fn remove_translation_unit(&self, filename: &str) {
        self.cache.lock().remove_translation_unit(filename);
    }

    /// See [`TranslationUnitCache::remove_all_translation_units`].
    pub fn remove_all_translation_units(&self) {
        self.cache.lock().remove_all_translation_units();
    }
}

impl<E: ParserEngine> IndexService<E, ProjectDatabase, DiskWriteTimes> {
    /// Creates a service from a parsed `cindex.toml`.
    ///
    /// Relative paths in `[compilation]` are resolved against `config_dir`.
    pub fn from_config(engine: E, config: &IndexConfig, config_dir: &Path) -> Result<Self, CacheError> {
        let database = ProjectDatabase::from_config(&config.compilation, config_dir)?;
        Self::initialize(engine, database, DiskWriteTimes, &config.index)
    }

    /// Loads `<project_dir>/cindex.toml` and creates a service from it.
    pub fn open(engine: E, project_dir: &Path) -> Result<Self, CacheError> {
        let config = load_config(project_dir)?;
        Self::from_config(engine, &config, project_dir)
    }
}

impl<E: ParserEngine, D, W> IndexService<E, D, W> {
    /// Shuts the service down.
    ///
    /// Disposes every unit and the engine context when the configured
    /// teardown policy allows it and returns `true`; otherwise the resources
    /// are leaked and `false` is returned.
    pub fn shutdown_if_safe(self) -> bool {
        let released = self.cache.into_inner().shutdown_if_safe();
        tracing::info!(released, "index service shut down");
        released
    }
}
