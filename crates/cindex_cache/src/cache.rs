//! The translation-unit cache.
//!
//! `TranslationUnitCache` owns one engine unit per source file and, on every
//! request, decides whether to reuse it, reparse it in place, or rebuild it
//! from scratch. The decision is made by [`RefreshState`]; this module drives
//! the engine through it and keeps the registry consistent: an entry is only
//! installed after a fully successful parse, and a unit is disposed exactly
//! once.

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use cindex_common::{CompileArgs, GlobalOptions, ParseOptions, WriteTime};
use cindex_compdb::CompilationDatabase;
use cindex_config::{IndexSettings, TeardownPolicy};
use cindex_source::UnsavedOverlay;

use crate::engine::{EngineError, ParserEngine};
use crate::entry::StoredUnit;
use crate::error::CacheError;
use crate::refresh::RefreshState;
use crate::unit::TranslationUnit;
use crate::write_times::{DiskWriteTimes, WriteTimeSource};

/// Verbosity at which the engine is asked for its own verbose output.
const VERBOSE_ENGINE_LEVEL: u8 = 2;

/// Flag appended to the parse arguments at [`VERBOSE_ENGINE_LEVEL`].
const VERBOSE_ENGINE_FLAG: &str = "-v";

/// Registry of parsed translation units keyed by filename.
///
/// The cache is driven by one logical caller at a time; every mutating method
/// takes `&mut self`. Requests may block for as long as the engine takes to
/// parse. Use [`IndexService`](crate::IndexService) to share a cache between
/// threads.
pub struct TranslationUnitCache<E: ParserEngine, D, W = DiskWriteTimes> {
    /// The parsing engine every unit comes from.
    engine: E,

    /// Engine-wide context; `None` only once teardown has released it.
    context: Option<E::Context>,

    /// Source of per-file compile arguments.
    database: D,

    /// Source of on-disk write times.
    write_times: W,

    /// Unsaved editor content passed to every parse and reparse.
    overlay: UnsavedOverlay,

    /// Cached units keyed by filename.
    units: HashMap<String, StoredUnit<E::Unit>>,

    /// Diagnostic verbosity the context was created with.
    verbosity: u8,

    /// What happens to units and the context when the cache is dropped.
    teardown: TeardownPolicy,
}

impl<E, D, W> TranslationUnitCache<E, D, W>
where
    E: ParserEngine,
    D: CompilationDatabase,
    W: WriteTimeSource,
{
    /// Creates the engine context and an empty cache.
    ///
    /// Applies the settings' global options to the engine when any are set.
    pub fn new(
        mut engine: E,
        database: D,
        write_times: W,
        settings: &IndexSettings,
    ) -> Result<Self, CacheError> {
        let context = engine.create_context(settings.verbosity)?;
        let global_options = settings.global_options();
        if !global_options.is_empty() {
            engine.set_global_options(&context, global_options);
        }
        tracing::debug!(
            verbosity = settings.verbosity,
            teardown = ?settings.teardown,
            "created translation unit cache"
        );
        Ok(Self {
            engine,
            context: Some(context),
            database,
            write_times,
            overlay: UnsavedOverlay::new(),
            units: HashMap::new(),
            verbosity: settings.verbosity,
            teardown: settings.teardown,
        })
    }

    /// Returns the translation unit for `filename`, parsing or refreshing it
    /// as needed.
    ///
    /// Returns `None` when the compilation database has no arguments for the
    /// file (the registry is left untouched, even if it holds an entry) or
    /// when a full parse fails (nothing is cached, so the next request
    /// retries). A failed reparse falls back to a full rebuild within the
    /// same call.
    pub fn get_translation_unit(
        &mut self,
        filename: &str,
        force_refresh: bool,
    ) -> Option<TranslationUnit<'_, E::Unit>> {
        let started = Instant::now();

        let args = self.database.args_for(filename);
        if args.is_empty() {
            tracing::trace!(file = filename, "no compile arguments, skipping");
            return None;
        }
        let write_time = self.write_times.write_time(filename);

        let plan = RefreshState::plan(
            self.units.get(filename).map(StoredUnit::key),
            &args,
            write_time,
            force_refresh,
        );
        tracing::debug!(file = filename, reason = %plan.reason, "indexing translation unit");

        let mut state = plan.state;
        loop {
            match state {
                RefreshState::Reuse => return self.view(filename),
                RefreshState::Reparse => match self.reparse_existing(filename, write_time) {
                    Ok(()) => {
                        tracing::debug!(
                            file = filename,
                            elapsed = ?started.elapsed(),
                            "reparsed translation unit"
                        );
                        return self.view(filename);
                    }
                    Err(e) => {
                        tracing::warn!(file = filename, error = %e, "reparse failed, rebuilding");
                        state = state.after_reparse_failure();
                    }
                },
                RefreshState::Rebuild => match self.rebuild(filename, args.clone(), write_time) {
                    Ok(()) => {
                        tracing::debug!(
                            file = filename,
                            elapsed = ?started.elapsed(),
                            "created translation unit"
                        );
                        return self.view(filename);
                    }
                    Err(e) => {
                        tracing::error!(file = filename, error = %e, "failed to parse translation unit");
                        state = state.after_parse_failure();
                    }
                },
                RefreshState::Failed => return None,
            }
        }
    }

    /// Parses `filename` only if it has no cached entry yet.
    ///
    /// A cheap "ensure warm" call that never forces work on a cached file.
    pub fn prime_translation_unit(&mut self, filename: &str) {
        if !self.units.contains_key(filename) {
            self.get_translation_unit(filename, false);
        }
    }

    /// Refreshes `filename` only if it already has a cached entry.
    ///
    /// Runs the normal decision without forcing: if neither the arguments nor
    /// the write time changed, the cached unit is kept as is.
    pub fn reprime_translation_unit(&mut self, filename: &str) {
        if self.units.contains_key(filename) {
            self.get_translation_unit(filename, false);
        }
    }

    /// Disposes and forgets the entry for `filename`, if any.
    pub fn remove_translation_unit(&mut self, filename: &str) {
        if let Some(stored) = self.units.remove(filename) {
            tracing::debug!(file = filename, "removing translation unit");
            self.dispose_unit(filename, stored);
        }
    }

    /// Disposes and forgets every entry.
    pub fn remove_all_translation_units(&mut self) {
        let units: Vec<_> = self.units.drain().collect();
        for (filename, stored) in units {
            tracing::debug!(file = %filename, "removing translation unit");
            self.dispose_unit(&filename, stored);
        }
    }

    /// Returns a point-in-time, read-only view of every cached unit keyed by
    /// filename.
    pub fn snapshot_entries(&self) -> BTreeMap<&str, &E::Unit> {
        self.units
            .iter()
            .map(|(name, stored)| (name.as_str(), stored.unit()))
            .collect()
    }

    fn reparse_existing(&mut self, filename: &str, write_time: WriteTime) -> Result<(), EngineError> {
        let Some(stored) = self.units.get_mut(filename) else {
            return Err(EngineError::ReparseFailed {
                reason: "no cached unit".to_string(),
            });
        };
        let overlay = self.overlay.snapshot();
        self.engine.reparse(stored.unit_mut(), &overlay)?;
        stored.mark_validated(write_time);
        Ok(())
    }

    fn rebuild(&mut self, filename: &str, args: CompileArgs, write_time: WriteTime) -> Result<(), EngineError> {
        self.remove_translation_unit(filename);

        let parse_args = if self.verbosity >= VERBOSE_ENGINE_LEVEL {
            args.with_appended([VERBOSE_ENGINE_FLAG])
        } else {
            args.clone()
        };

        let context = self.context.as_ref().ok_or(EngineError::ContextUnavailable)?;
        let overlay = self.overlay.snapshot();
        let unit = self.engine.parse(
            context,
            filename,
            &parse_args,
            &overlay,
            ParseOptions::editing(),
        )?;

        self.units
            .insert(filename.to_string(), StoredUnit::new(args, write_time, unit));
        Ok(())
    }
}

impl<E: ParserEngine, D, W> TranslationUnitCache<E, D, W> {
    /// Returns `true` if `filename` has a cached entry.
    pub fn contains(&self, filename: &str) -> bool {
        self.units.contains_key(filename)
    }

    /// Returns the cached entry for `filename` without validating it.
    pub fn entry(&self, filename: &str) -> Option<&StoredUnit<E::Unit>> {
        self.units.get(filename)
    }

    /// Returns the number of cached units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Reads the engine's process-wide options register.
    pub fn global_options(&self) -> GlobalOptions {
        self.context
            .as_ref()
            .map(|ctx| self.engine.global_options(ctx))
            .unwrap_or_default()
    }

    /// Writes the engine's process-wide options register. Already-cached
    /// units are unaffected until their next reparse or rebuild.
    pub fn set_global_options(&mut self, options: GlobalOptions) {
        if let Some(ctx) = self.context.as_ref() {
            self.engine.set_global_options(ctx, options);
        }
    }

    /// The unsaved-edits overlay every parse and reparse reads.
    pub fn overlay(&self) -> &UnsavedOverlay {
        &self.overlay
    }

    /// Mutable access for the editing surface. Edits take effect on the next
    /// parse or reparse; they do not invalidate cached units by themselves.
    pub fn overlay_mut(&mut self) -> &mut UnsavedOverlay {
        &mut self.overlay
    }

    /// The parsing engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the parsing engine.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// The compilation database.
    pub fn database(&self) -> &D {
        &self.database
    }

    /// Mutable access to the compilation database, e.g. after the build
    /// configuration changes.
    pub fn database_mut(&mut self) -> &mut D {
        &mut self.database
    }

    /// Mutable access to the write-time source.
    pub fn write_times_mut(&mut self) -> &mut W {
        &mut self.write_times
    }

    /// The configured teardown policy.
    pub fn teardown_policy(&self) -> TeardownPolicy {
        self.teardown
    }

    /// Releases every unit and the engine context if the teardown policy is
    /// [`TeardownPolicy::Dispose`]. Returns `true` if resources were released;
    /// otherwise they are leaked when the cache is dropped.
    pub fn shutdown_if_safe(mut self) -> bool {
        match self.teardown {
            TeardownPolicy::Dispose => {
                self.dispose_everything();
                true
            }
            TeardownPolicy::Leak => false,
        }
    }

    fn view(&self, filename: &str) -> Option<TranslationUnit<'_, E::Unit>> {
        self.units
            .get_key_value(filename)
            .map(|(name, stored)| TranslationUnit::new(name, stored.unit(), &self.overlay))
    }

    fn dispose_unit(&mut self, filename: &str, stored: StoredUnit<E::Unit>) {
        if let Err(e) = self.engine.dispose(stored.into_unit()) {
            tracing::error!(file = filename, error = %e, "failed to dispose translation unit");
        }
    }

    fn dispose_everything(&mut self) {
        let units: Vec<_> = self.units.drain().collect();
        for (filename, stored) in units {
            self.dispose_unit(&filename, stored);
        }
        if let Some(ctx) = self.context.take() {
            if let Err(e) = self.engine.dispose_context(ctx) {
                tracing::error!(error = %e, "failed to dispose parser context");
            }
        }
    }

    fn leak_everything(&mut self) {
        let leaked = self.units.len();
        for (_, stored) in self.units.drain() {
            std::mem::forget(stored.into_unit());
        }
        if let Some(ctx) = self.context.take() {
            std::mem::forget(ctx);
        }
        if leaked > 0 {
            tracing::debug!(units = leaked, "leaking translation units at teardown");
        }
    }
}

impl<E: ParserEngine, D, W> Drop for TranslationUnitCache<E, D, W> {
    fn drop(&mut self) {
        match self.teardown {
            TeardownPolicy::Dispose => self.dispose_everything(),
            TeardownPolicy::Leak => self.leak_everything(),
        }
    }
}
