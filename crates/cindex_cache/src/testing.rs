//! A recording parser engine and fakes for exercising the cache.
//!
//! [`RecordingEngine`] produces numbered [`FakeUnit`]s, records every call in
//! a [`CallLog`] that outlives the engine, and can be scripted to fail.
//! [`FakeWriteTimes`] hands out write times set by the test.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use cindex_common::{CompileArgs, GlobalOptions, ParseOptions, WriteTime};
use cindex_source::OverlaySnapshot;
use parking_lot::Mutex;

use crate::engine::{EngineError, ParserEngine};
use crate::write_times::WriteTimeSource;

/// A call made into the [`RecordingEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    /// `create_context` with the given verbosity.
    CreateContext {
        /// Requested verbosity.
        verbosity: u8,
    },
    /// `parse`, whether or not it succeeded.
    Parse {
        /// The parsed file.
        filename: String,
        /// The arguments as passed to the engine.
        args: CompileArgs,
        /// Filenames present in the overlay snapshot.
        unsaved: Vec<String>,
        /// Parse options.
        options: ParseOptions,
    },
    /// `reparse`, whether or not it succeeded.
    Reparse {
        /// The unit's id.
        unit: u64,
        /// Filenames present in the overlay snapshot.
        unsaved: Vec<String>,
    },
    /// `dispose` of a unit.
    Dispose {
        /// The unit's id.
        unit: u64,
    },
    /// `dispose_context`.
    DisposeContext,
    /// `set_global_options`.
    SetGlobalOptions(GlobalOptions),
}

/// Shared, clonable record of engine calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<EngineCall>>>);

impl CallLog {
    fn push(&self, call: EngineCall) {
        self.0.lock().push(call);
    }

    /// Returns a copy of every recorded call, in order.
    pub fn calls(&self) -> Vec<EngineCall> {
        self.0.lock().clone()
    }

    /// Forgets every recorded call.
    pub fn clear(&self) {
        self.0.lock().clear();
    }

    /// Number of `parse` calls.
    pub fn parses(&self) -> usize {
        self.count(|c| matches!(c, EngineCall::Parse { .. }))
    }

    /// Number of `reparse` calls.
    pub fn reparses(&self) -> usize {
        self.count(|c| matches!(c, EngineCall::Reparse { .. }))
    }

    /// Number of unit `dispose` calls.
    pub fn disposals(&self) -> usize {
        self.count(|c| matches!(c, EngineCall::Dispose { .. }))
    }

    /// Ids of disposed units, in order.
    pub fn disposed_units(&self) -> Vec<u64> {
        self.0
            .lock()
            .iter()
            .filter_map(|c| match c {
                EngineCall::Dispose { unit } => Some(*unit),
                _ => None,
            })
            .collect()
    }

    /// Total number of calls that touch units (parse, reparse, dispose).
    pub fn unit_calls(&self) -> usize {
        self.parses() + self.reparses() + self.disposals()
    }

    fn count(&self, pred: impl Fn(&EngineCall) -> bool) -> usize {
        self.0.lock().iter().filter(|c| pred(c)).count()
    }
}

/// A translation unit produced by the [`RecordingEngine`].
///
/// Not `Clone`, like a real engine handle.
#[derive(Debug, PartialEq, Eq)]
pub struct FakeUnit {
    id: u64,
    filename: String,
    args: CompileArgs,
    reparses: u32,
}

impl FakeUnit {
    /// Unique id; a new id means a new parse.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The file this unit was parsed from.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The arguments the engine received.
    pub fn args(&self) -> &CompileArgs {
        &self.args
    }

    /// How many times this unit has been reparsed successfully.
    pub fn reparses(&self) -> u32 {
        self.reparses
    }
}

/// The context handed out by [`RecordingEngine::create_context`]. The
/// requested verbosity is recorded in the [`CallLog`].
#[derive(Debug)]
pub struct FakeContext;

/// A scriptable engine that records every call.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    log: CallLog,
    next_id: u64,
    global_options: GlobalOptions,
    fail_context: bool,
    fail_parses: usize,
    fail_reparses: usize,
    fail_dispose: bool,
    unparsable: HashSet<String>,
}

impl RecordingEngine {
    /// Creates an engine that succeeds at everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle to the call log that stays valid after the engine is dropped.
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// Makes `create_context` fail.
    pub fn fail_context(mut self) -> Self {
        self.fail_context = true;
        self
    }

    /// Makes the next `n` parses fail.
    pub fn fail_next_parses(&mut self, n: usize) {
        self.fail_parses = n;
    }

    /// Makes the next `n` reparses fail.
    pub fn fail_next_reparses(&mut self, n: usize) {
        self.fail_reparses = n;
    }

    /// Makes every parse of `filename` fail until cleared.
    pub fn set_unparsable(&mut self, filename: &str, unparsable: bool) {
        if unparsable {
            self.unparsable.insert(filename.to_string());
        } else {
            self.unparsable.remove(filename);
        }
    }

    /// Makes every dispose report an error (after recording it).
    pub fn fail_dispose(&mut self, fail: bool) {
        self.fail_dispose = fail;
    }

    fn unsaved_names(overlay: &OverlaySnapshot<'_>) -> Vec<String> {
        overlay.iter().map(|f| f.filename.to_string()).collect()
    }
}

impl ParserEngine for RecordingEngine {
    type Context = FakeContext;
    type Unit = FakeUnit;

    fn create_context(&mut self, verbosity: u8) -> Result<FakeContext, EngineError> {
        self.log.push(EngineCall::CreateContext { verbosity });
        if self.fail_context {
            return Err(EngineError::ContextCreation {
                reason: "scripted failure".to_string(),
            });
        }
        Ok(FakeContext)
    }

    fn parse(
        &mut self,
        _context: &FakeContext,
        filename: &str,
        args: &CompileArgs,
        overlay: &OverlaySnapshot<'_>,
        options: ParseOptions,
    ) -> Result<FakeUnit, EngineError> {
        self.log.push(EngineCall::Parse {
            filename: filename.to_string(),
            args: args.clone(),
            unsaved: Self::unsaved_names(overlay),
            options,
        });
        if self.fail_parses > 0 || self.unparsable.contains(filename) {
            self.fail_parses = self.fail_parses.saturating_sub(1);
            return Err(EngineError::ParseFailed {
                filename: filename.to_string(),
                reason: "scripted failure".to_string(),
            });
        }
        self.next_id += 1;
        Ok(FakeUnit {
            id: self.next_id,
            filename: filename.to_string(),
            args: args.clone(),
            reparses: 0,
        })
    }

    fn reparse(&mut self, unit: &mut FakeUnit, overlay: &OverlaySnapshot<'_>) -> Result<(), EngineError> {
        self.log.push(EngineCall::Reparse {
            unit: unit.id,
            unsaved: Self::unsaved_names(overlay),
        });
        if self.fail_reparses > 0 {
            self.fail_reparses -= 1;
            return Err(EngineError::ReparseFailed {
                reason: "scripted failure".to_string(),
            });
        }
        unit.reparses += 1;
        Ok(())
    }

    fn dispose(&mut self, unit: FakeUnit) -> Result<(), EngineError> {
        self.log.push(EngineCall::Dispose { unit: unit.id });
        if self.fail_dispose {
            return Err(EngineError::DisposeFailed {
                reason: "scripted failure".to_string(),
            });
        }
        Ok(())
    }

    fn dispose_context(&mut self, _context: FakeContext) -> Result<(), EngineError> {
        self.log.push(EngineCall::DisposeContext);
        Ok(())
    }

    fn global_options(&self, _context: &FakeContext) -> GlobalOptions {
        self.global_options
    }

    fn set_global_options(&mut self, _context: &FakeContext, options: GlobalOptions) {
        self.log.push(EngineCall::SetGlobalOptions(options));
        self.global_options = options;
    }
}

/// Write times set explicitly by the test. Unset files are [`WriteTime::UNKNOWN`].
#[derive(Debug, Default, Clone)]
pub struct FakeWriteTimes {
    times: HashMap<String, WriteTime>,
}

impl FakeWriteTimes {
    /// Creates an empty set of write times.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the write time of `filename` to `secs` seconds after the epoch.
    pub fn set(&mut self, filename: &str, secs: u64) {
        self.times
            .insert(filename.to_string(), WriteTime::from_unix_secs(secs));
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, filename: &str, secs: u64) -> Self {
        self.set(filename, secs);
        self
    }
}

impl WriteTimeSource for FakeWriteTimes {
    fn write_time(&self, filename: &str) -> WriteTime {
        self.times
            .get(filename)
            .copied()
            .unwrap_or(WriteTime::UNKNOWN)
    }
}
