//! A cached translation unit and the key it was produced under.

use cindex_common::{CompileArgs, WriteTime};

/// One registry entry: the engine unit plus the compile arguments and write
/// time it was last validated against.
///
/// The entry is the unit's only owner. The cache hands the unit back to the
/// engine when the entry is replaced or removed.
#[derive(Debug)]
pub struct StoredUnit<U> {
    compile_args: CompileArgs,
    last_write_time: WriteTime,
    unit: U,
}

impl<U> StoredUnit<U> {
    /// Creates an entry for a freshly parsed unit.
    pub fn new(compile_args: CompileArgs, last_write_time: WriteTime, unit: U) -> Self {
        Self {
            compile_args,
            last_write_time,
            unit,
        }
    }

    /// The database arguments the unit was parsed with.
    pub fn compile_args(&self) -> &CompileArgs {
        &self.compile_args
    }

    /// The write time observed when the unit was last validated.
    pub fn last_write_time(&self) -> WriteTime {
        self.last_write_time
    }

    /// The staleness key compared by [`RefreshState::plan`](crate::RefreshState::plan).
    pub fn key(&self) -> (&CompileArgs, WriteTime) {
        (&self.compile_args, self.last_write_time)
    }

    /// The engine unit.
    pub fn unit(&self) -> &U {
        &self.unit
    }

    pub(crate) fn unit_mut(&mut self) -> &mut U {
        &mut self.unit
    }

    pub(crate) fn mark_validated(&mut self, write_time: WriteTime) {
        self.last_write_time = write_time;
    }

    pub(crate) fn into_unit(self) -> U {
        self.unit
    }
}
