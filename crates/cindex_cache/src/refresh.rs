//! The reuse / reparse / rebuild decision as a small state machine.
//!
//! Planning is pure: it only compares the stored key of a cache entry with the
//! current compile arguments and write time. The cache drives the machine and
//! reports engine failures back through the explicit transitions
//! [`RefreshState::after_reparse_failure`] and
//! [`RefreshState::after_parse_failure`].

use std::fmt;

use cindex_common::{CompileArgs, WriteTime};

/// What to do with a cached translation unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshState {
    /// Return the cached unit untouched.
    Reuse,
    /// Refresh the cached unit in place.
    Reparse,
    /// Dispose any cached unit and parse from scratch.
    Rebuild,
    /// Nothing usable could be produced.
    Failed,
}

/// Why a [`RefreshState`] was chosen, for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshReason {
    /// Arguments and write time match the cached entry.
    UpToDate,
    /// The caller asked for a refresh.
    Forced,
    /// The write time on disk differs from the cached one.
    ChangedOnDisk,
    /// The compile arguments differ from the cached ones.
    ArgumentsChanged,
    /// There is no cached entry.
    NotCached,
}

/// The initial state chosen for a request, with the reason behind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshPlan {
    /// The state to start from.
    pub state: RefreshState,
    /// Why this state was chosen.
    pub reason: RefreshReason,
}

impl RefreshState {
    /// Chooses the initial state for a request.
    ///
    /// `stored` is the cached entry's arguments and write time, if any.
    /// Argument comparison is order-sensitive. Reuse requires no forced
    /// refresh, equal arguments and an equal write time; equal arguments
    /// otherwise mean reparse; anything else is a rebuild.
    pub fn plan(
        stored: Option<(&CompileArgs, WriteTime)>,
        args: &CompileArgs,
        write_time: WriteTime,
        force_refresh: bool,
    ) -> RefreshPlan {
        let (state, reason) = match stored {
            None => (RefreshState::Rebuild, RefreshReason::NotCached),
            Some((stored_args, _)) if stored_args != args => {
                (RefreshState::Rebuild, RefreshReason::ArgumentsChanged)
            }
            Some(_) if force_refresh => (RefreshState::Reparse, RefreshReason::Forced),
            Some((_, stored_time)) if stored_time != write_time => {
                (RefreshState::Reparse, RefreshReason::ChangedOnDisk)
            }
            Some(_) => (RefreshState::Reuse, RefreshReason::UpToDate),
        };
        RefreshPlan { state, reason }
    }

    /// A failed reparse means the cached unit may be unusable: rebuild it.
    pub fn after_reparse_failure(self) -> RefreshState {
        match self {
            RefreshState::Reparse => RefreshState::Rebuild,
            other => other,
        }
    }

    /// A failed full parse leaves nothing to return.
    pub fn after_parse_failure(self) -> RefreshState {
        match self {
            RefreshState::Rebuild => RefreshState::Failed,
            other => other,
        }
    }
}

impl fmt::Display for RefreshReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RefreshReason::UpToDate => "already up to date",
            RefreshReason::Forced => "forced reparse",
            RefreshReason::ChangedOnDisk => "file changed on disk, reparsing",
            RefreshReason::ArgumentsChanged => "compile arguments changed, rebuilding",
            RefreshReason::NotCached => "creating new unit",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> CompileArgs {
        CompileArgs::from(list)
    }

    const T1: u64 = 100;
    const T2: u64 = 200;

    fn plan(stored: Option<(&CompileArgs, u64)>, current: &CompileArgs, time: u64, force: bool) -> RefreshPlan {
        RefreshState::plan(
            stored.map(|(a, t)| (a, WriteTime::from_unix_secs(t))),
            current,
            WriteTime::from_unix_secs(time),
            force,
        )
    }

    #[test]
    fn no_entry_rebuilds() {
        let a = args(&["-std=c++11"]);
        let p = plan(None, &a, T1, false);
        assert_eq!(p.state, RefreshState::Rebuild);
        assert_eq!(p.reason, RefreshReason::NotCached);
    }

    #[test]
    fn unchanged_reuses() {
        let a = args(&["-std=c++11"]);
        let p = plan(Some((&a, T1)), &a, T1, false);
        assert_eq!(p.state, RefreshState::Reuse);
        assert_eq!(p.reason, RefreshReason::UpToDate);
    }

    #[test]
    fn timestamp_change_reparses() {
        let a = args(&["-std=c++11"]);
        let p = plan(Some((&a, T1)), &a, T2, false);
        assert_eq!(p.state, RefreshState::Reparse);
        assert_eq!(p.reason, RefreshReason::ChangedOnDisk);
    }

    #[test]
    fn older_timestamp_also_reparses() {
        let a = args(&["-std=c++11"]);
        let p = plan(Some((&a, T2)), &a, T1, false);
        assert_eq!(p.state, RefreshState::Reparse);
    }

    #[test]
    fn force_reparses_even_when_unchanged() {
        let a = args(&["-std=c++11"]);
        let p = plan(Some((&a, T1)), &a, T1, true);
        assert_eq!(p.state, RefreshState::Reparse);
        assert_eq!(p.reason, RefreshReason::Forced);
    }

    #[test]
    fn argument_change_rebuilds_even_with_same_time() {
        let old = args(&["-std=c++11"]);
        let new = args(&["-std=c++17"]);
        let p = plan(Some((&old, T1)), &new, T1, false);
        assert_eq!(p.state, RefreshState::Rebuild);
        assert_eq!(p.reason, RefreshReason::ArgumentsChanged);
    }

    #[test]
    fn argument_change_wins_over_force() {
        let old = args(&["-std=c++11"]);
        let new = args(&["-std=c++17"]);
        assert_eq!(plan(Some((&old, T1)), &new, T1, true).state, RefreshState::Rebuild);
    }

    #[test]
    fn argument_order_matters() {
        let old = args(&["-Ia", "-Ib"]);
        let new = args(&["-Ib", "-Ia"]);
        assert_eq!(plan(Some((&old, T1)), &new, T1, false).state, RefreshState::Rebuild);
    }

    #[test]
    fn unknown_write_time_is_stable() {
        let a = args(&["-c99"]);
        let p = RefreshState::plan(Some((&a, WriteTime::UNKNOWN)), &a, WriteTime::UNKNOWN, false);
        assert_eq!(p.state, RefreshState::Reuse);
    }

    #[test]
    fn failure_transitions() {
        assert_eq!(RefreshState::Reparse.after_reparse_failure(), RefreshState::Rebuild);
        assert_eq!(RefreshState::Rebuild.after_parse_failure(), RefreshState::Failed);
        assert_eq!(RefreshState::Reuse.after_reparse_failure(), RefreshState::Reuse);
        assert_eq!(RefreshState::Reparse.after_parse_failure(), RefreshState::Reparse);
        assert_eq!(RefreshState::Failed.after_reparse_failure(), RefreshState::Failed);
    }

    #[test]
    fn reason_display() {
        assert_eq!(RefreshReason::Forced.to_string(), "forced reparse");
        assert_eq!(RefreshReason::UpToDate.to_string(), "already up to date");
    }
}
