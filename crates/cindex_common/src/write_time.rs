//! On-disk write times used for translation-unit invalidation.

use std::fmt;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// The last-modification time of a file as observed at a point in time.
///
/// Only equality matters for invalidation: a cached unit is stale when the
/// stored time differs from the current one, in either direction. A file
/// whose metadata cannot be read has [`WriteTime::UNKNOWN`], which compares
/// equal to itself so a missing file is not reparsed on every request.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WriteTime(Option<SystemTime>);

impl WriteTime {
    /// The write time of a file that could not be stat'ed.
    pub const UNKNOWN: WriteTime = WriteTime(None);

    /// Wraps a known modification time.
    pub fn from_system_time(time: SystemTime) -> Self {
        Self(Some(time))
    }

    /// Builds a write time from whole seconds since the Unix epoch.
    pub fn from_unix_secs(secs: u64) -> Self {
        Self(Some(UNIX_EPOCH + std::time::Duration::from_secs(secs)))
    }

    /// Reads the modification time of `path` from filesystem metadata.
    pub fn of(path: &Path) -> Self {
        std::fs::metadata(path)
            .and_then(|m| m.modified())
            .map(Self::from_system_time)
            .unwrap_or(Self::UNKNOWN)
    }

    /// Returns `true` if the time could not be determined.
    pub fn is_unknown(self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Debug for WriteTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WriteTime({self})")
    }
}

impl fmt::Display for WriteTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.map(|t| t.duration_since(UNIX_EPOCH)) {
            Some(Ok(d)) => write!(f, "{}.{:09}", d.as_secs(), d.subsec_nanos()),
            Some(Err(_)) => f.write_str("before-epoch"),
            None => f.write_str("unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_equals_itself() {
        assert_eq!(WriteTime::UNKNOWN, WriteTime::default());
        assert!(WriteTime::UNKNOWN.is_unknown());
    }

    #[test]
    fn distinct_times_differ() {
        assert_ne!(WriteTime::from_unix_secs(1), WriteTime::from_unix_secs(2));
        assert_ne!(WriteTime::from_unix_secs(1), WriteTime::UNKNOWN);
    }

    #[test]
    fn missing_file_is_unknown() {
        let t = WriteTime::of(Path::new("/nonexistent/dir/missing.cpp"));
        assert!(t.is_unknown());
    }

    #[test]
    fn existing_file_has_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.cpp");
        std::fs::write(&path, "int main() {}").unwrap();
        let t = WriteTime::of(&path);
        assert!(!t.is_unknown());
        assert_eq!(t, WriteTime::of(&path));
    }

    #[test]
    fn display_formats() {
        assert_eq!(WriteTime::UNKNOWN.to_string(), "unknown");
        assert_eq!(WriteTime::from_unix_secs(5).to_string(), "5.000000000");
    }
}
