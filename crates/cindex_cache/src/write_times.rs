//! On-disk write-time lookup for invalidation.

use std::path::Path;

use cindex_common::WriteTime;

/// Source of the current on-disk write time of a file.
///
/// This is the only filesystem query the cache makes.
pub trait WriteTimeSource {
    /// Returns the current write time of `filename`, or
    /// [`WriteTime::UNKNOWN`] if it cannot be read.
    fn write_time(&self, filename: &str) -> WriteTime;
}

/// Reads write times from filesystem metadata.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskWriteTimes;

impl WriteTimeSource for DiskWriteTimes {
    fn write_time(&self, filename: &str) -> WriteTime {
        WriteTime::of(Path::new(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    #[test]
    fn disk_write_time_follows_modification() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.cpp");
        std::fs::write(&path, "int a;").unwrap();
        let name = path.to_string_lossy().into_owned();

        let before = DiskWriteTimes.write_time(&name);
        assert!(!before.is_unknown());

        let later = SystemTime::now() + Duration::from_secs(60);
        let file = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.set_modified(later).unwrap();

        let after = DiskWriteTimes.write_time(&name);
        assert_ne!(before, after);
    }

    #[test]
    fn missing_file_is_unknown() {
        assert!(DiskWriteTimes.write_time("/nonexistent/x.cpp").is_unknown());
    }
}
