//! Error types for compilation database loading.

use std::path::PathBuf;

/// Errors that can occur while loading a compilation database.
///
/// Lookups never fail: a file the database does not know simply has no
/// arguments. Only loading the database from disk can go wrong.
#[derive(Debug, thiserror::Error)]
pub enum CompdbError {
    /// The database file could not be read.
    #[error("compilation database I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The database file is not a valid `compile_commands.json`.
    #[error("failed to parse compilation database {path}: {reason}")]
    Parse {
        /// The database file path.
        path: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display() {
        let err = CompdbError::Io {
            path: PathBuf::from("/tmp/build/compile_commands.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("compilation database I/O error"));
        assert!(msg.contains("compile_commands.json"));
    }

    #[test]
    fn parse_error_display() {
        let err = CompdbError::Parse {
            path: PathBuf::from("compile_commands.json"),
            reason: "expected value at line 1 column 1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("failed to parse compilation database"));
        assert!(msg.contains("line 1 column 1"));
    }
}
