//! Classification of C-family source files by extension.

use std::path::Path;

/// The family a recognized source file belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// A header (`.h`, `.hh`, `.hpp`).
    Header,
    /// An implementation file (`.c`, `.cc`, `.cpp`, `.m`, `.mm`).
    Implementation,
}

impl SourceKind {
    /// Classifies `path` by its extension, ignoring case.
    ///
    /// Returns `None` for files the index does not handle.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "h" | "hh" | "hpp" => Some(SourceKind::Header),
            "c" | "cc" | "cpp" | "m" | "mm" => Some(SourceKind::Implementation),
            _ => None,
        }
    }
}

/// Returns `true` if `path` is a file the translation-unit cache can handle.
///
/// Callers use this to decide eligibility before consulting the cache at all.
pub fn is_recognized_source_file(path: impl AsRef<Path>) -> bool {
    SourceKind::from_path(path.as_ref()).is_some()
}
