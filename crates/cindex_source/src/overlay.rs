//! Process-wide table of unsaved editor content.

use crate::snapshot::OverlaySnapshot;
use crate::unsaved_file::UnsavedFile;
use std::collections::BTreeMap;

/// Mapping of filename to in-memory content for files with unsaved edits.
///
/// The overlay has no invalidation logic of its own: the editing surface keeps
/// it current and every parse or reparse reads a [`snapshot`](Self::snapshot)
/// of it. Whether an edit makes a cached parse stale is the parsing engine's
/// concern.
#[derive(Debug, Default, Clone)]
pub struct UnsavedOverlay {
    files: BTreeMap<String, String>,
}

impl UnsavedOverlay {
    /// Creates an empty overlay.
    pub fn new() -> Self {
        Self {
            files: BTreeMap::new(),
        }
    }

    /// Returns the unsaved content for `filename`, if the editor holds any.
    pub fn content_for(&self, filename: &str) -> Option<&str> {
        self.files.get(filename).map(String::as_str)
    }

    /// Returns `true` if `filename` has unsaved edits.
    pub fn contains(&self, filename: &str) -> bool {
        self.files.contains_key(filename)
    }

    /// Records the editor's current content for `filename`, replacing any
    /// previous content. Returns `true` if the stored content changed.
    pub fn update(&mut self, filename: impl Into<String>, contents: impl Into<String>) -> bool {
        let contents = contents.into();
        match self.files.insert(filename.into(), contents.clone()) {
            Some(previous) => previous != contents,
            None => true,
        }
    }

    /// Drops the unsaved content for `filename` (e.g. after the buffer is saved
    /// or closed). Returns `true` if there was an entry.
    pub fn remove(&mut self, filename: &str) -> bool {
        self.files.remove(filename).is_some()
    }

    /// Drops every unsaved file.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Returns the number of files with unsaved edits.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if no file has unsaved edits.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Takes an ordered view of every unsaved file for one parse or reparse.
    pub fn snapshot(&self) -> OverlaySnapshot<'_> {
        let files = self
            .files
            .iter()
            .map(|(name, contents)| UnsavedFile::new(name, contents))
            .collect();
        OverlaySnapshot::from_files(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overlay() {
        let overlay = UnsavedOverlay::new();
        assert!(overlay.is_empty());
        assert!(overlay.content_for("a.cpp").is_none());
        assert!(overlay.snapshot().is_empty());
    }

    #[test]
    fn update_and_lookup() {
        let mut overlay = UnsavedOverlay::new();
        assert!(overlay.update("a.cpp", "int x;"));
        assert_eq!(overlay.content_for("a.cpp"), Some("int x;"));
        assert!(overlay.contains("a.cpp"));
    }

    #[test]
    fn update_reports_whether_content_changed() {
        let mut overlay = UnsavedOverlay::new();
        assert!(overlay.update("a.cpp", "int x;"));
        assert!(!overlay.update("a.cpp", "int x;"));
        assert!(overlay.update("a.cpp", "int y;"));
        assert_eq!(overlay.len(), 1);
    }

    #[test]
    fn remove_and_clear() {
        let mut overlay = UnsavedOverlay::new();
        overlay.update("a.cpp", "a");
        overlay.update("b.cpp", "b");
        assert!(overlay.remove("a.cpp"));
        assert!(!overlay.remove("a.cpp"));
        assert_eq!(overlay.len(), 1);
        overlay.clear();
        assert!(overlay.is_empty());
    }

    #[test]
    fn snapshot_is_sorted_by_filename() {
        let mut overlay = UnsavedOverlay::new();
        overlay.update("z.h", "z");
        overlay.update("a.cpp", "a");
        overlay.update("m.hpp", "m");

        let snap = overlay.snapshot();
        let names: Vec<&str> = snap.iter().map(|f| f.filename).collect();
        assert_eq!(names, vec!["a.cpp", "m.hpp", "z.h"]);
        assert_eq!(snap.get("m.hpp"), Some("m"));
        assert_eq!(snap.get("missing.cpp"), None);
    }
}
