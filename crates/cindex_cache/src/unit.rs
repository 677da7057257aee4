//! Borrowed views of cached translation units handed to callers.

use cindex_source::UnsavedOverlay;

/// A non-owning view of one cached translation unit.
///
/// Binds the engine unit to the overlay it was parsed against. The view
/// borrows the cache, so it cannot be kept across a call that may replace or
/// dispose the unit.
#[derive(Debug)]
pub struct TranslationUnit<'a, U> {
    filename: &'a str,
    unit: &'a U,
    overlay: &'a UnsavedOverlay,
}

impl<'a, U> TranslationUnit<'a, U> {
    pub(crate) fn new(filename: &'a str, unit: &'a U, overlay: &'a UnsavedOverlay) -> Self {
        Self {
            filename,
            unit,
            overlay,
        }
    }

    /// The file this unit was parsed from.
    pub fn filename(&self) -> &'a str {
        self.filename
    }

    /// The engine unit, for downstream queries.
    pub fn unit(&self) -> &'a U {
        self.unit
    }

    /// The unsaved-edits overlay queries should read alongside the unit.
    pub fn overlay(&self) -> &'a UnsavedOverlay {
        self.overlay
    }

    /// The editor's unsaved content for this file, if any.
    pub fn unsaved_content(&self) -> Option<&'a str> {
        self.overlay.content_for(self.filename)
    }
}

impl<U> Clone for TranslationUnit<'_, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for TranslationUnit<'_, U> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_overlay_content_for_its_file() {
        let mut overlay = UnsavedOverlay::new();
        overlay.update("a.cpp", "int edited;");
        overlay.update("b.cpp", "int other;");
        let unit = 7u32;

        let tu = TranslationUnit::new("a.cpp", &unit, &overlay);
        assert_eq!(tu.filename(), "a.cpp");
        assert_eq!(*tu.unit(), 7);
        assert_eq!(tu.unsaved_content(), Some("int edited;"));
        assert_eq!(tu.overlay().len(), 2);
    }

    #[test]
    fn no_unsaved_content() {
        let overlay = UnsavedOverlay::new();
        let unit = ();
        let tu = TranslationUnit::new("c.cpp", &unit, &overlay);
        assert!(tu.unsaved_content().is_none());
    }
}
