//! Point-in-time view of the overlay handed to a single parse or reparse.

use crate::unsaved_file::UnsavedFile;

/// An ordered, borrowed view of every unsaved file.
///
/// The snapshot borrows the [`UnsavedOverlay`](crate::UnsavedOverlay) it was
/// taken from, so the overlay cannot be mutated while a parse is using it.
/// Entries are sorted by filename.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlaySnapshot<'a> {
    files: Vec<UnsavedFile<'a>>,
}

impl<'a> OverlaySnapshot<'a> {
    pub(crate) fn from_files(files: Vec<UnsavedFile<'a>>) -> Self {
        Self { files }
    }

    /// Returns the unsaved files in filename order.
    pub fn files(&self) -> &[UnsavedFile<'a>] {
        &self.files
    }

    /// Looks up the unsaved content for `filename`.
    pub fn get(&self, filename: &str) -> Option<&'a str> {
        self.files
            .binary_search_by(|f| f.filename.cmp(filename))
            .ok()
            .map(|idx| self.files[idx].contents)
    }

    /// Returns the number of unsaved files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if no file has unsaved edits.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns an iterator over the unsaved files.
    pub fn iter(&self) -> std::slice::Iter<'_, UnsavedFile<'a>> {
        self.files.iter()
    }
}

impl<'s, 'a> IntoIterator for &'s OverlaySnapshot<'a> {
    type Item = &'s UnsavedFile<'a>;
    type IntoIter = std::slice::Iter<'s, UnsavedFile<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
