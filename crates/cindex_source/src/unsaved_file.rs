//! A single file's unsaved editor content.

/// One entry of an [`OverlaySnapshot`](crate::OverlaySnapshot): the in-memory
/// content that supersedes the on-disk file of the same name while parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnsavedFile<'a> {
    /// The filename exactly as the parsing engine will see it.
    pub filename: &'a str,
    /// The full text currently held by the editor.
    pub contents: &'a str,
}

impl<'a> UnsavedFile<'a> {
    /// Creates a new unsaved-file view.
    pub fn new(filename: &'a str, contents: &'a str) -> Self {
        Self { filename, contents }
    }
}
