//! Option sets forwarded to the parsing engine.

bitflags::bitflags! {
    /// The engine's process-wide options register.
    ///
    /// Changing these affects every future parse and reparse but not units
    /// that are already held.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GlobalOptions: u32 {
        /// Run indexing work on a background-priority thread.
        const BACKGROUND_INDEXING = 1 << 0;
        /// Run editing work (reparse, completion) on a background-priority thread.
        const BACKGROUND_EDITING = 1 << 1;
    }
}

bitflags::bitflags! {
    /// Per-parse options describing what the resulting unit will be used for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ParseOptions: u32 {
        /// Keep a detailed record of preprocessor activity (macro expansions).
        const DETAILED_PREPROCESSING_RECORD = 1 << 0;
        /// Tolerate an incomplete translation unit (e.g. a header parsed alone).
        const INCOMPLETE = 1 << 1;
        /// Build a precompiled preamble so later reparses only redo the body.
        const PRECOMPILED_PREAMBLE = 1 << 2;
        /// Cache code-completion results across reparses.
        const CACHE_COMPLETION_RESULTS = 1 << 3;
        /// Skip function bodies; declarations only.
        const SKIP_FUNCTION_BODIES = 1 << 4;
    }
}

impl ParseOptions {
    /// Options for units kept alive while the user edits: cheap reparses and
    /// cached completion data.
    pub const fn editing() -> Self {
        Self::PRECOMPILED_PREAMBLE.union(Self::CACHE_COMPLETION_RESULTS)
    }

    /// Options for one-shot batch compilation, where nothing is reparsed.
    pub const fn batch() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_differs_from_batch() {
        assert_ne!(ParseOptions::editing(), ParseOptions::batch());
        assert!(ParseOptions::editing().contains(ParseOptions::PRECOMPILED_PREAMBLE));
        assert!(ParseOptions::editing().contains(ParseOptions::CACHE_COMPLETION_RESULTS));
        assert!(ParseOptions::batch().is_empty());
    }

    #[test]
    fn global_options_default_empty() {
        let opts = GlobalOptions::default();
        assert!(opts.is_empty());
        let both = GlobalOptions::BACKGROUND_INDEXING | GlobalOptions::BACKGROUND_EDITING;
        assert_eq!(both.bits(), 0b11);
    }
}
