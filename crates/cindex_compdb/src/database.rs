//! The compilation database interface and an in-memory implementation.

use cindex_common::CompileArgs;
use std::collections::HashMap;

/// Source of per-file compile arguments.
///
/// Returns the ordered argument list for `filename`, or an empty list when the
/// file is not part of any known build target. An empty list is a sentinel,
/// not an error.
pub trait CompilationDatabase {
    /// Returns the compile arguments for `filename`.
    fn args_for(&self, filename: &str) -> CompileArgs;
}

impl<T: CompilationDatabase + ?Sized> CompilationDatabase for &T {
    fn args_for(&self, filename: &str) -> CompileArgs {
        (**self).args_for(filename)
    }
}

impl<T: CompilationDatabase + ?Sized> CompilationDatabase for Box<T> {
    fn args_for(&self, filename: &str) -> CompileArgs {
        (**self).args_for(filename)
    }
}

/// An in-memory compilation database with explicitly registered files.
#[derive(Debug, Default, Clone)]
pub struct StaticCompilationDatabase {
    files: HashMap<String, CompileArgs>,
}

impl StaticCompilationDatabase {
    /// Creates an empty database; every lookup returns no arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the arguments for `filename`.
    pub fn set(&mut self, filename: impl Into<String>, args: impl Into<CompileArgs>) {
        self.files.insert(filename.into(), args.into());
    }

    /// Forgets `filename`, making it unbuildable.
    pub fn remove(&mut self, filename: &str) -> Option<CompileArgs> {
        self.files.remove(filename)
    }

    /// Returns the number of registered files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if no file is registered.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<K: Into<String>, A: Into<CompileArgs>> FromIterator<(K, A)> for StaticCompilationDatabase {
    fn from_iter<I: IntoIterator<Item = (K, A)>>(iter: I) -> Self {
        Self {
            files: iter
                .into_iter()
                .map(|(k, a)| (k.into(), a.into()))
                .collect(),
        }
    }
}

impl CompilationDatabase for StaticCompilationDatabase {
    fn args_for(&self, filename: &str) -> CompileArgs {
        self.files.get(filename).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_file_has_no_args() {
        let db = StaticCompilationDatabase::new();
        assert!(db.args_for("a.cpp").is_empty());
    }

    #[test]
    fn set_replace_remove() {
        let mut db = StaticCompilationDatabase::new();
        db.set("a.cpp", ["-std=c++11"]);
        assert_eq!(db.args_for("a.cpp"), CompileArgs::from(["-std=c++11"]));

        db.set("a.cpp", ["-std=c++17"]);
        assert_eq!(db.args_for("a.cpp"), CompileArgs::from(["-std=c++17"]));
        assert_eq!(db.len(), 1);

        assert!(db.remove("a.cpp").is_some());
        assert!(db.args_for("a.cpp").is_empty());
    }

    #[test]
    fn collect_from_pairs() {
        let db: StaticCompilationDatabase =
            [("a.cpp", ["-O2"]), ("b.cpp", ["-O0"])].into_iter().collect();
        assert_eq!(db.len(), 2);
        assert_eq!(db.args_for("b.cpp"), CompileArgs::from(["-O0"]));
    }

    #[test]
    fn works_through_references_and_boxes() {
        let mut db = StaticCompilationDatabase::new();
        db.set("a.cpp", ["-g"]);
        let by_ref: &dyn CompilationDatabase = &db;
        assert_eq!(by_ref.args_for("a.cpp").len(), 1);
        let boxed: Box<dyn CompilationDatabase> = Box::new(db);
        assert_eq!(boxed.args_for("a.cpp").len(), 1);
    }
}
