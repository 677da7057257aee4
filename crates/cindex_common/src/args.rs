//! Ordered compile-argument lists.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The ordered list of compiler flags used to produce a translation unit.
///
/// Equality is order-sensitive: `["-I a", "-I b"]` and `["-I b", "-I a"]` are
/// different argument lists because include search order changes the parse.
/// An empty list means the file is not part of any known build target.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompileArgs(Vec<String>);

impl CompileArgs {
    /// Creates an empty argument list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns `true` if there are no arguments, i.e. the file is not buildable.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Appends a single argument.
    pub fn push(&mut self, arg: impl Into<String>) {
        self.0.push(arg.into());
    }

    /// Returns a copy of these arguments with `extra` appended in order.
    pub fn with_appended<I, S>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = self.clone();
        out.0.extend(extra.into_iter().map(Into::into));
        out
    }

    /// Returns the arguments as string slices, in order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns an iterator over the arguments.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for CompileArgs {
    fn from(args: Vec<String>) -> Self {
        Self(args)
    }
}

impl<'a> From<&'a [&'a str]> for CompileArgs {
    fn from(args: &'a [&'a str]) -> Self {
        Self(args.iter().map(|a| a.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for CompileArgs {
    fn from(args: [&str; N]) -> Self {
        Self(args.iter().map(|a| a.to_string()).collect())
    }
}

impl FromIterator<String> for CompileArgs {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CompileArgs {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Debug for CompileArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.0).finish()
    }
}

impl fmt::Display for CompileArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}
