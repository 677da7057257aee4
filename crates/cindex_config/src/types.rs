//! Configuration types deserialized from `cindex.toml`.

use cindex_common::{CompileArgs, GlobalOptions};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// The top-level configuration parsed from `cindex.toml`.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct IndexConfig {
    /// Settings for the translation-unit cache and the parsing engine.
    #[serde(default)]
    pub index: IndexSettings,
    /// Where compile arguments come from.
    #[serde(default)]
    pub compilation: CompilationSettings,
}

/// Settings for the translation-unit cache and the parsing engine.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct IndexSettings {
    /// Diagnostic verbosity: 0 is silent, 1 enables engine diagnostics and
    /// per-request logging, 2 also asks the engine for verbose (`-v`) output.
    #[serde(default)]
    pub verbosity: u8,
    /// What to do with cached units when the index is torn down.
    #[serde(default)]
    pub teardown: TeardownPolicy,
    /// Run engine indexing work at background priority.
    #[serde(default)]
    pub background_indexing: bool,
    /// Run engine editing work at background priority.
    #[serde(default)]
    pub background_editing: bool,
}

impl IndexSettings {
    /// The highest accepted verbosity level.
    pub const MAX_VERBOSITY: u8 = 2;

    /// Maps the background-priority flags onto the engine's options register.
    pub fn global_options(&self) -> GlobalOptions {
        let mut opts = GlobalOptions::empty();
        if self.background_indexing {
            opts |= GlobalOptions::BACKGROUND_INDEXING;
        }
        if self.background_editing {
            opts |= GlobalOptions::BACKGROUND_EDITING;
        }
        opts
    }
}

/// Policy for releasing cached units when the index goes away.
///
/// Some native engines crash when resources are disposed during process
/// shutdown, so the default is to leak them and let the OS reclaim memory.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TeardownPolicy {
    /// Forget cached units and the engine context without disposing them (default).
    #[default]
    Leak,
    /// Dispose every cached unit and then the engine context.
    Dispose,
}

/// Sources of per-file compile arguments.
#[derive(Debug, Default, Deserialize)]
pub struct CompilationSettings {
    /// Path to a `compile_commands.json`, relative to the config directory.
    pub database: Option<String>,
    /// Arguments appended to every known file's argument list.
    ///
    /// Accepts either a single string or a list of strings.
    #[serde(default, deserialize_with = "deserialize_string_or_vec")]
    pub extra_args: Vec<String>,
    /// Explicit argument lists keyed by filename. These take precedence over
    /// the database.
    #[serde(default)]
    pub files: BTreeMap<String, CompileArgs>,
}

/// Deserializes a field that can be either a single string or a list of strings.
///
/// Allows TOML config to accept both `extra_args = "-Wall"` (string) and
/// `extra_args = ["-Wall", "-Wextra"]` (array of strings).
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}
