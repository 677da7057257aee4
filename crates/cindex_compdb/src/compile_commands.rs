//! Loader for clang-style `compile_commands.json` databases.
//!
//! Each entry names a source `file`, the working `directory` the compiler ran
//! in, and either an `arguments` array or a single shell `command` string. The
//! loader keeps only the flags that affect how the file is parsed: the
//! compiler executable, `-c`, the `-o` output, and the source file itself are
//! removed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use cindex_common::CompileArgs;
use serde::{Deserialize, Serialize};

use crate::database::CompilationDatabase;
use crate::error::CompdbError;

/// Conventional name of the database file in a build directory.
pub const COMPILE_COMMANDS_FILE: &str = "compile_commands.json";

/// A single entry of a `compile_commands.json` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileCommand {
    /// The working directory of the compilation.
    pub directory: String,

    /// The main source file, absolute or relative to `directory`.
    pub file: String,

    /// The compile command as an argument vector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<String>>,

    /// The compile command as a single shell string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// The output file name, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl CompileCommand {
    /// Returns the absolute path of the source file.
    pub fn resolved_file(&self) -> PathBuf {
        let file = Path::new(&self.file);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            Path::new(&self.directory).join(file)
        }
    }

    /// Returns the raw command line as an argument vector.
    ///
    /// `arguments` wins when both forms are present.
    fn raw_arguments(&self) -> Vec<String> {
        if let Some(args) = &self.arguments {
            return args.clone();
        }
        self.command.as_deref().map(split_command).unwrap_or_default()
    }

    /// Returns the flags that determine how the file is parsed.
    pub fn parse_args(&self) -> CompileArgs {
        let resolved = self.resolved_file();
        let resolved = resolved.to_string_lossy();
        let raw = self.raw_arguments();

        let mut out = CompileArgs::new();
        // The first argument is the compiler executable.
        let mut iter = raw.into_iter().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-c" => {}
                "-o" => {
                    iter.next();
                }
                a if self.is_joined_output(a) => {}
                a if a == self.file || a == resolved => {}
                _ => out.push(arg),
            }
        }
        out
    }

    /// Returns `true` for the joined `-o<file>` output form.
    ///
    /// When the entry records its `output`, only that exact file matches.
    /// Otherwise any `-o` prefix counts except the `-obj*` driver flags such as
    /// `-objcmt-migrate-literals`.
    fn is_joined_output(&self, arg: &str) -> bool {
        let Some(rest) = arg.strip_prefix("-o") else {
            return false;
        };
        if rest.is_empty() {
            return false;
        }
        match &self.output {
            Some(output) => rest == output.as_str(),
            None => !rest.starts_with("bj"),
        }
    }
}

/// Splits a shell command line on whitespace, honoring double and single
/// quotes and backslash escapes.
fn split_command(command: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;
    let mut chars = command.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') | (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_arg = true;
            }
            (Some(_), c) => current.push(c),
            (None, '"') | (None, '\'') => {
                quote = Some(c);
                in_arg = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_arg = true;
            }
        }
    }
    if in_arg {
        args.push(current);
    }
    args
}

/// A compilation database loaded from `compile_commands.json`.
///
/// Lookups are keyed by the resolved (absolute) source path. When a file
/// appears more than once, the first entry wins.
#[derive(Debug, Default, Clone)]
pub struct CompileCommandsDatabase {
    files: HashMap<String, CompileArgs>,
}

impl CompileCommandsDatabase {
    /// Loads the database from a `compile_commands.json` file.
    pub fn load(path: &Path) -> Result<Self, CompdbError> {
        let content = std::fs::read_to_string(path).map_err(|e| CompdbError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let db = Self::from_json(&content).map_err(|reason| CompdbError::Parse {
            path: path.to_path_buf(),
            reason,
        })?;
        tracing::debug!(
            path = %path.display(),
            files = db.len(),
            "loaded compilation database"
        );
        Ok(db)
    }

    /// Loads `compile_commands.json` from a build directory.
    pub fn load_from_dir(build_dir: &Path) -> Result<Self, CompdbError> {
        Self::load(&build_dir.join(COMPILE_COMMANDS_FILE))
    }

    /// Parses the database from JSON text.
    pub fn from_json(content: &str) -> Result<Self, String> {
        let commands: Vec<CompileCommand> =
            serde_json::from_str(content).map_err(|e| e.to_string())?;
        Ok(Self::from_commands(commands))
    }

    /// Builds the database from already-parsed entries.
    pub fn from_commands(commands: impl IntoIterator<Item = CompileCommand>) -> Self {
        let mut files = HashMap::new();
        for cmd in commands {
            let key = cmd.resolved_file().to_string_lossy().into_owned();
            let args = cmd.parse_args();
            files.entry(key).or_insert(args);
        }
        Self { files }
    }

    /// Returns the number of distinct source files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if the database has no entries.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns `true` if `filename` has an entry.
    pub fn contains(&self, filename: &str) -> bool {
        self.files.contains_key(filename)
    }
}

impl CompilationDatabase for CompileCommandsDatabase {
    fn args_for(&self, filename: &str) -> CompileArgs {
        self.files.get(filename).cloned().unwrap_or_default()
    }
}
