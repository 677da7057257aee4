//! The layered compilation database described by a `cindex.toml`.

use std::path::Path;

use cindex_common::CompileArgs;
use cindex_config::CompilationSettings;

use crate::compile_commands::CompileCommandsDatabase;
use crate::database::{CompilationDatabase, StaticCompilationDatabase};
use crate::error::CompdbError;

/// Explicit per-file arguments layered over an optional
/// `compile_commands.json`, with extra flags appended to every known file.
///
/// Lookup order: explicit entries, then the loaded database. Files neither
/// layer knows stay unbuildable; extra flags are never appended to an empty
/// list.
#[derive(Debug, Default, Clone)]
pub struct ProjectDatabase {
    explicit: StaticCompilationDatabase,
    commands: Option<CompileCommandsDatabase>,
    extra_args: Vec<String>,
}

impl ProjectDatabase {
    /// Builds the database from the `[compilation]` section of a config.
    ///
    /// A relative `database` path and relative `[compilation.files]` keys are
    /// resolved against `base_dir`, normally the directory holding
    /// `cindex.toml`, so both layers are keyed by the same absolute paths.
    pub fn from_config(settings: &CompilationSettings, base_dir: &Path) -> Result<Self, CompdbError> {
        let commands = match &settings.database {
            Some(db_path) => Some(CompileCommandsDatabase::load(&base_dir.join(db_path))?),
            None => None,
        };
        let explicit = settings
            .files
            .iter()
            .map(|(file, args)| {
                let key = base_dir.join(file).to_string_lossy().into_owned();
                (key, args.clone())
            })
            .collect();
        Ok(Self {
            explicit,
            commands,
            extra_args: settings.extra_args.clone(),
        })
    }

    /// Creates a database from its layers directly.
    pub fn new(
        explicit: StaticCompilationDatabase,
        commands: Option<CompileCommandsDatabase>,
        extra_args: Vec<String>,
    ) -> Self {
        Self {
            explicit,
            commands,
            extra_args,
        }
    }
}

impl CompilationDatabase for ProjectDatabase {
    fn args_for(&self, filename: &str) -> CompileArgs {
        let mut args = self.explicit.args_for(filename);
        if args.is_empty() {
            if let Some(commands) = &self.commands {
                args = commands.args_for(filename);
            }
        }
        if args.is_empty() {
            return args;
        }
        args.with_appended(self.extra_args.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile_commands::COMPILE_COMMANDS_FILE;
    use cindex_config::load_config_from_str;

    #[test]
    fn explicit_entries_take_precedence() {
        let commands = CompileCommandsDatabase::from_json(
            r#"[{"directory": "/p", "file": "a.cpp", "arguments": ["cc", "-O2"]}]"#,
        )
        .unwrap();
        let explicit: StaticCompilationDatabase = [("/p/a.cpp", ["-O0"])].into_iter().collect();
        let db = ProjectDatabase::new(explicit, Some(commands), vec![]);
        assert_eq!(db.args_for("/p/a.cpp"), CompileArgs::from(["-O0"]));
    }

    #[test]
    fn extra_args_only_for_known_files() {
        let explicit: StaticCompilationDatabase = [("a.cpp", ["-std=c++11"])].into_iter().collect();
        let db = ProjectDatabase::new(explicit, None, vec!["-Wall".to_string()]);
        assert_eq!(db.args_for("a.cpp"), CompileArgs::from(["-std=c++11", "-Wall"]));
        assert!(db.args_for("unknown.cpp").is_empty());
    }

    #[test]
    fn from_config_loads_relative_database() {
        let dir = tempfile::tempdir().unwrap();
        let build = dir.path().join("build");
        std::fs::create_dir_all(&build).unwrap();
        std::fs::write(
            build.join(COMPILE_COMMANDS_FILE),
            r#"[{"directory": "/p", "file": "b.cpp", "arguments": ["c++", "-std=c++17", "b.cpp"]}]"#,
        )
        .unwrap();

        let config = load_config_from_str(
            r#"
[compilation]
database = "build/compile_commands.json"
extra_args = "-Wall"

[compilation.files]
"a.cpp" = ["-std=c++11"]
"#,
        )
        .unwrap();

        let db = ProjectDatabase::from_config(&config.compilation, dir.path()).unwrap();
        let a = dir.path().join("a.cpp").to_string_lossy().into_owned();
        assert_eq!(db.args_for(&a), CompileArgs::from(["-std=c++11", "-Wall"]));
        assert_eq!(db.args_for("/p/b.cpp"), CompileArgs::from(["-std=c++17", "-Wall"]));
    }

    #[test]
    fn from_config_missing_database_errors() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from_str("[compilation]\ndatabase = \"nope.json\"").unwrap();
        let err = ProjectDatabase::from_config(&config.compilation, dir.path()).unwrap_err();
        assert!(matches!(err, CompdbError::Io { .. }));
    }

    #[test]
    fn relative_file_keys_share_paths_with_compile_commands() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("build")).unwrap();
        let commands = format!(
            r#"[{{"directory": {:?}, "file": "src/b.cpp", "arguments": ["c++", "-O2", "src/b.cpp"]}}]"#,
            root.to_string_lossy()
        );
        std::fs::write(root.join("build").join(COMPILE_COMMANDS_FILE), commands).unwrap();

        let config = load_config_from_str(
            r#"
[compilation]
database = "build/compile_commands.json"

[compilation.files]
"src/a.cpp" = ["-std=c++11"]
"#,
        )
        .unwrap();
        let db = ProjectDatabase::from_config(&config.compilation, root).unwrap();

        let abs = |name: &str| root.join(name).to_string_lossy().into_owned();
        assert_eq!(db.args_for(&abs("src/a.cpp")), CompileArgs::from(["-std=c++11"]));
        assert_eq!(db.args_for(&abs("src/b.cpp")), CompileArgs::from(["-O2"]));
        assert!(db.args_for("src/a.cpp").is_empty());
    }

    #[test]
    fn absolute_file_keys_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let abs = dir.path().join("x.c").to_string_lossy().into_owned();
        let config = load_config_from_str(&format!("[compilation.files]\n'{abs}' = [\"-O1\"]\n")).unwrap();
        let db = ProjectDatabase::from_config(&config.compilation, Path::new("/elsewhere")).unwrap();
        assert_eq!(db.args_for(&abs), CompileArgs::from(["-O1"]));
    }
}
