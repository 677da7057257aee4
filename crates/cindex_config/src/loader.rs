//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{IndexConfig, IndexSettings};
use std::path::Path;

/// Name of the configuration file inside a project directory.
pub const CONFIG_FILE: &str = "cindex.toml";

/// Loads and validates a `cindex.toml` configuration from a project directory.
///
/// Reads `<project_dir>/cindex.toml`, parses it, and validates its values.
pub fn load_config(project_dir: &Path) -> Result<IndexConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `cindex.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<IndexConfig, ConfigError> {
    let config: IndexConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configuration values are in range and consistent.
fn validate_config(config: &IndexConfig) -> Result<(), ConfigError> {
    if config.index.verbosity > IndexSettings::MAX_VERBOSITY {
        return Err(ConfigError::ValidationError(format!(
            "index.verbosity must be between 0 and {}, got {}",
            IndexSettings::MAX_VERBOSITY,
            config.index.verbosity
        )));
    }
    if let Some(db) = &config.compilation.database {
        if db.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "compilation.database must not be empty".to_string(),
            ));
        }
    }
    if config.compilation.files.keys().any(|f| f.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "compilation.files contains an empty filename".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TeardownPolicy;
    use cindex_common::CompileArgs;

    #[test]
    fn parse_empty_config() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.index.verbosity, 0);
        assert_eq!(config.index.teardown, TeardownPolicy::Leak);
        assert!(config.compilation.database.is_none());
        assert!(config.compilation.files.is_empty());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[index]
verbosity = 2
teardown = "dispose"
background_indexing = true

[compilation]
database = "build/compile_commands.json"
extra_args = ["-Wall"]

[compilation.files]
"src/a.cpp" = ["-std=c++11"]
"src/b.cpp" = ["-std=c++17", "-DNDEBUG"]
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.index.verbosity, 2);
        assert_eq!(config.index.teardown, TeardownPolicy::Dispose);
        assert!(config.index.background_indexing);
        assert!(!config.index.background_editing);
        assert_eq!(
            config.compilation.database.as_deref(),
            Some("build/compile_commands.json")
        );
        assert_eq!(config.compilation.extra_args, vec!["-Wall"]);
        assert_eq!(config.compilation.files.len(), 2);
        assert_eq!(
            config.compilation.files["src/b.cpp"],
            CompileArgs::from(["-std=c++17", "-DNDEBUG"])
        );
    }

    #[test]
    fn verbosity_out_of_range_errors() {
        let err = load_config_from_str("[index]\nverbosity = 3").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn empty_database_path_errors() {
        let err = load_config_from_str("[compilation]\ndatabase = \"  \"").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn empty_filename_errors() {
        let toml = r#"
[compilation.files]
"" = ["-std=c++11"]
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let toml = "this is not valid toml {{{}}}";
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[index]\nverbosity = 1\n").unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.index.verbosity, 1);
    }

    #[test]
    fn io_error_from_nonexistent_dir() {
        let err = load_config(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
