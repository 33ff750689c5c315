//! Configuration file loading and parsing.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::types::RundataConfig;

/// Default configuration file name, looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = ".rundata.yaml";

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").expect("env var pattern is valid")
    })
}

/// Configuration loader.
pub struct ConfigLoader {
    config_path: PathBuf,
    required: bool,
}

impl ConfigLoader {
    /// Create a loader for `.rundata.yaml` in the given project directory.
    ///
    /// A missing file yields the defaults.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            config_path: project_dir.as_ref().join(CONFIG_FILE_NAME),
            required: false,
        }
    }

    /// Create a loader for an explicit config file, which must exist.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            required: true,
        }
    }

    /// Path this loader reads from.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load and validate the configuration.
    pub fn load(&self) -> Result<RundataConfig, ConfigError> {
        if !self.config_path.exists() {
            if self.required {
                return Err(ConfigError::NotFound {
                    path: self.config_path.clone(),
                });
            }
            return Ok(RundataConfig::default());
        }

        let contents = std::fs::read_to_string(&self.config_path)?;
        parse_config(&contents)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Parse and validate configuration from YAML text.
pub fn parse_config(contents: &str) -> Result<RundataConfig, ConfigError> {
    let expanded = expand_env_vars(contents)?;

    // An empty or comment-only file has no YAML document at all.
    let has_content = expanded
        .lines()
        .map(str::trim)
        .any(|line| !line.is_empty() && !line.starts_with('#'));
    if !has_content {
        return Ok(RundataConfig::default());
    }

    let config: RundataConfig =
        serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })?;

    validate(&config)?;
    Ok(config)
}

/// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
pub fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
    let mut result = String::with_capacity(content.len());
    let mut last = 0;

    for cap in env_var_pattern().captures_iter(content) {
        let Some(full) = cap.get(0) else { continue };
        let var_name = &cap[1];

        let value = match std::env::var(var_name) {
            Ok(v) => v,
            Err(_) => match cap.get(2) {
                Some(default) => default.as_str().to_string(),
                None => {
                    return Err(ConfigError::EnvVarNotFound {
                        var: var_name.to_string(),
                    })
                }
            },
        };

        result.push_str(&content[last..full.start()]);
        result.push_str(&value);
        last = full.end();
    }

    result.push_str(&content[last..]);
    Ok(result)
}

/// Validate configuration values.
fn validate(config: &RundataConfig) -> Result<(), ConfigError> {
    let layout = &config.layout;

    if layout.document.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            message: "layout.document must not be empty".to_string(),
        });
    }

    if layout.declarations.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            message: "layout.declarations must not be empty".to_string(),
        });
    }

    if layout.document == layout.declarations {
        return Err(ConfigError::ValidationError {
            message: "layout.document and layout.declarations must differ".to_string(),
        });
    }

    if layout.source_extension.is_empty() || layout.source_extension.starts_with('.') {
        return Err(ConfigError::ValidationError {
            message: "layout.source_extension must be non-empty and have no leading dot"
                .to_string(),
        });
    }

    if config.render.runtime_import.contains('"') {
        return Err(ConfigError::ValidationError {
            message: "render.runtime_import must not contain quotes".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ConfigLoader::new(temp.path()).load().unwrap();
        assert_eq!(config, RundataConfig::default());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let loader = ConfigLoader::from_file(temp.path().join("custom.yaml"));
        assert!(matches!(loader.load(), Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_load_from_project_dir() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "layout:\n  document: SPEC.md\n",
        )
        .unwrap();

        let config = ConfigLoader::new(temp.path()).load().unwrap();
        assert_eq!(config.layout.document, "SPEC.md");
        assert_eq!(config.layout.declarations, "rundata_test.go");
    }

    #[test]
    fn test_expand_env_default() {
        let expanded = expand_env_vars("a: ${RUNDATA_SURELY_UNSET_VAR:-fallback}").unwrap();
        assert_eq!(expanded, "a: fallback");
    }

    #[test]
    fn test_expand_env_missing_without_default() {
        let err = expand_env_vars("a: ${RUNDATA_SURELY_UNSET_VAR}").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarNotFound { var } if var == "RUNDATA_SURELY_UNSET_VAR"));
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(parse_config("# nothing here\n").unwrap(), RundataConfig::default());
    }

    #[test]
    fn test_validation_rejects_same_names() {
        let yaml = "layout:\n  document: a.go\n  declarations: a.go\n";
        assert!(matches!(
            parse_config(yaml),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_dotted_extension() {
        let yaml = "layout:\n  source_extension: .go\n";
        assert!(matches!(
            parse_config(yaml),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_invalid_yaml_reports_line() {
        let err = parse_config("layout:\n  document: [unterminated\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
