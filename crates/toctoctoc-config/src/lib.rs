use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

fn default_headline_selector() -> String {
    "h1, h2, h3, h4, h5, h6, h7, h8".to_string()
}

fn default_id_prefix() -> String {
    "headline-".to_string()
}

fn default_list_class() -> String {
    "toc".to_string()
}

/// Defaults for the `toctoctoc` command, read from
/// `~/.config/toctoctoc/config.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default = "default_headline_selector")]
    pub headline_selector: String,
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,
    #[serde(default = "default_list_class")]
    pub list_class: String,
    /// Fail instead of clamping when a heading climbs above the first one.
    #[serde(default)]
    pub strict: bool,
    /// Optional HTML template; `{{toc}}` and `{{content}}` are substituted.
    #[serde(default)]
    pub template_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            headline_selector: default_headline_selector(),
            id_prefix: default_id_prefix(),
            list_class: default_list_class(),
            strict: false,
            template_path: None,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the template path
        config.template_path = config
            .template_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Like [`Config::load`], falling back to defaults when no file exists.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/toctoctoc");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/toctoctoc/config.toml"));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.id_prefix, "headline-");
        assert!(!config.strict);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
headline_selector = "h2, h3"
strict = true
"#,
        )
        .unwrap();

        assert_eq!(config.headline_selector, "h2, h3");
        assert!(config.strict);
        assert_eq!(config.list_class, "toc");
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("TOCTOCTOC_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$TOCTOCTOC_TEST_VAR/page.html");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/page.html")));

        unsafe {
            env::remove_var("TOCTOCTOC_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_relative_path() {
        let path = PathBuf::from("relative/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "strict = \"maybe\"").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_load_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            r#"
list_class = "contents"
id_prefix = "sec-"
template_path = "/tmp/template.html"
"#,
        )
        .unwrap();

        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(
            loaded_config,
            Config {
                list_class: "contents".to_string(),
                id_prefix: "sec-".to_string(),
                template_path: Some(PathBuf::from("/tmp/template.html")),
                ..Config::default()
            }
        );
    }

    #[test]
    fn test_template_path_tilde_is_expanded_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "template_path = \"~/templates/toc.html\"").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        let template = config.template_path.unwrap();

        assert!(!template.to_string_lossy().starts_with('~'));
        assert!(template.to_string_lossy().ends_with("templates/toc.html"));
    }
}
