//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::Config;
use super::validation::{sanitize_config, validate_config};

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<Config> {
    let format = if path.extension().is_some_and(|e| e == "toml") {
        "TOML"
    } else {
        "YAML"
    };
    info!(path = %path.display(), format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

    let mut config: Config = if format == "TOML" {
        toml::from_str(&content).map_err(ConfigError::TomlError)?
    } else {
        serde_yaml::from_str(&content).map_err(ConfigError::YamlError)?
    };

    sanitize_config(&mut config);
    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find configuration file in directory or parent directories.
///
/// At each directory level the search checks:
///   1. `<dir>/<name>`          (e.g. `chronicle.toml`)
///   2. `<dir>/.github/<name>`  (e.g. `.github/chronicle.toml`)
///
/// The first match wins. Parents are walked until the filesystem root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.exists() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }

            let github_path = current.join(".github").join(name);
            if github_path.exists() {
                info!(path = %github_path.display(), "found config file in .github/");
                return Some(github_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration or use defaults.
///
/// Never fails: a missing file is expected, and an unreadable or invalid
/// file is reported before falling back to the defaults.
pub fn load_config_or_default(dir: &Path) -> (Config, Option<PathBuf>) {
    let Some(config_path) = find_config(dir) else {
        debug!(dir = %dir.display(), "no config found, using defaults");
        return (Config::default(), None);
    };

    match load_config(&config_path) {
        Ok(config) => (config, Some(config_path)),
        Err(e) => {
            warn!(path = %config_path.display(), error = %e, "ignoring unusable config, using defaults");
            (Config::default(), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("chronicle.toml");
        std::fs::write(&config_path, "[git]\nremote = \"origin\"").unwrap();

        let found = find_config(temp.path());
        assert!(found.is_some());
        assert_eq!(found.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_prefers_yaml_over_toml() {
        let temp = TempDir::new().unwrap();
        let toml_path = temp.path().join("chronicle.toml");
        let yaml_path = temp.path().join("chronicle.yaml");
        std::fs::write(&toml_path, "[git]\nremote = \"origin\"").unwrap();
        std::fs::write(&yaml_path, "git:\n  remote: origin").unwrap();

        let found = find_config(temp.path()).unwrap();
        assert_eq!(found, yaml_path);
    }

    #[test]
    fn test_find_config_in_github_dir() {
        let temp = TempDir::new().unwrap();
        let github_dir = temp.path().join(".github");
        std::fs::create_dir_all(&github_dir).unwrap();
        let config_path = github_dir.join("chronicle.toml");
        std::fs::write(&config_path, "[git]\nremote = \"origin\"").unwrap();

        let found = find_config(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(".chronicle.yaml");
        std::fs::write(&config_path, "git:\n  remote: upstream\n").unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config(&nested), Some(config_path));
    }

    #[test]
    fn test_load_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("chronicle.toml");
        std::fs::write(
            &config_path,
            "[changelog]\ninclude_types = [\"feature\"]\n\n[git]\nmax_concurrent_queries = 2\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.changelog.include_types, vec!["feature".to_string()]);
        assert_eq!(config.git.max_concurrent_queries, 2);
        assert_eq!(config.git.remote, "origin");
    }

    #[test]
    fn test_load_config_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("chronicle.yaml");
        std::fs::write(
            &config_path,
            "changelog:\n  unreleased_label: Next\noutput:\n  markdown: [CHANGELOG.md]\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.changelog.unreleased_label, "Next");
        assert_eq!(config.output.markdown.len(), 1);
    }

    #[test]
    fn test_malformed_config_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("chronicle.yaml"), "changelog: [unclosed").unwrap();

        let (config, path) = load_config_or_default(temp.path());
        assert_eq!(config, Config::default());
        assert!(path.is_none());
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("chronicle.yaml"),
            "git:\n  max_concurrent_queries: 0\n",
        )
        .unwrap();

        let (config, _) = load_config_or_default(temp.path());
        assert_eq!(config.git.max_concurrent_queries, 5);
    }

    #[test]
    fn test_bad_compare_url_keeps_rest_of_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("chronicle.yaml"),
            "changelog:\n  compare_url: https://example.com/compare\n  unreleased_label: Next\noutput:\n  markdown: [CHANGELOG.md]\n",
        )
        .unwrap();

        let (config, path) = load_config_or_default(temp.path());
        assert!(path.is_some());
        assert_eq!(config.changelog.compare_url, None);
        assert_eq!(config.changelog.unreleased_label, "Next");
        assert_eq!(config.output.markdown, vec![PathBuf::from("CHANGELOG.md")]);
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let (config, path) = load_config_or_default(temp.path());
        assert_eq!(config, Config::default());
        assert!(path.is_none());
    }
}
