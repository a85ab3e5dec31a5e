//! Default configuration values

use super::types::Config;

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "chronicle.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "chronicle.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".chronicle.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".chronicle.toml",
    ]
}

/// Generate default configuration YAML
pub fn default_config_yaml() -> String {
    let config = Config::default();
    serde_yaml::to_string(&config).unwrap_or_else(|_| DEFAULT_CONFIG_TEMPLATE.to_string())
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Chronicle Configuration

changelog:
  # Commit types listed in the changelog. Breaking changes are always listed.
  include_types:
    - feature
    - bugfix
    - perf
    - docs
    - style
  type_map:
    feature: Features
    bugfix: Bug Fixes
    perf: Performance Improvements
    docs: Documentation
    style: Styles
    refactor: Code Refactoring
    test: Tests
    build: Builds
    ci: Continuous Integration
    format: Code Formatting
    merge: Merges
    version: Versioning
  # repo_url: https://github.com/owner/repo
  # compare_url: "{{ repo_url }}/compare/{{ previous_tag }}...{{ current_tag }}"
  # issue_url: https://issues.example.com/browse/
  unreleased_label: Unreleased

git:
  remote: origin
  max_concurrent_queries: 5

output:
  markdown:
    - CHANGELOG.md
  html: []
  wiki: []
"#;
