//! Configuration validation

use tracing::{debug, warn};

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_changelog(config)?;
    validate_git(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    if config.changelog.unreleased_label.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "changelog.unreleased_label".to_string(),
            message: "label cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Clear optional settings that cannot be used, keeping the rest.
///
/// A compare link template that does not reference both tags is dropped
/// with a warning.
pub fn sanitize_config(config: &mut Config) {
    let Some(compare_url) = &config.changelog.compare_url else {
        return;
    };
    if !compare_url.contains("previous_tag") || !compare_url.contains("current_tag") {
        warn!(
            compare_url = %compare_url,
            "changelog.compare_url must reference {{{{ previous_tag }}}} and {{{{ current_tag }}}}, compare links disabled"
        );
        config.changelog.compare_url = None;
    }
}

fn validate_git(config: &Config) -> Result<()> {
    if config.git.remote.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "git.remote".to_string(),
            message: "remote cannot be empty".to_string(),
        }
        .into());
    }

    if config.git.max_concurrent_queries == 0 {
        return Err(ConfigError::InvalidValue {
            field: "git.max_concurrent_queries".to_string(),
            message: "must be at least 1".to_string(),
        }
        .into());
    }

    Ok(())
}
