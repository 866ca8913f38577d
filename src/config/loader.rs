//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ShowcaseConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Environment variables that override file settings.
pub const ENV_ADMIN_USERNAME: &str = "SHOWCASE_ADMIN_USERNAME";
pub const ENV_ADMIN_PASSWORD: &str = "SHOWCASE_ADMIN_PASSWORD";
pub const ENV_BIND_ADDRESS: &str = "SHOWCASE_BIND_ADDRESS";
pub const ENV_DATABASE_PATH: &str = "SHOWCASE_DATABASE_PATH";

/// Load, apply environment overrides to, and validate a TOML config file.
pub fn load_config(path: &Path) -> Result<ShowcaseConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ShowcaseConfig = toml::from_str(&content)?;
    finish(config)
}

/// Build a config from defaults plus environment overrides.
pub fn load_from_env() -> Result<ShowcaseConfig, ConfigError> {
    finish(ShowcaseConfig::default())
}

fn finish(mut config: ShowcaseConfig) -> Result<ShowcaseConfig, ConfigError> {
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay environment values onto a parsed config.
pub fn apply_env_overrides<F>(config: &mut ShowcaseConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(username) = lookup(ENV_ADMIN_USERNAME) {
        config.admin.username = username;
    }
    if let Some(password) = lookup(ENV_ADMIN_PASSWORD) {
        config.admin.password = password;
    }
    if let Some(bind) = lookup(ENV_BIND_ADDRESS) {
        config.listener.bind_address = bind;
    }
    if let Some(path) = lookup(ENV_DATABASE_PATH) {
        config.database.path = path;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_parse_partial_file() {
        let toml = r#"
            static_dir = "public"

            [admin]
            username = "owner"
            password = "s3cret"

            [login_rate_limit]
            max_attempts = 3
        "#;
        let config: ShowcaseConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.admin.username, "owner");
        assert_eq!(config.login_rate_limit.max_attempts, 3);
        assert_eq!(config.login_rate_limit.window_secs, 60);
        assert_eq!(config.session.cookie_name, "admin_session");
        assert_eq!(config.static_dir.as_deref(), Some("public"));
    }

    #[test]
    fn test_env_overrides_win() {
        let env: HashMap<&str, &str> = [
            (ENV_ADMIN_PASSWORD, "from-env"),
            (ENV_BIND_ADDRESS, "127.0.0.1:9000"),
        ]
        .into_iter()
        .collect();

        let mut config = ShowcaseConfig::default();
        config.admin.password = "from-file".into();
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.admin.password, "from-env");
        assert_eq!(config.admin.username, "admin");
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
    }

    #[test]
    fn test_load_config_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[admin").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_admin_debug_redacts_password() {
        let mut config = ShowcaseConfig::default();
        config.admin.password = "topsecret".into();
        let rendered = format!("{:?}", config.admin);
        assert!(!rendered.contains("topsecret"));
    }
}
