//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::recording::Duration;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    *field_mut(&mut config, key)? = Some(value.trim().to_string());

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value.trim()));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    presenter.output(field(&config, key).unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, field(&config, key).unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

fn field<'a>(config: &'a AppConfig, key: &str) -> Option<&'a str> {
    match key {
        "endpoint" => config.endpoint.as_deref(),
        "timeout" => config.timeout.as_deref(),
        "record_duration" => config.record_duration.as_deref(),
        _ => None,
    }
}

fn field_mut<'a>(config: &'a mut AppConfig, key: &str) -> Result<&'a mut Option<String>, ConfigError> {
    match key {
        "endpoint" => Ok(&mut config.endpoint),
        "timeout" => Ok(&mut config.timeout),
        "record_duration" => Ok(&mut config.record_duration),
        _ => Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: "Unknown key".to_string(),
        }),
    }
}

/// Validate a config value based on key type
pub(crate) fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let value = value.trim();
    match key {
        "endpoint" => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: format!("'{}' must start with http:// or https://", value),
                });
            }
        }
        "timeout" | "record_duration" => {
            value
                .parse::<Duration>()
                .map_err(|e| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;

    #[test]
    fn validate_endpoint() {
        assert!(validate_config_value("endpoint", "http://127.0.0.1:5000").is_ok());
        assert!(validate_config_value("endpoint", "https://emotion.example.com").is_ok());
        assert!(validate_config_value("endpoint", "localhost:5000").is_err());
    }

    #[test]
    fn validate_durations() {
        assert!(validate_config_value("timeout", "30s").is_ok());
        assert!(validate_config_value("record_duration", "2m30s").is_ok());
        assert!(validate_config_value("timeout", "soon").is_err());
        assert!(validate_config_value("record_duration", "0s").is_err());
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(matches!(
            check_key("api_key"),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn field_lookup_matches_keys() {
        let config = AppConfig::defaults();
        for key in VALID_CONFIG_KEYS {
            assert!(field(&config, key).is_some(), "missing {}", key);
        }
        assert!(field(&config, "nope").is_none());
    }

    #[tokio::test]
    async fn set_persists_trimmed_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_set(&store, &presenter, "timeout", " 45s ").await.unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.timeout.as_deref(), Some("45s"));
        assert!(config.endpoint.is_none());
    }

    #[tokio::test]
    async fn set_invalid_value_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        assert!(handle_set(&store, &presenter, "endpoint", "ftp://x").await.is_err());
        assert!(!store.exists());
    }
}
