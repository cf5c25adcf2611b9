/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::common;
use panelwise::app_config::{Config, LogLevel};
use panelwise::errors::ConfigError;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.projects_dir, PathBuf::from("projects"));
    assert_eq!(config.provider.model, "gemini-2.5-flash");
    assert_eq!(config.provider.endpoint, "https://generativelanguage.googleapis.com/v1beta");
    assert_eq!(config.provider.api_key_env, "GOOGLE_API_KEY");
    assert_eq!(config.provider.timeout_secs, 300);
    assert_eq!(config.provider.temperature, None);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.provider.model = " ".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "provider.model", .. })
    ));
    config.provider.model = "gemini-2.5-flash".to_string();

    config.provider.timeout_secs = 0;
    assert!(config.validate().is_err());
    config.provider.timeout_secs = 60;

    config.provider.temperature = Some(3.5);
    assert!(config.validate().is_err());
    config.provider.temperature = Some(0.2);

    config.provider.api_key_env = String::new();
    assert!(config.validate().is_err());
    config.provider.api_key_env = "MY_KEY".to_string();

    assert!(config.validate().is_ok());
}

/// Test loading a partial config file from disk
#[test]
fn test_from_file_withPartialJson_shouldMergeDefaults() -> Result<()> {
    let temp = common::create_temp_dir()?;
    let path = temp.path().join("conf.json");
    fs::write(
        &path,
        r#"{"projects_dir": "/srv/comics", "provider": {"temperature": 0.3}, "log_level": "debug"}"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.projects_dir, PathBuf::from("/srv/comics"));
    assert_eq!(config.provider.temperature, Some(0.3));
    assert_eq!(config.provider.model, "gemini-2.5-flash");
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

/// Test that a missing or malformed config file is reported
#[test]
fn test_from_file_withBadFiles_shouldFail() -> Result<()> {
    let temp = common::create_temp_dir()?;
    assert!(matches!(
        Config::from_file(temp.path().join("missing.json")),
        Err(ConfigError::LoadFailed { .. })
    ));

    let path = temp.path().join("broken.json");
    fs::write(&path, "{ broken")?;
    assert!(matches!(Config::from_file(&path), Err(ConfigError::LoadFailed { .. })));
    Ok(())
}

/// Test credential lookup through an injected environment
#[test]
fn test_api_key_from_withMissingVariable_shouldFail() {
    let result = Config::api_key_from("GOOGLE_API_KEY", |_| None);

    let error = result.unwrap_err();
    assert!(error.to_string().contains("GOOGLE_API_KEY"));
}

/// Test serialization keeps the optional temperature out when unset
#[test]
fn test_config_serialization_shouldSkipUnsetTemperature() -> Result<()> {
    let json = serde_json::to_string(&Config::default())?;

    assert!(!json.contains("temperature"));
    assert!(json.contains(r#""log_level":"info""#));
    Ok(())
}
