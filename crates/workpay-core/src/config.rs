//! Configuration management for WorkPay.
//!
//! Loads configuration from ${WORKPAY_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for WorkPay configuration and data directories.
    //!
    //! WORKPAY_HOME resolution order:
    //! 1. WORKPAY_HOME environment variable (if set)
    //! 2. ~/.config/workpay (default)

    use std::path::PathBuf;

    /// Returns the WorkPay home directory.
    ///
    /// Checks WORKPAY_HOME env var first, falls back to ~/.config/workpay
    pub fn workpay_home() -> PathBuf {
        if let Ok(home) = std::env::var("WORKPAY_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("workpay"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        workpay_home().join("config.toml")
    }

    /// Returns the path to the persisted session store.
    pub fn session_path() -> PathBuf {
        workpay_home().join("session.json")
    }
}

/// Default value for serde when reference_id is missing.
fn default_reference_id() -> String {
    Config::DEFAULT_REFERENCE_ID.to_string()
}

/// Default value for serde when retry_delay_ms is missing.
fn default_retry_delay_ms() -> u64 {
    Config::DEFAULT_RETRY_DELAY_MS
}

/// Default value for serde when app_name is missing.
fn default_app_name() -> String {
    WidgetSettings::DEFAULT_APP_NAME.to_string()
}

/// Auth widget settings.
///
/// `widget_id` and `auth_token` are only needed by the OTP widget variant;
/// the plain-token flow uses the reference id alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    /// OTP widget identifier.
    pub widget_id: Option<String>,
    /// OTP widget credential token.
    pub auth_token: Option<String>,
    /// Application name reported to the widget.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Enable widget debug mode.
    pub debug: bool,
}

impl WidgetSettings {
    const DEFAULT_APP_NAME: &str = "WorkPay";
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            widget_id: None,
            auth_token: None,
            app_name: Self::DEFAULT_APP_NAME.to_string(),
            debug: false,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Correlation reference id passed to the auth widget and persisted
    /// alongside each session.
    #[serde(default = "default_reference_id")]
    pub reference_id: String,

    /// Debounce before the widget is re-opened after a failed attempt.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Auth widget settings.
    #[serde(default)]
    pub widget: WidgetSettings,
}

impl Config {
    const DEFAULT_REFERENCE_ID: &str = "1792141h175880220068d531188a2d8";
    const DEFAULT_RETRY_DELAY_MS: u64 = 300;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default template to `path`.
    ///
    /// Fails if a config file already exists there.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("config already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Returns the retry debounce as a [`Duration`].
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_id: Self::DEFAULT_REFERENCE_ID.to_string(),
            retry_delay_ms: Self::DEFAULT_RETRY_DELAY_MS,
            widget: WidgetSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: missing file loads defaults.
    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.reference_id, Config::DEFAULT_REFERENCE_ID);
        assert_eq!(config.retry_delay_ms, 300);
        assert_eq!(config.widget.app_name, "WorkPay");
        assert!(!config.widget.debug);
    }

    /// Test: the embedded template parses and matches the defaults.
    #[test]
    fn test_template_matches_defaults() {
        let from_template: Config = toml::from_str(default_config_template()).unwrap();
        let defaults = Config::default();
        assert_eq!(from_template.reference_id, defaults.reference_id);
        assert_eq!(from_template.retry_delay_ms, defaults.retry_delay_ms);
        assert_eq!(from_template.widget.app_name, defaults.widget.app_name);
    }

    /// Test: partial config keeps defaults for missing keys.
    #[test]
    fn test_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "retry_delay_ms = 50\n[widget]\nwidget_id = \"w1\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.retry_delay_ms, 50);
        assert_eq!(config.widget.widget_id.as_deref(), Some("w1"));
        assert_eq!(config.reference_id, Config::DEFAULT_REFERENCE_ID);
    }

    /// Test: init refuses to clobber an existing config.
    #[test]
    fn test_init_refuses_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "# existing config").unwrap();

        let err = Config::init(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
