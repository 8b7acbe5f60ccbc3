//! CLI configuration loading.
//!
//! Precedence (lowest to highest):
//! 1. Programmatic defaults
//! 2. YAML file (`--config`, default `~/.recall/cycletrack.yaml`, optional)
//! 3. Environment variables (`CYCLETRACK_*`, `__` separates nested keys,
//!    e.g. `CYCLETRACK_ANALYTICS__FORECAST_WINDOW=6`)

use anyhow::{bail, Context, Result};
use cycletrack_core::AnalyticsConfig;
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "CYCLETRACK_";
const RECALL_DIR: &str = ".recall";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: recall_dir().join("recall.db"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Absolute directory for rolling log files; logging is off when unset.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: cycletrack_core::default_log_level().to_string(),
            dir: None,
        }
    }
}

/// Default YAML config location.
pub fn default_config_path() -> PathBuf {
    recall_dir().join("cycletrack.yaml")
}

/// Loads configuration from `path` (or the default location) and the
/// environment, then validates it.
pub fn load(path: Option<&Path>) -> Result<AppConfig> {
    let path = path.map_or_else(default_config_path, Path::to_path_buf);

    let config: AppConfig = Figment::new()
        .merge(Serialized::defaults(AppConfig::default()))
        .merge(Yaml::file(&path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;

    validate(&config)?;
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<()> {
    if config.database.path.as_os_str().is_empty() {
        bail!("database.path cannot be empty");
    }
    config
        .analytics
        .validate()
        .context("invalid analytics configuration")?;
    Ok(())
}

fn recall_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(RECALL_DIR)
}

#[cfg(test)]
mod tests {
    use super::load;
    use figment::Jail;
    use std::path::Path;

    #[test]
    fn defaults_apply_without_file_or_env() {
        Jail::expect_with(|jail| {
            let config = load(Some(jail.directory().join("absent.yaml").as_path()))
                .map_err(|err| err.to_string())?;
            assert_eq!(config.analytics.default_cycle_length, 28.0);
            assert_eq!(config.analytics.forecast_window, 8);
            assert!(config.database.path.ends_with(".recall/recall.db"));
            assert_eq!(config.logging.dir, None);
            Ok(())
        });
    }

    #[test]
    fn yaml_file_overrides_defaults_and_env_overrides_yaml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "cycletrack.yaml",
                r#"
database:
  path: /tmp/cycles.db
analytics:
  default_cycle_length: 30.0
  forecast_window: 6
"#,
            )?;
            jail.set_env("CYCLETRACK_ANALYTICS__FORECAST_WINDOW", "4");

            let config = load(Some(Path::new("cycletrack.yaml"))).map_err(|err| err.to_string())?;
            assert_eq!(config.database.path, Path::new("/tmp/cycles.db"));
            assert_eq!(config.analytics.default_cycle_length, 30.0);
            assert_eq!(config.analytics.forecast_window, 4);
            assert_eq!(config.analytics.trend_window, 10);
            Ok(())
        });
    }

    #[test]
    fn invalid_analytics_values_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "cycletrack.yaml",
                "analytics:\n  forecast_decay: 0.0\n",
            )?;

            let err = load(Some(Path::new("cycletrack.yaml"))).expect_err("decay must be rejected");
            assert!(format!("{err:#}").contains("forecast_decay"));
            Ok(())
        });
    }
}
