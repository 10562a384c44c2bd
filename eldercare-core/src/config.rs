//! Global eldercare configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::conflict::ScanStrategy;
use crate::constants::{DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};
use crate::error::{CareError, CareResult};

static DEFAULT_SCHEDULE_PATH: &str = "~/eldercare/schedule.json";

fn default_schedule_path() -> PathBuf {
    PathBuf::from(DEFAULT_SCHEDULE_PATH)
}

fn default_window_days() -> i64 {
    DEFAULT_WINDOW_DAYS
}

/// Global configuration at ~/.config/eldercare/config.toml
///
/// Every key can be overridden with an `ELDERCARE_` environment variable,
/// e.g. `ELDERCARE_STRATEGY=sweep`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EldercareConfig {
    /// Snapshot to read: JSON file, .ics file or directory of .ics files
    #[serde(default = "default_schedule_path")]
    pub schedule_path: PathBuf,

    #[serde(default)]
    pub strategy: ScanStrategy,

    /// Days before and after today checked when no dates are given
    #[serde(default = "default_window_days")]
    pub window_days: i64,
}

impl Default for EldercareConfig {
    fn default() -> Self {
        EldercareConfig {
            schedule_path: default_schedule_path(),
            strategy: ScanStrategy::default(),
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl EldercareConfig {
    pub fn config_path() -> CareResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CareError::Config("Could not determine config directory".into()))?
            .join("eldercare");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/eldercare/config.toml, creating a commented default
    /// file on first run.
    pub fn load() -> CareResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from a specific file plus `ELDERCARE_*` overrides.
    pub fn load_from(path: &Path) -> CareResult<Self> {
        let config: EldercareConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("ELDERCARE").try_parsing(true))
            .build()
            .map_err(|e| CareError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CareError::Config(e.to_string()))?;

        if !(0..=MAX_WINDOW_DAYS).contains(&config.window_days) {
            return Err(CareError::Config(format!(
                "window_days must be between 0 and {} (got {})",
                MAX_WINDOW_DAYS, config.window_days
            )));
        }

        Ok(config)
    }

    /// Schedule path with `~` expanded.
    pub fn schedule_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.schedule_path.to_string_lossy()).into_owned())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CareResult<()> {
        let contents = format!(
            "\
# eldercare configuration

# Schedule snapshot (JSON file, .ics file or directory of .ics files):
# schedule_path = \"{}\"

# Conflict scan: \"adjacent\" (neighbouring events only) or \"sweep\" (all overlaps):
# strategy = \"adjacent\"

# Days before and after today to check when no dates are given:
# window_days = {}
",
            DEFAULT_SCHEDULE_PATH, DEFAULT_WINDOW_DAYS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CareError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CareError::Config(format!("Could not write config file: {e}")))?;

        log::info!("Created default config at {}", path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eldercare").join("config.toml");

        EldercareConfig::create_default_config(&path).unwrap();
        let config = EldercareConfig::load_from(&path).unwrap();

        assert_eq!(config.schedule_path, PathBuf::from(DEFAULT_SCHEDULE_PATH));
        assert_eq!(config.window_days, DEFAULT_WINDOW_DAYS);
    }

    #[test]
    fn test_load_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "schedule_path = \"/srv/care/export\"\nwindow_days = 7\n",
        )
        .unwrap();

        let config = EldercareConfig::load_from(&path).unwrap();

        assert_eq!(config.schedule_path(), PathBuf::from("/srv/care/export"));
        assert_eq!(config.window_days, 7);
    }

    #[test]
    fn test_negative_window_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "window_days = -3\n").unwrap();

        assert!(matches!(
            EldercareConfig::load_from(&path),
            Err(CareError::Config(_))
        ));
    }

    #[test]
    fn test_oversized_window_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "window_days = 1000000000\n").unwrap();

        assert!(matches!(
            EldercareConfig::load_from(&path),
            Err(CareError::Config(_))
        ));

        std::fs::write(&path, format!("window_days = {}\n", MAX_WINDOW_DAYS)).unwrap();
        assert_eq!(
            EldercareConfig::load_from(&path).unwrap().window_days,
            MAX_WINDOW_DAYS
        );
    }
}
