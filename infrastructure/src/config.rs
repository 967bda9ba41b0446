//! Configuration file loading with multi-source merging
//!
//! Example configuration:
//!
//! ```toml
//! snapshot_path = "council.json"
//! sweep_interval_secs = 60
//! ```

use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// File-backed configuration for the class-council binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Where the JSON state snapshot lives
    pub snapshot_path: PathBuf,
    /// Expiry sweeper cadence in seconds
    pub sweep_interval_secs: u64,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("council.json"),
            sweep_interval_secs: 60,
        }
    }
}

impl FileConfig {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./council.toml`
    /// 3. Global: `~/.config/class-council/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        let project_path = PathBuf::from("council.toml");
        if project_path.exists() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("class-council").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.snapshot_path, PathBuf::from("council.json"));
        assert_eq!(config.sweep_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "snapshot_path = \"/tmp/other.json\"").unwrap();
        writeln!(file, "sweep_interval_secs = 5").unwrap();

        let config = ConfigLoader::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.snapshot_path, PathBuf::from("/tmp/other.json"));
        assert_eq!(config.sweep_interval_secs, 5);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = FileConfig {
            sweep_interval_secs: 0,
            ..FileConfig::default()
        };
        assert_eq!(config.sweep_interval(), Duration::from_secs(1));
    }
}
