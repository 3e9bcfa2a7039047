//! Editor configuration and on-disk locations.
//!
//! Everything lives under one per-user data directory (`~/.mind` unless
//! overridden): saved maps as `<base>.<extension>`, the UI font under
//! `res/`, and an optional `config.json` holding these settings. Every field
//! has a default, so a partial or missing config file is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the data directory inside the home directory.
pub const DATA_DIR_NAME: &str = ".mind";
/// Name of the config file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine the home directory")]
    NoHome,

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Zoom limits, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub step: i32,
    pub min: i32,
    pub max: i32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            step: 5,
            min: 10,
            max: 100,
        }
    }
}

impl ZoomConfig {
    /// Require `1 <= min <= max` and `step > 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min < 1 {
            return Err(ConfigError::Invalid(format!(
                "zoom.min must be at least 1, got {}",
                self.min
            )));
        }
        if self.min > self.max {
            return Err(ConfigError::Invalid(format!(
                "zoom.min {} exceeds zoom.max {}",
                self.min, self.max
            )));
        }
        if self.step <= 0 {
            return Err(ConfigError::Invalid(format!(
                "zoom.step must be positive, got {}",
                self.step
            )));
        }
        Ok(())
    }

    /// Nearest limits that pass [`validate`](Self::validate).
    #[must_use]
    pub fn sanitized(self) -> Self {
        let min = self.min.max(1);
        Self {
            step: self.step.max(1),
            min,
            max: self.max.max(min),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Overrides `~/.mind`.
    pub data_dir: Option<PathBuf>,
    /// Extension of saved maps, without the dot.
    pub extension: String,
    /// Base name used until the user types another one.
    pub default_filename: String,
    /// Font file, relative to the data directory.
    pub font_file: PathBuf,
    pub font_size: u16,
    pub zoom: ZoomConfig,
    /// Screen point where new nodes appear.
    pub spawn_point: (f32, f32),
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            extension: "mind".into(),
            default_filename: "map".into(),
            font_file: PathBuf::from("res").join("mainFont.ttf"),
            font_size: 18,
            zoom: ZoomConfig::default(),
            spawn_point: (1920.0 / 2.0, 1080.0 / 2.0),
        }
    }
}

impl EditorConfig {
    /// Load `config.json` from the default data directory.
    pub fn load_default() -> Result<Self, ConfigError> {
        let dir = default_data_dir()?;
        Self::load(&dir.join(CONFIG_FILE_NAME))
    }

    /// Load a config file. A missing file yields the defaults; zoom limits
    /// that could not drive a viewport are rejected as
    /// [`ConfigError::Invalid`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.zoom.validate()?;
        Ok(config)
    }

    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }

    /// Full path of the map named `base`.
    pub fn map_path(&self, base: &str) -> Result<PathBuf, ConfigError> {
        Ok(self.data_dir()?.join(self.map_file_name(base)))
    }

    /// `<base>.<extension>`, as shown in the filename label.
    pub fn map_file_name(&self, base: &str) -> String {
        format!("{base}.{}", self.extension)
    }

    pub fn font_path(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.data_dir()?.join(&self.font_file))
    }
}

fn default_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(DATA_DIR_NAME))
        .ok_or(ConfigError::NoHome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_file_convention() {
        let config = EditorConfig {
            data_dir: Some(PathBuf::from("/data/.mind")),
            ..Default::default()
        };
        assert_eq!(
            config.map_path("ideas").unwrap(),
            PathBuf::from("/data/.mind/ideas.mind")
        );
        assert_eq!(
            config.font_path().unwrap(),
            PathBuf::from("/data/.mind/res/mainFont.ttf")
        );
        assert_eq!(config.font_size, 18);
        assert_eq!(config.zoom, ZoomConfig { step: 5, min: 10, max: 100 });
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "extension": "mm", "zoom": { "max": 200 } }"#).unwrap();

        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.extension, "mm");
        assert_eq!(config.zoom.max, 200);
        assert_eq!(config.zoom.min, 10);
        assert_eq!(config.default_filename, "map");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            EditorConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn inverted_zoom_limits_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        // min above the default max of 100.
        fs::write(&path, r#"{ "zoom": { "min": 150 } }"#).unwrap();
        let err = EditorConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("zoom.max"));
    }

    #[test]
    fn zero_zoom_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "zoom": { "min": 0, "step": 50 } }"#).unwrap();
        assert!(matches!(
            EditorConfig::load(&path),
            Err(ConfigError::Invalid(_))
        ));

        fs::write(&path, r#"{ "zoom": { "step": 0 } }"#).unwrap();
        assert!(matches!(
            EditorConfig::load(&path),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn sanitized_limits_validate() {
        let bad = ZoomConfig {
            step: -5,
            min: 0,
            max: -20,
        };
        assert!(bad.validate().is_err());
        assert_eq!(bad.sanitized(), ZoomConfig { step: 1, min: 1, max: 1 });
        assert!(bad.sanitized().validate().is_ok());
        assert_eq!(ZoomConfig::default().sanitized(), ZoomConfig::default());
    }
}
