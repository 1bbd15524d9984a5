//! Capture configuration.
//!
//! Loaded from an optional `media-capture.toml` in a config directory. Missing
//! keys take their stock defaults and unknown keys are rejected. Command-line
//! overrides are applied on top of the file, then the result is validated.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! owner_id = "org.wordpress.android"  # capability authority is "<owner_id>.provider"
//! media_dir = "DCIM"                   # public media directory under the storage root
//! camera_subdir = "Camera"             # capture directory inside media_dir
//! file_prefix = "wp-"                  # capture file name: <prefix><epoch-millis>.<ext>
//! file_extension = "jpg"
//! max_fling_velocity = 8000            # px/s reported by the host's view configuration
//! ```
//!
//! Sparse files are fine:
//!
//! ```toml
//! owner_id = "com.example.notes"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "media-capture.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureConfig {
    /// Application id owning the capability-token authority.
    pub owner_id: String,
    /// Public media directory, relative to the storage root.
    pub media_dir: String,
    /// Directory inside `media_dir` that receives camera captures.
    pub camera_subdir: String,
    pub file_prefix: String,
    pub file_extension: String,
    /// Maximum fling velocity of the host view system, in px/s.
    pub max_fling_velocity: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            owner_id: "org.wordpress.android".to_string(),
            media_dir: "DCIM".to_string(),
            camera_subdir: "Camera".to_string(),
            file_prefix: "wp-".to_string(),
            file_extension: "jpg".to_string(),
            max_fling_velocity: 8000,
        }
    }
}

impl CaptureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner_id.trim().is_empty() {
            return Err(ConfigError::Validation("owner_id must not be empty".into()));
        }
        let media_dir = Path::new(&self.media_dir);
        if self.media_dir.is_empty()
            || !media_dir
                .components()
                .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(ConfigError::Validation(format!(
                "media_dir must be a relative path without '.' or '..', got {:?}",
                self.media_dir
            )));
        }
        if !is_plain_name(&self.camera_subdir) {
            return Err(ConfigError::Validation(format!(
                "camera_subdir must be a single directory name, got {:?}",
                self.camera_subdir
            )));
        }
        if self.file_prefix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "file_prefix must not contain path separators, got {:?}",
                self.file_prefix
            )));
        }
        if !is_plain_name(&self.file_extension) || self.file_extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "file_extension must be non-empty and given without a leading dot".into(),
            ));
        }
        Ok(())
    }

    /// Replace the values given on the command line.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(owner_id) = &overrides.owner_id {
            self.owner_id = owner_id.clone();
        }
    }

    /// Authority the capture destination is shared under.
    pub fn provider_authority(&self) -> String {
        provider_authority(&self.owner_id)
    }
}

pub fn provider_authority(owner_id: &str) -> String {
    format!("{owner_id}.provider")
}

/// A single path component: not empty, `.` or `..`, and free of separators.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Values given on the command line. `None` keeps the file's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub owner_id: Option<String>,
}

/// Read `media-capture.toml` from `dir`, `Ok(None)` if absent.
pub fn load_config_file(dir: &Path) -> Result<Option<CaptureConfig>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Load the config from `dir` (stock defaults if absent), apply `overrides`
/// and validate.
pub fn load_config(dir: &Path, overrides: &ConfigOverrides) -> Result<CaptureConfig, ConfigError> {
    let mut config = load_config_file(dir)?.unwrap_or_default();
    config.apply_overrides(overrides);
    config.validate()?;
    Ok(config)
}

/// Fully commented stock config, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# media-capture configuration
# ==========================
# Every key is optional. Values shown are the defaults.

# Application id. Camera captures are shared with the external camera app
# through the capability authority "<owner_id>.provider".
owner_id = "org.wordpress.android"

# Public, externally visible media directory under the storage root.
media_dir = "DCIM"

# Directory inside media_dir that receives camera captures. Created on demand.
camera_subdir = "Camera"

# Capture files are named <file_prefix><epoch-millis>.<file_extension>
file_prefix = "wp-"
file_extension = "jpg"

# Maximum fling velocity of the host view system (px/s). Thumbnail loading is
# paused for flings faster than half of this.
max_fling_velocity = 8000
"##
}
