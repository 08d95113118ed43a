use crate::error::{NatalError, Result};
use crate::paths;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ValidationConfig
// ---------------------------------------------------------------------------

/// Bounds applied to onboarding input before signs are computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_min_birth_date")]
    pub min_birth_date: NaiveDate,
    #[serde(default = "default_max_display_name")]
    pub max_display_name: usize,
    #[serde(default = "default_min_location")]
    pub min_location: usize,
    #[serde(default = "default_max_location")]
    pub max_location: usize,
}

fn default_min_birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn default_max_display_name() -> usize {
    50
}

fn default_min_location() -> usize {
    2
}

fn default_max_location() -> usize {
    200
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_birth_date: default_min_birth_date(),
            max_display_name: default_max_display_name(),
            min_location: default_min_location(),
            max_location: default_max_location(),
        }
    }
}

// ---------------------------------------------------------------------------
// OutputConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Emit JSON even without `--json`.
    #[serde(default)]
    pub json: bool,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            validation: ValidationConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(NatalError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Like [`Config::load`], but an absent file yields the defaults.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Err(NatalError::NotInitialized) => {
                tracing::debug!(root = %root.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        crate::io::atomic_write(&path, self.to_yaml()?.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let v = &self.validation;

        if self.version != 1 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("unknown config version {}", self.version),
            });
        }

        if v.max_display_name == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "validation.max_display_name is 0; no name can pass".to_string(),
            });
        }

        if v.min_location > v.max_location {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "validation.min_location ({}) exceeds validation.max_location ({})",
                    v.min_location, v.max_location
                ),
            });
        }

        if let Some(floor) = NaiveDate::from_ymd_opt(1800, 1, 1) {
            if v.min_birth_date < floor {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "validation.min_birth_date {} is before 1800-01-01",
                        v.min_birth_date
                    ),
                });
            }
        }

        if v.min_birth_date > chrono::Utc::now().date_naive() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "validation.min_birth_date {} is in the future; no birth date can pass",
                    v.min_birth_date
                ),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
