//! TOML-based deployment settings.
//!
//! Supports a config file (drilldown.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [registry]
//! name = "${REPORT_REGISTRY}"
//!
//! [drilldown]
//! max_date_selected = 7
//! max_days_month_selected = 92
//! supported_cubes = ["performance_stats"]
//! valid_dimensions = ["Country", "Campaign ID"]
//!
//! [logging]
//! filter = "drilldown=debug,info"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Which report registry plans are generated against.
    pub registry: RegistrySettings,

    /// Drilldown curator limits and allow-lists.
    pub drilldown: DrilldownSettings,

    /// Log filter for the CLI.
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RegistrySettings {
    /// Registry name (supports ${ENV_VAR} expansion).
    pub name: String,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            name: "reports".to_string(),
        }
    }
}

impl RegistrySettings {
    /// Get the registry name with environment variables expanded.
    pub fn resolved_name(&self) -> Result<String, SettingsError> {
        expand_env_vars(&self.name)
    }
}

/// Bounds applied before a drilldown is scheduled.
///
/// Both day bounds are exclusive: a request spanning exactly
/// `max_date_selected` days is rejected for a daily drilldown.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DrilldownSettings {
    /// Upper bound (exclusive) on `numDays` when drilling by `Date`/`Day`.
    pub max_date_selected: u32,

    /// Upper bound (exclusive) on `numDays` when drilling by `Month`.
    pub max_days_month_selected: u32,

    /// Cubes whose requests may be drilled into.
    pub supported_cubes: Vec<String>,

    /// Non-time dimensions a drilldown may break results down by.
    pub valid_dimensions: Vec<String>,
}

impl Default for DrilldownSettings {
    fn default() -> Self {
        Self {
            max_date_selected: 7,
            max_days_month_selected: 92,
            supported_cubes: vec!["performance_stats".to_string(), "user_stats".to_string()],
            valid_dimensions: [
                "Advertiser ID",
                "Campaign ID",
                "Ad Group ID",
                "Ad ID",
                "Keyword ID",
                "Section ID",
                "Site ID",
                "Product ID",
                "Device ID",
                "Pricing Type",
                "Country",
                "Age",
                "Gender",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl DrilldownSettings {
    pub fn supports_cube(&self, cube: &str) -> bool {
        self.supported_cubes.iter().any(|c| c == cube)
    }

    pub fn is_valid_dimension(&self, name: &str) -> bool {
        self.valid_dimensions.iter().any(|d| d == name)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive, used when RUST_LOG is unset.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `DRILLDOWN_CONFIG`
    /// 2. `./drilldown.toml`
    /// 3. `~/.config/drilldown/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("DRILLDOWN_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("drilldown.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("drilldown").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.drilldown.max_date_selected == 0 {
            return Err(SettingsError::InvalidConfig(
                "drilldown.max_date_selected must be positive".to_string(),
            ));
        }
        if self.drilldown.max_days_month_selected == 0 {
            return Err(SettingsError::InvalidConfig(
                "drilldown.max_days_month_selected must be positive".to_string(),
            ));
        }
        if self.registry.name.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "registry.name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.next_if_eq(&'{').is_some() {
            chars.by_ref().take_while(|&ch| ch != '}').collect()
        } else {
            let mut name = String::new();
            while let Some(ch) = chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_') {
                name.push(ch);
            }
            if name.is_empty() {
                // Just a lone $, keep it
                result.push('$');
                continue;
            }
            name
        };

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
