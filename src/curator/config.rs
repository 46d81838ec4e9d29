//! Per-request curator configs.

use serde_json::Value as Json;

use super::drilldown::{DrilldownConfig, DrilldownCurator};
use super::error::ConfigParseError;
use super::DefaultCurator;

/// Config for one curator stage, selected by curator name.
#[derive(Debug, Clone, PartialEq)]
pub enum CuratorConfig {
    /// The primary query. Takes no options.
    Default,
    Drilldown(DrilldownConfig),
}

impl CuratorConfig {
    /// Parse the JSON config supplied for the curator called `curator`.
    pub fn parse(curator: &str, json: &Json) -> Result<Self, ConfigParseError> {
        match curator {
            DefaultCurator::NAME => match json {
                Json::Null => Ok(CuratorConfig::Default),
                Json::Object(map) if map.is_empty() => Ok(CuratorConfig::Default),
                _ => Err(ConfigParseError::new(
                    curator,
                    vec!["the default curator takes no config".to_string()],
                )),
            },
            DrilldownCurator::NAME => DrilldownConfig::parse(json).map(CuratorConfig::Drilldown),
            other => Err(ConfigParseError::new(
                other,
                vec![format!("unknown curator '{}'", other)],
            )),
        }
    }

    /// Name of the curator this config belongs to.
    pub fn curator(&self) -> &'static str {
        match self {
            CuratorConfig::Default => DefaultCurator::NAME,
            CuratorConfig::Drilldown(_) => DrilldownCurator::NAME,
        }
    }
}
