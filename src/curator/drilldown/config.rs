//! Drilldown curator config.
//!
//! ```json
//! {
//!   "dimension": {"field": "Country"},
//!   "cube": "country_stats",
//!   "ordering": [{"field": "Impressions", "order": "Desc"}],
//!   "maxRows": 100
//! }
//! ```
//!
//! `dimension` and `maxRows` are required; `cube` and `ordering` fall back to
//! the original request's values when absent or empty.

use serde::de::DeserializeOwned;
use serde_json::Value as Json;

use super::DrilldownCurator;
use crate::curator::ConfigParseError;
use crate::request::{Field, SortBy};

#[derive(Debug, Clone, PartialEq)]
pub struct DrilldownConfig {
    /// The dimension to break the primary result down by.
    pub dimension: Field,
    /// Cube for the secondary query; the original cube when `None`.
    pub cube: Option<String>,
    /// Sort for the secondary query; the original sort when empty.
    pub ordering: Vec<SortBy>,
    /// Page size of the secondary query. Always positive.
    pub max_rows: u64,
}

impl DrilldownConfig {
    pub fn new(dimension: Field, max_rows: u64) -> Self {
        Self {
            dimension,
            cube: None,
            ordering: Vec::new(),
            max_rows,
        }
    }

    pub fn with_cube(mut self, cube: impl Into<String>) -> Self {
        self.cube = Some(cube.into());
        self
    }

    pub fn with_ordering(mut self, ordering: Vec<SortBy>) -> Self {
        self.ordering = ordering;
        self
    }

    /// Parse a drilldown config, collecting every schema error.
    pub fn parse(json: &Json) -> Result<Self, ConfigParseError> {
        let Some(obj) = json.as_object() else {
            return Err(ConfigParseError::new(
                DrilldownCurator::NAME,
                vec!["config must be a JSON object".to_string()],
            ));
        };

        let mut errors = Vec::new();

        let dimension = match obj.get("dimension") {
            None | Some(Json::Null) => {
                errors.push("dimension is required".to_string());
                None
            }
            Some(value) => decode::<Field>("dimension", value, &mut errors).and_then(|field| {
                if field.field.trim().is_empty() {
                    errors.push("dimension.field must not be empty".to_string());
                    None
                } else {
                    Some(field)
                }
            }),
        };

        let cube = match obj.get("cube") {
            None | Some(Json::Null) => None,
            Some(Json::String(cube)) if cube.is_empty() => None,
            Some(Json::String(cube)) => Some(cube.clone()),
            Some(other) => {
                errors.push(format!("cube must be a string, got {}", other));
                None
            }
        };

        let ordering = match obj.get("ordering") {
            None | Some(Json::Null) => Some(Vec::new()),
            Some(value) => decode::<Vec<SortBy>>("ordering", value, &mut errors),
        };

        let max_rows = match obj.get("maxRows") {
            None | Some(Json::Null) => {
                errors.push("maxRows is required".to_string());
                None
            }
            Some(value) => match value.as_u64() {
                Some(0) => {
                    errors.push("maxRows must be greater than 0".to_string());
                    None
                }
                Some(rows) => Some(rows),
                None => {
                    errors.push(format!("maxRows must be a positive integer, got {}", value));
                    None
                }
            },
        };

        match (dimension, ordering, max_rows) {
            (Some(dimension), Some(ordering), Some(max_rows)) if errors.is_empty() => Ok(Self {
                dimension,
                cube,
                ordering,
                max_rows,
            }),
            _ => Err(ConfigParseError::new(DrilldownCurator::NAME, errors)),
        }
    }
}

fn decode<T: DeserializeOwned>(key: &str, value: &Json, errors: &mut Vec<String>) -> Option<T> {
    match serde_json::from_value(value.clone()) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            errors.push(format!("{}: {}", key, e));
            None
        }
    }
}
