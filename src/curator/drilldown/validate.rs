//! Dimension and date-range guard.

use crate::config::DrilldownSettings;
use crate::curator::PreconditionError;
use crate::request::Field;

/// Time dimensions drillable at daily grain.
pub const DAILY_DIMENSIONS: [&str; 2] = ["Date", "Day"];

pub const MONTH_DIMENSION: &str = "Month";

/// Checks that a drill dimension is allowed for the requested date range.
#[derive(Debug, Clone, Copy)]
pub struct DimensionRangeValidator<'a> {
    settings: &'a DrilldownSettings,
}

impl<'a> DimensionRangeValidator<'a> {
    pub fn new(settings: &'a DrilldownSettings) -> Self {
        Self { settings }
    }

    pub fn validate(&self, dimension: &Field, num_days: u32) -> Result<(), PreconditionError> {
        let name = dimension.field.as_str();
        let limit = if DAILY_DIMENSIONS.contains(&name) {
            self.settings.max_date_selected
        } else if name == MONTH_DIMENSION {
            self.settings.max_days_month_selected
        } else if self.settings.is_valid_dimension(name) {
            return Ok(());
        } else {
            return Err(PreconditionError::InvalidDimension(name.to_string()));
        };

        if num_days < limit {
            Ok(())
        } else {
            Err(PreconditionError::RangeExceeded {
                dimension: name.to_string(),
                num_days,
                limit,
            })
        }
    }
}
