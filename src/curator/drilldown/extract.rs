//! Distinct drill values from the primary result.

use std::collections::BTreeSet;

use super::DrilldownCurator;
use crate::curator::CuratorError;
use crate::execution::ExecutionOutcome;
use crate::request::Field;

pub struct ResultValueExtractor;

impl ResultValueExtractor {
    /// Collect the distinct string renderings of `dimension`'s column.
    ///
    /// Null cells are skipped. A failed primary outcome short-circuits
    /// without touching any rows.
    pub fn extract(
        primary: &ExecutionOutcome,
        dimension: &Field,
    ) -> Result<BTreeSet<String>, CuratorError> {
        let rows = primary.as_ref().map_err(|err| CuratorError::PrimaryFailure {
            curator: DrilldownCurator::NAME,
            message: err.to_string(),
        })?;

        let alias = dimension.alias();
        let column = rows
            .column(alias)
            .ok_or_else(|| CuratorError::MissingDrillColumn {
                curator: DrilldownCurator::NAME,
                alias: alias.to_string(),
            })?;

        Ok(column
            .filter(|value| !value.is_null())
            .map(ToString::to_string)
            .collect())
    }
}
