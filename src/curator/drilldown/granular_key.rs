//! Join key and metric columns of the original request.

use super::DrilldownCurator;
use crate::curator::CuratorError;
use crate::plan::PlanGenerator;
use crate::request::{BucketParams, Field, ReportingRequest};
use crate::request_log::RequestLog;

/// Columns carried over from the original plan into the drilldown request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GranularKeys {
    /// Primary key of the most granular grouping; `None` when the original
    /// request does not group by any dimension.
    pub primary_key: Option<Field>,
    /// Requested columns that resolve to fact columns, in request order.
    pub fact_fields: Vec<Field>,
}

/// Re-plans the original request to find the columns that correlate
/// secondary rows with the primary grouping.
pub struct GranularKeyResolver<'a> {
    generator: &'a dyn PlanGenerator,
}

impl<'a> GranularKeyResolver<'a> {
    pub fn new(generator: &'a dyn PlanGenerator) -> Self {
        Self { generator }
    }

    pub fn resolve(
        &self,
        registry: &str,
        bucket: &BucketParams,
        original: &ReportingRequest,
        log: &dyn RequestLog,
    ) -> Result<GranularKeys, CuratorError> {
        let model = self
            .generator
            .generate(registry, original, bucket, log)
            .map_err(|err| key_error(err.to_string()))?;

        let primary_key = match model.most_granular() {
            None => None,
            Some(dim) if model.requests_column(&dim.primary_key_alias) => {
                Some(Field::new(dim.primary_key_alias.as_str()))
            }
            Some(dim) => {
                return Err(key_error(format!(
                    "primary key '{}' of dimension '{}' is not among the requested columns",
                    dim.primary_key_alias, dim.name
                )))
            }
        };

        let fact_fields = model.fact_aliases().map(Field::new).collect();

        Ok(GranularKeys {
            primary_key,
            fact_fields,
        })
    }
}

fn key_error(message: String) -> CuratorError {
    CuratorError::KeyResolution {
        curator: DrilldownCurator::NAME,
        message,
    }
}
