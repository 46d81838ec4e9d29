//! Compiled request plans and the collaborators that produce and vet them.
//!
//! Plan generation itself lives outside this crate. Curators reach it through
//! the [`PlanGenerator`] trait and may ask a [`PlanValidator`] to vet a plan
//! before it is executed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::request::{BucketParams, ReportingRequest};
use crate::request_log::RequestLog;

/// Result type for plan operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Errors raised while generating or vetting a plan.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The generator could not build a plan for the request.
    #[error("failed to generate request model: {0}")]
    Generation(String),

    /// A validator refused the generated plan.
    #[error("request model rejected: {0}")]
    Rejected(String),
}

/// One grouping dimension the plan joins in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionCandidate {
    pub name: String,
    /// Alias of the dimension's primary key column.
    pub primary_key_alias: String,
}

/// Compiled plan for a [`ReportingRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestModel {
    pub cube: String,
    /// Grouping dimensions ordered by granularity, most granular last.
    #[serde(default)]
    pub dimension_candidates: Vec<DimensionCandidate>,
    /// Requested column aliases in request order.
    #[serde(default)]
    pub requested_columns: Vec<String>,
    /// Alias to physical fact column, for aliases that resolve to metrics.
    #[serde(default)]
    pub fact_col_mapping: BTreeMap<String, String>,
}

impl RequestModel {
    /// The finest-grained grouping dimension, if the plan groups at all.
    pub fn most_granular(&self) -> Option<&DimensionCandidate> {
        self.dimension_candidates.last()
    }

    pub fn requests_column(&self, alias: &str) -> bool {
        self.requested_columns.iter().any(|c| c == alias)
    }

    /// Requested aliases that map to fact columns, in request order.
    pub fn fact_aliases(&self) -> impl Iterator<Item = &str> {
        self.requested_columns
            .iter()
            .filter(|alias| self.fact_col_mapping.contains_key(alias.as_str()))
            .map(String::as_str)
    }
}

/// Compiles reporting requests into plans.
pub trait PlanGenerator: Send + Sync {
    fn generate(
        &self,
        registry: &str,
        request: &ReportingRequest,
        bucket: &BucketParams,
        log: &dyn RequestLog,
    ) -> PlanResult<RequestModel>;
}

/// What a [`PlanValidator`] knows about the plan it is vetting.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub registry: &'a str,
    pub curator: &'a str,
    pub request: &'a ReportingRequest,
}

/// Policy hook run on every generated plan before it executes, the primary
/// query's included. [`ValidationContext::curator`] names the requesting stage.
pub trait PlanValidator: Send + Sync {
    fn validate(&self, ctx: &ValidationContext<'_>, plan: &RequestModel) -> PlanResult<()>;
}

/// Accepts every plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPlanValidator;

impl PlanValidator for NoopPlanValidator {
    fn validate(&self, _ctx: &ValidationContext<'_>, _plan: &RequestModel) -> PlanResult<()> {
        Ok(())
    }
}
