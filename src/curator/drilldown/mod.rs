//! Drilldown curator.
//!
//! Breaks a primary result down by one more dimension. Once the primary
//! query completes, the curator:
//!
//! 1. collects the distinct values of the drill dimension from the primary
//!    rows ([`ResultValueExtractor`]),
//! 2. re-plans the original request to find the most granular grouping's
//!    primary key and the metric columns ([`GranularKeyResolver`]),
//! 3. builds a secondary request selecting the drill dimension, that key and
//!    those metrics, restricted to the collected values
//!    ([`DrilldownRequestBuilder`]),
//! 4. plans, vets and executes it ([`QueryRunner`]).
//!
//! Cube support and the dimension/date-range guard run synchronously in
//! [`DrilldownCurator::check`]; a rejected request never reaches the
//! scheduler.

mod builder;
mod config;
mod extract;
mod granular_key;
mod state;
mod validate;

pub use builder::DrilldownRequestBuilder;
pub use config::DrilldownConfig;
pub use extract::ResultValueExtractor;
pub use granular_key::{GranularKeyResolver, GranularKeys};
pub use state::DrilldownState;
pub use validate::{DimensionRangeValidator, DAILY_DIMENSIONS, MONTH_DIMENSION};

use tracing::{debug, Instrument};

use super::context::{RequestContext, ServiceContext};
use super::error::{CuratorError, PreconditionError};
use super::result::CuratorOutcome;
use super::runner::QueryRunner;
use crate::execution::ExecutionOutcome;
use crate::scheduler::TaskHandle;

/// Stateless; one instance serves every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrilldownCurator;

impl DrilldownCurator {
    pub const NAME: &'static str = "drilldown";

    /// Run the synchronous guards: cube support, then dimension and date range.
    ///
    /// Schedules nothing.
    pub fn check(
        &self,
        ctx: &ServiceContext,
        req: &RequestContext,
        config: &DrilldownConfig,
    ) -> Result<(), PreconditionError> {
        transition(req, DrilldownState::Created);
        if !ctx.settings.supports_cube(&req.request.cube) {
            return Err(PreconditionError::UnsupportedCube(req.request.cube.clone()));
        }
        DimensionRangeValidator::new(&ctx.settings)
            .validate(&config.dimension, req.request.num_days)?;
        transition(req, DrilldownState::GuardsChecked);
        Ok(())
    }

    /// Check the request and chain the drilldown onto `primary`.
    ///
    /// Returns without waiting for the primary query.
    pub fn process(
        &self,
        ctx: &ServiceContext,
        req: &RequestContext,
        config: &DrilldownConfig,
        primary: &TaskHandle<ExecutionOutcome>,
    ) -> Result<TaskHandle<CuratorOutcome>, PreconditionError> {
        self.check(ctx, req, config)?;
        Ok(self.chain(ctx, req, config, primary))
    }

    /// Register the continuation on `primary`. Callers must have run [`Self::check`].
    pub(crate) fn chain(
        &self,
        ctx: &ServiceContext,
        req: &RequestContext,
        config: &DrilldownConfig,
        primary: &TaskHandle<ExecutionOutcome>,
    ) -> TaskHandle<CuratorOutcome> {
        let span = tracing::info_span!("curator", curator = Self::NAME, request_id = %req.request_id);
        let task_ctx = ctx.clone();
        let task_req = req.clone();
        let task_config = config.clone();
        let handle = ctx.scheduler.and_then(primary, move |outcome| {
            async move { drill(&task_ctx, &task_req, &task_config, outcome).await }.instrument(span)
        });
        transition(req, DrilldownState::AwaitingPrimary);
        handle
    }
}

async fn drill(
    ctx: &ServiceContext,
    req: &RequestContext,
    config: &DrilldownConfig,
    primary: ExecutionOutcome,
) -> CuratorOutcome {
    let outcome = run_stages(ctx, req, config, primary).await;
    let terminal = DrilldownState::terminal(&outcome);
    match &outcome {
        // QueryRunner already logged it
        Err(CuratorError::ModelGeneration { .. }) | Ok(_) => {}
        Err(err) => req.log.log_failure(&err.to_string()),
    }
    transition(req, terminal);
    outcome
}

async fn run_stages(
    ctx: &ServiceContext,
    req: &RequestContext,
    config: &DrilldownConfig,
    primary: ExecutionOutcome,
) -> CuratorOutcome {
    transition(req, DrilldownState::ExtractingValues);
    let values = ResultValueExtractor::extract(&primary, &config.dimension)?;

    transition(req, DrilldownState::BuildingSecondaryRequest);
    let keys = GranularKeyResolver::new(ctx.plan_generator.as_ref()).resolve(
        &ctx.registry,
        &req.bucket,
        &req.request,
        req.log.as_ref(),
    )?;
    let request = DrilldownRequestBuilder::rewrite(&req.request, config, &keys);
    let request = DrilldownRequestBuilder::inject_membership_filter(request, config, values);

    transition(req, DrilldownState::GeneratingSecondaryModel);
    QueryRunner::run_observed(ctx, req, DrilldownCurator::NAME, request, |stage| {
        transition(req, DrilldownState::from(stage))
    })
    .await
}

fn transition(req: &RequestContext, state: DrilldownState) {
    debug!(
        request_id = %req.request_id,
        curator = DrilldownCurator::NAME,
        state = ?state,
        "drilldown state"
    );
}
