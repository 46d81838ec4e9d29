//! The primary query stage.

use tracing::Instrument;

use super::context::{RequestContext, ServiceContext};
use super::result::CuratorOutcome;
use super::runner::QueryRunner;
use crate::execution::{ExecutionError, ExecutionOutcome};
use crate::scheduler::{Scheduler, TaskHandle};

/// Plans and executes the incoming request unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCurator;

impl DefaultCurator {
    pub const NAME: &'static str = "default";

    /// Submit the primary query to the pool.
    pub fn process(&self, ctx: &ServiceContext, req: &RequestContext) -> TaskHandle<CuratorOutcome> {
        let span = tracing::info_span!("curator", curator = Self::NAME, request_id = %req.request_id);
        let task_ctx = ctx.clone();
        let task_req = req.clone();
        ctx.scheduler.submit(
            async move {
                let request = (*task_req.request).clone();
                QueryRunner::run(&task_ctx, &task_req, Self::NAME, request).await
            }
            .instrument(span),
        )
    }
}

/// Narrow a curator outcome to the rows its query produced.
///
/// A failed curator surfaces as an execution error carrying its message, so
/// dependent stages see a single result-or-error value.
pub fn execution_outcome(
    scheduler: &Scheduler,
    primary: &TaskHandle<CuratorOutcome>,
) -> TaskHandle<ExecutionOutcome> {
    scheduler.and_then(primary, |outcome| async move {
        match outcome {
            Ok(result) => result.execution,
            Err(err) => Err(ExecutionError::Failed(err.to_string())),
        }
    })
}

