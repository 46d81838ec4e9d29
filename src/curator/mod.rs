//! Curators: composable stages that rewrite a reporting request and may run
//! additional queries.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Curators                            │
//! │   CuratorConfig::{Default, Drilldown}  ──▶  exhaustive match │
//! └─────────────────────────────────────────────────────────────┘
//!            │                                   │
//!            ▼ submit                            ▼ and_then (primary rows)
//! ┌──────────────────────┐         ┌───────────────────────────────┐
//! │    DefaultCurator    │         │       DrilldownCurator        │
//! │  plan ▸ vet ▸ execute│         │ guards ▸ extract ▸ key ▸ build │
//! └──────────────────────┘         │      ▸ plan ▸ vet ▸ execute   │
//!                                  └───────────────────────────────┘
//! ```
//!
//! Every stage returns a [`TaskHandle`] immediately. A stage that rejects
//! the request up front reports a [`PreconditionError`] for itself only;
//! sibling stages are submitted regardless.

mod config;
mod context;
mod default;
pub mod drilldown;
mod error;
mod result;
mod runner;

pub use config::CuratorConfig;
pub use context::{RequestContext, ServiceContext};
pub use default::{execution_outcome, DefaultCurator};
pub use drilldown::{DrilldownConfig, DrilldownCurator};
pub use error::{ConfigParseError, CuratorError, PreconditionError};
pub use result::{CuratorOutcome, CuratorResult, RequestModelResult};
pub use runner::{QueryRunner, RunStage};

use tracing::warn;

use crate::execution::ExecutionOutcome;
use crate::scheduler::TaskHandle;

/// One curator's contribution to a request.
#[derive(Debug, Clone)]
pub struct CuratorSubmission {
    pub curator: &'static str,
    pub handle: Result<TaskHandle<CuratorOutcome>, PreconditionError>,
}

impl CuratorSubmission {
    /// Wait for the curator to finish.
    ///
    /// A curator rejected up front yields `None`.
    pub async fn outcome(self) -> Option<CuratorOutcome> {
        let curator = self.curator;
        let handle = self.handle.ok()?;
        Some(
            handle
                .await
                .unwrap_or_else(|_| Err(CuratorError::Canceled { curator })),
        )
    }
}

/// Dispatches curator configs to their curators.
#[derive(Debug, Clone, Copy, Default)]
pub struct Curators {
    default: DefaultCurator,
    drilldown: DrilldownCurator,
}

impl Curators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit the primary query, then every configured curator.
    ///
    /// The first submission is always the default curator. A `Default`
    /// entry in `configs` does not submit the primary query twice.
    pub fn process(
        &self,
        ctx: &ServiceContext,
        req: &RequestContext,
        configs: &[CuratorConfig],
    ) -> Vec<CuratorSubmission> {
        let primary = self.default.process(ctx, req);
        let mut primary_rows: Option<TaskHandle<ExecutionOutcome>> = None;
        let mut submissions = vec![CuratorSubmission {
            curator: DefaultCurator::NAME,
            handle: Ok(primary.clone()),
        }];

        for config in configs {
            let handle = match config {
                CuratorConfig::Default => continue,
                CuratorConfig::Drilldown(drilldown) => {
                    self.drilldown.check(ctx, req, drilldown).map(|()| {
                        // Projected only once some drilldown passes its guards.
                        let rows = primary_rows
                            .get_or_insert_with(|| execution_outcome(&ctx.scheduler, &primary));
                        self.drilldown.chain(ctx, req, drilldown, rows)
                    })
                }
            };

            if let Err(err) = &handle {
                warn!(
                    request_id = %req.request_id,
                    curator = config.curator(),
                    error = %err,
                    "curator rejected request"
                );
            }
            submissions.push(CuratorSubmission {
                curator: config.curator(),
                handle,
            });
        }

        submissions
    }
}
