//! Plan, vet and execute one curator request.

use std::sync::Arc;

use tracing::debug;

use super::context::{RequestContext, ServiceContext};
use super::error::CuratorError;
use super::result::{CuratorOutcome, CuratorResult, RequestModelResult};
use crate::plan::{PlanResult, RequestModel, ValidationContext};
use crate::request::ReportingRequest;

/// A step of [`QueryRunner::run_observed`] reached after plan generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    /// The plan was generated and is about to be vetted.
    Validating,
    /// The plan passed validation and is being executed.
    Executing,
}

/// Runs a fully built request for a curator.
///
/// Plan generation or validation failures are logged to the request log and
/// become [`CuratorError::ModelGeneration`]. Execution failures are not
/// inspected; they are packaged into the result as-is.
pub struct QueryRunner;

impl QueryRunner {
    pub async fn run(
        ctx: &ServiceContext,
        req: &RequestContext,
        curator: &'static str,
        request: ReportingRequest,
    ) -> CuratorOutcome {
        Self::run_observed(ctx, req, curator, request, |_| {}).await
    }

    /// Like [`QueryRunner::run`], reporting each [`RunStage`] to `observe`
    /// as it is entered.
    pub async fn run_observed<F>(
        ctx: &ServiceContext,
        req: &RequestContext,
        curator: &'static str,
        request: ReportingRequest,
        observe: F,
    ) -> CuratorOutcome
    where
        F: Fn(RunStage),
    {
        let model = match Self::plan(ctx, req, curator, &request, &observe) {
            Ok(model) => model,
            Err(source) => {
                let message = source.to_string();
                req.log.log_failure(&format!(
                    "{curator}: failed to generate request model: {message}"
                ));
                return Err(CuratorError::ModelGeneration {
                    curator,
                    message,
                    source,
                });
            }
        };

        debug!(
            request_id = %req.request_id,
            curator,
            cube = %model.cube,
            "executing curator request"
        );
        observe(RunStage::Executing);
        let execution = ctx
            .executor
            .execute(&ctx.registry, &model, req.log.as_ref())
            .await;

        Ok(CuratorResult {
            curator,
            config: None,
            execution,
            model: RequestModelResult {
                request: Arc::new(request),
                model: Arc::new(model),
            },
        })
    }

    fn plan(
        ctx: &ServiceContext,
        req: &RequestContext,
        curator: &'static str,
        request: &ReportingRequest,
        observe: &dyn Fn(RunStage),
    ) -> PlanResult<RequestModel> {
        let model =
            ctx.plan_generator
                .generate(&ctx.registry, request, &req.bucket, req.log.as_ref())?;
        observe(RunStage::Validating);
        let validation = ValidationContext {
            registry: &ctx.registry,
            curator,
            request,
        };
        ctx.plan_validator.validate(&validation, &model)?;
        Ok(model)
    }
}
