//! Service- and request-scoped values threaded through the curators.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::DrilldownSettings;
use crate::execution::QueryExecutor;
use crate::plan::{NoopPlanValidator, PlanGenerator, PlanValidator};
use crate::request::{BucketParams, ReportingRequest};
use crate::request_log::{RequestLog, TracingRequestLog};
use crate::scheduler::Scheduler;

/// Collaborators owned by the surrounding service.
///
/// Cheap to clone; curators clone it into their continuations.
#[derive(Clone)]
pub struct ServiceContext {
    pub registry: String,
    pub settings: Arc<DrilldownSettings>,
    pub scheduler: Scheduler,
    pub plan_generator: Arc<dyn PlanGenerator>,
    pub plan_validator: Arc<dyn PlanValidator>,
    pub executor: Arc<dyn QueryExecutor>,
}

impl ServiceContext {
    pub fn new(
        registry: impl Into<String>,
        settings: DrilldownSettings,
        scheduler: Scheduler,
        plan_generator: Arc<dyn PlanGenerator>,
        executor: Arc<dyn QueryExecutor>,
    ) -> Self {
        Self {
            registry: registry.into(),
            settings: Arc::new(settings),
            scheduler,
            plan_generator,
            plan_validator: Arc::new(NoopPlanValidator),
            executor,
        }
    }

    pub fn with_plan_validator(mut self, validator: Arc<dyn PlanValidator>) -> Self {
        self.plan_validator = validator;
        self
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("registry", &self.registry)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// One incoming request, as seen by every curator that handles it.
#[derive(Clone)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub request: Arc<ReportingRequest>,
    pub bucket: BucketParams,
    pub log: Arc<dyn RequestLog>,
}

impl RequestContext {
    /// Wrap `request` with a fresh id and a tracing-backed request log.
    pub fn new(request: ReportingRequest) -> Self {
        let request_id = Uuid::new_v4();
        Self {
            request_id,
            request: Arc::new(request),
            bucket: BucketParams::default(),
            log: Arc::new(TracingRequestLog::new(request_id)),
        }
    }

    pub fn with_bucket(mut self, bucket: BucketParams) -> Self {
        self.bucket = bucket;
        self
    }

    pub fn with_log(mut self, log: Arc<dyn RequestLog>) -> Self {
        self.log = log;
        self
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("request_id", &self.request_id)
            .field("request", &self.request)
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}
