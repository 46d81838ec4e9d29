//! # Drilldown
//!
//! Curator stages for a multi-stage report service. The centrepiece is the
//! drilldown curator, which takes the result of an already-executed primary
//! query and runs a dependent query breaking it down by one more dimension.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │              ReportingRequest + CuratorConfig           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [guards: cube, dimension, date range]
//! ┌─────────────────────────────────────────────────────────┐
//! │           Continuation on the primary TaskHandle        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [extract values ▸ resolve key ▸ rewrite]
//! ┌─────────────────────────────────────────────────────────┐
//! │            Secondary request (membership filter)        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [PlanGenerator ▸ PlanValidator ▸ QueryExecutor]
//! ┌─────────────────────────────────────────────────────────┐
//! │                      CuratorResult                      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Plan generation, query execution and the worker pool belong to the
//! surrounding service and are reached through the traits in [`plan`],
//! [`execution`] and [`scheduler`].

pub mod config;
pub mod curator;
pub mod execution;
pub mod plan;
pub mod request;
pub mod request_log;
pub mod scheduler;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{DrilldownSettings, Settings};
    pub use crate::curator::{
        CuratorConfig, CuratorError, CuratorOutcome, CuratorResult, Curators, DrilldownConfig,
        DrilldownCurator, PreconditionError, RequestContext, ServiceContext,
    };
    pub use crate::execution::{ExecutionError, ExecutionOutcome, QueryExecutor, Row, RowList, Value};
    pub use crate::plan::{PlanError, PlanGenerator, PlanValidator, RequestModel};
    pub use crate::request::{BucketParams, Field, Filter, ReportingRequest, SortBy};
    pub use crate::request_log::{RequestLog, TracingRequestLog};
    pub use crate::scheduler::{Scheduler, TaskExecutor, TaskHandle, TokioExecutor};
}

pub use curator::{CuratorConfig, CuratorResult, Curators, DrilldownCurator};
pub use request::{Field, ReportingRequest};
