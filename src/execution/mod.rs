//! Query execution boundary.
//!
//! Curators never talk to a database. They hand a validated plan to a
//! [`QueryExecutor`] and receive a [`RowList`] or an [`ExecutionError`],
//! which they pass on without interpretation.

mod rows;

pub use rows::{Row, RowList, Value};

use async_trait::async_trait;

use crate::plan::RequestModel;
use crate::request_log::RequestLog;

/// Outcome of one query execution.
pub type ExecutionOutcome = Result<RowList, ExecutionError>;

/// Failure reported by the execution collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    #[error("query execution failed: {0}")]
    Failed(String),

    #[error("query timed out after {0} ms")]
    Timeout(u64),
}

/// Runs compiled plans against the reporting backend.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(
        &self,
        registry: &str,
        plan: &RequestModel,
        log: &dyn RequestLog,
    ) -> ExecutionOutcome;
}
