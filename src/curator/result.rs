use std::sync::Arc;

use super::config::CuratorConfig;
use super::error::CuratorError;
use crate::execution::ExecutionOutcome;
use crate::plan::RequestModel;
use crate::request::ReportingRequest;

/// What a curator's continuation resolves to.
pub type CuratorOutcome = Result<CuratorResult, CuratorError>;

/// The request a curator executed and the plan generated for it.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestModelResult {
    pub request: Arc<ReportingRequest>,
    pub model: Arc<RequestModel>,
}

/// The unit a curator hands back to its caller.
#[derive(Debug, Clone, PartialEq)]
pub struct CuratorResult {
    /// Name of the curator that produced this result.
    pub curator: &'static str,
    /// `None` once the curator has consumed its config.
    pub config: Option<CuratorConfig>,
    /// Rows or error from executing `model`, passed through as received.
    pub execution: ExecutionOutcome,
    pub model: RequestModelResult,
}
