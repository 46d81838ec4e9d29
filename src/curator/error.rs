//! Curator error types.

use crate::plan::PlanError;

/// A curator config that could not be parsed.
///
/// `errors` is never empty; no partially parsed config is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {curator} config: {}", errors.join("; "))]
pub struct ConfigParseError {
    pub curator: String,
    pub errors: Vec<String>,
}

impl ConfigParseError {
    pub fn new(curator: impl Into<String>, errors: Vec<String>) -> Self {
        debug_assert!(!errors.is_empty());
        Self {
            curator: curator.into(),
            errors,
        }
    }
}

/// A request a curator refuses before scheduling any work.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionError {
    #[error("cube '{0}' is not supported for drilldown")]
    UnsupportedCube(String),

    #[error("'{0}' is not a valid drilldown dimension")]
    InvalidDimension(String),

    #[error(
        "date range of {num_days} days is too large for a '{dimension}' drilldown (must be under {limit})"
    )]
    RangeExceeded {
        dimension: String,
        num_days: u32,
        limit: u32,
    },
}

/// Failures raised inside a curator's continuation.
///
/// Execution failures of the curator's own query are not errors here: they
/// travel unmodified inside [`crate::curator::CuratorResult::execution`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CuratorError {
    /// The query this curator depends on already failed.
    #[error("{curator}: primary query failed: {message}")]
    PrimaryFailure {
        curator: &'static str,
        message: String,
    },

    /// The primary result does not publish the column being drilled into.
    #[error("{curator}: primary result has no column '{alias}'")]
    MissingDrillColumn {
        curator: &'static str,
        alias: String,
    },

    /// Secondary rows cannot be correlated with the primary grouping.
    #[error("{curator}: cannot resolve join key: {message}")]
    KeyResolution {
        curator: &'static str,
        message: String,
    },

    /// The curator's request could not be planned, or its plan was rejected.
    #[error("{curator}: bad request: {message}")]
    ModelGeneration {
        curator: &'static str,
        message: String,
        #[source]
        source: PlanError,
    },

    /// The scheduler dropped the curator's task.
    #[error("{curator}: task canceled")]
    Canceled { curator: &'static str },
}

impl CuratorError {
    /// Name of the curator stage that failed.
    pub fn label(&self) -> &'static str {
        match self {
            CuratorError::PrimaryFailure { curator, .. }
            | CuratorError::MissingDrillColumn { curator, .. }
            | CuratorError::KeyResolution { curator, .. }
            | CuratorError::ModelGeneration { curator, .. }
            | CuratorError::Canceled { curator } => curator,
        }
    }
}
