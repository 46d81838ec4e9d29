use crate::curator::{CuratorError, CuratorOutcome, RunStage};

/// Progress of one drilldown invocation.
///
/// ```text
/// Created -> GuardsChecked -> AwaitingPrimary -+-> PrimaryFailed
///                                              +-> ExtractingValues -> BuildingSecondaryRequest
///   -> GeneratingSecondaryModel -+-> ModelFailed
///                                +-> Validating -> Executing -+-> ExecutionFailed
///                                                             +-> Completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrilldownState {
    Created,
    GuardsChecked,
    AwaitingPrimary,
    PrimaryFailed,
    ExtractingValues,
    BuildingSecondaryRequest,
    GeneratingSecondaryModel,
    ModelFailed,
    Validating,
    Executing,
    ExecutionFailed,
    Completed,
}

impl DrilldownState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            DrilldownState::PrimaryFailed
                | DrilldownState::ModelFailed
                | DrilldownState::ExecutionFailed
                | DrilldownState::Completed
        )
    }

    /// The terminal state a finished continuation ended in.
    pub fn terminal(outcome: &CuratorOutcome) -> Self {
        match outcome {
            Ok(result) if result.execution.is_ok() => DrilldownState::Completed,
            Ok(_) => DrilldownState::ExecutionFailed,
            Err(CuratorError::PrimaryFailure { .. })
            | Err(CuratorError::MissingDrillColumn { .. })
            | Err(CuratorError::Canceled { .. }) => DrilldownState::PrimaryFailed,
            Err(CuratorError::KeyResolution { .. }) | Err(CuratorError::ModelGeneration { .. }) => {
                DrilldownState::ModelFailed
            }
        }
    }
}

impl From<RunStage> for DrilldownState {
    fn from(stage: RunStage) -> Self {
        match stage {
            RunStage::Validating => DrilldownState::Validating,
            RunStage::Executing => DrilldownState::Executing,
        }
    }
}
