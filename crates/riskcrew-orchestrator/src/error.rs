// Error types for orchestration

use crate::agents::AgentRole;
use crate::lifecycle::RunState;
use riskcrew_abstraction::ModelError;
use thiserror::Error;

/// Result type for orchestration operations
pub type Result<T> = std::result::Result<T, OrchestrationError>;

/// Orchestration errors
#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// A task referenced a role the registry does not hold
    #[error("Unknown agent role: {0}")]
    UnknownRole(AgentRole),

    /// Query was empty or whitespace only
    #[error("Query is empty")]
    EmptyQuery,

    /// A gateway call failed while running a stage
    #[error("Stage {stage} ({role}) failed: {source}")]
    StageFailed {
        /// 1-based stage index within the run
        stage: usize,
        /// Agent that was executing the stage
        role: AgentRole,
        /// Underlying gateway failure
        #[source]
        source: ModelError,
    },

    /// A run was started with nothing to execute
    #[error("No tasks to execute")]
    NoTasks,

    /// A task's assignment does not fit the requested discipline
    #[error("Invalid task assignment: {0}")]
    InvalidAssignment(String),

    /// Run state machine was driven through an illegal edge
    #[error("Invalid run state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        /// State the run was in
        from: RunState,
        /// State that was requested
        to: RunState,
    },
}

impl OrchestrationError {
    /// Returns the gateway error behind a failed stage, if any.
    pub fn model_error(&self) -> Option<&ModelError> {
        match self {
            Self::StageFailed { source, .. } => Some(source),
            _ => None,
        }
    }

    /// `true` if the run failed because the gateway timed out.
    pub fn is_timeout(&self) -> bool {
        self.model_error().is_some_and(ModelError::is_timeout)
    }

    /// `true` if the run failed because the gateway could not be used.
    pub fn is_unavailable(&self) -> bool {
        self.model_error().is_some_and(ModelError::is_unavailable)
    }
}
