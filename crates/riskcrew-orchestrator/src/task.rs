//! Task units: one instruction bound to the agent(s) responsible for it.

use crate::agents::AgentRole;
use serde::{Deserialize, Serialize};

/// Who answers a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assignment {
    /// One agent answers directly.
    Single(AgentRole),
    /// A coordinator answers, drawing on a pool of collaborators.
    Managed {
        /// Agent that owns the task and synthesizes the answer.
        coordinator: AgentRole,
        /// Agents the coordinator may delegate to.
        collaborators: Vec<AgentRole>,
    },
}

/// A unit of work handed to the execution engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUnit {
    /// The request to satisfy.
    pub instruction: String,
    /// Shape of the desired answer. A hint to the model, never validated.
    pub expected_output: String,
    /// Responsible agent(s).
    pub assignment: Assignment,
}

impl TaskUnit {
    /// A task answered by a single agent.
    #[must_use]
    pub fn single(
        instruction: impl Into<String>,
        expected_output: impl Into<String>,
        agent: AgentRole,
    ) -> Self {
        Self {
            instruction: instruction.into(),
            expected_output: expected_output.into(),
            assignment: Assignment::Single(agent),
        }
    }

    /// A task owned by `coordinator` with `collaborators` available for delegation.
    #[must_use]
    pub fn managed(
        instruction: impl Into<String>,
        expected_output: impl Into<String>,
        coordinator: AgentRole,
        collaborators: Vec<AgentRole>,
    ) -> Self {
        Self {
            instruction: instruction.into(),
            expected_output: expected_output.into(),
            assignment: Assignment::Managed { coordinator, collaborators },
        }
    }

    /// The agent whose gateway call produces this task's output.
    pub fn lead_agent(&self) -> AgentRole {
        match &self.assignment {
            Assignment::Single(agent) => *agent,
            Assignment::Managed { coordinator, .. } => *coordinator,
        }
    }

    /// Collaborators, empty for single-agent tasks.
    pub fn collaborators(&self) -> &[AgentRole] {
        match &self.assignment {
            Assignment::Single(_) => &[],
            Assignment::Managed { collaborators, .. } => collaborators,
        }
    }

    /// Every agent the task references, lead first.
    pub fn agents(&self) -> Vec<AgentRole> {
        std::iter::once(self.lead_agent()).chain(self.collaborators().iter().copied()).collect()
    }

    pub fn is_managed(&self) -> bool {
        matches!(self.assignment, Assignment::Managed { .. })
    }
}
