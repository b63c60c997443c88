//! Execution engine.
//!
//! Drives a list of task units under one of two disciplines and produces the
//! aggregated text result. Each call to [`ExecutionEngine::execute`] allocates
//! its own [`ExecutionRun`]; the engine itself holds only shared, read-only
//! handles, so one engine can serve concurrent runs.

use crate::agents::{AgentDefinition, AgentRole};
use crate::error::{OrchestrationError, Result};
use crate::gateway::{Gateway, GenerationRequest};
use crate::lifecycle::RunState;
use crate::registry::AgentRegistry;
use crate::task::TaskUnit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// How a run's task units are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    /// Each task in order, one gateway call per task, no data flow between stages.
    Sequential,
    /// One task handed to a coordinator in a single gateway call.
    ManagerLed,
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => f.write_str("sequential"),
            Self::ManagerLed => f.write_str("manager-led"),
        }
    }
}

/// Output of one sequential stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageOutput {
    /// 1-based position in the run.
    pub stage: usize,
    /// Agent that produced the text.
    pub agent: AgentRole,
    /// Instruction the stage answered.
    pub instruction: String,
    /// Gateway result.
    pub text: String,
}

/// Final result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunOutput {
    /// Sequential: one fragment per stage, in task order.
    Fragments {
        /// Stage outputs.
        stages: Vec<StageOutput>,
    },
    /// Manager-led: the coordinator's synthesized answer.
    Synthesized {
        /// Coordinating agent.
        coordinator: AgentRole,
        /// Answer text.
        text: String,
    },
}

impl RunOutput {
    /// Fragment texts in stage order. A synthesized run yields one fragment.
    pub fn texts(&self) -> Vec<String> {
        match self {
            Self::Fragments { stages } => stages.iter().map(|s| s.text.clone()).collect(),
            Self::Synthesized { text, .. } => vec![text.clone()],
        }
    }

    /// Renders the run as one plain-text report.
    ///
    /// A single fragment is returned as is; several are laid out stage by
    /// stage under a heading naming the agent.
    pub fn render(&self) -> String {
        match self {
            Self::Synthesized { text, .. } => text.clone(),
            Self::Fragments { stages } if stages.len() == 1 => stages[0].text.clone(),
            Self::Fragments { stages } => stages
                .iter()
                .map(|s| format!("{}. {}\n\n{}", s.stage, s.agent.display_name(), s.text.trim_end()))
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}

/// Per-run accumulator. Never shared between runs.
#[derive(Debug)]
pub struct ExecutionRun {
    discipline: Discipline,
    state: RunState,
    fragments: Vec<StageOutput>,
}

impl ExecutionRun {
    #[must_use]
    pub fn new(discipline: Discipline) -> Self {
        Self { discipline, state: RunState::Pending, fragments: Vec::new() }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// Fragments collected so far.
    pub fn fragments(&self) -> &[StageOutput] {
        &self.fragments
    }

    /// Moves the run to `to`.
    ///
    /// # Errors
    /// Returns [`OrchestrationError::InvalidTransition`] for illegal edges.
    pub fn transition(&mut self, to: RunState) -> Result<()> {
        if !self.state.can_transition_to(to) {
            error!(from = ?self.state, to = ?to, "Invalid run state transition");
            return Err(OrchestrationError::InvalidTransition { from: self.state, to });
        }
        debug!(from = ?self.state, to = ?to, "Run state transition");
        self.state = to;
        Ok(())
    }

    fn record(&mut self, output: StageOutput) {
        self.fragments.push(output);
    }

    /// Marks the run failed and drops everything it collected.
    fn fail(&mut self) -> Result<()> {
        self.fragments.clear();
        self.transition(RunState::Failed)
    }
}

/// Runs task units against the gateway.
#[derive(Clone)]
pub struct ExecutionEngine {
    registry: Arc<AgentRegistry>,
    gateway: Arc<dyn Gateway>,
}

impl fmt::Debug for ExecutionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionEngine")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl ExecutionEngine {
    #[must_use]
    pub fn new(registry: Arc<AgentRegistry>, gateway: Arc<dyn Gateway>) -> Self {
        Self { registry, gateway }
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Executes `tasks` under `discipline`.
    ///
    /// Every referenced role is resolved before the first gateway call, so a
    /// misconfigured registry fails the run without side effects.
    ///
    /// # Errors
    /// - [`OrchestrationError::NoTasks`] for an empty task list
    /// - [`OrchestrationError::InvalidAssignment`] when tasks don't fit the discipline
    /// - [`OrchestrationError::UnknownRole`] for unregistered agents
    /// - [`OrchestrationError::StageFailed`] when a gateway call fails; no
    ///   partial output is returned
    pub async fn execute(&self, tasks: &[TaskUnit], discipline: Discipline) -> Result<RunOutput> {
        Self::check_assignments(tasks, discipline)?;
        for task in tasks {
            for role in task.agents() {
                self.registry.lookup(role)?;
            }
        }

        let mut run = ExecutionRun::new(discipline);
        let started = Instant::now();
        info!(discipline = %discipline, tasks = tasks.len(), "Starting run");
        run.transition(RunState::Running)?;

        let result = match discipline {
            Discipline::Sequential => self.run_sequential(&mut run, tasks).await,
            Discipline::ManagerLed => self.run_manager_led(&tasks[0]).await,
        };

        match result {
            Ok(output) => {
                run.transition(RunState::Completed)?;
                info!(
                    discipline = %discipline,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Run completed"
                );
                Ok(output)
            }
            Err(err) => {
                run.fail()?;
                error!(discipline = %discipline, error = %err, "Run failed");
                Err(err)
            }
        }
    }

    fn check_assignments(tasks: &[TaskUnit], discipline: Discipline) -> Result<()> {
        if tasks.is_empty() {
            return Err(OrchestrationError::NoTasks);
        }

        match discipline {
            Discipline::Sequential => {
                if let Some(position) = tasks.iter().position(TaskUnit::is_managed) {
                    return Err(OrchestrationError::InvalidAssignment(format!(
                        "task {} has a coordinator; sequential runs take single-agent tasks",
                        position + 1
                    )));
                }
            }
            Discipline::ManagerLed => {
                if tasks.len() != 1 {
                    return Err(OrchestrationError::InvalidAssignment(format!(
                        "manager-led runs take exactly one task, got {}",
                        tasks.len()
                    )));
                }
                if !tasks[0].is_managed() {
                    return Err(OrchestrationError::InvalidAssignment(
                        "manager-led task has no coordinator".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    async fn run_sequential(&self, run: &mut ExecutionRun, tasks: &[TaskUnit]) -> Result<RunOutput> {
        for (index, task) in tasks.iter().enumerate() {
            let stage = index + 1;
            let agent = self.registry.lookup(task.lead_agent())?;
            let text = self.call(stage, agent, GenerationRequest::new(agent, task)).await?;

            run.record(StageOutput {
                stage,
                agent: agent.role,
                instruction: task.instruction.clone(),
                text,
            });
        }

        Ok(RunOutput::Fragments { stages: run.fragments().to_vec() })
    }

    async fn run_manager_led(&self, task: &TaskUnit) -> Result<RunOutput> {
        let coordinator = self.registry.lookup(task.lead_agent())?;
        let request =
            GenerationRequest::new(coordinator, task).with_collaborators(task.collaborators().to_vec());

        let text = self.call(1, coordinator, request).await?;
        Ok(RunOutput::Synthesized { coordinator: coordinator.role, text })
    }

    async fn call(
        &self,
        stage: usize,
        agent: &AgentDefinition,
        request: GenerationRequest,
    ) -> Result<String> {
        debug!(stage, agent = %agent.role, "Stage started");
        match self.gateway.generate(&request).await {
            Ok(text) => {
                debug!(stage, agent = %agent.role, output_len = text.len(), "Stage finished");
                Ok(text)
            }
            Err(source) => {
                error!(stage, agent = %agent.role, error = %source, "Stage failed");
                Err(OrchestrationError::StageFailed { stage, role: agent.role, source })
            }
        }
    }
}
