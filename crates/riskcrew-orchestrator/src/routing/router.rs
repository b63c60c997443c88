//! Query router: the inbound surface of the orchestrator.

use super::classifier::{classify, Route};
use crate::error::{OrchestrationError, Result};
use crate::executor::{Discipline, ExecutionEngine, RunOutput};
use crate::gateway::Gateway;
use crate::pipeline;
use crate::registry::AgentRegistry;
use crate::task::TaskUnit;
use std::sync::Arc;
use tracing::{debug, info};

/// Tasks and discipline chosen for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingPlan {
    pub route: Route,
    pub discipline: Discipline,
    pub tasks: Vec<TaskUnit>,
}

/// Routes queries to agents and runs them.
#[derive(Debug, Clone)]
pub struct Router {
    engine: ExecutionEngine,
}

impl Router {
    /// Creates a router over a populated registry.
    ///
    /// # Errors
    /// Returns [`OrchestrationError::UnknownRole`] if a standard role is missing.
    pub fn new(registry: Arc<AgentRegistry>, gateway: Arc<dyn Gateway>) -> Result<Self> {
        registry.validate()?;
        debug!(agents = registry.len(), "Router ready");
        Ok(Self { engine: ExecutionEngine::new(registry, gateway) })
    }

    pub fn registry(&self) -> &AgentRegistry {
        self.engine.registry()
    }

    /// Classifies a query without running anything.
    pub fn classify(&self, query: &str) -> Route {
        classify(query)
    }

    /// Builds the tasks a query would run.
    pub fn plan(&self, query: &str) -> RoutingPlan {
        let route = classify(query);
        let (discipline, tasks) = match route {
            Route::FullPipeline => {
                (Discipline::ManagerLed, vec![pipeline::full_pipeline_task(query)])
            }
            Route::Agent(role) => {
                (Discipline::Sequential, vec![pipeline::single_agent_task(query, role)])
            }
        };
        RoutingPlan { route, discipline, tasks }
    }

    /// Answers a free-text query.
    ///
    /// # Errors
    /// Returns [`OrchestrationError::EmptyQuery`] for blank input (no gateway
    /// call is made) or [`OrchestrationError::StageFailed`] if the model call fails.
    pub async fn ask(&self, query: &str) -> Result<String> {
        if query.trim().is_empty() {
            return Err(OrchestrationError::EmptyQuery);
        }

        let plan = self.plan(query);
        info!(route = %plan.route, discipline = %plan.discipline, "Routing query");

        let output = self.engine.execute(&plan.tasks, plan.discipline).await?;
        Ok(output.render())
    }

    /// Runs the fixed four-stage pipeline and returns the fragments in stage order.
    ///
    /// # Errors
    /// Returns [`OrchestrationError::StageFailed`] for the first failing stage.
    pub async fn run_fixed_pipeline(&self) -> Result<Vec<String>> {
        Ok(self.run_fixed_pipeline_output().await?.texts())
    }

    /// Runs the fixed four-stage pipeline, keeping each stage's agent and instruction.
    ///
    /// # Errors
    /// Returns [`OrchestrationError::StageFailed`] for the first failing stage.
    pub async fn run_fixed_pipeline_output(&self) -> Result<RunOutput> {
        info!("Running fixed pipeline");
        let tasks = pipeline::fixed_pipeline_tasks();
        self.engine.execute(&tasks, Discipline::Sequential).await
    }

    /// Runs a custom risk analysis.
    ///
    /// A blank or missing `request` uses the default Project Phoenix request.
    /// Manager-led hands it to the Project Risk Manager with the whole crew;
    /// sequential runs it as the first stage of the fixed pipeline.
    ///
    /// # Errors
    /// Returns [`OrchestrationError::StageFailed`] if a model call fails.
    pub async fn run_analysis(
        &self,
        request: Option<&str>,
        discipline: Discipline,
    ) -> Result<RunOutput> {
        let tasks = match discipline {
            Discipline::ManagerLed => vec![pipeline::managed_analysis_task(request)],
            Discipline::Sequential => pipeline::sequential_analysis_tasks(request),
        };
        info!(discipline = %discipline, custom = request.is_some(), "Running analysis");
        self.engine.execute(&tasks, discipline).await
    }
}
