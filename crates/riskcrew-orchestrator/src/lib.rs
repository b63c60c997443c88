//! Multi-agent risk orchestration for RiskCrew.
//!
//! A [`Router`] classifies free-text queries about a project's risk posture,
//! builds [`TaskUnit`]s for the responsible agents, and hands them to the
//! [`ExecutionEngine`], which runs them sequentially or under a coordinating
//! manager through a [`Gateway`].
//!
//! ```no_run
//! use riskcrew_orchestrator::{AgentRegistry, ModelGateway, Router};
//! use riskcrew_models::MockModel;
//! use std::sync::Arc;
//!
//! # async fn run() -> riskcrew_orchestrator::Result<()> {
//! let gateway = ModelGateway::new(Arc::new(MockModel::new("mock-model".to_string())));
//! let router = Router::new(Arc::new(AgentRegistry::standard()), Arc::new(gateway))?;
//! let answer = router.ask("What market trends affect the project?").await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

pub mod agents;
pub mod error;
pub mod executor;
pub mod gateway;
pub mod lifecycle;
pub mod pipeline;
pub mod registry;
pub mod routing;
pub mod task;

pub use agents::{AgentContext, AgentDefinition, AgentRole};
pub use error::{OrchestrationError, Result};
pub use executor::{Discipline, ExecutionEngine, ExecutionRun, RunOutput, StageOutput};
pub use gateway::{Gateway, GenerationRequest, ModelGateway};
pub use lifecycle::RunState;
pub use registry::AgentRegistry;
pub use routing::{classify, Route, Router, RoutingPlan};
pub use task::{Assignment, TaskUnit};
