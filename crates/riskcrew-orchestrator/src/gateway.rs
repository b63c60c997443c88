//! Language-model gateway.
//!
//! The engine never talks to a [`Model`] directly. It describes each call as a
//! [`GenerationRequest`] and hands it to a [`Gateway`]. Every call is
//! independent: the request carries all the agent framing, and no
//! conversation is kept between calls.

use crate::agents::{AgentContext, AgentDefinition, AgentRole};
use crate::task::TaskUnit;
use async_trait::async_trait;
use riskcrew_abstraction::{ChatMessage, Model, ModelError};
use std::fmt::{self, Write};
use std::sync::Arc;
use tracing::{debug, error};

/// Everything the model needs for one task execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Agent answering the request.
    pub agent: AgentRole,
    /// The agent's single-sentence goal.
    pub objective: String,
    /// The agent's persona text.
    pub persona: String,
    /// The agent's domain facts.
    pub context: AgentContext,
    /// The request to satisfy.
    pub instruction: String,
    /// Hint describing the desired answer.
    pub expected_output: String,
    /// Agents available for delegation. Empty unless the run is manager-led.
    pub collaborators: Vec<AgentRole>,
}

impl GenerationRequest {
    /// Builds the request for `agent` executing `task`.
    pub fn new(agent: &AgentDefinition, task: &TaskUnit) -> Self {
        Self {
            agent: agent.role,
            objective: agent.objective.clone(),
            persona: agent.persona.clone(),
            context: agent.context.clone(),
            instruction: task.instruction.clone(),
            expected_output: task.expected_output.clone(),
            collaborators: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_collaborators(mut self, collaborators: Vec<AgentRole>) -> Self {
        self.collaborators = collaborators;
        self
    }
}

/// The opaque text-generation capability the engine depends on.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Produces the agent's answer to the request.
    ///
    /// # Errors
    /// Returns [`ModelError::Timeout`] or an unavailability error. The engine
    /// propagates both without retrying.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ModelError>;
}

/// Gateway backed by a chat [`Model`].
#[derive(Clone)]
pub struct ModelGateway {
    model: Arc<dyn Model + Send + Sync>,
}

impl fmt::Debug for ModelGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelGateway")
            .field("model_id", &self.model.model_id())
            .finish()
    }
}

impl ModelGateway {
    /// Creates a gateway over `model` using provider-default parameters.
    #[must_use]
    pub fn new(model: Arc<dyn Model + Send + Sync>) -> Self {
        Self { model }
    }

    pub fn model_id(&self) -> &str {
        self.model.model_id()
    }

    /// Assembles the two-message conversation sent for a request.
    ///
    /// The system message frames the agent (role, goal, persona, facts); the
    /// user message carries the task and, for coordinators, who they can
    /// delegate to.
    pub fn build_messages(request: &GenerationRequest) -> Vec<ChatMessage> {
        let mut system = format!(
            "You are the {}.\nYour goal: {}\n\n{}",
            request.agent.display_name(),
            request.objective,
            request.persona
        );
        if !request.context.is_empty() {
            system.push_str("\n\nBackground context:");
            for (key, value) in request.context.iter() {
                let _ = write!(system, "\n- {}: {}", key, value);
            }
        }

        let mut user = format!(
            "{}\n\nExpected output: {}",
            request.instruction, request.expected_output
        );
        if !request.collaborators.is_empty() {
            user.push_str("\n\nCollaborators available for delegation:");
            for collaborator in &request.collaborators {
                let _ = write!(user, "\n- {}", collaborator.display_name());
            }
        }

        vec![ChatMessage::system(system), ChatMessage::user(user)]
    }
}

#[async_trait]
impl Gateway for ModelGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ModelError> {
        let messages = Self::build_messages(request);
        debug!(
            agent = %request.agent,
            model_id = %self.model.model_id(),
            collaborators = request.collaborators.len(),
            "Submitting generation request"
        );

        let response = self
            .model
            .generate_chat_completion(&messages, None)
            .await
            .map_err(|e| {
                error!(agent = %request.agent, error = %e, "Model generation failed");
                e
            })?;

        debug!(
            agent = %request.agent,
            response_len = response.content.len(),
            "Generation completed"
        );
        Ok(response.content)
    }
}
