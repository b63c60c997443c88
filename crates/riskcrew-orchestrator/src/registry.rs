//! Agent registry.
//!
//! Built once at startup, then frozen behind an `Arc` and shared read-only by
//! every run. There is no unregister and no interior mutability: once the
//! registry is shared, nothing can change it.

use crate::agents::{standard_agents, AgentDefinition, AgentRole};
use crate::error::{OrchestrationError, Result};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Registry mapping each role to its agent definition.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: HashMap<AgentRole, AgentDefinition>,
}

impl AgentRegistry {
    /// Creates a new empty agent registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the standard five-agent crew.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for agent in standard_agents() {
            registry.register(agent);
        }
        registry
    }

    /// Registers an agent.
    ///
    /// # Returns
    /// Returns `true` if the role was newly registered, `false` if it replaced an existing agent.
    pub fn register(&mut self, agent: AgentDefinition) -> bool {
        let role = agent.role;
        debug!(role = %role, delegation = agent.allow_delegation, "Registering agent");

        let was_new = self.agents.insert(role, agent).is_none();
        if !was_new {
            warn!(role = %role, "Agent replaced in registry");
        }
        was_new
    }

    /// Looks up the agent playing `role`.
    ///
    /// # Errors
    /// Returns [`OrchestrationError::UnknownRole`] if no agent is registered for it.
    pub fn lookup(&self, role: AgentRole) -> Result<&AgentDefinition> {
        debug!(role = %role, "Looking up agent");
        self.agents.get(&role).ok_or(OrchestrationError::UnknownRole(role))
    }

    /// Checks that every standard role is present.
    ///
    /// Call this at startup: routing may pick any role, so a gap here would
    /// otherwise only show up mid-run.
    ///
    /// # Errors
    /// Returns [`OrchestrationError::UnknownRole`] for the first missing role.
    pub fn validate(&self) -> Result<()> {
        AgentRole::ALL.into_iter().try_for_each(|role| self.lookup(role).map(|_| ()))
    }

    /// Lists registered agents in [`AgentRole::ALL`] order.
    pub fn list(&self) -> Vec<&AgentDefinition> {
        AgentRole::ALL.iter().filter_map(|role| self.agents.get(role)).collect()
    }

    pub fn contains(&self, role: AgentRole) -> bool {
        self.agents.contains_key(&role)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
