//! Agent definitions.
//!
//! An agent is pure data: a role, the goal it pursues, the persona text that
//! frames its answers, and a bag of background facts. Behavior lives in the
//! gateway that turns a definition plus a task into a model call.

pub mod definitions;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use definitions::{
    market_analysis_agent, project_risk_manager_agent, reporting_agent, risk_scoring_agent,
    standard_agents, status_tracking_agent,
};

/// The fixed set of roles an agent can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Coordinator and default answerer.
    ProjectRiskManager,
    /// External market and economic risk.
    MarketAnalysis,
    /// Financial risk scoring.
    RiskScoring,
    /// Internal progress, schedule and resourcing.
    StatusTracking,
    /// Reports and alerts for decision-makers.
    Reporting,
}

impl AgentRole {
    /// Every role, in registry listing order.
    pub const ALL: [Self; 5] = [
        Self::ProjectRiskManager,
        Self::MarketAnalysis,
        Self::RiskScoring,
        Self::StatusTracking,
        Self::Reporting,
    ];

    /// Stable identifier used in config, CLI flags and JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProjectRiskManager => "project_risk_manager",
            Self::MarketAnalysis => "market_analysis",
            Self::RiskScoring => "risk_scoring",
            Self::StatusTracking => "status_tracking",
            Self::Reporting => "reporting",
        }
    }

    /// Human-facing role name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ProjectRiskManager => "Project Risk Manager",
            Self::MarketAnalysis => "Market Analysis Agent",
            Self::RiskScoring => "Risk Scoring Agent",
            Self::StatusTracking => "Project Status Tracking Agent",
            Self::Reporting => "Reporting Agent",
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for AgentRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| format!("Unknown agent role: {}", s))
    }
}

/// Background facts an agent "knows", passed verbatim to the model.
///
/// Keys keep their insertion order so prompts are stable between runs.
/// Inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentContext {
    entries: Vec<(String, String)>,
}

impl AgentContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts or replaces an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Looks up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An agent as registered at startup. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDefinition {
    /// Unique key.
    pub role: AgentRole,
    /// Single-sentence goal.
    pub objective: String,
    /// Behavioral framing ("backstory").
    pub persona: String,
    /// Domain facts.
    pub context: AgentContext,
    /// Whether the agent may hand sub-tasks to collaborators when it
    /// coordinates a manager-led run.
    pub allow_delegation: bool,
}

impl AgentDefinition {
    /// Creates a definition with an empty context and delegation disabled.
    #[must_use]
    pub fn new(role: AgentRole, objective: impl Into<String>, persona: impl Into<String>) -> Self {
        Self {
            role,
            objective: objective.into(),
            persona: persona.into(),
            context: AgentContext::new(),
            allow_delegation: false,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: AgentContext) -> Self {
        self.context = context;
        self
    }

    #[must_use]
    pub fn with_delegation(mut self, allow: bool) -> Self {
        self.allow_delegation = allow;
        self
    }

    /// Human-facing name, taken from the role.
    pub fn name(&self) -> &'static str {
        self.role.display_name()
    }
}
