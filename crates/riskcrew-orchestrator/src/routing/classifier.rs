//! Keyword query classifier.
//!
//! Case-insensitive substring matching over fixed keyword groups, checked in
//! order, first match wins. Substring means "delay" also matches "delayed" and
//! "report" matches "reporting"; overlapping queries go to the earliest group.

use crate::agents::AgentRole;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phrases that request the full manager-led pipeline.
pub const FULL_PIPELINE_KEYWORDS: [&str; 4] =
    ["full analysis", "market analysis", "comprehensive report", "generate report"];

/// Single-agent keyword groups in match order.
pub const AGENT_KEYWORDS: [(AgentRole, &[&str]); 4] = [
    (AgentRole::MarketAnalysis, &["market", "economic"]),
    (AgentRole::RiskScoring, &["finance", "transaction"]),
    (AgentRole::StatusTracking, &["status", "delay", "resource"]),
    (AgentRole::Reporting, &["report", "alert"]),
];

/// Agent answering queries that match no keyword.
pub const FALLBACK_AGENT: AgentRole = AgentRole::ProjectRiskManager;

/// Where a query goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Manager-led run across the whole crew.
    FullPipeline,
    /// One agent answers directly.
    Agent(AgentRole),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::FullPipeline => write!(f, "full pipeline"),
            Route::Agent(role) => write!(f, "{}", role.display_name()),
        }
    }
}

/// Classifies `query`. Pure and total.
pub fn classify(query: &str) -> Route {
    let lower = query.to_lowercase();

    if FULL_PIPELINE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Route::FullPipeline;
    }

    AGENT_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(Route::Agent(FALLBACK_AGENT), |(role, _)| Route::Agent(*role))
}
