//! Task builders for the routes and the standard pipelines.

use crate::agents::AgentRole;
use crate::task::TaskUnit;

pub const SINGLE_AGENT_EXPECTED_OUTPUT: &str = "A detailed and helpful response to the user's query.";

pub const FULL_PIPELINE_EXPECTED_OUTPUT: &str =
    "A comprehensive analysis report addressing the specific request.";

/// Request used by [`managed_analysis_task`] and [`sequential_analysis_tasks`] when the
/// caller gives none.
pub const DEFAULT_ANALYSIS_REQUEST: &str = "Assess the overall risk for Project Phoenix and \
generate a comprehensive report covering market conditions, financial risks, project status, \
and mitigation strategies.";

pub const ANALYSIS_EXPECTED_OUTPUT: &str =
    "A detailed risk assessment report with actionable insights based on the specific request.";

/// Agents the coordinator can delegate to, in the order they are offered.
pub const COLLABORATORS: [AgentRole; 4] = [
    AgentRole::MarketAnalysis,
    AgentRole::RiskScoring,
    AgentRole::StatusTracking,
    AgentRole::Reporting,
];

/// The four fixed stages as (agent, instruction, expected output).
pub const FIXED_STAGES: [(AgentRole, &str, &str); 4] = [
    (
        AgentRole::ProjectRiskManager,
        "Assess the overall risk for Project Phoenix and generate a mitigation report.",
        "A detailed report highlighting potential risks and strategies to mitigate them.",
    ),
    (
        AgentRole::MarketAnalysis,
        "Analyze market conditions that may impact Project Phoenix's success.",
        "A comprehensive market analysis report with key trends and threats.",
    ),
    (
        AgentRole::RiskScoring,
        "Evaluate risk factors and provide a numerical risk score for Project Phoenix.",
        "A clear risk score (1-10) with reasoning.",
    ),
    (
        AgentRole::StatusTracking,
        "Monitor current project progress and highlight delays or issues.",
        "A real-time status update report identifying bottlenecks or blockers.",
    ),
];

/// A query answered directly by `agent`.
pub fn single_agent_task(query: &str, agent: AgentRole) -> TaskUnit {
    TaskUnit::single(query, SINGLE_AGENT_EXPECTED_OUTPUT, agent)
}

/// A query coordinated by the Project Risk Manager across the whole crew.
pub fn full_pipeline_task(query: &str) -> TaskUnit {
    TaskUnit::managed(
        query,
        FULL_PIPELINE_EXPECTED_OUTPUT,
        AgentRole::ProjectRiskManager,
        COLLABORATORS.to_vec(),
    )
}

/// The fixed sequential pipeline. Input-independent.
pub fn fixed_pipeline_tasks() -> Vec<TaskUnit> {
    FIXED_STAGES
        .iter()
        .map(|(agent, instruction, expected)| TaskUnit::single(*instruction, *expected, *agent))
        .collect()
}

/// Resolves an optional analysis request, falling back to the default for blank input.
pub fn analysis_request(request: Option<&str>) -> &str {
    match request.map(str::trim) {
        Some(r) if !r.is_empty() => r,
        _ => DEFAULT_ANALYSIS_REQUEST,
    }
}

/// Custom analysis as a single managed task.
pub fn managed_analysis_task(request: Option<&str>) -> TaskUnit {
    TaskUnit::managed(
        analysis_request(request),
        ANALYSIS_EXPECTED_OUTPUT,
        AgentRole::ProjectRiskManager,
        COLLABORATORS.to_vec(),
    )
}

/// Custom analysis as the fixed pipeline with the first stage replaced.
pub fn sequential_analysis_tasks(request: Option<&str>) -> Vec<TaskUnit> {
    let mut tasks = fixed_pipeline_tasks();
    tasks[0] = TaskUnit::single(
        analysis_request(request),
        ANALYSIS_EXPECTED_OUTPUT,
        AgentRole::ProjectRiskManager,
    );
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_pipeline_order() {
        let tasks = fixed_pipeline_tasks();
        let leads: Vec<_> = tasks.iter().map(TaskUnit::lead_agent).collect();
        assert_eq!(
            leads,
            vec![
                AgentRole::ProjectRiskManager,
                AgentRole::MarketAnalysis,
                AgentRole::RiskScoring,
                AgentRole::StatusTracking,
            ]
        );
        assert!(tasks.iter().all(|t| !t.is_managed()));
        assert_eq!(tasks[2].expected_output, "A clear risk score (1-10) with reasoning.");
    }

    #[test]
    fn test_full_pipeline_task_offers_whole_crew() {
        let task = full_pipeline_task("full analysis please");
        assert_eq!(task.lead_agent(), AgentRole::ProjectRiskManager);
        assert_eq!(task.collaborators(), &COLLABORATORS);
        assert_eq!(task.instruction, "full analysis please");
    }

    #[test]
    fn test_analysis_request_defaults_on_blank() {
        assert_eq!(analysis_request(None), DEFAULT_ANALYSIS_REQUEST);
        assert_eq!(analysis_request(Some("   ")), DEFAULT_ANALYSIS_REQUEST);
        assert_eq!(analysis_request(Some(" Vendor risk ")), "Vendor risk");
    }

    #[test]
    fn test_analysis_builders_share_default_request() {
        assert_eq!(managed_analysis_task(None).instruction, DEFAULT_ANALYSIS_REQUEST);
        assert_eq!(sequential_analysis_tasks(None)[0].instruction, DEFAULT_ANALYSIS_REQUEST);
    }

    #[test]
    fn test_sequential_analysis_replaces_first_stage() {
        let tasks = sequential_analysis_tasks(Some("Supplier exposure"));
        assert_eq!(tasks.len(), 4);
        assert_eq!(tasks[0].instruction, "Supplier exposure");
        assert_eq!(tasks[0].expected_output, ANALYSIS_EXPECTED_OUTPUT);
        assert_eq!(tasks[1..], fixed_pipeline_tasks()[1..]);
    }
}
