//! Fixed pipeline and custom analysis runs.

mod common;

use common::{router_with, Failure, RecordingGateway};
use riskcrew_orchestrator::pipeline::{ANALYSIS_EXPECTED_OUTPUT, DEFAULT_ANALYSIS_REQUEST, FIXED_STAGES};
use riskcrew_orchestrator::{AgentRole, Discipline, OrchestrationError, RunOutput};
use std::sync::Arc;
use std::time::Duration;

fn expected_fragments() -> Vec<String> {
    FIXED_STAGES
        .iter()
        .map(|(agent, instruction, _)| format!("{}|{}", agent.as_str(), instruction))
        .collect()
}

#[tokio::test]
async fn test_fixed_pipeline_runs_four_stages_in_order() {
    let gateway = Arc::new(RecordingGateway::new());
    let router = router_with(gateway.clone());

    let fragments = router.run_fixed_pipeline().await.unwrap();

    assert_eq!(fragments, expected_fragments());
    let agents: Vec<_> = gateway.requests().iter().map(|r| r.agent).collect();
    assert_eq!(
        agents,
        vec![
            AgentRole::ProjectRiskManager,
            AgentRole::MarketAnalysis,
            AgentRole::RiskScoring,
            AgentRole::StatusTracking,
        ]
    );
}

#[tokio::test]
async fn test_fixed_pipeline_order_ignores_latency() {
    let gateway = Arc::new(RecordingGateway::new().with_delays(vec![
        Duration::from_millis(40),
        Duration::from_millis(1),
        Duration::from_millis(25),
        Duration::ZERO,
    ]));
    let router = router_with(gateway.clone());

    let fragments = router.run_fixed_pipeline().await.unwrap();

    assert_eq!(fragments, expected_fragments());
}

#[tokio::test]
async fn test_fixed_pipeline_is_input_independent() {
    let gateway = Arc::new(RecordingGateway::new());
    let router = router_with(gateway.clone());

    let first = router.run_fixed_pipeline().await.unwrap();
    let second = router.run_fixed_pipeline().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(gateway.call_count(), 8);
}

#[tokio::test]
async fn test_failure_at_each_stage_stops_the_run() {
    for k in 1..=4 {
        let gateway = Arc::new(RecordingGateway::failing_at(k, Failure::Unavailable));
        let router = router_with(gateway.clone());

        let err = router.run_fixed_pipeline().await.unwrap_err();

        match err {
            OrchestrationError::StageFailed { stage, role, ref source } => {
                assert_eq!(stage, k);
                assert_eq!(role, FIXED_STAGES[k - 1].0);
                assert!(!source.is_timeout());
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(gateway.call_count(), k, "no stage after {k} may run");
    }
}

#[tokio::test]
async fn test_timeout_mid_pipeline_is_distinguishable() {
    let gateway = Arc::new(RecordingGateway::failing_at(3, Failure::Timeout));
    let router = router_with(gateway.clone());

    let err = router.run_fixed_pipeline().await.unwrap_err();

    assert!(err.is_timeout());
    assert!(!err.is_unavailable());
    assert!(err.to_string().starts_with("Stage 3 (Risk Scoring Agent) failed"));
}

#[tokio::test]
async fn test_manager_led_analysis_single_call() {
    let gateway = Arc::new(RecordingGateway::new());
    let router = router_with(gateway.clone());

    let output = router
        .run_analysis(Some("Assess supplier exposure"), Discipline::ManagerLed)
        .await
        .unwrap();

    assert_eq!(
        output,
        RunOutput::Synthesized {
            coordinator: AgentRole::ProjectRiskManager,
            text: "project_risk_manager|Assess supplier exposure".to_string(),
        }
    );
    let requests = gateway.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].expected_output, ANALYSIS_EXPECTED_OUTPUT);
    assert_eq!(requests[0].collaborators.len(), 4);
}

#[tokio::test]
async fn test_manager_led_failure_fails_run() {
    let gateway = Arc::new(RecordingGateway::failing_at(1, Failure::Unavailable));
    let router = router_with(gateway.clone());

    let err = router.run_analysis(None, Discipline::ManagerLed).await.unwrap_err();

    assert!(err.is_unavailable());
    assert_eq!(gateway.call_count(), 1);
}

#[tokio::test]
async fn test_sequential_analysis_replaces_first_stage() {
    let gateway = Arc::new(RecordingGateway::new());
    let router = router_with(gateway.clone());

    let output = router.run_analysis(Some("  "), Discipline::Sequential).await.unwrap();

    let texts = output.texts();
    assert_eq!(texts.len(), 4);
    assert_eq!(texts[0], format!("project_risk_manager|{DEFAULT_ANALYSIS_REQUEST}"));
    assert_eq!(texts[1..], expected_fragments()[1..]);
    assert!(output.render().starts_with("1. Project Risk Manager\n\n"));
}

#[tokio::test]
async fn test_concurrent_runs_do_not_share_fragments() {
    let gateway = Arc::new(RecordingGateway::new().with_delays(vec![Duration::from_millis(5); 8]));
    let router = router_with(gateway.clone());

    let (a, b) = tokio::join!(router.run_fixed_pipeline(), router.run_fixed_pipeline());

    assert_eq!(a.unwrap(), expected_fragments());
    assert_eq!(b.unwrap(), expected_fragments());
    assert_eq!(gateway.call_count(), 8);
}

#[tokio::test]
async fn test_run_output_serializes() {
    let gateway = Arc::new(RecordingGateway::new());
    let router = router_with(gateway);

    let output = router.run_analysis(None, Discipline::Sequential).await.unwrap();
    let json = serde_json::to_value(&output).unwrap();

    assert_eq!(json["kind"], "fragments");
    assert_eq!(json["stages"][1]["agent"], "market_analysis");
    assert_eq!(json["stages"][1]["stage"], 2);
}
