//! Shared test doubles for orchestrator integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use riskcrew_abstraction::ModelError;
use riskcrew_orchestrator::{AgentRegistry, Gateway, GenerationRequest, Router};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How a scripted call fails.
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Timeout,
    Unavailable,
}

/// Gateway that records every request and answers "<agent>|<instruction>".
///
/// Calls are numbered from 1. A call can be made to fail, and per-call delays
/// simulate uneven model latency.
#[derive(Default)]
pub struct RecordingGateway {
    requests: Mutex<Vec<GenerationRequest>>,
    fail_at: Option<(usize, Failure)>,
    delays: Vec<Duration>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(call: usize, failure: Failure) -> Self {
        Self { fail_at: Some((call, failure)), ..Self::default() }
    }

    /// Delay for call `i` is `delays[i - 1]`; calls past the end don't wait.
    pub fn with_delays(mut self, delays: Vec<Duration>) -> Self {
        self.delays = delays;
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Gateway for RecordingGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ModelError> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };

        if let Some(delay) = self.delays.get(call - 1) {
            tokio::time::sleep(*delay).await;
        }

        match self.fail_at {
            Some((at, Failure::Timeout)) if at == call => {
                Err(ModelError::Timeout(format!("call {call} exceeded deadline")))
            }
            Some((at, Failure::Unavailable)) if at == call => {
                Err(ModelError::Unavailable(format!("call {call} refused")))
            }
            _ => Ok(format!("{}|{}", request.agent.as_str(), request.instruction)),
        }
    }
}

/// Router over the standard crew and the given gateway.
pub fn router_with(gateway: Arc<RecordingGateway>) -> Router {
    Router::new(Arc::new(AgentRegistry::standard()), gateway).unwrap()
}
