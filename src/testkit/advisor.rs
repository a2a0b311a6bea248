//! Scripted advisory client.
//!
//! Outcomes are consumed in the order they were queued. Once the queue is
//! empty every call fails with a transport error. Clones share the same
//! script, so a test can keep one handle and give another to the code under
//! test.

use crate::advisory::{AdvisoryClient, AdvisoryRequest};
use crate::errors::AdvisoryFailure;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{Notify, Semaphore};

#[derive(Clone, Debug)]
enum Step {
    Respond(Value),
    Fail(AdvisoryFailure),
    Hang,
}

#[derive(Debug, Default)]
struct Script {
    steps: VecDeque<Step>,
    requests: Vec<AdvisoryRequest>,
}

/// Holds calls until the test lets them through.
#[derive(Debug)]
struct Gate {
    permits: Semaphore,
    called: Notify,
}

#[derive(Clone, Debug, Default)]
pub struct ScriptedAdvisor {
    script: Arc<Mutex<Script>>,
    gate: Option<Arc<Gate>>,
}

impl ScriptedAdvisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw JSON response.
    pub fn respond(self, value: Value) -> Self {
        self.push(Step::Respond(value))
    }

    /// Queue a failure.
    pub fn fail(self, failure: AdvisoryFailure) -> Self {
        self.push(Step::Fail(failure))
    }

    /// Queue a call that never completes.
    pub fn hang(self) -> Self {
        self.push(Step::Hang)
    }

    /// Make every call wait for [`release`](Self::release) before answering.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Gate {
            permits: Semaphore::new(0),
            called: Notify::new(),
        }));
        self
    }

    /// Let one gated call through.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.permits.add_permits(1);
        }
    }

    /// Resolves once a gated call has arrived.
    pub async fn wait_until_called(&self) {
        if let Some(gate) = &self.gate {
            gate.called.notified().await;
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<AdvisoryRequest> {
        self.script.lock().requests.clone()
    }

    pub fn call_count(&self) -> usize {
        self.script.lock().requests.len()
    }

    fn push(self, step: Step) -> Self {
        self.script.lock().steps.push_back(step);
        self
    }
}

#[async_trait]
impl AdvisoryClient for ScriptedAdvisor {
    async fn advise(&self, request: &AdvisoryRequest) -> Result<Value, AdvisoryFailure> {
        let step = {
            let mut script = self.script.lock();
            script.requests.push(request.clone());
            script.steps.pop_front()
        };

        if let Some(gate) = &self.gate {
            gate.called.notify_one();
            if let Ok(permit) = gate.permits.acquire().await {
                permit.forget();
            }
        }

        match step {
            Some(Step::Respond(value)) => Ok(value),
            Some(Step::Fail(failure)) => Err(failure),
            Some(Step::Hang) => std::future::pending().await,
            None => Err(AdvisoryFailure::Transport("no scripted response left".into())),
        }
    }
}
