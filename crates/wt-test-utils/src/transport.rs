//! Scripted transport: replays canned outcomes and records every call

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use wt_http::{HttpRequest, HttpResponse, Method, Transport, TransportError};

#[derive(Debug, Clone)]
pub enum Outcome {
    Respond(HttpResponse),
    NetworkError(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: Method,
    pub url: String,
    pub at: Instant,
}

#[derive(Debug, Default)]
struct Script {
    queue: VecDeque<Outcome>,
    fallback: Option<Outcome>,
    calls: Vec<RecordedCall>,
}

/// Answers from the queued outcomes first, then from the fallback
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<Script>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, outcome: Outcome) -> Self {
        self.script.lock().unwrap().queue.push_back(outcome);
        self
    }

    fn fallback(self, outcome: Outcome) -> Self {
        self.script.lock().unwrap().fallback = Some(outcome);
        self
    }

    pub fn then_response(self, response: HttpResponse) -> Self {
        self.push(Outcome::Respond(response))
    }

    pub fn then_status(self, status: u16) -> Self {
        self.push(Outcome::Respond(HttpResponse::new(status, Vec::new())))
    }

    pub fn then_json(self, body: &Value) -> Self {
        self.push(Outcome::Respond(HttpResponse::json_body(200, body)))
    }

    pub fn then_network_error(self, message: &str) -> Self {
        self.push(Outcome::NetworkError(message.to_string()))
    }

    pub fn always_json(self, body: &Value) -> Self {
        self.fallback(Outcome::Respond(HttpResponse::json_body(200, body)))
    }

    pub fn always_status(self, status: u16) -> Self {
        self.fallback(Outcome::Respond(HttpResponse::new(status, Vec::new())))
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.script.lock().unwrap().calls.len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.url).collect()
    }

    /// Time between consecutive calls
    pub fn attempt_gaps(&self) -> Vec<Duration> {
        self.calls()
            .windows(2)
            .map(|pair| pair[1].at.duration_since(pair[0].at))
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let outcome = {
            let mut script = self.script.lock().unwrap();
            script.calls.push(RecordedCall {
                method: request.method(),
                url: request.url().to_string(),
                at: Instant::now(),
            });
            script.queue.pop_front().or_else(|| script.fallback.clone())
        };

        match outcome {
            Some(Outcome::Respond(response)) => Ok(response),
            Some(Outcome::NetworkError(message)) => Err(TransportError::new(message)),
            None => Err(TransportError::new(format!("no scripted response for {}", request.url()))),
        }
    }
}
