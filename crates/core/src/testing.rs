//! In-memory doubles for core unit tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use larkbridge_common::resilience::{NoPacing, PacingPolicy};
use larkbridge_domain::{LarkError, Result};
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::context::ApiContext;
use crate::endpoint::EndpointCatalog;
use crate::ports::ApiTransport;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(String),
    Post(String, Value),
}

/// Transport that records every call and replays queued GET responses.
#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
    get_responses: Mutex<VecDeque<Value>>,
    post_response: Mutex<Option<Value>>,
    fail_posts: Mutex<Option<String>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn queue_get(&self, response: Value) {
        self.get_responses.lock().push_back(response);
    }

    pub fn respond_to_posts(&self, response: Value) {
        *self.post_response.lock() = Some(response);
    }

    pub fn fail_posts_with(&self, message: &str) {
        *self.fail_posts.lock() = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn posts(&self) -> Vec<(String, Value)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Post(path, body) => Some((path, body)),
                Call::Get(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl ApiTransport for RecordingTransport {
    async fn get(&self, path: &str) -> Result<Value> {
        self.calls.lock().push(Call::Get(path.to_string()));
        Ok(self.get_responses.lock().pop_front().unwrap_or_else(|| json!({})))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.calls.lock().push(Call::Post(path.to_string(), body.clone()));
        if let Some(message) = self.fail_posts.lock().clone() {
            return Err(LarkError::Transport(message));
        }
        let count = self.posts().len();
        Ok(self.post_response.lock().clone().unwrap_or_else(|| json!({"code": 0, "seq": count})))
    }
}

/// Pacer that counts pauses instead of sleeping.
#[derive(Default)]
pub struct CountingPacer {
    pauses: AtomicUsize,
}

impl CountingPacer {
    pub fn pauses(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PacingPolicy for CountingPacer {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

pub fn context_with(transport: Arc<RecordingTransport>) -> ApiContext {
    let catalog = Arc::new(EndpointCatalog::lark_default().unwrap());
    ApiContext::new(transport, catalog).with_pacing(Arc::new(NoPacing))
}
