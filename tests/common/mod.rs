//! Shared test helpers and mock agent.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use assisto::client::{AgentApi, AgentReply, AgentRequest, AgentEndpoints};
use assisto::error::{AssistoError, Result};
use async_trait::async_trait;
use wiremock::MockServer;

/// A mock agent that returns canned replies and records requests.
#[derive(Default)]
pub struct MockAgent {
    replies: Mutex<VecDeque<Result<AgentReply>>>,
    requests: Mutex<Vec<AgentRequest>>,
}

impl MockAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn queue_reply(&self, text: &str, thread_id: Option<&str>) {
        self.replies.lock().unwrap().push_back(Ok(AgentReply {
            response: text.to_string(),
            thread_id: thread_id.map(String::from),
        }));
    }

    /// Queue a server failure.
    pub fn queue_server_error(&self, status: u16, detail: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(AssistoError::server(status, detail)));
    }

    pub fn requests(&self) -> Vec<AgentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentApi for MockAgent {
    async fn send(&self, request: &AgentRequest) -> Result<AgentReply> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(AgentReply {
                    response: "Mock response".to_string(),
                    thread_id: None,
                })
            })
    }
}

/// Endpoints pointing both variants at the mock server.
pub fn endpoints(server: &MockServer) -> AgentEndpoints {
    AgentEndpoints::under(&server.uri())
}
