//! Agent session client: one JSON request per user message.

pub mod http;

pub use http::{AgentEndpoints, HttpAgentClient};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AssistoError, Result};
use crate::session::{AgentVariant, FormatPreference, Session};

/// Request body sent to an agent endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRequest {
    pub question: String,
    /// Empty until the server has assigned a thread.
    pub thread_id: String,
    pub format_preference: FormatPreference,
    pub agent_type: AgentVariant,
}

/// Successful reply from an agent endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentReply {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

/// A conversational backend reachable with one request/response exchange.
#[async_trait]
pub trait AgentApi: Send + Sync {
    /// Send one request. Implementations do not touch any session state.
    async fn send(&self, request: &AgentRequest) -> Result<AgentReply>;
}

#[async_trait]
impl<T: AgentApi + ?Sized> AgentApi for std::sync::Arc<T> {
    async fn send(&self, request: &AgentRequest) -> Result<AgentReply> {
        (**self).send(request).await
    }
}

/// Ask the session's agent a question.
///
/// Fails with [`AssistoError::Validation`] without sending anything when the
/// question is blank or no agent has been selected. On success a non-empty
/// `thread_id` in the reply replaces the session's; on failure the session is
/// left exactly as it was.
///
/// Taking `&mut Session` keeps a single request in flight per session.
pub async fn ask<A>(api: &A, question: &str, session: &mut Session) -> Result<AgentReply>
where
    A: AgentApi + ?Sized,
{
    let question = question.trim();
    if question.is_empty() {
        return Err(AssistoError::Validation(
            "question must not be empty".to_string(),
        ));
    }
    let Some(agent_type) = session.agent_variant() else {
        return Err(AssistoError::Validation(
            "select an agent before sending a message".to_string(),
        ));
    };

    let request = AgentRequest {
        question: question.to_string(),
        thread_id: session.thread_id().to_string(),
        format_preference: session.format_preference(),
        agent_type,
    };

    let reply = api.send(&request).await?;

    if session.record_exchange(reply.thread_id.as_deref()) {
        debug!(
            session = %session.id,
            thread_id = session.thread_id(),
            "updated thread id"
        );
    }

    Ok(reply)
}
