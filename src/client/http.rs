//! HTTP transport for agent endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::{AgentApi, AgentReply, AgentRequest};
use crate::error::{AssistoError, Result, UNKNOWN_ERROR};
use crate::session::AgentVariant;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// One endpoint URL per agent variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentEndpoints {
    pub scm: String,
    pub hcm: String,
}

impl Default for AgentEndpoints {
    fn default() -> Self {
        Self::under(crate::config::DEFAULT_LOCAL_BASE_URL)
    }
}

impl AgentEndpoints {
    pub fn new(scm: impl Into<String>, hcm: impl Into<String>) -> Self {
        Self {
            scm: scm.into(),
            hcm: hcm.into(),
        }
    }

    /// Route both variants to `{base}/{variant}`, e.g. a local dev server.
    pub fn under(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self::new(format!("{base}/scm"), format!("{base}/hcm"))
    }

    pub fn url(&self, variant: AgentVariant) -> &str {
        match variant {
            AgentVariant::Scm => &self.scm,
            AgentVariant::Hcm => &self.hcm,
        }
    }

    pub fn set_url(&mut self, variant: AgentVariant, url: impl Into<String>) {
        match variant {
            AgentVariant::Scm => self.scm = url.into(),
            AgentVariant::Hcm => self.hcm = url.into(),
        }
    }
}

/// [`AgentApi`] over HTTP: `POST` JSON to the variant's endpoint.
///
/// Cookies set by the agent are kept and sent back on later requests.
#[derive(Debug, Clone)]
pub struct HttpAgentClient {
    http: reqwest::Client,
    endpoints: AgentEndpoints,
}

impl HttpAgentClient {
    pub fn new(endpoints: AgentEndpoints) -> Result<Self> {
        Self::with_timeout(endpoints, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoints: AgentEndpoints, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .default_headers(json_headers())
            .build()
            .map_err(|e| AssistoError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, endpoints })
    }

    pub fn endpoints(&self) -> &AgentEndpoints {
        &self.endpoints
    }
}

#[async_trait]
impl AgentApi for HttpAgentClient {
    async fn send(&self, request: &AgentRequest) -> Result<AgentReply> {
        let url = self.endpoints.url(request.agent_type);
        debug!(
            url,
            agent_type = request.agent_type.as_str(),
            thread_id = %request.thread_id,
            format_preference = %request.format_preference,
            "sending agent request"
        );

        self.exchange(url, request)
            .await
            .inspect_err(|err| warn!(url, error = %err, "agent request failed"))
    }
}

impl HttpAgentClient {
    async fn exchange(&self, url: &str, request: &AgentRequest) -> Result<AgentReply> {
        let resp = self.http.post(url).json(request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status.as_u16(), &body_text));
        }

        let body = resp.bytes().await?;
        let reply: AgentReply = serde_json::from_slice(&body)?;
        Ok(reply)
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Build a server error from a failing status and its raw body.
pub fn status_to_error(status: u16, body: &str) -> AssistoError {
    AssistoError::server(status, extract_detail(body))
}

/// Pull a readable `detail` out of an error body, or [`UNKNOWN_ERROR`].
///
/// Falsy details (`null`, `""`, `false`, `0`) count as missing.
fn extract_detail(body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned());
    match detail {
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(Value::Null) | Some(Value::String(_)) | Some(Value::Bool(false)) | None => {
            UNKNOWN_ERROR.to_string()
        }
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => UNKNOWN_ERROR.to_string(),
        Some(other) => other.to_string(),
    }
}
