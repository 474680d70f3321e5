//! Convenience re-exports for common use.

pub use crate::client::{ask, AgentApi, AgentEndpoints, AgentReply, AgentRequest, HttpAgentClient};
pub use crate::config::{AssistoConfig, WidgetSettings};
pub use crate::error::{AssistoError, Result};
pub use crate::format::{format, render_html, render_reply_html, EscapePolicy, FormattedContent};
pub use crate::session::{AgentVariant, FormatPreference, Session, SessionState};
pub use crate::types::{ChatMessage, Role};
pub use crate::widget::{ChatController, Exchange};
