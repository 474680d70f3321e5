//! Transcript message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format::{self, html, EscapePolicy};

/// A message in the chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create an agent message.
    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Render this message as a transcript entry.
    ///
    /// User text is shown verbatim (always escaped); agent text goes through the
    /// reply formatter and honors `policy`.
    pub fn render_html(&self, policy: EscapePolicy) -> String {
        match self.role {
            Role::User => format!(
                "<div class=\"message user-message\">{}</div>",
                html::escape(&self.text)
            ),
            Role::Agent => format!(
                "<div class=\"message bot-message\">{}</div>",
                html::render_reply_html(&format::format(&self.text), policy)
            ),
        }
    }
}

/// Transcript role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}
