//! Conversation session state.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

/// Routing target chosen before chatting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AgentVariant {
    /// Supply-chain management agent.
    Scm,
    /// Human-capital management agent.
    Hcm,
}

impl AgentVariant {
    /// Wire name sent as `agent_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scm => "scm",
            Self::Hcm => "hcm",
        }
    }

    /// Default display title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Scm => "SCM Agent",
            Self::Hcm => "HCM Agent",
        }
    }
}

/// Reply shape requested from the agent. A hint only; never enforced locally.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FormatPreference {
    #[default]
    NaturalLanguage,
    Table,
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unselected,
    AgentChosen,
    Active,
}

/// One conversation with a remote agent.
///
/// `thread_id` is opaque and server assigned. An empty string means the server
/// has not opened a thread yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Local identifier for log correlation. Never sent to the agent.
    pub id: Uuid,
    thread_id: String,
    agent_variant: Option<AgentVariant>,
    format_preference: FormatPreference,
    exchanges: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            thread_id: String::new(),
            agent_variant: None,
            format_preference: FormatPreference::default(),
            exchanges: 0,
        }
    }

    /// Session already routed to `variant`.
    pub fn with_agent(variant: AgentVariant) -> Self {
        let mut session = Self::new();
        session.select_agent(variant);
        session
    }

    pub fn with_format_preference(mut self, preference: FormatPreference) -> Self {
        self.format_preference = preference;
        self
    }

    /// Resume a server thread, e.g. one printed by an earlier CLI run.
    pub fn with_thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = thread_id.into();
        self
    }

    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn agent_variant(&self) -> Option<AgentVariant> {
        self.agent_variant
    }

    pub fn format_preference(&self) -> FormatPreference {
        self.format_preference
    }

    /// Number of successful exchanges since the last reset.
    pub fn exchanges(&self) -> u64 {
        self.exchanges
    }

    pub fn state(&self) -> SessionState {
        match (self.agent_variant, self.exchanges) {
            (None, _) => SessionState::Unselected,
            (Some(_), 0) => SessionState::AgentChosen,
            (Some(_), _) => SessionState::Active,
        }
    }

    pub fn select_agent(&mut self, variant: AgentVariant) {
        self.agent_variant = Some(variant);
    }

    pub fn set_format_preference(&mut self, preference: FormatPreference) {
        self.format_preference = preference;
    }

    /// Drop the thread id only, keeping the agent (a chat refresh).
    pub fn clear_thread(&mut self) {
        self.thread_id.clear();
        self.exchanges = 0;
    }

    /// Back to `Unselected`: no thread, no agent.
    pub fn reset(&mut self) {
        self.clear_thread();
        self.agent_variant = None;
    }

    /// Record a successful exchange. A non-empty `thread_id` replaces the
    /// current one; anything else leaves it as is.
    pub(crate) fn record_exchange(&mut self, thread_id: Option<&str>) -> bool {
        self.exchanges += 1;
        match thread_id {
            Some(id) if !id.is_empty() => {
                let changed = self.thread_id != id;
                self.thread_id = id.to_string();
                changed
            }
            _ => false,
        }
    }
}
