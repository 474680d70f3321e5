//! Chat widget controller.
//!
//! Holds everything the floating widget tracks between events: one
//! [`Session`], the transcript, the window title and the open/closed state of
//! the agent-selection screen and the chat window. A DOM layer (or the CLI)
//! forwards user events here and renders what it reads back.

use tracing::{debug, error};

use crate::client::{self, AgentApi, AgentReply};
use crate::config::{AssistoConfig, WidgetSettings};
use crate::error::{AssistoError, Result};
use crate::format::EscapePolicy;
use crate::session::{AgentVariant, FormatPreference, Session, SessionState};
use crate::types::ChatMessage;

/// Outcome of one accepted user message.
#[derive(Debug)]
pub enum Exchange {
    Replied(AgentReply),
    /// The failure was already appended to the transcript as an apology.
    Failed(AssistoError),
}

impl Exchange {
    pub fn is_replied(&self) -> bool {
        matches!(self, Self::Replied(_))
    }
}

pub struct ChatController<A> {
    api: A,
    settings: WidgetSettings,
    escape_policy: EscapePolicy,
    session: Session,
    messages: Vec<ChatMessage>,
    title: String,
    selection_open: bool,
    chat_open: bool,
}

impl<A: AgentApi> ChatController<A> {
    pub fn new(api: A, settings: WidgetSettings) -> Self {
        let title = settings.default_title.clone();
        Self {
            api,
            settings,
            escape_policy: EscapePolicy::default(),
            session: Session::new(),
            messages: Vec::new(),
            title,
            selection_open: false,
            chat_open: false,
        }
    }

    /// Controller using widget settings, format preference and escaping from `config`.
    pub fn from_config(api: A, config: &AssistoConfig) -> Self {
        let mut controller = Self::new(api, config.widget.clone());
        controller.escape_policy = config.escape_policy;
        controller
            .session
            .set_format_preference(config.format_preference);
        controller
    }

    pub fn with_escape_policy(mut self, policy: EscapePolicy) -> Self {
        self.escape_policy = policy;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_selection_open(&self) -> bool {
        self.selection_open
    }

    pub fn is_chat_open(&self) -> bool {
        self.chat_open
    }

    pub fn escape_policy(&self) -> EscapePolicy {
        self.escape_policy
    }

    pub fn settings(&self) -> &WidgetSettings {
        &self.settings
    }

    /// The floating button: reset the chat and flip the agent-selection screen.
    pub fn toggle_selection_screen(&mut self) {
        self.reset();
        self.chat_open = false;
        self.selection_open = !self.selection_open;
    }

    /// Route the session to `variant` and open the chat.
    pub fn select_agent(&mut self, variant: AgentVariant) {
        self.session.select_agent(variant);
        self.title = self.settings.title_for(variant);
        self.selection_open = false;
        debug!(session = %self.session.id, agent = variant.as_str(), "agent selected");
        self.toggle_chat();
    }

    /// Flip the chat window. Opening it on an empty transcript shows the greeting.
    pub fn toggle_chat(&mut self) {
        self.chat_open = !self.chat_open;
        if self.chat_open && self.messages.is_empty() {
            self.messages
                .push(ChatMessage::agent(self.settings.welcome_message.clone()));
        }
    }

    pub fn set_format_preference(&mut self, preference: FormatPreference) {
        self.session.set_format_preference(preference);
        debug!(session = %self.session.id, format_preference = %preference, "format preference set");
    }

    /// Send one user message.
    ///
    /// Blank text or a missing agent is rejected with
    /// [`AssistoError::Validation`] and changes nothing. Any other failure is
    /// appended to the transcript as an apology and returned as
    /// [`Exchange::Failed`]; the session keeps its thread id.
    pub async fn send_message(&mut self, text: &str) -> Result<Exchange> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AssistoError::Validation(
                "message must not be empty".to_string(),
            ));
        }
        if self.session.agent_variant().is_none() {
            return Err(AssistoError::Validation(
                "select an agent before sending a message".to_string(),
            ));
        }

        self.messages.push(ChatMessage::user(text));

        match client::ask(&self.api, text, &mut self.session).await {
            Ok(reply) => {
                self.messages.push(ChatMessage::agent(reply.response.clone()));
                Ok(Exchange::Replied(reply))
            }
            Err(err) => {
                error!(session = %self.session.id, error = %err, "agent exchange failed");
                self.messages.push(ChatMessage::agent(err.user_message()));
                Ok(Exchange::Failed(err))
            }
        }
    }

    /// Clear the transcript and the thread id, keeping the selected agent.
    pub fn refresh(&mut self) {
        self.messages.clear();
        self.session.clear_thread();
        debug!(session = %self.session.id, "chat refreshed, thread id cleared");
    }

    /// Back to `Unselected`: empty transcript, no thread, no agent, default title.
    pub fn reset(&mut self) {
        self.refresh();
        self.session.reset();
        self.title = self.settings.default_title.clone();
    }

    /// The transcript as HTML, one entry per message in order.
    ///
    /// Pass [`Self::escape_policy`] to honor the configured policy.
    pub fn render_transcript_html(&self, policy: EscapePolicy) -> String {
        self.messages
            .iter()
            .map(|message| message.render_html(policy))
            .collect()
    }
}
