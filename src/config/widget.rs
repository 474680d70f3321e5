//! Presentation settings for the chat widget.

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::session::AgentVariant;

pub const DEFAULT_TITLE: &str = "Fusion Assisto";
pub const DEFAULT_WELCOME: &str = "I am your Fusion Assistant, how may I help you?";
pub const DEFAULT_BUTTON_COLOR: &str = "#001689";

/// Titles, greeting and size limits of the widget.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    /// Title shown before an agent is chosen, and as the prefix after.
    #[builder(into, default = DEFAULT_TITLE.to_string())]
    pub default_title: String,
    /// First agent message when the chat opens with an empty transcript.
    #[builder(into, default = DEFAULT_WELCOME.to_string())]
    pub welcome_message: String,
    #[builder(into, default = DEFAULT_BUTTON_COLOR.to_string())]
    pub button_color: String,
    #[builder(into, default = AgentVariant::Scm.title().to_string())]
    pub scm_title: String,
    #[builder(into, default = AgentVariant::Hcm.title().to_string())]
    pub hcm_title: String,
    #[builder(default = 550)]
    pub max_width: u32,
    #[builder(default = 650)]
    pub max_height: u32,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WidgetSettings {
    pub fn agent_title(&self, variant: AgentVariant) -> &str {
        match variant {
            AgentVariant::Scm => &self.scm_title,
            AgentVariant::Hcm => &self.hcm_title,
        }
    }

    /// Window title once `variant` is selected, e.g. `Fusion Assisto-SCM Agent`.
    pub fn title_for(&self, variant: AgentVariant) -> String {
        format!("{}-{}", self.default_title, self.agent_title(variant))
    }
}
