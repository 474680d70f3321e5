//! Configuration system (layered: code > env > config file > defaults).

pub mod widget;

pub use widget::WidgetSettings;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::AgentEndpoints;
use crate::error::{AssistoError, Result};
use crate::format::EscapePolicy;
use crate::session::{AgentVariant, FormatPreference};

/// Base URL used when local development routing is switched on.
pub const DEFAULT_LOCAL_BASE_URL: &str = "http://localhost:8080";

/// File name looked up in the user config directory.
pub const CONFIG_FILE_NAME: &str = "assisto.toml";

/// Layered configuration for Assisto.
///
/// Resolution order, highest first:
/// 1. Values set in code after loading
/// 2. Environment variables (`.env` is read when present)
/// 3. The TOML config file
/// 4. Built-in defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistoConfig {
    pub endpoints: AgentEndpoints,
    pub timeout_secs: u64,
    pub format_preference: FormatPreference,
    pub escape_policy: EscapePolicy,
    pub widget: WidgetSettings,
}

impl Default for AssistoConfig {
    fn default() -> Self {
        Self {
            endpoints: AgentEndpoints::default(),
            timeout_secs: crate::client::http::DEFAULT_TIMEOUT.as_secs(),
            format_preference: FormatPreference::default(),
            escape_policy: EscapePolicy::default(),
            widget: WidgetSettings::default(),
        }
    }
}

impl AssistoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| AssistoError::Configuration(format!("invalid config: {e}")))
    }

    /// Read a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AssistoError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Defaults overlaid with environment variables only.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::new();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Full resolution: `path` (or the default config file when it exists),
    /// then environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv();
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::new(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overlay values found through `lookup`.
    ///
    /// Recognised keys: `ASSISTO_LOCAL_DEV`, `ASSISTO_LOCAL_BASE_URL`,
    /// `ASSISTO_SCM_URL`, `ASSISTO_HCM_URL`, `ASSISTO_TIMEOUT_SECS`,
    /// `ASSISTO_FORMAT`, `ASSISTO_ESCAPE`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup("ASSISTO_LOCAL_DEV").is_some_and(|v| is_truthy(&v)) {
            let base = lookup("ASSISTO_LOCAL_BASE_URL")
                .unwrap_or_else(|| DEFAULT_LOCAL_BASE_URL.to_string());
            self.endpoints = AgentEndpoints::under(&base);
        }

        let url_mappings = [
            ("ASSISTO_SCM_URL", AgentVariant::Scm),
            ("ASSISTO_HCM_URL", AgentVariant::Hcm),
        ];
        for (key, variant) in url_mappings {
            if let Some(url) = lookup(key) {
                self.endpoints.set_url(variant, url);
            }
        }

        if let Some(raw) = lookup("ASSISTO_TIMEOUT_SECS") {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                AssistoError::Configuration(format!("ASSISTO_TIMEOUT_SECS is not a number: {raw}"))
            })?;
        }
        if let Some(raw) = lookup("ASSISTO_FORMAT") {
            self.format_preference = raw.trim().parse().map_err(|_| {
                AssistoError::Configuration(format!(
                    "ASSISTO_FORMAT must be natural_language or table, got {raw}"
                ))
            })?;
        }
        if let Some(raw) = lookup("ASSISTO_ESCAPE") {
            self.escape_policy = raw.trim().parse().map_err(|_| {
                AssistoError::Configuration(format!("ASSISTO_ESCAPE must be escape or raw, got {raw}"))
            })?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn set_endpoint(&mut self, variant: AgentVariant, url: impl Into<String>) {
        self.endpoints.set_url(variant, url);
    }
}

/// `assisto.toml` in the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "assisto")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
