//! Assisto — chat widget core.
//!
//! The parts of an embeddable agent chat widget that are not DOM wiring: a
//! formatter turning agent replies into paragraphs, bullet lists or tables
//! with resolved links, and a session client exchanging one JSON request per
//! user message with an SCM or HCM agent endpoint.
//!
//! # Quick Start
//!
//! ```no_run
//! use assisto::prelude::*;
//!
//! # async fn example() -> assisto::error::Result<()> {
//! let config = AssistoConfig::from_env()?;
//! let api = HttpAgentClient::with_timeout(config.endpoints.clone(), config.timeout())?;
//! let mut session = Session::with_agent(AgentVariant::Scm);
//!
//! let reply = assisto::client::ask(&api, "Open purchase orders?", &mut session).await?;
//! let html = render_reply_html(&format(&reply.response), EscapePolicy::Escape);
//! println!("{html}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod prelude;
pub mod session;
pub mod types;
pub mod widget;

#[cfg(feature = "cli")]
pub mod cli;
