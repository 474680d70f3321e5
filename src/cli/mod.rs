//! CLI entry point for Assisto.

pub mod chat;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::format::EscapePolicy;
use crate::session::{AgentVariant, FormatPreference};

/// Assisto chat CLI
#[derive(Parser, Debug)]
#[command(name = "assisto", version, about = "Assisto — chat with SCM/HCM agents")]
pub struct Cli {
    /// Config file (defaults to assisto.toml in the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log request routing and thread updates to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask one question and print the formatted reply
    Ask(AskArgs),
    /// Interactive chat session
    Chat(ChatArgs),
    /// Format reply text read from stdin
    Render(RenderArgs),
}

/// Output options shared by commands that print replies.
#[derive(Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Print plain text instead of HTML
    #[arg(long)]
    pub plain: bool,

    /// Interpolate reply text into HTML without escaping
    #[arg(long, conflicts_with = "plain")]
    pub raw_html: bool,
}

impl OutputArgs {
    /// Escape policy, with `--raw-html` overriding the configured one.
    pub fn escape_policy(&self, configured: EscapePolicy) -> EscapePolicy {
        if self.raw_html {
            EscapePolicy::Raw
        } else {
            configured
        }
    }
}

/// Arguments for `assisto ask`.
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// Agent to route to (scm, hcm)
    #[arg(short, long)]
    pub agent: AgentVariant,

    /// Reply shape to request (natural_language, table)
    #[arg(short, long)]
    pub format: Option<FormatPreference>,

    /// Continue an existing server thread
    #[arg(long)]
    pub thread: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Question to ask (positional)
    pub question: String,
}

/// Arguments for `assisto chat`.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Agent to route to (scm, hcm); prompted for when omitted
    #[arg(short, long)]
    pub agent: Option<AgentVariant>,

    /// Reply shape to request (natural_language, table)
    #[arg(short, long)]
    pub format: Option<FormatPreference>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `assisto render`.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub output: OutputArgs,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_ask_with_options() {
        let cli = Cli::try_parse_from([
            "assisto", "ask", "--agent", "hcm", "--format", "table", "--thread", "T1",
            "How many leave days?",
        ])
        .unwrap();
        match cli.command {
            Commands::Ask(args) => {
                assert_eq!(args.agent, AgentVariant::Hcm);
                assert_eq!(args.format, Some(FormatPreference::Table));
                assert_eq!(args.thread.as_deref(), Some("T1"));
                assert_eq!(args.question, "How many leave days?");
                assert!(!args.output.plain);
            }
            other => panic!("expected Ask, got {other:?}"),
        }
    }

    #[test]
    fn parse_chat_without_agent() {
        let cli = Cli::try_parse_from(["assisto", "-v", "chat", "--plain"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Chat(args) => {
                assert_eq!(args.agent, None);
                assert!(args.output.plain);
            }
            other => panic!("expected Chat, got {other:?}"),
        }
    }

    #[test]
    fn parse_render_raw_html() {
        let cli = Cli::try_parse_from(["assisto", "render", "--raw-html"]).unwrap();
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.output.escape_policy(EscapePolicy::Escape), EscapePolicy::Raw);
            }
            other => panic!("expected Render, got {other:?}"),
        }
    }

    #[test]
    fn unknown_agent_is_rejected() {
        assert!(Cli::try_parse_from(["assisto", "ask", "--agent", "crm", "hi"]).is_err());
    }

    #[test]
    fn plain_conflicts_with_raw_html() {
        assert!(Cli::try_parse_from(["assisto", "render", "--plain", "--raw-html"]).is_err());
    }
}
