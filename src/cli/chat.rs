//! Handlers for the `ask`, `chat` and `render` commands.

use std::error::Error;
use std::io::Write;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};

use super::{AskArgs, ChatArgs, OutputArgs, RenderArgs};
use crate::client::{self, HttpAgentClient};
use crate::config::AssistoConfig;
use crate::format::{self, plain, EscapePolicy};
use crate::session::{AgentVariant, FormatPreference, Session};
use crate::widget::{ChatController, Exchange};

type CliResult = Result<(), Box<dyn Error>>;

/// Render reply text the way the output flags ask for.
pub fn render_output(text: &str, output: OutputArgs, configured: EscapePolicy) -> String {
    let content = format::format(text);
    if output.plain {
        plain::render_text(&content)
    } else {
        format::render_reply_html(&content, output.escape_policy(configured))
    }
}

pub async fn handle_ask(config: &AssistoConfig, args: AskArgs) -> CliResult {
    let api = HttpAgentClient::with_timeout(config.endpoints.clone(), config.timeout())?;
    let mut session = Session::with_agent(args.agent)
        .with_format_preference(args.format.unwrap_or(config.format_preference));
    if let Some(thread) = args.thread {
        session = session.with_thread_id(thread);
    }

    let reply = client::ask(&api, &args.question, &mut session).await?;

    println!("{}", render_output(&reply.response, args.output, config.escape_policy));
    if !session.thread_id().is_empty() {
        eprintln!("thread: {}", session.thread_id());
    }
    Ok(())
}

pub fn handle_render(config: &AssistoConfig, args: RenderArgs, input: &str) -> String {
    render_output(input, args.output, config.escape_policy)
}

pub async fn read_stdin() -> std::io::Result<String> {
    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;
    Ok(input)
}

pub async fn handle_chat(config: &AssistoConfig, args: ChatArgs) -> CliResult {
    let api = HttpAgentClient::with_timeout(config.endpoints.clone(), config.timeout())?;
    let mut controller = ChatController::from_config(api, config);
    if let Some(format) = args.format {
        controller.set_format_preference(format);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let agent = match args.agent {
        Some(agent) => agent,
        None => match prompt_agent(&mut lines).await? {
            Some(agent) => agent,
            None => return Ok(()),
        },
    };
    controller.toggle_selection_screen();
    controller.select_agent(agent);

    eprintln!("{} (/reset, /agent scm|hcm, /table, /prose, /quit)", controller.title());
    print_last(&controller, args.output);

    loop {
        prompt("> ")?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/reset" => {
                controller.refresh();
                eprintln!("chat reset");
                continue;
            }
            "/table" => {
                controller.set_format_preference(FormatPreference::Table);
                continue;
            }
            "/prose" => {
                controller.set_format_preference(FormatPreference::NaturalLanguage);
                continue;
            }
            _ => {}
        }
        if let Some(name) = line.strip_prefix("/agent ") {
            match name.trim().parse::<AgentVariant>() {
                Ok(agent) => {
                    controller.toggle_selection_screen();
                    controller.select_agent(agent);
                    eprintln!("{}", controller.title());
                    print_last(&controller, args.output);
                }
                Err(_) => eprintln!("unknown agent: {name}"),
            }
            continue;
        }

        if let Exchange::Failed(err) = controller.send_message(line).await? {
            tracing::debug!(error = %err, "exchange failed, session kept");
        }
        print_last(&controller, args.output);
    }
    Ok(())
}

async fn prompt_agent<R>(lines: &mut tokio::io::Lines<R>) -> std::io::Result<Option<AgentVariant>>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    loop {
        prompt("Choose an agent (scm/hcm): ")?;
        let Some(line) = lines.next_line().await? else {
            return Ok(None);
        };
        match line.trim().parse() {
            Ok(agent) => return Ok(Some(agent)),
            Err(_) => eprintln!("unknown agent: {}", line.trim()),
        }
    }
}

fn prompt(text: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{text}")?;
    stderr.flush()
}

fn print_last<A: client::AgentApi>(controller: &ChatController<A>, output: OutputArgs) {
    if let Some(message) = controller.messages().last() {
        let policy = output.escape_policy(controller.escape_policy());
        if output.plain {
            println!("{}", plain::render_text(&format::format(&message.text)));
        } else {
            println!("{}", message.render_html(policy));
        }
    }
}
