//! `agent-chat`: send one message to the configured agent and print the
//! aggregated reply.

mod config;
mod observability;

use std::time::Duration;

use agent_invoke::{AgentInvoker, DEFAULT_DEADLINE};
use clap::Parser;
use tokio::io::AsyncReadExt as _;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "agent-chat", version, about = "Invoke an agent and print its aggregated reply")]
struct Cli {
    /// Message sent to the agent. Read from stdin when omitted.
    input: Option<String>,
    /// Deadline for the whole response stream, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_DEADLINE.as_millis() as u64)]
    deadline_ms: u64,
    /// Print the reply as a `{"message": ...}` JSON body.
    #[arg(long)]
    json: bool,
}

#[derive(serde::Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

fn render_message(text: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string(&MessageBody { message: text })
}

async fn read_stdin() -> std::io::Result<String> {
    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    config::init();
    observability::init_observability();
    let cli = Cli::parse();

    let input = match cli.input {
        Some(text) => text,
        None => {
            debug!("no message argument; reading stdin");
            read_stdin().await?
        }
    };
    let invoker = AgentInvoker::from_env_builder()?
        .deadline(Duration::from_millis(cli.deadline_ms))
        .build()?;
    info!(
        agent_id = %invoker.agent().agent_id,
        deadline_ms = cli.deadline_ms,
        input_len = input.len() as u64,
        "sending message"
    );

    let result = invoker.run(&input).await?;
    if result.is_truncated() {
        info!(events = result.events, "reply cut short by deadline");
    }
    if cli.json {
        println!("{}", render_message(&result.text)?);
    } else {
        println!("{}", result.text);
    }
    Ok(())
}
