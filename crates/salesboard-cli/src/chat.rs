//! The `chat` subcommand.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use salesboard_chat::{Assistant, ObservableChatLog, PacedResponder, RuleSet};
use salesboard_core::ChatConfig;

use crate::error::CliError;

fn assistant(config: &ChatConfig, no_delay: bool) -> Result<Assistant, CliError> {
    let rules = Arc::new(RuleSet::from_config(config)?);
    let delay = if no_delay {
        Duration::ZERO
    } else {
        config.reply_delay()
    };
    Ok(Assistant::new(
        Arc::new(ObservableChatLog::new()),
        Arc::new(PacedResponder::new(rules, delay)),
    ))
}

/// Answer `message`, or hold a session on stdin when it is empty.
pub async fn run(
    config: &ChatConfig,
    message: Vec<String>,
    no_delay: bool,
) -> Result<String, CliError> {
    let assistant = assistant(config, no_delay)?;

    if !message.is_empty() {
        let reply = assistant.send(message.join(" ")).await?;
        return Ok(format!("{}\n", reply.text));
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            let reply = assistant.send(line).await?;
            writeln!(stdout, "{}", reply.text)?;
        }
        write!(stdout, "> ")?;
        stdout.flush()?;
    }

    tracing::info!("Chat ended after {} messages", assistant.log().len());
    Ok("\n".to_string())
}
