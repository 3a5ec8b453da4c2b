//! Interactive chat with Haven.
//!
//! Streams each reply as it arrives. Slash commands control the session;
//! everything else is sent to the model.

use std::io::Write;

use anyhow::Result;
use console::style;
use futures_util::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};

use safehaven_core::chat::persona;
use safehaven_types::chat::{ChatMessage, ChatRole};

use crate::state::{AppState, ConcreteChat};

/// In-chat controls.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    Help,
    /// Send the canned "find professional help" prompt.
    FindHelp,
    /// Start over with a fresh session.
    New,
    History,
    Exit,
    Unknown(String),
}

/// Parse input as a slash command. `None` for ordinary messages.
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }
    let cmd = trimmed.split_whitespace().next().unwrap_or(trimmed).to_lowercase();
    Some(match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/find-help" | "/resources" => ChatCommand::FindHelp,
        "/new" | "/reset" => ChatCommand::New,
        "/history" => ChatCommand::History,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        other => ChatCommand::Unknown(other.to_string()),
    })
}

/// Run one message (`message` given) or an interactive session.
pub async fn run_chat(state: &AppState, message: Option<String>, json: bool) -> Result<()> {
    let mut chat = state.chat_session()?;
    // Speculative: a missing credential is reported on the first turn instead.
    let _ = chat.initialize();

    if let Some(message) = message {
        if json {
            let _: Vec<ChatMessage> = chat.send_turn(&message).collect().await;
            println!("{}", serde_json::to_string_pretty(chat.history())?);
        } else {
            stream_reply(&mut chat, &message).await?;
        }
        return Ok(());
    }

    print_banner(&chat);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", style("you ›").green().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match parse_command(&line) {
            Some(ChatCommand::Exit) => break,
            Some(ChatCommand::Help) => print_help(),
            Some(ChatCommand::FindHelp) => {
                println!("{} {}", style("you ›").green().bold(), persona::FIND_HELP_PROMPT);
                stream_reply(&mut chat, persona::FIND_HELP_PROMPT).await?;
            }
            Some(ChatCommand::New) => {
                chat.reset();
                let _ = chat.initialize();
                print_banner(&chat);
            }
            Some(ChatCommand::History) => print_history(chat.history()),
            Some(ChatCommand::Unknown(cmd)) => {
                println!(
                    "  {} Unknown command {}. Type {} for help.",
                    style("?").yellow().bold(),
                    style(cmd).yellow(),
                    style("/help").cyan()
                );
            }
            None => {
                if line.trim().is_empty() {
                    continue;
                }
                stream_reply(&mut chat, &line).await?;
            }
        }
    }

    println!("  {}", style("Take care of yourself.").dim());
    Ok(())
}

/// Send one turn, printing only the newly arrived text of each snapshot.
async fn stream_reply(chat: &mut ConcreteChat, text: &str) -> Result<()> {
    let mut printed = 0usize;
    let mut started = false;

    let turn = chat.send_turn(text);
    futures_util::pin_mut!(turn);
    while let Some(snapshot) = turn.next().await {
        if snapshot.is_error {
            if started {
                println!();
            }
            println!("{} {}", style("haven ›").red().bold(), style(&snapshot.text).red());
            break;
        }
        if !started {
            print!("{} ", style("haven ›").magenta().bold());
            started = true;
        }
        if let Some(delta) = snapshot.text.get(printed..) {
            print!("{delta}");
            std::io::stdout().flush()?;
        }
        printed = snapshot.text.len();
    }
    if started {
        println!();
    }
    println!();
    Ok(())
}

fn print_banner(chat: &ConcreteChat) {
    println!();
    println!(
        "  {} Haven {}",
        style("◆").magenta().bold(),
        style(format!("({})", chat.settings().model)).dim()
    );
    println!(
        "  {}",
        style("Not a crisis line. In an emergency call 911/112.").dim()
    );
    println!("  {}", style("Type /help for commands.").dim());
    println!();
    if let Some(greeting) = chat.history().first() {
        println!("{} {}", style("haven ›").magenta().bold(), greeting.text);
        println!();
    }
}

fn print_help() {
    println!();
    println!("  {}          show this help", style("/help").cyan());
    println!("  {}     ask for counsellors and safe communities", style("/find-help").cyan());
    println!("  {}           start a new conversation", style("/new").cyan());
    println!("  {}       show the conversation so far", style("/history").cyan());
    println!("  {}          leave", style("/exit").cyan());
    println!();
}

fn print_history(history: &[ChatMessage]) {
    println!();
    for message in history {
        let who = match (message.role, message.is_error) {
            (_, true) => style("haven !").red().bold(),
            (ChatRole::User, _) => style("you   ›").green().bold(),
            (ChatRole::Model, _) => style("haven ›").magenta().bold(),
        };
        println!("{who} {}", message.text);
    }
    println!();
}
