//! Main chat loop orchestration.
//!
//! Coordinates the conversation lifecycle: banner, conversation bootstrap,
//! greeting, input loop, streamed responses, and failure handling. The
//! session state and all streaming semantics live in silk-core; this loop
//! is the terminal rendering around them.

use std::io::Write;
use std::sync::{Arc, Mutex};

use console::style;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use silk_core::chat::pump::{pump_stream, PumpOutcome};
use silk_core::chat::session::ChatSession;
use silk_types::message::{ChatMessage, MessageRole};

use super::banner::print_welcome_banner;
use super::input::{ChatInput, InputEvent};

/// Opening assistant message, shown before any exchange.
const GREETING: &str = "👋 Welcome to SILK Finance! I'm your AI Relationship Manager. \
I'm here to help you get the personal loan you need. What brings you here today?";

const TRANSIENT_FAILURE_NOTICE: &str = "Failed to send message. Please try again.";

/// Run the interactive chat loop against a running server.
pub async fn run_chat_loop(server_url: &str, api_key: &str) -> anyhow::Result<()> {
    let server_url = server_url.trim_end_matches('/').to_string();
    let client = reqwest::Client::new();

    print_welcome_banner(&server_url);

    let mut session = ChatSession::new();
    attach_renderer(&mut session);

    // Bootstrap a persisted conversation. Chatting works without one; the
    // transcript just won't be saved.
    match create_conversation(&client, &server_url, api_key).await {
        Ok(id) => session.set_conversation_id(id),
        Err(err) => {
            tracing::warn!(error = %err, "conversation bootstrap failed; transcript will not be saved");
        }
    }

    print_assistant_prefix();
    session.push(ChatMessage::assistant(GREETING));
    println!();
    println!();

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut input, _writer) =
        ChatInput::new(prompt).map_err(|e| anyhow::anyhow!("failed to initialize input: {e}"))?;

    loop {
        match input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if text == "/exit" || text == "/quit" {
                    println!("\n  {}", style("Session ended.").dim());
                    break;
                }

                // Blank input and double-sends are no-ops.
                if !session.begin_exchange(&text) {
                    continue;
                }

                // History for the request: everything up to, but not
                // including, the empty placeholder.
                let history: Vec<ChatMessage> =
                    session.messages()[..session.messages().len() - 1].to_vec();

                let spinner = thinking_spinner();

                let response = client
                    .post(format!("{server_url}/api/v1/chat/stream"))
                    .bearer_auth(api_key)
                    .json(&serde_json::json!({
                        "messages": history,
                        "conversation_id": session.conversation_id(),
                    }))
                    .send()
                    .await;

                let response = match response {
                    Ok(response) => response,
                    Err(err) => {
                        spinner.finish_and_clear();
                        tracing::debug!(error = %err, "relay request failed");
                        session.fail_exchange();
                        print_failure_notice(TRANSIENT_FAILURE_NOTICE);
                        continue;
                    }
                };

                if !response.status().is_success() {
                    spinner.finish_and_clear();
                    let notice = error_message(response).await;
                    session.fail_exchange();
                    print_failure_notice(&notice);
                    continue;
                }

                spinner.finish_and_clear();
                print_assistant_prefix();

                let stream = Box::pin(response.bytes_stream());
                let cancel = CancellationToken::new();
                let pump = pump_stream(stream, &mut session, &cancel);
                tokio::pin!(pump);

                // Ctrl+C during streaming cancels the read loop; the
                // partial reply stays in the transcript.
                let outcome = loop {
                    tokio::select! {
                        result = &mut pump => break result,
                        _ = tokio::signal::ctrl_c() => cancel.cancel(),
                    }
                };

                match outcome {
                    Ok(PumpOutcome::Completed(_)) | Ok(PumpOutcome::Cancelled(_)) => {
                        println!();
                        println!();
                    }
                    Err(err) => {
                        tracing::debug!(error = %err, "stream read failed");
                        println!();
                        print_failure_notice(TRANSIENT_FAILURE_NOTICE);
                    }
                }
            }
        }
    }

    Ok(())
}

/// Attach a renderer that prints the growing assistant reply.
///
/// The observer fires on every session mutation; it prints only the suffix
/// of the last assistant message that has not been printed yet, which makes
/// re-rendering after each delta a constant-size write.
fn attach_renderer(session: &mut ChatSession) {
    let printed = Arc::new(Mutex::new(0usize));

    session.subscribe(Box::new(move |messages| {
        let Some(last) = messages.last() else {
            return;
        };

        let mut printed = printed.lock().unwrap();
        if last.role != MessageRole::Assistant {
            *printed = 0;
            return;
        }

        let content = &last.content;
        if *printed > content.len() {
            // A new, shorter assistant message replaced the streamed one.
            *printed = 0;
        }
        if *printed < content.len() {
            print!("{}", &content[*printed..]);
            let _ = std::io::stdout().flush();
            *printed = content.len();
        }
    }));
}

fn print_assistant_prefix() {
    print!("\n  {} ", style("SILK >").cyan().bold());
    let _ = std::io::stdout().flush();
}

fn print_failure_notice(notice: &str) {
    eprintln!("\n  {} {}", style("!").red().bold(), notice);
    eprintln!(
        "  {}",
        style("The conversation is still open; type a message to retry.").dim()
    );
    println!();
}

fn thinking_spinner() -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Extract the server's `{"error": "..."}` message, if it sent one.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| format!("{TRANSIENT_FAILURE_NOTICE} (HTTP {status})"))
}

async fn create_conversation(
    client: &reqwest::Client,
    server_url: &str,
    api_key: &str,
) -> anyhow::Result<Uuid> {
    #[derive(Deserialize)]
    struct Created {
        id: Uuid,
    }

    let response = client
        .post(format!("{server_url}/api/v1/conversations"))
        .bearer_auth(api_key)
        .send()
        .await?;

    if !response.status().is_success() {
        anyhow::bail!("conversation create failed: HTTP {}", response.status());
    }

    Ok(response.json::<Created>().await?.id)
}
