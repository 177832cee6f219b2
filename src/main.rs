use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use ctxchat::api::{process_streaming_response, response, send_chat_request, RequestBody};
use ctxchat::cli::Args;
use ctxchat::config::{Config, DEFAULT_SYSTEM_PROMPT, NAIVE_SYSTEM_PROMPT};
use ctxchat::error::{CtxChatError, Result};
use ctxchat::history::ConversationHistory;
use ctxchat::models::{Message, Role, Usage};
use ctxchat::session::{
    create_new_session, FilesystemSessionStore, SessionStore, MAX_CONVERSATION_PAIRS,
};
use ctxchat::telemetry::{self, CallTimer, InvocationMode};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ctxchat=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    // Handle --clear option
    if args.clear_history {
        match FilesystemSessionStore::new().clear_all_sessions() {
            Ok(_) => {
                println!("{}", "All conversation history cleared.".green());
                return Ok(());
            }
            Err(e) => {
                eprintln!("{}", format!("Error clearing history: {}", e).red());
                process::exit(1);
            }
        }
    }

    if args.prompt.is_empty() {
        print_usage();
        process::exit(1);
    }

    let prompt = args.prompt.join(" ");

    // Load configuration
    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    if config.verbose {
        eprintln!("{}", format!("[cx] Using model: {}", config.model).dimmed());
        eprintln!(
            "{}",
            format!(
                "[cx] Mode: {}",
                if args.naive { "stateless" } else { "stateful" }
            )
            .dimmed()
        );
    }

    let outcome = if args.naive {
        run_stateless(&config, &prompt).await
    } else {
        run_stateful(&config, &args, &prompt).await
    };

    if let Err(e) = outcome {
        eprintln!("{} {}", "Error:".red(), e);
        process::exit(1);
    }

    Ok(())
}

/// Message-based invocation: replay the session history, append the new turn,
/// and persist the assistant reply for the next call.
async fn run_stateful(config: &Config, args: &Args, prompt: &str) -> Result<()> {
    let store = FilesystemSessionStore::new();

    // Load or create session
    let mut session = if args.new_conversation {
        create_new_session()
    } else if args.force_continue {
        store.find_latest_session().unwrap_or_else(create_new_session)
    } else {
        store.find_recent_session().unwrap_or_else(create_new_session)
    };

    let mut history = ConversationHistory::from(session.messages.clone());

    let date_prompt = format!("Today's date is {}.", Config::current_date());
    let system_content = match &config.system_prompt {
        Some(prompt) => format!("{}\n\n{}", date_prompt, prompt),
        None => format!("{}\n\n{}", date_prompt, DEFAULT_SYSTEM_PROMPT),
    };
    history.ensure_system_prompt(system_content);

    history.append(Role::User, prompt)?;
    history.trim(MAX_CONVERSATION_PAIRS);

    let assistant_response = invoke(
        config,
        &history,
        &session.session_id,
        InvocationMode::Stateful,
    )
    .await?;

    // Save session with assistant's response
    if !assistant_response.is_empty() {
        session.messages = history.into_messages();
        session
            .messages
            .push(Message::new(Role::Assistant, assistant_response));
        session.last_updated = chrono::Local::now();

        if let Err(e) = store.save_session(&session) {
            if config.verbose {
                eprintln!(
                    "{}",
                    format!("[cx] Warning: Failed to save session: {}", e).dimmed()
                );
            }
        }
    }

    Ok(())
}

/// Naive invocation: a minimal system message plus the current prompt, no
/// session read or write. Each call is independent.
async fn run_stateless(config: &Config, prompt: &str) -> Result<()> {
    // Ephemeral id, only for log correlation
    let session_id = Uuid::new_v4().to_string();

    let mut history = ConversationHistory::new();
    history.ensure_system_prompt(NAIVE_SYSTEM_PROMPT);
    history.append(Role::User, prompt)?;

    invoke(config, &history, &session_id, InvocationMode::Stateless).await?;

    Ok(())
}

/// Submit the accumulated history to the endpoint, with call telemetry
/// around the request.
async fn invoke(
    config: &Config,
    history: &ConversationHistory,
    session_id: &str,
    mode: InvocationMode,
) -> Result<String> {
    let user_message = history
        .history()
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
        .unwrap_or_default();

    telemetry::call_start(session_id, mode, &config.model, user_message);
    let timer = CallTimer::start();

    match dispatch(config, history).await {
        Ok((content, usage)) => {
            telemetry::call_success(session_id, timer.elapsed_seconds(), usage.as_ref());
            Ok(content)
        }
        Err(e) => {
            telemetry::call_error(session_id, timer.elapsed_seconds(), &e);
            Err(e)
        }
    }
}

async fn dispatch(
    config: &Config,
    history: &ConversationHistory,
) -> Result<(String, Option<Usage>)> {
    let request_body = RequestBody {
        model: config.model.clone(),
        messages: history.history().to_vec(),
        stream: config.streaming,
    };

    let response = send_chat_request(&config.api_key, &config.api_endpoint, &request_body).await?;

    if config.streaming {
        let result =
            process_streaming_response(response, config.stream_timeout, config.verbose).await?;
        Ok((result.content, result.usage))
    } else {
        let body: serde_json::Value = response.json().await?;
        let content = response::extract_content(&body)?.ok_or_else(|| {
            CtxChatError::MalformedResponse("assistant message had no content".to_string())
        })?;
        let usage = response::extract_usage(&body)?;

        println!("{}", content);
        Ok((content, usage))
    }
}

fn print_usage() {
    eprintln!("{}", "Usage: cx [OPTIONS] <prompt>".red());
    eprintln!(
        "{}",
        "  -n, --new                  Start a new conversation".dimmed()
    );
    eprintln!(
        "{}",
        "  -c, --continue             Continue previous conversation even if expired".dimmed()
    );
    eprintln!(
        "{}",
        "      --clear                Clear all conversation history".dimmed()
    );
    eprintln!(
        "{}",
        "      --naive                Stateless invocation with no memory".dimmed()
    );
    eprintln!(
        "{}",
        "      --no-stream            Wait for the full response instead of streaming".dimmed()
    );
    eprintln!(
        "{}",
        "      --api-endpoint         Custom API base URL".dimmed()
    );
}
