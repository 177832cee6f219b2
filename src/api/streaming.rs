use crate::api::models::StreamResponse;
use crate::error::{CtxChatError, Result};
use crate::models::Usage;
use colored::*;
use futures::StreamExt;
use std::io::{self, Write};
use tokio::time::{timeout, Duration};

pub struct StreamingResult {
    pub content: String,
    pub usage: Option<Usage>,
}

/// Consume an SSE chat-completions stream, printing content deltas as they
/// arrive and accumulating the full assistant reply.
///
/// A chunk that takes longer than `timeout_secs` to arrive aborts the stream
/// with `Timeout`; partial output already printed stays on screen.
pub async fn process_streaming_response(
    response: reqwest::Response,
    timeout_secs: u64,
    verbose: bool,
) -> Result<StreamingResult> {
    let mut stream = response.bytes_stream();
    let mut buffer = String::new();
    let mut incomplete_line = String::new();
    let mut assistant_response = String::new();
    let mut usage: Option<Usage> = None;
    let mut last_flush = std::time::Instant::now();
    let flush_interval = std::time::Duration::from_millis(50);
    let chunk_timeout = Duration::from_secs(timeout_secs);

    loop {
        match timeout(chunk_timeout, stream.next()).await {
            Ok(Some(chunk)) => {
                let chunk = chunk.map_err(CtxChatError::NetworkError)?;
                let text = String::from_utf8_lossy(&chunk);
                incomplete_line.push_str(&text);
            }
            Ok(None) => break,
            Err(_) => {
                eprintln!(
                    "{}",
                    format!(
                        "Error: Connection timeout - no data received for {} seconds",
                        timeout_secs
                    )
                    .red()
                );
                eprintln!(
                    "{}",
                    "The AI service may be experiencing issues or the connection was lost."
                        .dimmed()
                );
                io::stdout().flush()?;
                return Err(CtxChatError::Timeout);
            }
        }

        // Find last newline to ensure we only process complete lines
        if let Some(last_newline_pos) = incomplete_line.rfind('\n') {
            buffer.push_str(&incomplete_line[..=last_newline_pos]);
            incomplete_line = incomplete_line[last_newline_pos + 1..].to_string();
        } else {
            continue;
        }

        // Process complete lines
        while let Some(line_end) = buffer.find('\n') {
            let line = buffer[..line_end].to_string();
            buffer = buffer[line_end + 1..].to_string();

            if line.is_empty() || line.starts_with(':') {
                continue;
            }

            // Parse SSE field
            if let Some(colon_pos) = line.find(':') {
                let field = line[..colon_pos].trim();
                let value = line[colon_pos + 1..].trim_start();

                match field {
                    "data" => {
                        if value == "[DONE]" {
                            println!();
                            io::stdout().flush()?;

                            return Ok(StreamingResult {
                                content: assistant_response,
                                usage,
                            });
                        }

                        match serde_json::from_str::<StreamResponse>(value) {
                            Ok(parsed) => {
                                if let Some(reported) = parsed.usage {
                                    usage = Some(reported);
                                }

                                if let Some(choices) = parsed.choices {
                                    for choice in choices {
                                        if let Some(delta) = choice.delta {
                                            if let Some(content) = delta.content {
                                                assistant_response.push_str(&content);
                                                print!("{}", content);

                                                if last_flush.elapsed() > flush_interval {
                                                    io::stdout().flush()?;
                                                    last_flush = std::time::Instant::now();
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                            Err(e) => {
                                if verbose {
                                    eprintln!(
                                        "{}",
                                        format!("[cx] JSON parse error: {}", e).dimmed()
                                    );
                                }
                            }
                        }
                    }
                    "event" | "id" | "retry" => {
                        if verbose {
                            eprintln!("{}", format!("[cx] SSE {}: {}", field, value).dimmed());
                        }
                    }
                    _ => {
                        if verbose {
                            eprintln!("{}", format!("[cx] Unknown SSE field: {}", field).dimmed());
                        }
                    }
                }
            }
        }
    }

    // Stream ended without [DONE]
    println!();
    io::stdout().flush()?;

    Ok(StreamingResult {
        content: assistant_response,
        usage,
    })
}
