use crate::error::CtxChatError;
use crate::models::Usage;
use std::fmt;
use std::time::Instant;
use tracing::{error, info};

/// Whether a call carries the accumulated conversation or only the current
/// prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvocationMode {
    Stateful,
    Stateless,
}

impl fmt::Display for InvocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationMode::Stateful => write!(f, "stateful"),
            InvocationMode::Stateless => write!(f, "stateless"),
        }
    }
}

/// Wall-clock latency for one endpoint call.
pub struct CallTimer {
    start: Instant,
}

impl CallTimer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

pub fn call_start(session_id: &str, mode: InvocationMode, model: &str, user_message: &str) {
    info!(
        event = "llm_call_start",
        session_id,
        mode = %mode,
        model,
        user_message,
        "dispatching chat completion"
    );
}

pub fn call_success(session_id: &str, latency_seconds: f64, usage: Option<&Usage>) {
    match usage {
        Some(usage) => info!(
            event = "llm_call_success",
            session_id,
            latency_seconds,
            input_tokens = usage.prompt_tokens,
            output_tokens = usage.completion_tokens,
            "chat completion finished"
        ),
        None => info!(
            event = "llm_call_success",
            session_id,
            latency_seconds,
            "chat completion finished"
        ),
    }
}

pub fn call_error(session_id: &str, latency_seconds: f64, error: &CtxChatError) {
    error!(
        event = "llm_call_error",
        session_id,
        latency_seconds,
        error = %error,
        "chat completion failed"
    );
}
