use crate::cli::Args;
use crate::error::CtxChatError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Default system prompt for stateful conversations.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a concise, professional, and friendly assistant.";

/// System prompt used for one-shot stateless calls.
pub const NAIVE_SYSTEM_PROMPT: &str = "You are a concise, professional assistant.";

pub struct Config {
    pub api_key: String,
    pub api_endpoint: String,
    pub model: String,
    pub system_prompt: Option<String>,
    pub stream_timeout: u64,
    pub verbose: bool,
    pub streaming: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub model: ModelSection,
    #[serde(default)]
    pub session: SessionSection,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiSection {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub stream_timeout: Option<u64>,
    #[serde(default)]
    pub stream: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelSection {
    #[serde(default)]
    pub default_model: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionSection {
    #[serde(default)]
    pub verbose: Option<bool>,
}

/// Expand environment variables in a string using ${VAR_NAME} syntax
pub fn expand_env_var_in_string(value: &str) -> String {
    let mut result = value.to_string();
    let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

    for cap in re.captures_iter(value) {
        let var_name = &cap[1];
        let replacement = env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name));
        result = result.replace(&cap[0], &replacement);
    }

    result
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> crate::error::Result<Self> {
        // Load file configuration first
        let file_config = FileConfig::load().unwrap_or_default();

        // API key is required from the environment; never read from files
        let api_key = env::var("CTXCHAT_API_KEY").map_err(|_| {
            CtxChatError::ConfigError("CTXCHAT_API_KEY environment variable not set".into())
        })?;

        // Endpoint: CLI args > env var > config file > default
        let api_endpoint = args
            .api_endpoint
            .clone()
            .or_else(|| env::var("CTXCHAT_API_ENDPOINT").ok())
            .or_else(|| {
                file_config
                    .api
                    .endpoint
                    .as_deref()
                    .map(expand_env_var_in_string)
            })
            .map(|endpoint| {
                // If the endpoint doesn't end with /chat/completions, append it
                if endpoint.ends_with("/chat/completions") {
                    endpoint
                } else if endpoint.ends_with("/v1") {
                    format!("{}/chat/completions", endpoint)
                } else if endpoint.ends_with("/v1/") {
                    format!("{}chat/completions", endpoint)
                } else {
                    // Assume it's a base URL without /v1
                    format!("{}/v1/chat/completions", endpoint.trim_end_matches('/'))
                }
            })
            .unwrap_or_else(|| "https://openrouter.ai/api/v1/chat/completions".to_string());

        // Model: env var > config file > default
        let model = env::var("CTXCHAT_MODEL")
            .ok()
            .or(file_config.model.default_model.clone())
            .unwrap_or_else(|| "openai/gpt-4.1-nano".to_string());

        // System prompt: env var > config file
        let system_prompt = env::var("CTXCHAT_SYSTEM_PROMPT").ok().or_else(|| {
            file_config
                .model
                .system_prompt
                .as_deref()
                .map(expand_env_var_in_string)
        });

        // Stream timeout: env var > config file > default
        let stream_timeout = env::var("CTXCHAT_STREAM_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .or(file_config.api.stream_timeout)
            .unwrap_or(30);

        // Verbose flag: env var > config file > default
        let verbose = env::var("CTXCHAT_VERBOSE")
            .ok()
            .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
            .or(file_config.session.verbose)
            .unwrap_or(false);

        // Streaming: CLI arg (--no-stream) > env var > config file > default on
        let streaming = if args.no_stream {
            false
        } else {
            match env::var("CTXCHAT_STREAM").ok() {
                Some(v) => matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"),
                None => file_config.api.stream.unwrap_or(true),
            }
        };

        Ok(Config {
            api_key,
            api_endpoint,
            model,
            system_prompt,
            stream_timeout,
            verbose,
            streaming,
        })
    }

    pub fn current_date() -> String {
        chrono::Local::now().format("%A, %B %d, %Y").to_string()
    }
}

impl FileConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config_paths = Self::config_paths();

        for path in config_paths {
            if path.exists() {
                let contents = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

                // YAML is the primary format; JSON is accepted as well
                let ext = path.extension().and_then(|s| s.to_str());
                let config: FileConfig = if ext == Some("yaml") || ext == Some("yml") {
                    serde_yaml::from_str(&contents).with_context(|| {
                        format!("Failed to parse YAML config file: {}", path.display())
                    })?
                } else {
                    serde_json::from_str(&contents).with_context(|| {
                        format!("Failed to parse JSON config file: {}", path.display())
                    })?
                };

                return Ok(config);
            }
        }

        // No config file found, return default
        Ok(FileConfig::default())
    }

    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Current directory (highest priority - local override)
        paths.push(PathBuf::from(".ctxchat.yaml"));
        paths.push(PathBuf::from(".ctxchat.yml"));
        paths.push(PathBuf::from(".ctxchat.json"));

        // 2. User's config directory (global config)
        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("ctxchat");
            paths.push(config_dir.join("ctxchat.yaml"));
            paths.push(config_dir.join("ctxchat.yml"));
            paths.push(config_dir.join("ctxchat.json"));
        }

        paths
    }
}
