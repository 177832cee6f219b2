use std::fmt;

#[derive(Debug)]
pub enum CtxChatError {
    ApiError {
        status: u16,
        message: String,
    },
    ConfigError(String),
    SessionError(String),
    /// A message with empty or whitespace-only content was submitted.
    EmptyInput,
    /// The endpoint answered with a body we could not interpret.
    MalformedResponse(String),
    NetworkError(reqwest::Error),
    Timeout,
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    YamlError(serde_yaml::Error),
    Other(String),
}

impl fmt::Display for CtxChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CtxChatError::ApiError { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            CtxChatError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            CtxChatError::SessionError(msg) => write!(f, "Session error: {}", msg),
            CtxChatError::EmptyInput => write!(f, "Message content must not be empty"),
            CtxChatError::MalformedResponse(msg) => {
                write!(f, "Malformed response from endpoint: {}", msg)
            }
            CtxChatError::NetworkError(e) => write!(f, "Network error: {}", e),
            CtxChatError::Timeout => write!(f, "Request timeout"),
            CtxChatError::IoError(e) => write!(f, "IO error: {}", e),
            CtxChatError::JsonError(e) => write!(f, "JSON error: {}", e),
            CtxChatError::YamlError(e) => write!(f, "YAML error: {}", e),
            CtxChatError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CtxChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CtxChatError::NetworkError(e) => Some(e),
            CtxChatError::IoError(e) => Some(e),
            CtxChatError::JsonError(e) => Some(e),
            CtxChatError::YamlError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CtxChatError {
    fn from(err: reqwest::Error) -> Self {
        CtxChatError::NetworkError(err)
    }
}

impl From<std::io::Error> for CtxChatError {
    fn from(err: std::io::Error) -> Self {
        CtxChatError::IoError(err)
    }
}

impl From<serde_json::Error> for CtxChatError {
    fn from(err: serde_json::Error) -> Self {
        CtxChatError::JsonError(err)
    }
}

impl From<serde_yaml::Error> for CtxChatError {
    fn from(err: serde_yaml::Error) -> Self {
        CtxChatError::YamlError(err)
    }
}

impl From<anyhow::Error> for CtxChatError {
    fn from(err: anyhow::Error) -> Self {
        CtxChatError::Other(err.to_string())
    }
}

impl From<String> for CtxChatError {
    fn from(msg: String) -> Self {
        CtxChatError::Other(msg)
    }
}

impl From<&str> for CtxChatError {
    fn from(msg: &str) -> Self {
        CtxChatError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CtxChatError>;
