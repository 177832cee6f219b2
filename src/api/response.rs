use crate::error::{CtxChatError, Result};
use crate::models::Usage;
use serde_json::Value;

/// Extract assistant content from a non-streaming response
pub fn extract_content(response_json: &Value) -> Result<Option<String>> {
    let choices = response_json
        .get("choices")
        .and_then(|c| c.as_array())
        .ok_or_else(|| CtxChatError::MalformedResponse("No choices in response".to_string()))?;

    let first_choice = choices
        .first()
        .ok_or_else(|| CtxChatError::MalformedResponse("Empty choices array".to_string()))?;

    let message = first_choice
        .get("message")
        .ok_or_else(|| CtxChatError::MalformedResponse("No message in response".to_string()))?;

    Ok(message
        .get("content")
        .and_then(|c| c.as_str())
        .map(|s| s.to_string()))
}

/// Extract token usage from a non-streaming response, if reported
pub fn extract_usage(response_json: &Value) -> Result<Option<Usage>> {
    match response_json.get("usage") {
        Some(usage) if !usage.is_null() => {
            let usage: Usage = serde_json::from_value(usage.clone())
                .map_err(|e| CtxChatError::MalformedResponse(format!("Bad usage object: {}", e)))?;
            Ok(Some(usage))
        }
        _ => Ok(None),
    }
}
