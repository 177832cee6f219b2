use ctxchat::api::response::{extract_content, extract_usage};
use ctxchat::models::Usage;
use serde_json::json;

#[test]
fn test_extract_content_with_content() {
    let response = json!({
        "choices": [{
            "message": {
                "content": "Hello, world!",
                "role": "assistant"
            }
        }]
    });

    let content = extract_content(&response).unwrap();
    assert_eq!(content, Some("Hello, world!".to_string()));
}

#[test]
fn test_extract_content_without_content() {
    let response = json!({
        "choices": [{
            "message": {
                "role": "assistant"
            }
        }]
    });

    let content = extract_content(&response).unwrap();
    assert_eq!(content, None);
}

#[test]
fn test_extract_content_empty_choices() {
    let response = json!({
        "choices": []
    });

    let result = extract_content(&response);
    assert!(result.is_err());
}

#[test]
fn test_extract_content_missing_choices() {
    let response = json!({
        "id": "chatcmpl-123"
    });

    let result = extract_content(&response);
    assert!(result.is_err());
}

#[test]
fn test_extract_usage_with_usage() {
    let response = json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": "hi"
            }
        }],
        "usage": {
            "prompt_tokens": 12,
            "completion_tokens": 4,
            "total_tokens": 16
        }
    });

    let usage = extract_usage(&response).unwrap();
    assert_eq!(
        usage,
        Some(Usage {
            prompt_tokens: 12,
            completion_tokens: 4,
            total_tokens: 16
        })
    );
}

#[test]
fn test_extract_usage_without_usage() {
    let response = json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": "hi"
            }
        }]
    });

    let usage = extract_usage(&response).unwrap();
    assert_eq!(usage, None);
}

#[test]
fn test_extract_usage_null_usage() {
    let response = json!({
        "choices": [],
        "usage": null
    });

    let usage = extract_usage(&response).unwrap();
    assert_eq!(usage, None);
}

#[test]
fn test_extract_usage_malformed() {
    let response = json!({
        "usage": "not an object"
    });

    let result = extract_usage(&response);
    assert!(result.is_err());
}
