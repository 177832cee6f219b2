use ctxchat::error::CtxChatError;
use ctxchat::history::ConversationHistory;
use ctxchat::models::Role;

#[test]
fn test_append_preserves_call_order() {
    let mut history = ConversationHistory::new();
    history.append(Role::User, "My name is Sunil").unwrap();
    history.append(Role::User, "What is my name?").unwrap();

    let messages = history.history();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "My name is Sunil");
    assert_eq!(messages[1].content, "What is my name?");
}

#[test]
fn test_append_n_messages_yields_length_n() {
    let mut history = ConversationHistory::new();
    for i in 0..10 {
        history.append(Role::User, format!("message {}", i)).unwrap();
    }
    assert_eq!(history.len(), 10);
    assert_eq!(history.history().len(), 10);
}

#[test]
fn test_reset_empties_history() {
    let mut history = ConversationHistory::new();
    history.append(Role::User, "hello").unwrap();
    history.append(Role::Assistant, "hi there").unwrap();
    assert!(!history.is_empty());

    history.reset();
    assert!(history.is_empty());
    assert!(history.history().is_empty());
}

#[test]
fn test_append_rejects_empty_content() {
    let mut history = ConversationHistory::new();
    assert!(matches!(
        history.append(Role::User, ""),
        Err(CtxChatError::EmptyInput)
    ));
    assert!(matches!(
        history.append(Role::User, "   \n\t"),
        Err(CtxChatError::EmptyInput)
    ));
    assert!(history.is_empty());
}

#[test]
fn test_ensure_system_prompt_inserts_once() {
    let mut history = ConversationHistory::new();
    history.append(Role::User, "hello").unwrap();

    history.ensure_system_prompt("You are helpful.");
    history.ensure_system_prompt("You are different.");

    let messages = history.history();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::System);
    assert_eq!(messages[0].content, "You are helpful.");
    assert_eq!(messages[1].role, Role::User);
}

#[test]
fn test_trim_keeps_system_and_last_pairs() {
    let mut history = ConversationHistory::new();
    history.ensure_system_prompt("system prompt");
    for i in 0..5 {
        history.append(Role::User, format!("question {}", i)).unwrap();
        history
            .append(Role::Assistant, format!("answer {}", i))
            .unwrap();
    }

    history.trim(3);

    let messages = history.history();
    // 1 system message + 3 pairs
    assert_eq!(messages.len(), 7);
    assert_eq!(messages[0].role, Role::System);
    assert_eq!(messages[1].content, "question 2");
    assert_eq!(messages[6].content, "answer 4");
}

#[test]
fn test_trim_noop_when_under_limit() {
    let mut history = ConversationHistory::new();
    history.append(Role::User, "only question").unwrap();
    history.append(Role::Assistant, "only answer").unwrap();

    history.trim(3);

    assert_eq!(history.len(), 2);
    assert_eq!(history.history()[0].content, "only question");
}

#[test]
fn test_history_round_trips_through_messages() {
    let mut history = ConversationHistory::new();
    history.append(Role::User, "first").unwrap();
    history.append(Role::Assistant, "second").unwrap();

    let messages = history.clone().into_messages();
    let restored = ConversationHistory::from(messages);
    assert_eq!(restored.history(), history.history());
}
