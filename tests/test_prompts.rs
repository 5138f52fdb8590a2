//! Tests for the built-in prompt catalog.

use std::collections::HashMap;

use chatbot_config::{PromptError, PromptRegistry};

const EXPECTED: &[(&str, &[&str])] = &[
    ("INTENT_CLASSIFICATION", &["user_input"]),
    ("ENTITY_EXTRACTION", &["user_input", "intent"]),
    ("REACT_AGENT_SYSTEM", &["tools_description", "chat_history", "user_input"]),
    ("AGENT_FOLLOWUP", &["previous_thoughts", "tool_results"]),
    ("TOOL_SELECTION", &["available_tools", "task", "entities"]),
    ("TOOL_ERROR_HANDLER", &["tool_name", "error_message", "user_input"]),
    ("RESPONSE_GENERATION", &["chat_history", "tool_results", "user_input"]),
    ("CHITCHAT_RESPONSE", &["chat_history", "user_input"]),
    ("CONVERSATION_SUMMARY", &["conversation"]),
    ("CONTEXT_COMPRESSION", &["full_conversation", "turn_count"]),
    ("RAG_QUERY_GENERATION", &["user_question"]),
    ("RAG_ANSWER_WITH_CONTEXT", &["question", "retrieved_context"]),
    (
        "ERROR_RECOVERY",
        &["error_type", "error_message", "user_input", "conversation_state"],
    ),
    ("FALLBACK_RESPONSE", &["user_input", "attempted_intent"]),
];

#[test]
fn test_catalog_names() {
    let prompts = PromptRegistry::new();
    let mut expected: Vec<&str> = EXPECTED.iter().map(|(n, _)| *n).collect();
    expected.sort_unstable();
    assert_eq!(prompts.names(), expected);
}

#[test]
fn test_catalog_placeholders() {
    let prompts = PromptRegistry::new();
    for (name, vars) in EXPECTED {
        assert_eq!(prompts.placeholders(name).unwrap(), *vars, "{name}");
    }
}

#[test]
fn test_every_template_builds_with_all_vars() {
    let prompts = PromptRegistry::new();
    for (name, vars) in EXPECTED {
        let values: Vec<String> = vars.iter().map(|v| format!("<{v}>")).collect();
        let pairs = vars.iter().copied().zip(values.iter().map(String::as_str));
        let out = prompts.build(name, pairs).unwrap();
        for value in &values {
            assert!(out.contains(value.as_str()), "{name} should contain {value}");
        }
        assert!(!out.contains("{{"), "{name} should not keep doubled braces");
    }
}

#[test]
fn test_intent_classification_fills_input() {
    let out = PromptRegistry::new()
        .build("INTENT_CLASSIFICATION", [("user_input", "hi")])
        .unwrap();
    assert!(out.contains("用户输入：hi"));
    assert!(out.ends_with("仅返回意图类别，不要其他解释。"));
    assert!(!out.contains("{user_input}"));
}

#[test]
fn test_missing_variable() {
    let vars: HashMap<&str, &str> = HashMap::new();
    let err = PromptRegistry::new()
        .build("INTENT_CLASSIFICATION", vars)
        .unwrap_err();
    assert!(matches!(
        err,
        PromptError::MissingPlaceholder { ref placeholder, .. } if placeholder == "user_input"
    ));
}

#[test]
fn test_unknown_template() {
    let err = PromptRegistry::new()
        .build("DOES_NOT_EXIST", [("user_input", "hi")])
        .unwrap_err();
    assert_eq!(err, PromptError::UnknownTemplate("DOES_NOT_EXIST".into()));
    assert!(PromptRegistry::new().get("DOES_NOT_EXIST").is_none());
}

#[test]
fn test_escaped_braces_render_as_json() {
    let out = PromptRegistry::new()
        .prompt("ENTITY_EXTRACTION")
        .unwrap()
        .var("user_input", "weather tomorrow")
        .var("intent", "query")
        .build()
        .unwrap();
    assert!(out.contains("{\n    \"location\""));
    assert!(out.contains("返回空 JSON 对象 {}。"));
}

#[test]
fn test_extra_variables_ignored() {
    let prompts = PromptRegistry::new();
    let a = prompts
        .build("CONVERSATION_SUMMARY", [("conversation", "A: hi\nB: hello")])
        .unwrap();
    let b = prompts
        .build(
            "CONVERSATION_SUMMARY",
            [("conversation", "A: hi\nB: hello"), ("unused", "x")],
        )
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_build_with_defaults_override_wins() {
    let defaults: HashMap<String, String> = [("user_input", "a"), ("attempted_intent", "query")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let overrides: HashMap<String, String> =
        HashMap::from([("user_input".to_string(), "b".to_string())]);
    let out = PromptRegistry::new()
        .build_with_defaults("FALLBACK_RESPONSE", Some(&defaults), &overrides)
        .unwrap();
    assert!(out.contains("用户输入：b"));
    assert!(out.contains("尝试的意图识别：query"));
}

#[test]
fn test_build_is_repeatable() {
    let prompts = PromptRegistry::new();
    let vars = [("user_question", "what is rust?")];
    assert_eq!(
        prompts.build("RAG_QUERY_GENERATION", vars).unwrap(),
        prompts.build("RAG_QUERY_GENERATION", vars).unwrap()
    );
}
