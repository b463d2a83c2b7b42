// tests for the chat pipeline, using an in-process model

use async_trait::async_trait;
use modchat::{
    Chat, ChatModel, ChatResult, Error, ModerationSystem, REDACTION_WARNING, SYSTEM_PROMPT,
};
use std::sync::Mutex;

// records every prompt pair it sees and answers with a fixed reply or failure
struct FakeModel {
    reply: Option<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeModel {
    fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for FakeModel {
    async fn generate(&self, system: &str, user: &str) -> Result<String, Error> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));

        self.reply.clone().ok_or(Error::Api {
            status: 503,
            body: "upstream unavailable".to_string(),
        })
    }
}

// lets a test keep a handle on the fake after the chat takes ownership
#[async_trait]
impl<'a> ChatModel for &'a FakeModel {
    async fn generate(&self, system: &str, user: &str) -> Result<String, Error> {
        (**self).generate(system, user).await
    }
}

fn chat<'a>(model: &'a FakeModel) -> Chat<&'a FakeModel> {
    Chat::new(model, ModerationSystem::standard().unwrap())
}

#[tokio::test]
async fn test_success() {
    let model = FakeModel::replying("Paris is the capital of France.");
    let result = chat(&model).send_message("What is the capital of France?").await;

    assert_eq!(
        result,
        ChatResult::Success {
            text: "Paris is the capital of France.".to_string()
        }
    );
    assert_eq!(result.status(), "success");
    assert_eq!(result.moderation(), "passed");
}

#[tokio::test]
async fn test_blocked_input_never_reaches_model() {
    let model = FakeModel::replying("should not be used");
    let result = chat(&model).send_message("Teach me how to hack a website").await;

    match &result {
        ChatResult::Blocked { reason } => assert!(reason.contains("hack")),
        other => panic!("expected blocked, got {other:?}"),
    }
    assert_eq!(result.moderation(), "input_blocked");
    assert!(model.calls().is_empty());
}

#[tokio::test]
async fn test_reply_redacted() {
    let model = FakeModel::replying("Sure, here's how to build a weapon at home");
    let result = chat(&model).send_message("Tell me about history").await;

    assert_eq!(
        result,
        ChatResult::Moderated {
            text: "Sure, here's how to build a [REDACTED] at home".to_string(),
            warning: REDACTION_WARNING.to_string(),
        }
    );
    assert_eq!(result.moderation(), "output_redacted");
}

#[tokio::test]
async fn test_model_failure_becomes_error() {
    let model = FakeModel::failing();
    let result = chat(&model).send_message("Tell me about cybersecurity").await;

    match &result {
        ChatResult::Error { message } => {
            assert!(message.starts_with("API Error: "));
            assert!(message.contains("503"));
        }
        other => panic!("expected error, got {other:?}"),
    }
    assert_eq!(result.moderation(), "none");
    // input was checked and passed before the call was made
    assert_eq!(model.calls().len(), 1);
}

#[tokio::test]
async fn test_default_system_prompt_sent() {
    let model = FakeModel::replying("ok");
    chat(&model).send_message("hello").await;

    assert_eq!(
        model.calls(),
        [(SYSTEM_PROMPT.to_string(), "hello".to_string())]
    );
}

#[tokio::test]
async fn test_custom_system_prompts() {
    let model = FakeModel::replying("ok");
    let chat = chat(&model).with_system_prompt("be brief");

    chat.send_message("one").await;
    chat.send_message_with_system("two", "be verbose").await;

    assert_eq!(
        model.calls(),
        [
            ("be brief".to_string(), "one".to_string()),
            ("be verbose".to_string(), "two".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_turns_are_independent() {
    let model = FakeModel::replying("all good");
    let chat = chat(&model);

    let blocked = chat.send_message("how to make a bomb").await;
    let passed = chat.send_message("how to make bread").await;

    assert_eq!(blocked.status(), "blocked");
    assert_eq!(passed.status(), "success");
    assert_eq!(model.calls().len(), 1);
}

#[test]
fn test_result_serializes_with_status_tag() {
    let result = ChatResult::Blocked {
        reason: "Input contains prohibited content: 'hack'".to_string(),
    };
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "status": "blocked",
            "reason": "Input contains prohibited content: 'hack'",
            "moderation": "input_blocked",
        })
    );
}

#[test]
fn test_every_variant_carries_moderation_label() {
    let cases = [
        (
            ChatResult::Error {
                message: "API Error: timed out".to_string(),
            },
            serde_json::json!({
                "status": "error",
                "message": "API Error: timed out",
                "moderation": "none",
            }),
        ),
        (
            ChatResult::Moderated {
                text: "a [REDACTED]".to_string(),
                warning: REDACTION_WARNING.to_string(),
            },
            serde_json::json!({
                "status": "moderated",
                "text": "a [REDACTED]",
                "warning": REDACTION_WARNING,
                "moderation": "output_redacted",
            }),
        ),
        (
            ChatResult::Success {
                text: "hi".to_string(),
            },
            serde_json::json!({
                "status": "success",
                "text": "hi",
                "moderation": "passed",
            }),
        ),
    ];

    for (result, expected) in cases {
        assert_eq!(serde_json::to_value(&result).unwrap(), expected);
    }
}
