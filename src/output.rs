// output formatting - readable text or raw json

use crate::ChatResult;

pub const BLOCKED_MESSAGE: &str = "Your input violated the moderation policy.";

pub struct Output;

impl Output {
    // framed text for humans
    pub fn pretty(result: &ChatResult) -> String {
        let rule = "=".repeat(60);
        let body = match result {
            ChatResult::Blocked { reason } => {
                format!("BLOCKED: {BLOCKED_MESSAGE}\n   Reason: {reason}")
            }
            ChatResult::Moderated { text, warning } => {
                format!("AI (Moderated): {text}\n   Warning: {warning}")
            }
            ChatResult::Success { text } => format!("AI: {text}"),
            ChatResult::Error { message } => format!("ERROR: {message}"),
        };
        format!("\n{rule}\n{body}\n{rule}\n")
    }

    // short form, used by the test suite
    pub fn summary(result: &ChatResult) -> String {
        match result {
            ChatResult::Blocked { reason } => format!("Result: BLOCKED - {reason}\n"),
            ChatResult::Moderated { text, .. } => format!(
                "Result: MODERATED - some content redacted\nResponse: {}\n",
                truncate(text, 100)
            ),
            ChatResult::Success { text } => {
                format!("Result: PASSED\nResponse: {}\n", truncate(text, 100))
            }
            ChatResult::Error { message } => format!("Result: ERROR - {message}\n"),
        }
    }

    // raw json for scripts
    pub fn raw(result: &ChatResult) -> String {
        format!("{}\n", serde_json::to_string(result).unwrap_or_default())
    }
}

/// Cut `text` to `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
