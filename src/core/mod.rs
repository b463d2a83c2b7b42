// core logic - moderation, model client, and the chat pipeline

mod ai;
mod chat;
mod moderation;

pub use ai::{ChatModel, DEFAULT_API_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT, OpenRouter};
pub use chat::{Chat, ChatResult, REDACTION_WARNING, SYSTEM_PROMPT};
pub use moderation::{
    BANNED_TERMS, ModerationSystem, REDACTED, Redaction, SENSITIVE_PATTERNS, Verdict, load_terms,
};
