// modchat library - llm chat behind a content moderation filter

pub mod cli;
mod core;
mod error;
pub mod output;
pub mod repl;
mod server;

pub use crate::core::{
    BANNED_TERMS, Chat, ChatModel, ChatResult, DEFAULT_API_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT,
    ModerationSystem, OpenRouter, REDACTED, REDACTION_WARNING, Redaction, SENSITIVE_PATTERNS,
    SYSTEM_PROMPT, Verdict, load_terms,
};
pub use error::Error;
pub use server::Server;
