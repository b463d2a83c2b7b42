use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("API response has no reply text (choices[0].message.content)")]
    MissingReply,

    #[error("Missing API key. Set OPENROUTER_API or pass --api-key")]
    MissingApiKey,

    #[error("Banned terms must not be empty")]
    EmptyTerm,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Server error: {0}")]
    Server(String),
}
