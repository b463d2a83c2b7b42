// chat orchestration - input gate, model call, output redaction

use super::ai::ChatModel;
use super::moderation::ModerationSystem;
use serde::ser::{Serialize, SerializeMap, Serializer};

pub const SYSTEM_PROMPT: &str = "You are a helpful, harmless, and honest AI assistant. \
You provide accurate information and refuse to help with harmful, illegal, or unethical requests. \
You should be polite, professional, and respectful in all interactions.";

pub const REDACTION_WARNING: &str = "Response contained restricted content that was redacted";

/// Outcome of one chat turn.
///
/// Serialises as a flat object tagged by `status`, with the variant's fields
/// and a `moderation` label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatResult {
    /// Input failed moderation; the model was never called.
    Blocked { reason: String },
    /// The model call failed.
    Error { message: String },
    /// The reply had banned terms redacted.
    Moderated { text: String, warning: String },
    Success { text: String },
}

impl ChatResult {
    pub fn status(&self) -> &'static str {
        match self {
            Self::Blocked { .. } => "blocked",
            Self::Error { .. } => "error",
            Self::Moderated { .. } => "moderated",
            Self::Success { .. } => "success",
        }
    }

    /// Which moderation stage shaped this result.
    pub fn moderation(&self) -> &'static str {
        match self {
            Self::Blocked { .. } => "input_blocked",
            Self::Error { .. } => "none",
            Self::Moderated { .. } => "output_redacted",
            Self::Success { .. } => "passed",
        }
    }
}

impl Serialize for ChatResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("status", self.status())?;
        match self {
            Self::Blocked { reason } => map.serialize_entry("reason", reason)?,
            Self::Error { message } => map.serialize_entry("message", message)?,
            Self::Moderated { text, warning } => {
                map.serialize_entry("text", text)?;
                map.serialize_entry("warning", warning)?;
            }
            Self::Success { text } => map.serialize_entry("text", text)?,
        }
        map.serialize_entry("moderation", self.moderation())?;
        map.end()
    }
}

/// Wraps a [`ChatModel`] with moderation on both sides.
///
/// Holds no per-turn state: every call to [`Chat::send_message`] stands alone.
pub struct Chat<M> {
    model: M,
    moderator: ModerationSystem,
    system_prompt: String,
}

impl<M: ChatModel> Chat<M> {
    pub fn new(model: M, moderator: ModerationSystem) -> Self {
        Self {
            model,
            moderator,
            system_prompt: SYSTEM_PROMPT.to_string(),
        }
    }

    /// Replace the system prompt used by [`Chat::send_message`].
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn moderator(&self) -> &ModerationSystem {
        &self.moderator
    }

    pub async fn send_message(&self, prompt: &str) -> ChatResult {
        self.send_message_with_system(prompt, &self.system_prompt)
            .await
    }

    pub async fn send_message_with_system(&self, prompt: &str, system: &str) -> ChatResult {
        tracing::debug!("checking input moderation");
        let verdict = self.moderator.check_input(prompt);
        if !verdict.safe {
            tracing::info!(reason = %verdict.reason, "input blocked");
            return ChatResult::Blocked {
                reason: verdict.reason,
            };
        }

        tracing::debug!("input passed, sending to model");
        let reply = match self.model.generate(system, prompt).await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "model call failed");
                return ChatResult::Error {
                    message: format!("API Error: {e}"),
                };
            }
        };

        tracing::debug!("checking output moderation");
        let redaction = self.moderator.moderate_output(&reply);
        if redaction.modified {
            tracing::info!("output contained restricted content, redacted");
            return ChatResult::Moderated {
                text: redaction.text,
                warning: REDACTION_WARNING.to_string(),
            };
        }

        ChatResult::Success {
            text: redaction.text,
        }
    }
}
