// model integration - one system + user prompt in, reply text out

use crate::Error;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "openai/gpt-4o";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can answer a single prompt.
///
/// Implementations own transport, auth and timeouts. A failure is returned,
/// never retried.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn generate(&self, system: &str, user: &str) -> Result<String, Error>;
}

/// Client for an OpenAI-compatible chat completions endpoint (OpenRouter by default).
pub struct OpenRouter {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
}

// what we send
#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

// what comes back
#[derive(Deserialize)]
struct Response {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Reply,
}

#[derive(Deserialize)]
struct Reply {
    content: Option<String>,
}

impl OpenRouter {
    pub fn new(api_key: Option<String>) -> Result<Self, Error> {
        let api_key = api_key
            .or_else(|| std::env::var("OPENROUTER_API").ok())
            .filter(|k| !k.is_empty())
            .ok_or(Error::MissingApiKey)?;

        let client = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;

        Ok(Self {
            client,
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Bound every request to `timeout`; past it the call fails with [`Error::Http`].
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, Error> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatModel for OpenRouter {
    async fn generate(&self, system: &str, user: &str) -> Result<String, Error> {
        let request = Request {
            model: &self.model,
            messages: [
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        // read as text first so a bad body shows up as a json error, not an http one
        let body = response.text().await?;
        let response: Response = serde_json::from_str(&body)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(Error::MissingReply)
    }
}
