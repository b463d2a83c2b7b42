// http server mode - run the moderated chat as an api

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::{Chat, ChatModel, ChatResult, Error};

#[derive(Deserialize)]
struct ChatRequest {
    prompt: String,
    #[serde(default)]
    system: Option<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub struct Server;

impl Server {
    pub async fn run<M>(chat: Chat<M>, host: &str, port: u16) -> Result<(), Error>
    where
        M: ChatModel + 'static,
    {
        let app = Self::router(chat);

        let addr = format!("{host}:{port}");
        println!("server running at http://{addr}");
        tracing::info!(%addr, "listening");

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        Ok(())
    }

    /// Routes without a bound listener, so callers can serve or test them directly.
    pub fn router<M>(chat: Chat<M>) -> Router
    where
        M: ChatModel + 'static,
    {
        Router::new()
            .route("/health", get(health))
            .route("/chat", post(chat_turn::<M>))
            .layer(CorsLayer::permissive())
            .with_state(Arc::new(chat))
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn chat_turn<M: ChatModel + 'static>(
    State(chat): State<Arc<Chat<M>>>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ChatResult>) {
    let result = match req.system.as_deref() {
        Some(system) => chat.send_message_with_system(&req.prompt, system).await,
        None => chat.send_message(&req.prompt).await,
    };

    // moderation outcomes are normal answers, only the upstream failure is not
    let status = match result {
        ChatResult::Error { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };

    (status, Json(result))
}
