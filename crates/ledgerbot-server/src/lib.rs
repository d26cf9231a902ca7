//! ledgerbot webhook server
//!
//! A thin axum transport over the conversation engine. A chat platform
//! delivers one update per POST; the handler resolves the user's session,
//! runs one engine turn, and returns the reply (text plus an optional button
//! menu) as JSON for the platform adapter to render.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use ledgerbot_chat::{Engine, Event, Reply, SessionStore};
use ledgerbot_core::config::Config;
use ledgerbot_core::db::Database;

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: Config,
    pub sessions: SessionStore,
}

/// One inbound chat update
///
/// Exactly one of `text` and `selection` must be set; `selection` carries a
/// button's callback payload. When a platform delivers both, the button press
/// wins (it is the more specific action).
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub user_id: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub selection: Option<String>,
}

async fn post_update(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<Reply>, AppError> {
    let user = req.user_id.trim();
    if user.is_empty() {
        return Err(AppError::bad_request("user_id is required"));
    }
    let event = match (req.selection, req.text) {
        (Some(selection), _) => Event::Selection(selection),
        (None, Some(text)) => Event::Text(text),
        (None, None) => {
            return Err(AppError::bad_request("one of text or selection is required"));
        }
    };

    let engine = Engine::new(&state.db, &state.config);
    let reply = state
        .sessions
        .with_session(user, |session| engine.handle(user, session, &event));

    Ok(Json(reply))
}

async fn get_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Create the application router
pub fn create_router(db: Database, config: Config) -> Router {
    let state = Arc::new(AppState {
        db,
        config,
        sessions: SessionStore::new(),
    });

    Router::new()
        .route("/update", post(post_update))
        .route("/health", get(get_health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the server
pub async fn serve(db: Database, config: Config, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(db, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Generic message to the client, full error in the log
            message: "An internal error occurred".to_string(),
            internal: Some(err.into()),
        }
    }
}

#[cfg(test)]
mod tests;
