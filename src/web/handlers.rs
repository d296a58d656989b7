use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Html;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::llm::DEFAULT_MODEL;
use crate::pages::Page;
use crate::web::AppState;
use crate::{image, temp_mail};

/// Both fields are optional; `null` is treated like an absent field.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImageReply {
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct MailboxReply {
    pub email: String,
}

pub async fn page(page: Page) -> Result<Html<String>> {
    Ok(Html(page.render()?))
}

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    body: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>> {
    let Json(req) = body?;
    let message = req.message.unwrap_or_default();
    let model = req.model.as_deref().unwrap_or(DEFAULT_MODEL);
    let reply = state.dispatcher.dispatch(&message, model).await?;
    Ok(Json(ChatReply { reply }))
}

/// POST /api/generate-image
pub async fn generate_image(
    State(state): State<AppState>,
    body: std::result::Result<Json<ImageRequest>, JsonRejection>,
) -> Result<Json<ImageReply>> {
    let Json(req) = body?;
    let prompt = req.prompt.unwrap_or_default();
    let image_url = image::image_url(&state.upstream.image_base_url, &prompt)?;
    Ok(Json(ImageReply { image_url }))
}

/// POST /api/temp-mail/generate
pub async fn generate_temp_mail(State(state): State<AppState>) -> Result<Json<MailboxReply>> {
    let email = temp_mail::generate_mailbox(&state.http, &state.upstream.temp_mail_url).await?;
    Ok(Json(MailboxReply { email }))
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
