#![allow(dead_code)]

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Json;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use toolbox_web::config::{Config, Secrets};
use toolbox_web::http::HttpClient;
use toolbox_web::llm::{Dispatcher, ProviderKeys};
use toolbox_web::web::{AppState, build_router};

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// What the fake providers saw.
#[derive(Clone, Default)]
pub struct Recorded {
    pub last_body: Arc<Mutex<Option<Value>>>,
    pub last_auth: Arc<Mutex<Option<String>>>,
    pub last_key: Arc<Mutex<Option<String>>>,
    pub last_model: Arc<Mutex<Option<String>>>,
}

async fn openai_completions(
    State(rec): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    *rec.last_auth.lock().unwrap() = auth.clone();
    *rec.last_body.lock().unwrap() = Some(body.clone());

    if auth.as_deref() != Some("Bearer sk-good") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}})),
        );
    }

    let user = body["messages"][1]["content"].as_str().unwrap_or_default();
    if user == "empty" {
        return (StatusCode::OK, Json(json!({"choices": []})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": format!("openai says: {user}")}}]
        })),
    )
}

async fn gemini_generate(
    State(rec): State<Recorded>,
    Path(call): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let model = call.trim_end_matches(":generateContent").to_string();
    *rec.last_model.lock().unwrap() = Some(model);
    *rec.last_key.lock().unwrap() = query.get("key").cloned();
    *rec.last_body.lock().unwrap() = Some(body.clone());

    let text = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default();
    match text {
        "blocked" => (
            StatusCode::OK,
            Json(json!({"promptFeedback": {"blockReason": "SAFETY"}})),
        ),
        "overloaded" => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"error": {"code": 503, "message": "The model is overloaded."}})),
        ),
        _ => (
            StatusCode::OK,
            Json(json!({
                "candidates": [{"content": {"role": "model", "parts": [{"text": format!("gemini says: {text}")}]}}]
            })),
        ),
    }
}

/// Fake OpenAI, Gemini and temp-mail services on one router.
pub fn fake_upstreams(rec: Recorded) -> Router {
    Router::new()
        .route("/openai/chat/completions", post(openai_completions))
        .route("/gemini/models/{call}", post(gemini_generate))
        .route(
            "/mail/ok",
            get(|| async { Json(json!(["k3x9q@1secmail.com"])) }),
        )
        .route("/mail/empty", get(|| async { Json(json!([])) }))
        .route(
            "/mail/down",
            get(|| async { (StatusCode::BAD_GATEWAY, "Bad Gateway") }),
        )
        .with_state(rec)
}

pub fn http_client() -> HttpClient {
    HttpClient::new("toolbox-web-tests", Duration::from_secs(5)).unwrap()
}

pub fn dispatcher(upstream: &str, openai: Option<&str>, gemini: Option<&str>) -> Dispatcher {
    Dispatcher::new(
        ProviderKeys {
            openai: openai.map(String::from),
            gemini: gemini.map(String::from),
        },
        format!("{upstream}/openai"),
        format!("{upstream}/gemini"),
        http_client(),
    )
}

/// Full application wired to the fake upstreams.
pub async fn spawn_app(upstream: &str, env: &[(&str, &str)], mail_path: &str) -> String {
    let mut config = Config::default();
    config.upstream.openai_base_url = format!("{upstream}/openai");
    config.upstream.gemini_base_url = format!("{upstream}/gemini");
    config.upstream.temp_mail_url = format!("{upstream}/mail/{mail_path}");
    config.upstream.timeout_secs = 5;
    let env: HashMap<String, String> = env
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    config.secrets = Secrets::from_lookup(|k| env.get(k).cloned());

    let state = AppState::from_config(&config).unwrap();
    spawn(build_router(state)).await
}
