use crate::error::{Error, Result};
use crate::http::HttpClient;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Returned as a normal reply when the model has no matching configured provider.
pub const FALLBACK_REPLY: &str = "API key not available for selected model.";

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Upstream text-generation provider. Determines API format and endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Gemini,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
        }
    }

    fn model_prefix(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt",
            Self::Gemini => "gemini",
        }
    }

    /// Pick a provider for `model`. OpenAI is checked first; a provider only
    /// qualifies when its key is present.
    pub fn select(model: &str, keys: &ProviderKeys) -> Option<Self> {
        [Self::OpenAi, Self::Gemini]
            .into_iter()
            .find(|p| model.starts_with(p.model_prefix()) && keys.get(*p).is_some())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProviderKeys {
    pub openai: Option<String>,
    pub gemini: Option<String>,
}

impl ProviderKeys {
    pub fn get(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::OpenAi => self.openai.as_deref(),
            Provider::Gemini => self.gemini.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.openai.is_none() && self.gemini.is_none()
    }
}

pub struct Dispatcher {
    keys: ProviderKeys,
    openai_base_url: String,
    gemini_base_url: String,
    http: HttpClient,
}

// -- OpenAI-compatible format --

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

// -- Gemini format --

#[derive(Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

impl Dispatcher {
    pub fn new(
        keys: ProviderKeys,
        openai_base_url: impl Into<String>,
        gemini_base_url: impl Into<String>,
        http: HttpClient,
    ) -> Self {
        let openai_base_url: String = openai_base_url.into();
        let gemini_base_url: String = gemini_base_url.into();
        Self {
            keys,
            openai_base_url: openai_base_url.trim_end_matches('/').to_string(),
            gemini_base_url: gemini_base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Route `message` to the provider selected by `model` and return its reply.
    pub async fn dispatch(&self, message: &str, model: &str) -> Result<String> {
        if self.keys.is_empty() {
            return Err(Error::config("API key not configured"));
        }

        let Some(provider) = Provider::select(model, &self.keys) else {
            info!(%model, "no configured provider for model, using fallback reply");
            return Ok(FALLBACK_REPLY.into());
        };

        debug!(provider = provider.name(), %model, "dispatching chat message");
        let result = match provider {
            Provider::OpenAi => self.complete_openai(message, model).await,
            Provider::Gemini => self.complete_gemini(message, model).await,
        };
        if let Err(e) = &result {
            warn!(provider = provider.name(), %model, "chat dispatch failed: {e}");
        }
        result
    }

    async fn complete_openai(&self, message: &str, model: &str) -> Result<String> {
        let key = self.keys.get(Provider::OpenAi).unwrap_or_default();
        let request = OpenAiRequest {
            model,
            messages: vec![
                Msg {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Msg {
                    role: "user",
                    content: message,
                },
            ],
        };

        let url = format!("{}/chat/completions", self.openai_base_url);
        let resp: OpenAiResponse = self
            .http
            .post_json(&url, &request, &[("Authorization", &format!("Bearer {key}"))])
            .await
            .map_err(|e| tag_provider(e, Provider::OpenAi))?;

        resp.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| Error::upstream("openai", "response contained no completion"))
    }

    async fn complete_gemini(&self, message: &str, model: &str) -> Result<String> {
        let key = self.keys.get(Provider::Gemini).unwrap_or_default();
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: Some(message.to_string()),
                }],
            }],
        };

        let url = gemini_url(&self.gemini_base_url, model, key);
        let resp: GeminiResponse = self
            .http
            .post_json(&url, &request, &[])
            .await
            .map_err(|e| tag_provider(e, Provider::Gemini))?;

        resp.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| Error::upstream("gemini", "response contained no candidate text"))
    }
}

/// The key travels in the query string, so it is percent-encoded.
fn gemini_url(base_url: &str, model: &str, key: &str) -> String {
    let key = utf8_percent_encode(key, NON_ALPHANUMERIC);
    format!("{base_url}/models/{model}:generateContent?key={key}")
}

/// Name the provider on upstream errors instead of the bare host.
fn tag_provider(e: Error, provider: Provider) -> Error {
    match e {
        Error::Upstream {
            message,
            status_code,
            ..
        } => Error::Upstream {
            provider: provider.name().into(),
            message,
            status_code,
        },
        Error::Http(message) => Error::upstream(provider.name(), message),
        other => other,
    }
}
