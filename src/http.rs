use crate::error::{Error, Result};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Outbound client shared by every proxy route. One attempt per call.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::http(e.to_string()))?;

        Ok(Self { client })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.send(self.client.get(url)).await?;
        parse_body(url, &body)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        headers: &[(&str, &str)],
    ) -> Result<T> {
        let mut req = self.client.post(url).json(body);
        for (k, v) in headers {
            req = req.header(*k, *v);
        }
        let text = self.send(req).await?;
        parse_body(url, &text)
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<String> {
        let resp = req.send().await.map_err(|e| {
            // reqwest includes the full URL in its messages; strip it.
            let e = e.without_url();
            warn!(error = %e, "upstream request failed");
            Error::http(e.to_string())
        })?;

        let status = resp.status();
        let host = extract_domain(resp.url().as_str());
        debug!(%host, status = status.as_u16(), "upstream responded");

        let body = resp
            .text()
            .await
            .map_err(|e| Error::http(e.without_url().to_string()))?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(Error::upstream_with_status(
                host,
                error_message(&body),
                status.as_u16(),
            ))
        }
    }
}

fn parse_body<T: DeserializeOwned>(url: &str, body: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| Error::upstream(extract_domain(url), format!("unexpected response: {e}")))
}

/// Pull `error.message` (OpenAI and Gemini both use it) out of an error body,
/// falling back to the raw text.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

pub fn extract_domain(url: &str) -> String {
    url.split("//")
        .nth(1)
        .and_then(|s| s.split(['/', '?']).next())
        .unwrap_or("unknown")
        .to_string()
}
