use crate::error::{Error, Result};
use crate::llm::ProviderKeys;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Secrets only ever come from the environment.
    #[serde(skip)]
    pub secrets: Secrets,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            upload_dir: default_upload_dir(),
            static_dir: default_static_dir(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Where provider traffic goes. Overridable for self-hosted gateways and tests.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_temp_mail_url")]
    pub temp_mail_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            openai_base_url: default_openai_base_url(),
            gemini_base_url: default_gemini_base_url(),
            image_base_url: default_image_base_url(),
            temp_mail_url: default_temp_mail_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Clone, Default)]
pub struct Secrets {
    pub secret_key: String,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub twilio: TwilioConfig,
}

// Hand-written so keys never reach logs through `{:?}`.
impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("openai_api_key", &self.openai_api_key.is_some())
            .field("gemini_api_key", &self.gemini_api_key.is_some())
            .field("twilio", &self.twilio.is_configured())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Default)]
pub struct TwilioConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    pub phone_number: Option<String>,
}

impl TwilioConfig {
    pub fn is_configured(&self) -> bool {
        self.account_sid.is_some() && self.auth_token.is_some() && self.phone_number.is_some()
    }
}

// Defaults
fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    5000
}
fn default_upload_dir() -> PathBuf {
    "uploads".into()
}
fn default_static_dir() -> PathBuf {
    "static".into()
}
fn default_max_body_bytes() -> usize {
    500 * 1024 * 1024
}
fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}
fn default_image_base_url() -> String {
    "https://image.pollinations.ai/prompt".into()
}
fn default_temp_mail_url() -> String {
    "https://www.1secmail.com/api/v1/?action=genRandomMailbox&count=1".into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// Empty values count as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Secrets {
    /// Read secrets through `lookup` (normally `std::env::var`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let secret_key = non_empty(lookup("SECRET_KEY"))
            .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string());
        Self {
            secret_key,
            openai_api_key: non_empty(lookup("OPENAI_API_KEY")),
            gemini_api_key: non_empty(lookup("GEMINI_API_KEY")),
            twilio: TwilioConfig {
                account_sid: non_empty(lookup("TWILIO_ACCOUNT_SID")),
                auth_token: non_empty(lookup("TWILIO_AUTH_TOKEN")),
                phone_number: non_empty(lookup("TWILIO_PHONE_NUMBER")),
            },
        }
    }
}

impl Config {
    /// Load the TOML file if it exists, then layer the environment on top.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_env(|k| std::env::var(k).ok());
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config {}: {e}", path.display())))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse config: {e}")))
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = non_empty(lookup("HOST")) {
            self.server.host = host;
        }
        if let Some(port) = non_empty(lookup("PORT")).and_then(|p| p.trim().parse().ok()) {
            self.server.port = port;
        }
        self.secrets = Secrets::from_lookup(lookup);
    }

    pub fn provider_keys(&self) -> ProviderKeys {
        ProviderKeys {
            openai: self.secrets.openai_api_key.clone(),
            gemini: self.secrets.gemini_api_key.clone(),
        }
    }

    pub fn prepare_upload_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.server.upload_dir)?;
        Ok(())
    }
}
