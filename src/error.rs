use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No usable provider credentials, or an unreadable config file.
    #[error("{0}")]
    Configuration(String),

    /// A required request field was missing.
    #[error("{0}")]
    Validation(String),

    /// The request body could not be read as JSON.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{provider} error: {message}")]
    Upstream {
        provider: String,
        message: String,
        status_code: Option<u16>,
    },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn upstream(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            provider: provider.into(),
            message: message.into(),
            status_code: None,
        }
    }

    pub fn upstream_with_status(
        provider: impl Into<String>,
        message: impl Into<String>,
        status_code: u16,
    ) -> Self {
        Self::Upstream {
            provider: provider.into(),
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<askama::Error> for Error {
    fn from(e: askama::Error) -> Self {
        Self::Template(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
