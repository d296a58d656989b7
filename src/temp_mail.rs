use crate::error::{Error, Result};
use crate::http::HttpClient;
use tracing::info;

/// Ask the disposable-mailbox service for one fresh address.
pub async fn generate_mailbox(http: &HttpClient, url: &str) -> Result<String> {
    let addresses: Vec<String> = http.get_json(url).await?;
    let email = addresses
        .into_iter()
        .next()
        .ok_or_else(|| Error::upstream("temp-mail", "no mailbox returned"))?;
    info!("generated disposable mailbox");
    Ok(email)
}
