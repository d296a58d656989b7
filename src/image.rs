use crate::error::{Error, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except unreserved characters and `/` is escaped.
const PROMPT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

pub const IMAGE_QUERY: &str = "width=1024&height=1024&nologo=true";

/// Build the image-service link for `prompt`. Nothing is fetched.
pub fn image_url(base_url: &str, prompt: &str) -> Result<String> {
    if prompt.is_empty() {
        return Err(Error::validation("Prompt is required"));
    }
    let encoded = utf8_percent_encode(prompt, PROMPT);
    Ok(format!(
        "{}/{encoded}?{IMAGE_QUERY}",
        base_url.trim_end_matches('/')
    ))
}
