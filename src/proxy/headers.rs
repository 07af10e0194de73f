//! Header utilities for provider requests
//!
//! Outbound requests carry only headers built here; nothing from the inbound
//! request (including the caller's `api-key`) is ever forwarded.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

/// OpenRouter attribution header for the calling site
pub const HTTP_REFERER: HeaderName = HeaderName::from_static("http-referer");
/// OpenRouter attribution header for the app name
pub const X_TITLE: HeaderName = HeaderName::from_static("x-title");

/// Build the fixed header set for provider requests
///
/// Fails if any configured value is not a valid header value, which surfaces
/// as a startup error rather than a per-request one.
pub fn build_default_headers(
    api_key: &str,
    app_url: Option<&str>,
    app_title: Option<&str>,
) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .context("Provider API key is not a valid header value")?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(url) = app_url {
        headers.insert(
            HTTP_REFERER,
            HeaderValue::from_str(url).context("Invalid RELAY_APP_URL")?,
        );
    }
    if let Some(title) = app_title {
        headers.insert(
            X_TITLE,
            HeaderValue::from_str(title).context("Invalid RELAY_APP_TITLE")?,
        );
    }

    Ok(headers)
}
