use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, IF_MATCH, USER_AGENT};
use http::{HeaderMap, HeaderValue};
use tracing::error;

use crate::error::{AccountError, Result};

pub const REGISTRY_USER_AGENT: &str = "Microsoft.Azure.Devices/1.0.0";
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Headers sent with every registry request.
///
/// `append_if_match` adds `If-Match: *`, required by unconditional deletes.
pub fn content_headers(authorization: &str, append_if_match: bool) -> Result<HeaderMap> {
    let authorization = HeaderValue::from_str(authorization).map_err(|e| {
        error!("Failure adding http headers: {}", e);
        AccountError::FormatFailure(format!("invalid Authorization header: {e}"))
    })?;

    let mut headers = HeaderMap::with_capacity(5);
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(USER_AGENT, HeaderValue::from_static(REGISTRY_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    if append_if_match {
        headers.insert(IF_MATCH, HeaderValue::from_static("*"));
    }
    Ok(headers)
}
