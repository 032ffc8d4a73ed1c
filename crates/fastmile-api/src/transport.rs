// Transport configuration for building reqwest::Client instances.
//
// The gateway serves a self-signed certificate and keys its session on
// cookies plus a fixed set of browser-like headers, so every client built
// here carries a cookie jar and the gateway's default header set.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::error::Error;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/140.0.0.0 Safari/537.36";

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout; a timed-out handshake step aborts the handshake.
    pub timeout: Duration,
    /// Accept the gateway's self-signed certificate. On by default -- the
    /// target is a local administrative endpoint with no real CA chain.
    pub danger_accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            danger_accept_invalid_certs: true,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` bound to the given gateway origin.
    ///
    /// The client owns a fresh cookie jar (login is cookie-based) and injects
    /// the gateway's expected default headers. reqwest applies default
    /// headers only when a request has not set the header itself, so
    /// per-request overrides (e.g. `Content-Type`) always win.
    pub fn build_client(&self, origin: &url::Url) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(default_headers(origin))
            .cookie_provider(Arc::new(Jar::default()));

        if self.danger_accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

/// The header set the gateway's web UI sends on every request.
///
/// `Origin` and `Referer` must match the gateway's own origin or the login
/// endpoint rejects the handshake.
fn default_headers(origin: &url::Url) -> HeaderMap {
    let origin_str = origin.as_str().trim_end_matches('/').to_owned();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    if let Ok(value) = HeaderValue::from_str(&origin_str) {
        headers.insert(header::ORIGIN, value);
    }
    if let Ok(value) = HeaderValue::from_str(&format!("{origin_str}/")) {
        headers.insert(header::REFERER, value);
    }
    headers
}
