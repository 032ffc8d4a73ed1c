use thiserror::Error;

/// Top-level error type for the `fastmile-api` crate.
///
/// Every failure is classified before it reaches the caller: transport
/// problems, protocol-level login failures (with the gateway's result code
/// preserved), telemetry decode failures, and state misuse. Nothing in this
/// crate retries or swallows a classified error -- except the explicitly
/// best-effort session-clearing calls, which are demoted to `warn!` logs.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, timeout, TLS, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with a non-2xx status.
    #[error("gateway returned HTTP {status} during {phase}")]
    Http {
        status: reqwest::StatusCode,
        phase: &'static str,
    },

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS or client-construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Login protocol ──────────────────────────────────────────────
    /// A handshake step returned an undecodable body, or the login outcome
    /// carried a non-zero result code. The code, when present, is the
    /// gateway's verbatim value -- opaque to this crate.
    #[error("login protocol error: {message}")]
    Protocol {
        message: String,
        code: Option<i64>,
    },

    // ── Telemetry ───────────────────────────────────────────────────
    /// The device status payload was unparsable even after repair. The
    /// message embeds at most the first 200 characters of the body.
    #[error("device status decode error: {message}")]
    Decode { message: String },

    // ── State ───────────────────────────────────────────────────────
    /// An operation that requires an authenticated session was invoked
    /// without one. No network request was made.
    #[error("not authenticated -- call login() first")]
    NotAuthenticated,
}

impl Error {
    /// Returns `true` if this is a transient error worth trying against the
    /// next candidate gateway address.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => status.is_server_error(),
            _ => false,
        }
    }

    /// The gateway's login result code, if this error carries one.
    ///
    /// Presentation layers map these to hints (e.g. an expired captured
    /// payload); this crate surfaces them verbatim.
    pub fn gateway_code(&self) -> Option<i64> {
        match self {
            Self::Protocol { code, .. } => *code,
            _ => None,
        }
    }

    /// Returns `true` for the state error raised when an operation needs a
    /// session that was never established (or was torn down).
    pub fn is_state(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
    }
}
