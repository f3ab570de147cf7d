use thiserror::Error;

/// Top-level error type for the `lowport-api` crate.
///
/// `lowport-core` and the CLI map these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The API key could not be encoded as an HTTP header value.
    #[error("Invalid API key header value: {message}")]
    InvalidApiKey { message: String },

    /// Dashboard rejected the API key (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error (usually an empty or malformed base URL).
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Dashboard API ───────────────────────────────────────────────
    /// Non-success status from an endpoint that has no local fallback.
    #[error("Dashboard API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the Dashboard could not be reached at all.
    pub fn is_connect(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// Returns `true` if the API key was missing, malformed or rejected.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::InvalidApiKey { .. }
                | Self::Authentication { .. }
                | Self::Api { status: 403, .. }
        )
    }
}
