//! CLI error types with miette diagnostics.
//!
//! Maps API, config and export failures into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use lowport_config::ConfigError;
use lowport_core::{ApiError, CoreError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Dashboard API at {url}")]
    #[diagnostic(
        code(lowport::connection_failed),
        help(
            "Check network access and BASE_URL.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: ApiError,
    },

    #[error("Invalid base URL '{url}'")]
    #[diagnostic(
        code(lowport::invalid_url),
        help("Set BASE_URL to the Dashboard API root, e.g. https://api.meraki.com/api/v1")
    )]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: ApiError,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(lowport::auth_failed),
        help(
            "Verify API_KEY and that it has access to organization '{org_id}'.\n\
             Keys are generated under Organization > Settings > Dashboard API access."
        )
    )]
    AuthFailed {
        org_id: String,
        #[source]
        source: ApiError,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Dashboard API error (HTTP {status}): {message}")]
    #[diagnostic(code(lowport::api_error), help("Check ORG_ID and BASE_URL."))]
    Api { status: u16, message: String },

    #[error("Unexpected response from the Dashboard API")]
    #[diagnostic(code(lowport::invalid_response))]
    InvalidResponse {
        #[source]
        source: ApiError,
    },

    // ── Export ───────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(lowport::non_numeric_usage),
        help("The threshold comparison needs a numeric total; the export was not completed.")
    )]
    Usage(#[from] CoreError),

    #[error("Failed to write {path}")]
    #[diagnostic(code(lowport::export))]
    Export {
        path: String,
        #[source]
        source: csv::Error,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(lowport::env_file),
        help(
            "Each line of the dotenv file must be KEY=value.\n\
             Point --env-file (or LOWPORT_ENV_FILE) at another file to skip it."
        )
    )]
    EnvFile(Box<ConfigError>),

    #[error(transparent)]
    #[diagnostic(
        code(lowport::config),
        help("USAGE_THRESHOLD_KB must be an integer number of kilobytes.")
    )]
    Config(Box<ConfigError>),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::EnvFile { .. } => Self::EnvFile(Box::new(err)),
            ConfigError::Figment(_) => Self::Config(Box::new(err)),
        }
    }
}

impl CliError {
    /// Attach request context to an API error.
    pub fn api(err: ApiError, base_url: &str, org_id: &str) -> Self {
        if err.is_connect() {
            return Self::ConnectionFailed {
                url: base_url.to_owned(),
                source: err,
            };
        }
        if err.is_auth() {
            return Self::AuthFailed {
                org_id: org_id.to_owned(),
                source: err,
            };
        }
        match err {
            ApiError::InvalidUrl(_) => Self::InvalidBaseUrl {
                url: base_url.to_owned(),
                source: err,
            },
            ApiError::Api { status, message } => Self::Api { status, message },
            ApiError::Transport(_) => Self::ConnectionFailed {
                url: base_url.to_owned(),
                source: err,
            },
            other => Self::InvalidResponse { source: other },
        }
    }

    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::InvalidBaseUrl { .. } | Self::EnvFile(_) | Self::Config(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lowport_config::{FlatEnv, Settings};

    use super::*;

    fn help(err: &CliError) -> String {
        err.help().map(|h| h.to_string()).unwrap_or_default()
    }

    #[test]
    fn empty_base_url_is_a_usage_error() {
        let parse_err = url_parse_error();
        let err = CliError::api(ApiError::InvalidUrl(parse_err), "", "123");
        assert!(matches!(err, CliError::InvalidBaseUrl { .. }));
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn rejected_key_maps_to_auth() {
        let err = CliError::api(
            ApiError::Authentication {
                message: "Invalid API key".into(),
            },
            "https://api.meraki.com/api/v1",
            "549236",
        );
        assert_eq!(err.exit_code(), exit_code::AUTH);
        assert!(matches!(err, CliError::AuthFailed { ref org_id, .. } if org_id == "549236"));
    }

    #[test]
    fn other_status_keeps_code_and_message() {
        let err = CliError::api(
            ApiError::Api {
                status: 404,
                message: "Not Found".into(),
            },
            "https://api.meraki.com/api/v1",
            "0",
        );
        assert_eq!(err.to_string(), "Dashboard API error (HTTP 404): Not Found");
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn malformed_env_file_gets_its_own_help() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "API_KEY=abc\nthis line has no equals sign\n").unwrap();

        let err = CliError::from(FlatEnv::dotenv_file(&path).unwrap_err());

        assert!(matches!(err, CliError::EnvFile(_)));
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert!(help(&err).contains("KEY=value"), "{}", help(&err));
        assert!(!help(&err).contains("USAGE_THRESHOLD_KB"));
    }

    #[test]
    fn bad_threshold_points_at_the_variable() {
        let env = FlatEnv::from_pairs(
            "environment",
            [("USAGE_THRESHOLD_KB".to_owned(), "lots".to_owned())],
        );
        let figment_err = lowport_config::figment(FlatEnv::default(), env)
            .extract::<Settings>()
            .unwrap_err();

        let err = CliError::from(ConfigError::from(figment_err));

        assert!(matches!(err, CliError::Config(_)));
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert!(help(&err).contains("USAGE_THRESHOLD_KB"));
    }

    fn url_parse_error() -> url::ParseError {
        match url::Url::parse("/organizations//devices") {
            Err(e) => e,
            Ok(url) => panic!("relative path parsed as {url}"),
        }
    }
}
