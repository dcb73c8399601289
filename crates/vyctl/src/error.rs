//! CLI error types with miette diagnostics.
//!
//! Maps library, config and per-call response failures into user-facing
//! errors with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use vyos_api::{ApiResponse, ResponseError};
use vyos_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const REJECTED: i32 = 4;
    pub const HTTP: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the device at {url}")]
    #[diagnostic(
        code(vyctl::connection_failed),
        help(
            "{message}\n\
             Check that the HTTPS API is enabled (`set service https api`)\n\
             and reachable. For self-signed certificates use --insecure (-k)."
        )
    )]
    ConnectionFailed { url: String, message: String },

    // ── HTTP ─────────────────────────────────────────────────────────

    #[error("Device rejected the API key (HTTP {status})")]
    #[diagnostic(
        code(vyctl::auth_failed),
        help(
            "Verify the key configured under `service https api keys`.\n\
             Run: vyctl config init"
        )
    )]
    AuthFailed { status: u16 },

    #[error("Device answered with HTTP {status}")]
    #[diagnostic(code(vyctl::http_error))]
    HttpStatus { status: u16 },

    #[error("Device response is not valid JSON")]
    #[diagnostic(
        code(vyctl::decode_error),
        help("Check that host and port point at the VyOS API and not another web service.")
    )]
    Decode,

    // ── Device ───────────────────────────────────────────────────────

    #[error("Device reported an error: {message}")]
    #[diagnostic(code(vyctl::rejected))]
    Rejected { message: String },

    // ── Client setup ─────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(vyctl::client))]
    Client(#[from] vyos_api::Error),

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vyctl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(vyctl::no_credentials),
        help(
            "Configure a key with: vyctl config init\n\
             Or set VYDEVICE_APIKEY / pass --api-key."
        )
    )]
    NoCredentials { profile: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(vyctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: vyctl config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No device configured")]
    #[diagnostic(
        code(vyctl::no_config),
        help(
            "Create a profile with: vyctl config init\n\
             Expected at: {path}\n\
             Or set VYDEVICE_HOSTNAME and VYDEVICE_APIKEY, or pass --host."
        )
    )]
    NoConfig { path: String },

    #[error("{0}")]
    #[diagnostic(
        code(vyctl::config),
        help("Fix or remove the file reported by: vyctl config path")
    )]
    Config(String),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(vyctl::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(vyctl::json), help("Expected a JSON list of paths, e.g. '[[\"a\",\"b\"],[\"c\"]]'."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::HttpStatus { .. } | Self::Decode => exit_code::HTTP,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } | Self::Json(_) => {
                exit_code::USAGE
            }
            Self::Client(e) if e.is_config_error() => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// The error carried by a failed response, if any.
    pub fn from_response(resp: &ApiResponse, url: &str) -> Option<Self> {
        let err = resp.error.as_ref()?;
        Some(match err {
            ResponseError::Connection(message) => Self::ConnectionFailed {
                url: url.to_owned(),
                message: message.clone(),
            },
            ResponseError::Http if matches!(resp.status, 401 | 403) => Self::AuthFailed {
                status: resp.status,
            },
            ResponseError::Http => Self::HttpStatus {
                status: resp.status,
            },
            ResponseError::JsonDecode => Self::Decode,
            ResponseError::Api(message) => Self::Rejected {
                message: message.clone(),
            },
        })
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            other => Self::Config(other.to_string()),
        }
    }
}
