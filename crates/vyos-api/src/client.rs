// Request executor.
//
// Wraps `reqwest::Client` with command URL construction, payload building
// and response classification. The per-command wrappers live in
// `endpoints.rs` so this module stays focused on transport mechanics.

use std::error::Error as _;

use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::operation::{Command, Op};
use crate::path::ConfigPath;
use crate::payload::{self, Attachments};
use crate::response::ApiResponse;
use crate::transport::ConnectionConfig;

/// HTTP client for one device's configuration API.
///
/// Holds the immutable connection settings and a pooled `reqwest::Client`.
/// No per-request state is kept, so a single instance may serve concurrent
/// calls.
#[derive(Debug, Clone)]
pub struct VyosClient {
    http: reqwest::Client,
    base_url: Url,
    config: ConnectionConfig,
}

impl VyosClient {
    /// Create a client, building a `reqwest::Client` from the config's TLS
    /// and timeout settings.
    pub fn new(config: ConnectionConfig) -> Result<Self, Error> {
        let http = config.build_client()?;
        Self::with_client(http, config)
    }

    /// Create a client around a pre-built `reqwest::Client`.
    ///
    /// The config's TLS mode and timeout are not applied in this case.
    pub fn with_client(http: reqwest::Client, config: ConnectionConfig) -> Result<Self, Error> {
        let base_url = config.base_url()?;
        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    /// The connection settings this client was built with.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// The device API root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{scheme}://{host}:{port}/{command}`
    ///
    /// The port is left out of the serialized URL when it is the scheme's
    /// default (443 for https, 80 for http). The request still goes to that
    /// port; only the text form changes.
    pub fn command_url(&self, command: Command) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(command.as_str());
        url
    }

    /// Send one operation and classify the outcome.
    ///
    /// Never fails: transport, HTTP, decoding and device-reported errors are
    /// all returned in [`ApiResponse::error`].
    pub async fn execute(
        &self,
        command: Command,
        op: Op,
        path: &ConfigPath,
        attachments: &Attachments,
    ) -> ApiResponse {
        let url = self.command_url(command);
        let payload = payload::build(op, path, attachments, &self.config.api_key);

        debug!(op = %op, requests = payload.operations().len(), "POST {}", url);

        let sent = self.http.post(url).form(&payload.form()).send().await;

        let resp = match sent {
            Ok(resp) => resp,
            Err(e) => {
                let message = error_chain(&e);
                warn!(command = %command, error = %message, "request failed");
                return ApiResponse::connection_failure(payload.redact(), message);
            }
        };

        let status = resp.status().as_u16();
        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                let message = error_chain(&e);
                warn!(command = %command, status, error = %message, "failed to read response body");
                return ApiResponse::connection_failure(payload.redact(), message);
            }
        };

        let response = ApiResponse::from_http(status, payload.redact(), &body);
        match &response.error {
            None => debug!(command = %command, status, "request succeeded"),
            Some(err) => warn!(command = %command, status, error = %err, "request rejected"),
        }
        response
    }
}

/// Render an error with its source chain, e.g.
/// `error sending request: client error (Connect): tcp connect error: Connection refused`.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
