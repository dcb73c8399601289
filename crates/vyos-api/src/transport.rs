// Connection settings and HTTP client construction.
//
// A `ConnectionConfig` is built once per device and never mutated. It owns
// the scheme/host/port triple used to format command URLs, the API key,
// and the TLS and timeout settings handed to `reqwest`.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::Url;

use crate::error::Error;

/// Default HTTPS port of the device API.
pub const DEFAULT_PORT: u16 = 443;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Protocol scheme used to reach the device.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Https,
    Http,
}

/// TLS verification mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsMode {
    /// Verify against the bundled web PKI roots.
    #[default]
    Verify,
    /// Verify against a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (self-signed lab routers).
    DangerAcceptInvalid,
}

impl TlsMode {
    /// Map the plain `verify` flag used by configuration files.
    pub fn from_verify(verify: bool) -> Self {
        if verify {
            Self::Verify
        } else {
            Self::DangerAcceptInvalid
        }
    }

    /// Whether certificates are checked at all.
    pub fn verifies(&self) -> bool {
        !matches!(self, Self::DangerAcceptInvalid)
    }
}

/// Static connection parameters for one device.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub hostname: String,
    pub api_key: SecretString,
    pub scheme: Scheme,
    pub port: u16,
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl ConnectionConfig {
    /// Connection settings with the stock defaults: `https`, port 443,
    /// certificate verification on, 10 second timeout.
    pub fn new(hostname: impl Into<String>, api_key: impl Into<SecretString>) -> Self {
        Self {
            hostname: hostname.into(),
            api_key: api_key.into(),
            scheme: Scheme::default(),
            port: DEFAULT_PORT,
            tls: TlsMode::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Shorthand for [`TlsMode::from_verify`].
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.tls = TlsMode::from_verify(verify);
        self
    }

    pub fn with_tls(mut self, tls: TlsMode) -> Self {
        self.tls = tls;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Root URL of the device API: `{scheme}://{host}:{port}/`.
    ///
    /// Bare IPv6 literals are bracketed. Note that `url` drops the port from
    /// the serialized form when it equals the scheme default.
    pub fn base_url(&self) -> Result<Url, Error> {
        let host = self.hostname.trim();
        if host.is_empty() || host.contains('/') {
            return Err(Error::InvalidHostname {
                hostname: self.hostname.clone(),
            });
        }

        let host = if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]")
        } else {
            host.to_owned()
        };

        let url = Url::parse(&format!("{}://{host}:{}/", self.scheme, self.port))?;
        if url.host_str().is_none() {
            return Err(Error::InvalidHostname {
                hostname: self.hostname.clone(),
            });
        }
        Ok(url)
    }

    /// Build a `reqwest::Client` honoring the TLS mode and timeout.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("vyos-api/", env!("CARGO_PKG_VERSION")));

        match &self.tls {
            TlsMode::Verify => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder.build().map_err(Error::HttpClient)
    }
}
