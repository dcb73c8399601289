//! Shared configuration for VyOS API tools.
//!
//! TOML profiles, `VYDEVICE_*` environment profiles, API key resolution
//! (env + plaintext), and translation to `vyos_api::ConnectionConfig`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vyos_api::{ConnectionConfig, DEFAULT_PORT, DEFAULT_TIMEOUT, Scheme, TlsMode};

/// Name of the profile synthesized from `VYDEVICE_*` variables.
pub const ENV_PROFILE: &str = "env";

/// Variable holding the API key when a profile names none.
pub const API_KEY_ENV: &str = "VYDEVICE_APIKEY";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API key configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named device profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub protocol: Scheme,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            protocol: Scheme::default(),
            port: default_port(),
            verify_ssl: default_verify_ssl(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_verify_ssl() -> bool {
    true
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

/// A named device profile. Unset fields fall back to `[defaults]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Device hostname or IP address.
    pub hostname: String,

    /// API key (plaintext, prefer `api_key_env`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Scheme>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_ssl: Option<bool>,

    /// Path to a custom CA certificate (PEM).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "vyos", "vyctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("vyctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
///
/// A missing file yields the defaults; a file that fails to parse is an
/// error.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path`, layered as defaults → file → `VYCTL_*` env.
///
/// Nested keys use a double underscore: `VYCTL_DEFAULTS__TIMEOUT=30`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("VYCTL_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Environment profile ─────────────────────────────────────────────

/// Build a profile from `VYDEVICE_HOSTNAME`, `VYDEVICE_APIKEY`,
/// `VYDEVICE_PORT`, `VYDEVICE_PROTOCOL` and `VYDEVICE_VERIFY_SSL`.
///
/// Returns `None` when no hostname is set.
pub fn env_profile() -> Result<Option<Profile>, ConfigError> {
    env_profile_with(|name| std::env::var(name).ok())
}

/// [`env_profile`] with an injectable variable lookup.
pub fn env_profile_with(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Option<Profile>, ConfigError> {
    let Some(hostname) = lookup("VYDEVICE_HOSTNAME").filter(|h| !h.is_empty()) else {
        return Ok(None);
    };

    let port = lookup("VYDEVICE_PORT")
        .map(|raw| {
            raw.parse::<u16>().map_err(|_| ConfigError::Validation {
                field: "VYDEVICE_PORT".into(),
                reason: format!("expected a port number, got '{raw}'"),
            })
        })
        .transpose()?;

    let protocol = lookup("VYDEVICE_PROTOCOL")
        .map(|raw| {
            raw.parse::<Scheme>().map_err(|_| ConfigError::Validation {
                field: "VYDEVICE_PROTOCOL".into(),
                reason: format!("expected 'https' or 'http', got '{raw}'"),
            })
        })
        .transpose()?;

    let verify_ssl = lookup("VYDEVICE_VERIFY_SSL").map(|raw| parse_verify_flag(&raw));

    Ok(Some(Profile {
        hostname,
        api_key: lookup(API_KEY_ENV),
        protocol,
        port,
        verify_ssl,
        ..Profile::default()
    }))
}

/// Only an explicit false-like value disables verification.
fn parse_verify_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve an API key: profile's `api_key_env` → `VYDEVICE_APIKEY` → plaintext.
pub fn resolve_api_key(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    resolve_api_key_with(profile, profile_name, |name| std::env::var(name).ok())
}

/// [`resolve_api_key`] with an injectable variable lookup.
pub fn resolve_api_key_with(
    profile: &Profile,
    profile_name: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's api_key_env → env var lookup
    if let Some(ref env_name) = profile.api_key_env {
        if let Some(val) = lookup(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. Shared env var
    if let Some(val) = lookup(API_KEY_ENV).filter(|v| !v.is_empty()) {
        return Ok(SecretString::from(val));
    }

    // 3. Plaintext in config
    if let Some(ref key) = profile.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Translate a profile into connection settings, filling gaps from
/// `defaults`. The API key must already be resolved.
pub fn profile_to_connection_config(
    profile: &Profile,
    defaults: &Defaults,
    api_key: SecretString,
) -> Result<ConnectionConfig, ConfigError> {
    if profile.hostname.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "hostname".into(),
            reason: "hostname cannot be empty".into(),
        });
    }

    let tls = if !profile.verify_ssl.unwrap_or(defaults.verify_ssl) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::Verify
    };

    Ok(ConnectionConfig::new(profile.hostname.trim(), api_key)
        .with_scheme(profile.protocol.unwrap_or(defaults.protocol))
        .with_port(profile.port.unwrap_or(defaults.port))
        .with_tls(tls)
        .with_timeout(Duration::from_secs(
            profile.timeout.unwrap_or(defaults.timeout),
        )))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    fn profile(hostname: &str) -> Profile {
        Profile {
            hostname: hostname.into(),
            ..Profile::default()
        }
    }

    #[test]
    fn env_profile_absent_without_hostname() {
        assert_eq!(env_profile_with(vars(&[])).unwrap(), None);
        assert_eq!(
            env_profile_with(vars(&[("VYDEVICE_HOSTNAME", "")])).unwrap(),
            None
        );
    }

    #[test]
    fn env_profile_reads_all_variables() {
        let profile = env_profile_with(vars(&[
            ("VYDEVICE_HOSTNAME", "192.0.2.1"),
            ("VYDEVICE_APIKEY", "k3y"),
            ("VYDEVICE_PORT", "8443"),
            ("VYDEVICE_PROTOCOL", "HTTPS"),
            ("VYDEVICE_VERIFY_SSL", "False"),
        ]))
        .unwrap()
        .unwrap();

        assert_eq!(profile.hostname, "192.0.2.1");
        assert_eq!(profile.api_key.as_deref(), Some("k3y"));
        assert_eq!(profile.port, Some(8443));
        assert_eq!(profile.protocol, Some(Scheme::Https));
        assert_eq!(profile.verify_ssl, Some(false));
    }

    #[test]
    fn env_profile_rejects_bad_port() {
        let err = env_profile_with(vars(&[
            ("VYDEVICE_HOSTNAME", "r1"),
            ("VYDEVICE_PORT", "https"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "VYDEVICE_PORT"));
    }

    #[test]
    fn verify_flag_defaults_to_true() {
        assert!(parse_verify_flag("True"));
        assert!(parse_verify_flag("yes"));
        assert!(parse_verify_flag(""));
        assert!(!parse_verify_flag("False"));
        assert!(!parse_verify_flag("0"));
    }

    #[test]
    fn api_key_resolution_order() {
        let mut p = profile("r1");
        p.api_key = Some("plain".into());
        p.api_key_env = Some("ROUTER_KEY".into());

        let key = resolve_api_key_with(
            &p,
            "lab",
            vars(&[("ROUTER_KEY", "from-named-env"), (API_KEY_ENV, "shared")]),
        )
        .unwrap();
        assert_eq!(key.expose_secret(), "from-named-env");

        let key = resolve_api_key_with(&p, "lab", vars(&[(API_KEY_ENV, "shared")])).unwrap();
        assert_eq!(key.expose_secret(), "shared");

        let key = resolve_api_key_with(&p, "lab", vars(&[])).unwrap();
        assert_eq!(key.expose_secret(), "plain");

        let err = resolve_api_key_with(&profile("r1"), "lab", vars(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { ref profile } if profile == "lab"));
    }

    #[test]
    fn profile_fields_override_defaults() {
        let mut p = profile("router.lab");
        p.port = Some(8443);
        p.protocol = Some(Scheme::Http);
        p.timeout = Some(3);

        let cfg =
            profile_to_connection_config(&p, &Defaults::default(), "k".to_owned().into()).unwrap();
        assert_eq!(cfg.hostname, "router.lab");
        assert_eq!(cfg.port, 8443);
        assert_eq!(cfg.scheme, Scheme::Http);
        assert_eq!(cfg.timeout, Duration::from_secs(3));
        assert_eq!(cfg.tls, TlsMode::Verify);
    }

    #[test]
    fn defaults_fill_unset_fields() {
        let defaults = Defaults {
            verify_ssl: false,
            timeout: 42,
            ..Defaults::default()
        };
        let cfg =
            profile_to_connection_config(&profile("r1"), &defaults, "k".to_owned().into()).unwrap();
        assert_eq!(cfg.port, 443);
        assert_eq!(cfg.scheme, Scheme::Https);
        assert_eq!(cfg.tls, TlsMode::DangerAcceptInvalid);
        assert_eq!(cfg.timeout, Duration::from_secs(42));
    }

    #[test]
    fn ca_cert_selects_custom_ca() {
        let mut p = profile("r1");
        p.ca_cert = Some("/etc/ssl/vyos-ca.pem".into());
        let cfg =
            profile_to_connection_config(&p, &Defaults::default(), "k".to_owned().into()).unwrap();
        assert_eq!(cfg.tls, TlsMode::CustomCa("/etc/ssl/vyos-ca.pem".into()));
    }

    #[test]
    fn empty_hostname_is_rejected() {
        let err = profile_to_connection_config(
            &profile(" "),
            &Defaults::default(),
            "k".to_owned().into(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "hostname"));
    }

    #[test]
    fn save_then_load_round_trips_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        let mut p = profile("192.0.2.7");
        p.api_key_env = Some("LAB_KEY".into());
        p.verify_ssl = Some(false);
        cfg.profiles.insert("lab".into(), p.clone());
        cfg.default_profile = Some("lab".into());

        save_config_to(&cfg, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("[profiles.lab]"));
        assert!(!text.contains("api_key ="));

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.default_profile.as_deref(), Some("lab"));
        assert_eq!(loaded.profiles.get("lab"), Some(&p));
    }

    #[test]
    fn env_overrides_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    default_profile = "edge"

                    [defaults]
                    timeout = 20

                    [profiles.edge]
                    hostname = "edge.lab"
                    protocol = "http"
                    port = 8080
                "#,
            )?;
            jail.set_env("VYCTL_DEFAULTS__TIMEOUT", "5");

            let cfg = load_config_from(Path::new("config.toml")).map_err(|e| e.to_string())?;
            assert_eq!(cfg.defaults.timeout, 5);
            assert_eq!(cfg.defaults.port, 443);
            let edge = &cfg.profiles["edge"];
            assert_eq!(edge.protocol, Some(Scheme::Http));
            assert_eq!(edge.port, Some(8080));
            Ok(())
        });
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[profiles.lab]\nhostname = \"r1\"\nport = \"eighty\"\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        assert!(err.to_string().contains("port"), "{err}");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert!(cfg.profiles.is_empty());
        assert_eq!(cfg.defaults.output, "table");
    }
}
