//! Profile selection and CLI flag overrides.
//!
//! File and environment handling lives in `vyos-config`; this module decides
//! which profile is active and layers `--host`, `--port` and friends on top
//! before handing a finished `ConnectionConfig` to the client.

use clap::ValueEnum;
use secrecy::SecretString;

use vyos_api::{ConnectionConfig, Scheme};
use vyos_config::{Config, ENV_PROFILE, Profile};

use crate::cli::{GlobalOpts, OutputFormat, Protocol};
use crate::error::CliError;

pub use vyos_config::{config_path, load_config, save_config};

/// Name used for a device given only through `--host`.
const ADHOC_PROFILE: &str = "cli";

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Output format: `--output` flag, else `[defaults] output`, else table.
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global.output.clone().unwrap_or_else(|| {
        OutputFormat::from_str(&config.defaults.output, true).unwrap_or(OutputFormat::Table)
    })
}

/// Build the connection settings for this invocation.
pub fn resolve_connection(
    global: &GlobalOpts,
    config: &Config,
) -> Result<ConnectionConfig, CliError> {
    resolve_connection_with(global, config, |name| std::env::var(name).ok())
}

/// [`resolve_connection`] with an injectable environment lookup.
///
/// Profile precedence: `--profile` → configured default profile →
/// `VYDEVICE_*` environment → bare `--host`.
pub fn resolve_connection_with(
    global: &GlobalOpts,
    config: &Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ConnectionConfig, CliError> {
    let (name, mut profile) = select_profile(global, config, &lookup)?;
    apply_overrides(&mut profile, global);

    let api_key = match global.api_key {
        Some(ref key) => SecretString::from(key.clone()),
        None => vyos_config::resolve_api_key_with(&profile, &name, &lookup)?,
    };

    tracing::debug!(profile = %name, hostname = %profile.hostname, "resolved device profile");
    Ok(vyos_config::profile_to_connection_config(
        &profile,
        &config.defaults,
        api_key,
    )?)
}

fn select_profile(
    global: &GlobalOpts,
    config: &Config,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<(String, Profile), CliError> {
    // 1. Explicit --profile must exist
    if let Some(ref name) = global.profile {
        let found = if name == ENV_PROFILE {
            vyos_config::env_profile_with(lookup)?
        } else {
            config.profiles.get(name).cloned()
        };
        return found
            .map(|p| (name.clone(), p))
            .ok_or_else(|| profile_not_found(name, config));
    }

    // 2. Configured default profile
    if let Some(profile) = config
        .default_profile
        .as_ref()
        .and_then(|name| config.profiles.get(name).map(|p| (name.clone(), p.clone())))
    {
        return Ok(profile);
    }

    // 3. VYDEVICE_* environment
    if let Some(profile) = vyos_config::env_profile_with(lookup)? {
        return Ok((ENV_PROFILE.into(), profile));
    }

    // 4. Nothing but flags
    if let Some(ref host) = global.host {
        return Ok((
            ADHOC_PROFILE.into(),
            Profile {
                hostname: host.clone(),
                ..Profile::default()
            },
        ));
    }

    Err(CliError::NoConfig {
        path: config_path().display().to_string(),
    })
}

fn apply_overrides(profile: &mut Profile, global: &GlobalOpts) {
    if let Some(ref host) = global.host {
        profile.hostname.clone_from(host);
    }
    if let Some(port) = global.port {
        profile.port = Some(port);
    }
    if let Some(protocol) = global.protocol {
        profile.protocol = Some(scheme(protocol));
    }
    if global.insecure {
        profile.verify_ssl = Some(false);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
}

fn scheme(protocol: Protocol) -> Scheme {
    match protocol {
        Protocol::Https => Scheme::Https,
        Protocol::Http => Scheme::Http,
    }
}

fn profile_not_found(name: &str, config: &Config) -> CliError {
    let mut available: Vec<_> = config.profiles.keys().cloned().collect();
    available.sort();
    CliError::ProfileNotFound {
        name: name.into(),
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
    }
}
