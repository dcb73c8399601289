//! Config subcommand handlers.

use dialoguer::{Confirm, Input, Select};

use vyos_api::Scheme;
use vyos_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of `cfg` with plaintext keys masked.
fn redacted(cfg: &Config) -> Config {
    Config {
        default_profile: cfg.default_profile.clone(),
        defaults: vyos_config::Defaults {
            output: cfg.defaults.output.clone(),
            ..cfg.defaults
        },
        profiles: cfg
            .profiles
            .iter()
            .map(|(name, p)| {
                let mut p = p.clone();
                if p.api_key.is_some() {
                    p.api_key = Some("****".into());
                }
                (name.clone(), p)
            })
            .collect(),
    }
}

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "protocol = \"{}\"", cfg.defaults.protocol);
    let _ = writeln!(out, "port = {}", cfg.defaults.port);
    let _ = writeln!(out, "verify_ssl = {}", cfg.defaults.verify_ssl);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "hostname = \"{}\"", p.hostname);
        if p.api_key.is_some() {
            let _ = writeln!(out, "api_key = \"****\"");
        }
        if let Some(ref env) = p.api_key_env {
            let _ = writeln!(out, "api_key_env = \"{env}\"");
        }
        if let Some(protocol) = p.protocol {
            let _ = writeln!(out, "protocol = \"{protocol}\"");
        }
        if let Some(port) = p.port {
            let _ = writeln!(out, "port = {port}");
        }
        if let Some(verify) = p.verify_ssl {
            let _ = writeln!(out, "verify_ssl = {verify}");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Ask for the API key and where to keep it.
///
/// Returns `(api_key, api_key_env)`; exactly one is set.
fn prompt_api_key() -> Result<(Option<String>, Option<String>), CliError> {
    let choices = &[
        "Read from an environment variable (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where should the API key come from?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        let var: String = Input::new()
            .with_prompt("Environment variable name")
            .default(vyos_config::API_KEY_ENV.into())
            .interact_text()
            .map_err(prompt_err)?;
        return Ok((None, Some(var)));
    }

    let key = rpassword::prompt_password("API key: ").map_err(prompt_err)?;
    if key.is_empty() {
        return Err(CliError::Validation {
            field: "api_key".into(),
            reason: "API key cannot be empty".into(),
        });
    }
    Ok((Some(key), None))
}

// ── Handler ─────────────────────────────────────────────────────────

/// `cfg` is the already-loaded configuration; a file that failed to parse
/// never reaches here, so `init` and `use` cannot overwrite it.
pub fn handle(
    args: ConfigArgs,
    global: &GlobalOpts,
    format: &OutputFormat,
    mut cfg: Config,
) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("vyctl configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            // 1. Profile name
            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default(config::active_profile_name(global, &cfg))
                .interact_text()
                .map_err(prompt_err)?;

            // 2. Device address
            let hostname: String = Input::new()
                .with_prompt("Router hostname or IP")
                .interact_text()
                .map_err(prompt_err)?;

            // 3. Transport
            let protocols = &["https", "http"];
            let protocol = match Select::new()
                .with_prompt("Protocol")
                .items(protocols)
                .default(0)
                .interact()
                .map_err(prompt_err)?
            {
                0 => Scheme::Https,
                _ => Scheme::Http,
            };

            let port: u16 = Input::new()
                .with_prompt("API port")
                .default(cfg.defaults.port)
                .interact_text()
                .map_err(prompt_err)?;

            let verify_ssl = protocol == Scheme::Http
                || Confirm::new()
                    .with_prompt("Verify the TLS certificate?")
                    .default(true)
                    .interact()
                    .map_err(prompt_err)?;

            // 4. Credentials
            let (api_key, api_key_env) = prompt_api_key()?;

            // 5. Merge into existing config
            let profile = Profile {
                hostname,
                api_key,
                api_key_env,
                protocol: Some(protocol),
                port: Some(port),
                verify_ssl: (!verify_ssl).then_some(false),
                ..Profile::default()
            };
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());

            // 6. Write config
            let path = config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: vyctl show-config system host-name");

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&cfg);
            let out = match format {
                OutputFormat::Json => output::render_json_pretty(&cfg),
                OutputFormat::JsonCompact => output::render_json_compact(&cfg),
                OutputFormat::Yaml => output::render_yaml(&cfg),
                OutputFormat::Table | OutputFormat::Plain => format_config_redacted(&cfg),
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: vyctl config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            if !cfg.profiles.contains_key(&name) {
                let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
                available.sort();
                return Err(CliError::ProfileNotFound {
                    name,
                    available: if available.is_empty() {
                        "(none)".into()
                    } else {
                        available.join(", ")
                    },
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }
    }
}
