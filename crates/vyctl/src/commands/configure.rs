//! Configuration changes: `set`, `delete`, `save`, `load`.
//!
//! The device commits every `configure` call; a batch is committed as one
//! transaction.

use vyos_api::{Command as Endpoint, ConfigPath};

use super::{Context, call, finish, util};
use crate::cli::{ConfigureArgs, LoadArgs, SaveArgs};
use crate::error::CliError;

/// Positional path, `--batch` JSON, or `--from-file` JSON.
fn target(args: ConfigureArgs) -> Result<ConfigPath, CliError> {
    if let Some(ref json) = args.batch {
        return util::parse_batch(json);
    }
    if let Some(ref file) = args.from_file {
        return util::read_batch_file(file);
    }
    if args.path.is_empty() {
        return Err(CliError::Validation {
            field: "path".into(),
            reason: "a path, --batch or --from-file is required".into(),
        });
    }
    Ok(util::segments(args.path))
}

pub async fn set(ctx: &Context<'_>, args: ConfigureArgs) -> Result<(), CliError> {
    let path = target(args)?;
    tracing::info!(%path, "set");
    let resp = call(ctx, format!("set {path}"), ctx.client.configure_set(path)).await;
    finish(ctx, Endpoint::Configure, &resp, "Configuration committed")
}

pub async fn delete(ctx: &Context<'_>, args: ConfigureArgs) -> Result<(), CliError> {
    let path = target(args)?;
    tracing::info!(%path, "delete");
    let resp = call(
        ctx,
        format!("delete {path}"),
        ctx.client.configure_delete(path),
    )
    .await;
    finish(ctx, Endpoint::Configure, &resp, "Configuration committed")
}

pub async fn save(ctx: &Context<'_>, args: SaveArgs) -> Result<(), CliError> {
    let resp = call(
        ctx,
        "Saving configuration".into(),
        ctx.client.config_file_save(args.file.as_deref()),
    )
    .await;
    finish(ctx, Endpoint::ConfigFile, &resp, "Configuration saved")
}

pub async fn load(ctx: &Context<'_>, args: LoadArgs) -> Result<(), CliError> {
    let resp = call(
        ctx,
        format!("Loading {}", args.file),
        ctx.client.config_file_load(&args.file),
    )
    .await;
    finish(ctx, Endpoint::ConfigFile, &resp, "Configuration loaded")
}
