//! Device-level actions: `image add|delete`, `reboot`, `poweroff`.

use vyos_api::{Command as Endpoint, ConfigPath};

use super::{Context, call, finish, util};
use crate::cli::{ImageArgs, ImageCommand, PowerArgs};
use crate::error::CliError;

pub async fn image(ctx: &Context<'_>, args: ImageArgs) -> Result<(), CliError> {
    match args.command {
        ImageCommand::Add { url } => {
            let resp = call(ctx, format!("Installing image from {url}"), ctx.client.image_add(&url))
                .await;
            finish(ctx, Endpoint::Image, &resp, "Image installed")
        }
        ImageCommand::Delete { name } => {
            if !util::confirm(&format!("Delete image '{name}'?"), ctx.global.yes)? {
                eprintln!("Aborted.");
                return Ok(());
            }
            let resp = call(ctx, format!("Deleting image {name}"), ctx.client.image_delete(&name))
                .await;
            finish(ctx, Endpoint::Image, &resp, "Image deleted")
        }
    }
}

pub async fn reboot(ctx: &Context<'_>, args: PowerArgs) -> Result<(), CliError> {
    let when = schedule(args);
    if !util::confirm(&format!("Reboot {} {when}?", host(ctx)), ctx.global.yes)? {
        eprintln!("Aborted.");
        return Ok(());
    }
    let resp = call(ctx, "Requesting reboot".into(), ctx.client.reboot_at(when)).await;
    finish(ctx, Endpoint::Reboot, &resp, "Reboot scheduled")
}

pub async fn poweroff(ctx: &Context<'_>, args: PowerArgs) -> Result<(), CliError> {
    let when = schedule(args);
    if !util::confirm(&format!("Power off {} {when}?", host(ctx)), ctx.global.yes)? {
        eprintln!("Aborted.");
        return Ok(());
    }
    let resp = call(ctx, "Requesting poweroff".into(), ctx.client.poweroff_at(when)).await;
    finish(ctx, Endpoint::Poweroff, &resp, "Poweroff scheduled")
}

/// Explicit schedule segments, else `now`.
fn schedule(args: PowerArgs) -> ConfigPath {
    if args.path.is_empty() {
        ConfigPath::now()
    } else {
        util::segments(args.path)
    }
}

fn host<'a>(ctx: &'a Context<'_>) -> &'a str {
    &ctx.client.config().hostname
}
