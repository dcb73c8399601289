//! Operational-mode commands: `show`, `generate`, `reset`.

use vyos_api::Command as Endpoint;

use super::{Context, call, finish, util};
use crate::cli::PathArgs;
use crate::error::CliError;

pub async fn show(ctx: &Context<'_>, args: PathArgs) -> Result<(), CliError> {
    let path = util::segments(args.path);
    let resp = call(ctx, format!("show {path}"), ctx.client.show(path)).await;
    finish(ctx, Endpoint::Show, &resp, "No output")
}

pub async fn generate(ctx: &Context<'_>, args: PathArgs) -> Result<(), CliError> {
    let path = util::segments(args.path);
    let resp = call(ctx, format!("generate {path}"), ctx.client.generate(path)).await;
    finish(ctx, Endpoint::Generate, &resp, "Generated")
}

pub async fn reset(ctx: &Context<'_>, args: PathArgs) -> Result<(), CliError> {
    let path = util::segments(args.path);
    let resp = call(ctx, format!("reset {path}"), ctx.client.reset(path)).await;
    finish(ctx, Endpoint::Reset, &resp, "Reset done")
}
