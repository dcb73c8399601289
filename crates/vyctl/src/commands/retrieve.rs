//! Configuration-mode queries: `show-config`, `return-values`, `exists`.

use vyos_api::Command as Endpoint;

use super::{Context, call, finish, util};
use crate::cli::PathArgs;
use crate::error::CliError;

pub async fn show_config(ctx: &Context<'_>, args: PathArgs) -> Result<(), CliError> {
    let path = util::segments(args.path);
    let resp = call(
        ctx,
        format!("Reading configuration {path}"),
        ctx.client.retrieve_show_config(path),
    )
    .await;
    finish(ctx, Endpoint::Retrieve, &resp, "No configuration under this path")
}

pub async fn return_values(ctx: &Context<'_>, args: PathArgs) -> Result<(), CliError> {
    let path = util::segments(args.path);
    let resp = call(
        ctx,
        format!("Reading values of {path}"),
        ctx.client.retrieve_return_values(path),
    )
    .await;
    finish(ctx, Endpoint::Retrieve, &resp, "No values")
}

pub async fn exists(ctx: &Context<'_>, args: PathArgs) -> Result<(), CliError> {
    let resp = call(
        ctx,
        "Checking path".into(),
        ctx.client.retrieve_exists(util::segments(args.path)),
    )
    .await;
    finish(ctx, Endpoint::Retrieve, &resp, "Done")
}
