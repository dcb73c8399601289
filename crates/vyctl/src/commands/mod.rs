//! Command dispatch: bridges CLI args -> API calls -> output formatting.

pub mod config_cmd;
pub mod configure;
pub mod operational;
pub mod retrieve;
pub mod system;
pub mod util;

use vyos_api::{ApiResponse, VyosClient};

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Everything a handler needs besides its own arguments.
pub struct Context<'a> {
    pub client: &'a VyosClient,
    pub global: &'a GlobalOpts,
    pub format: OutputFormat,
}

/// Dispatch a device-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Context<'_>) -> Result<(), CliError> {
    match cmd {
        Command::ShowConfig(args) => retrieve::show_config(ctx, args).await,
        Command::ReturnValues(args) => retrieve::return_values(ctx, args).await,
        Command::Exists(args) => retrieve::exists(ctx, args).await,
        Command::Show(args) => operational::show(ctx, args).await,
        Command::Generate(args) => operational::generate(ctx, args).await,
        Command::Reset(args) => operational::reset(ctx, args).await,
        Command::Set(args) => configure::set(ctx, args).await,
        Command::Delete(args) => configure::delete(ctx, args).await,
        Command::Save(args) => configure::save(ctx, args).await,
        Command::Load(args) => configure::load(ctx, args).await,
        Command::Image(args) => system::image(ctx, args).await,
        Command::Reboot(args) => system::reboot(ctx, args).await,
        Command::Poweroff(args) => system::poweroff(ctx, args).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

/// Await one API call behind a spinner.
pub(crate) async fn call(
    ctx: &Context<'_>,
    message: String,
    request: impl Future<Output = ApiResponse>,
) -> ApiResponse {
    let pb = util::spinner(message, ctx.global.quiet);
    let resp = request.await;
    pb.finish_and_clear();
    resp
}

/// Print a response and turn a failed one into an error.
///
/// Structured formats always print the full response, failures included,
/// so scripts can inspect `status` and `error`. Table and plain print only
/// successful results; an empty result prints `done` on stderr instead.
pub(crate) fn finish(
    ctx: &Context<'_>,
    endpoint: vyos_api::Command,
    resp: &ApiResponse,
    done: &str,
) -> Result<(), CliError> {
    let url = ctx.client.command_url(endpoint);
    let failure = CliError::from_response(resp, url.as_str());

    if failure.is_none() || output::is_structured(&ctx.format) {
        match output::render_response(&ctx.format, resp) {
            Some(out) => output::print_output(&out, ctx.global.quiet),
            None if failure.is_none() && !ctx.global.quiet => {
                eprintln!("{}", output::done(done, output::should_color(&ctx.global.color)));
            }
            None => {}
        }
    }

    failure.map_or(Ok(()), Err)
}
