mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vyos_api::VyosClient;

use crate::cli::{Cli, Command};
use crate::commands::Context;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // Shell completions never read the config file
    if let Command::Completions(ref args) = cli.command {
        use clap::CommandFactory;
        use clap_complete::generate;

        let mut cmd = Cli::command();
        generate(args.shell, &mut cmd, "vyctl", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::load_config()?;
    let format = config::output_format(&cli.global, &cfg);

    match cli.command {
        // Config commands don't need a device connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global, &format, cfg),

        // All other commands talk to the device
        cmd => {
            let connection = config::resolve_connection(&cli.global, &cfg)?;
            let client = VyosClient::new(connection)?;

            tracing::debug!(command = ?cmd, url = %client.base_url(), "dispatching command");
            let ctx = Context {
                client: &client,
                global: &cli.global,
                format,
            };
            commands::dispatch(cmd, &ctx).await
        }
    }
}
