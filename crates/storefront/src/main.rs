mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use storefront_config::FileCredentialStore;
use storefront_core::Storefront;

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
    match cli.command {
        // Config commands don't need a backend
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "storefront", &mut std::io::stdout());
            Ok(())
        }

        // Session-only commands work from the stored credential alone
        Command::Logout => commands::session::logout(&cli.global),
        Command::Access(args) => commands::access::handle(&args, &cli.global),

        // Everything else talks to the API
        cmd => {
            let cfg = config::load_config_or_default();
            let resolved = config::resolve(&cli.global, &cfg)?;
            let credentials = Arc::new(FileCredentialStore::new(config::credentials_path(
                &resolved.profile_name,
            )));
            let store = Storefront::new(&resolved.store, credentials)?;
            let ctx = Context::new(store, &cli.global, resolved.profile_name, resolved.profile);

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &ctx).await
        }
    }
}
