mod cli;
mod commands;
mod config;
mod error;
mod notify;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

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
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Local commands that never touch the API
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Nav(args) => commands::nav::handle(&args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "backdesk", &mut std::io::stdout());
            Ok(())
        }

        // Everything else talks to the shop API
        Command::Subjects(args) => {
            tracing::debug!("dispatching subjects command");
            commands::subjects::handle(args, &cli.global).await
        }

        Command::Customers(args) => {
            tracing::debug!("dispatching customers command");
            commands::customers::handle(args, &cli.global).await
        }
    }
}
