mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fairlink_core::{Fair, Notifications};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::Presenter;

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
        // Config commands don't need a store
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "fairlink", &mut std::io::stdout());
            Ok(())
        }

        // Everything else goes through the access layer
        cmd => {
            let cfg = config::load(&cli.global)?;
            let presenter = Presenter {
                format: config::output_format(&cfg, &cli.global),
                color: output::should_color(cli.global.color),
                quiet: cli.global.quiet,
            };

            // Subscribe before building `Fair` so the mode announcement is seen.
            let notifications = Notifications::new();
            let mut rx = notifications.subscribe();
            let fair = Fair::new(config::store_config(&cfg, &cli.global), notifications)?;

            tracing::debug!(command = ?cmd, mode = %fair.mode(), "dispatching command");
            let result = commands::dispatch(cmd, &fair, &cli.global, presenter).await;
            output::drain_notifications(&mut rx, presenter);
            result
        }
    }
}
