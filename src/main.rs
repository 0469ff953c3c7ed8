use clap::Parser;
use sdkm::cli::{Cli, CommandHandler};
use sdkm::core::constants::env::LOG_FILTER_VAR;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let handler = match CommandHandler::new(cli.config.as_deref(), cli.catalog.as_deref()) {
        Ok(handler) => handler,
        Err(e) => {
            eprint!("{}", e.user_message());
            process::exit(1);
        }
    };

    if let Err(e) = handler.handle_command(cli.command).await {
        eprint!("{}", e.user_message());
        process::exit(1);
    }
}
