//! `pinergy` - balance, usage and account data from the Pinergy API.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod output;

use cli::RootCommand;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,pinergy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = RootCommand::parse();
    match command.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => err.into(),
    }
}
