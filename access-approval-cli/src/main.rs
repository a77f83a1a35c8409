//! # Access Approval CLI Entry Point
//!
//! The main executable of the `access-approval` tool. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`] and installs the
//!    `tracing` subscriber (`RUST_LOG`, `warn` by default, written to stderr).
//! 2. **Execution**: Builds the transport and sends the request (see [`commands::run`]).
//! 3. **Presentation**: Prints the response or the error status.
mod cli;
mod commands;
mod formatter;

use clap::Parser;
use cli::Cli;
use commands::Output;
use formatter::{Deleted, FormattedString};
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match commands::run(args.connection, args.command).await {
        Ok(Output::Message(Ok(message))) => println!("{}", FormattedString::from(message)),
        Ok(Output::Deleted(Ok(name))) => println!("{}", FormattedString::from(Deleted(name))),
        Ok(Output::Message(Err(status)) | Output::Deleted(Err(status))) => {
            eprintln!("{}", FormattedString::from(status));
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    }
}
