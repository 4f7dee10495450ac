#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! rayboot-build — validate bootloader build flags and hand off to `cargo builder`.

mod builder;
mod cli;
mod commands;
mod types;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{BANNER, Cli, OutputCtx, write_error};
use types::ErrorOutput;

fn main() {
    println!("{BANNER}");

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let ctx = OutputCtx::new(cli.output, cli.json);

    match commands::dispatch(&cli, &ctx) {
        Ok(()) => {}
        Err(err) => {
            tracing::debug!(error = ?err, before_run = err.is_configuration(), "build aborted");
            write_error(&ErrorOutput::from_build_error(&err), &ctx);
            std::process::exit(err.exit_code());
        }
    }
}

/// Log to stderr. `RUST_LOG` takes precedence over `--debug`.
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
