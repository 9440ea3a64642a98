// SPDX-License-Identifier: MIT OR Apache-2.0
//! Promo reel host.
//!
//! Loads a render job (a built-in template or an explicit composition),
//! builds the composition and prints what the compositor has to draw:
//! - `inspect`: segment windows and spring settle times
//! - `frame`: one frame's layers as JSON
//! - `render`: a frame range as JSON lines, rendered in parallel
//! - `template`: a default job file to start from
//!
//! Layer output goes to stdout; logs go to stderr.

mod cli;
mod commands;
mod job;

use clap::Parser;
use cli::Args;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let args = Args::parse();

    // RUST_LOG wins over the -v count
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(
            args.log_level()
                .parse()
                .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Starting promo_reel v{}", env!("CARGO_PKG_VERSION"));

    let stdout = std::io::stdout();
    if let Err(e) = commands::run(args.command, &mut stdout.lock()) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
