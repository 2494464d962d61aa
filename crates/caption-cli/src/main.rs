//! `caption`: inspect and render animated caption transcripts

mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Timeline { render } => commands::timeline(render),
        Command::Frame { render, frame, png } => commands::frame(render, *frame, png.as_deref()),
        Command::Export {
            render,
            out,
            start,
            end,
        } => commands::export(render, out, *start, *end),
    }
}

/// `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
