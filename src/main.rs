//! WatchSync CLI - continuous one-way directory mirroring
//!
//! Usage:
//!   watchsync -c <FILE>   Run one job in the foreground
//!   watchsync -d          Run every job in /etc/watchsync.d as a daemon

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Mode};
use commands::daemon::cmd_daemon;
use commands::foreground::cmd_foreground;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.mode() {
        Mode::Foreground { config } => cmd_foreground(&config, cli.verbose),
        Mode::Daemon {
            main_config,
            config_dir,
            detach,
        } => cmd_daemon(&main_config, &config_dir, detach, cli.verbose),
    }
}
