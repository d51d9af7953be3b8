use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use watchsync::config::load_roster;
use watchsync::infrastructure::detach;
use watchsync::logging::{self, LogSink};
use watchsync::watcher::default_source;
use watchsync::{JobRuntime, RsyncExecutor, Supervisor};

/// Run every job in `config_dir` as its own process and wait for them.
///
/// Configuration problems are reported before detaching, while the
/// invoking terminal can still see them. A daemon that would detach with no
/// system log to write to refuses to start.
pub fn cmd_daemon(main_config: &Path, config_dir: &Path, detach_first: bool, verbose: u8) -> Result<()> {
    let sink = LogSink::SystemLog {
        console_fallback: !detach_first,
    };
    let backend = logging::init(sink, verbose).context("cannot start daemon")?;
    debug!("logging to {:?}", backend);

    let roster = load_roster(main_config, config_dir).inspect_err(|err| error!("{}", err))?;

    if !RsyncExecutor::new().check_available() {
        warn!("rsync not found in PATH, transfers will fail");
    }

    if detach_first {
        detach().context("cannot detach from terminal")?;
    }

    info!("WatchSync daemon started with {} jobs", roster.len());

    let running = Supervisor::new(roster).spawn_all(|job| {
        let source = default_source()?;
        JobRuntime::new(job, source, RsyncExecutor::new()).run()
    })?;

    let exits = running.wait_all();
    info!("all {} jobs have exited", exits.len());
    Ok(())
}
