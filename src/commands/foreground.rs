use std::path::Path;

use anyhow::{Context, Result};
use dialoguer::Password;
use is_terminal::IsTerminal;
use tracing::warn;

use watchsync::config::load_job_file;
use watchsync::logging::{self, LogSink};
use watchsync::watcher::default_source;
use watchsync::{JobRuntime, RsyncExecutor, WatchJob};

/// Job name used for log correlation in foreground mode.
pub const FOREGROUND_JOB_NAME: &str = "cli";

/// Run a single job attached to the terminal until killed.
pub fn cmd_foreground(config: &Path, verbose: u8) -> Result<()> {
    logging::init(LogSink::Console, verbose)?;

    let mut job = load_job_file(config, FOREGROUND_JOB_NAME)
        .with_context(|| format!("cannot use config file {}", config.display()))?;

    if job.sync.password.is_none() && std::io::stdin().is_terminal() {
        job.sync.password = prompt_password(&job)?;
    }

    let executor = RsyncExecutor::new();
    if !executor.check_available() {
        warn!("rsync not found in PATH, transfers will fail");
    }

    let source = default_source().context("cannot create change notification source")?;
    JobRuntime::new(job, source, executor).run()
}

/// Empty input means "use ssh keys".
fn prompt_password(job: &WatchJob) -> Result<Option<String>> {
    let password = Password::new()
        .with_prompt(format!("Remote password for {}", job.sync.remote.login()))
        .allow_empty_password(true)
        .interact()?;
    Ok(Some(password).filter(|p| !p.is_empty()))
}
