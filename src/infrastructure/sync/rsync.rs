//! Rsync Sync Executor
//!
//! Mirrors a job root with `rsync -az --itemize-changes`, so the captured
//! output doubles as a per-file change report.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::NamedTempFile;

use crate::domain::entities::WatchJob;
use crate::domain::ports::{SyncError, SyncExecutor, SyncReport};

/// Sync executor using rsync
///
/// When the job carries a password the transfer runs under `sshpass -e`,
/// with the password passed through the child's `SSHPASS` variable only.
/// Without one, rsync relies on ssh keys.
#[derive(Debug, Clone)]
pub struct RsyncExecutor {
    rsync: String,
    sshpass: String,
}

impl Default for RsyncExecutor {
    fn default() -> Self {
        Self::with_programs("rsync", "sshpass")
    }
}

impl RsyncExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the programs invoked (tests substitute harmless commands).
    pub fn with_programs(rsync: impl Into<String>, sshpass: impl Into<String>) -> Self {
        Self {
            rsync: rsync.into(),
            sshpass: sshpass.into(),
        }
    }

    /// Check if rsync is installed and available
    pub fn check_available(&self) -> bool {
        Command::new(&self.rsync)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// rsync arguments for one transfer of `job`.
    pub fn arguments(job: &WatchJob, exclude_file: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-az".into(), "--itemize-changes".into()];
        if job.sync.delete {
            args.push("--delete".into());
        }

        let mut exclude_from = OsString::from("--exclude-from=");
        exclude_from.push(exclude_file);
        args.push(exclude_from);

        // trailing slash = copy contents
        let mut source = job.root.clone().into_os_string();
        source.push("/");
        args.push(source);
        args.push(job.sync.remote.destination().into());
        args
    }

    fn command(&self, job: &WatchJob, exclude_file: &Path) -> Command {
        let args = Self::arguments(job, exclude_file);
        match &job.sync.password {
            Some(password) => {
                let mut cmd = Command::new(&self.sshpass);
                cmd.arg("-e")
                    .arg(&self.rsync)
                    .args(args)
                    .env("SSHPASS", password);
                cmd
            }
            None => {
                let mut cmd = Command::new(&self.rsync);
                cmd.args(args);
                cmd
            }
        }
    }

    fn program(&self, job: &WatchJob) -> &str {
        if job.sync.password.is_some() {
            &self.sshpass
        } else {
            &self.rsync
        }
    }
}

impl SyncExecutor for RsyncExecutor {
    fn sync(&self, job: &WatchJob) -> Result<SyncReport, SyncError> {
        let exclude_file = write_exclude_file(&job.sync.excludes).map_err(SyncError::ExcludeFile)?;

        let output = self
            .command(job, exclude_file.path())
            .stdin(Stdio::null())
            .output()
            .map_err(|source| SyncError::Spawn {
                program: self.program(job).to_string(),
                source,
            })?;

        Ok(SyncReport {
            exit_code: output.status.code(),
            lines: report_lines(&output.stdout, &output.stderr),
        })
    }
}

/// One pattern per line; removed when the returned handle drops.
fn write_exclude_file(excludes: &[String]) -> io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("watchsync_excl_")
        .tempfile()?;
    for pattern in excludes {
        writeln!(file, "{}", pattern)?;
    }
    file.flush()?;
    Ok(file)
}

/// stdout first, then stderr; trimmed, blank lines dropped.
fn report_lines(stdout: &[u8], stderr: &[u8]) -> Vec<String> {
    [stdout, stderr]
        .into_iter()
        .flat_map(|stream| {
            String::from_utf8_lossy(stream)
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}
