//! Test environment for isolated WatchSync runs.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::Duration;

use tempfile::TempDir;

/// Result of running the watchsync binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

impl From<Output> for TestResult {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Temp directory holding a watched root, a private job directory and a
/// global config path (not created until written).
pub struct TestEnv {
    dir: TempDir,
    pub root: PathBuf,
    pub config_dir: PathBuf,
    pub main_config: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let base = dir.path().canonicalize().unwrap();
        let root = base.join("site");
        let config_dir = base.join("watchsync.d");
        fs::create_dir(&root).unwrap();
        fs::create_dir(&config_dir).unwrap();
        fs::set_permissions(&config_dir, fs::Permissions::from_mode(0o700)).unwrap();
        Self {
            main_config: base.join("watchsync.conf"),
            dir,
            root,
            config_dir,
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// A complete job config pointing at `self.root`.
    pub fn job_toml(&self) -> String {
        format!(
            "[local]\nroot = \"{}\"\n\n[remote]\nuser = \"deploy\"\nhost = \"backup.invalid\"\nroot = \"/srv/mirror\"\n",
            self.root.display()
        )
    }

    pub fn write_config(&self, path: &Path, content: &str, mode: u32) {
        fs::write(path, content).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
    }

    /// Run the binary to completion with stdin detached.
    pub fn run(&self, args: &[&str]) -> TestResult {
        Command::new(env!("CARGO_BIN_EXE_watchsync"))
            .args(args)
            .env_remove("RUST_LOG")
            .stdin(Stdio::null())
            .output()
            .unwrap()
            .into()
    }

    /// Run the binary for `duration`, then kill it and collect its output.
    pub fn run_for(&self, args: &[&str], duration: Duration) -> TestResult {
        let mut child = Command::new(env!("CARGO_BIN_EXE_watchsync"))
            .args(args)
            .env_remove("RUST_LOG")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        thread::sleep(duration);
        let _ = child.kill();
        child.wait_with_output().unwrap().into()
    }
}
