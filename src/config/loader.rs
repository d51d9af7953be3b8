//! Configuration loading
//!
//! Foreground mode reads one job file; daemon mode reads the global
//! defaults plus one job per file in the config directory.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::entities::{Roster, WatchJob, MAX_JOBS};
use crate::error::{WatchSyncError, WatchSyncResult};

use super::permissions::check_permissions;
use super::types::JobConfig;

/// Non-fatal configuration warning (unknown key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Parse one config file and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> WatchSyncResult<(JobConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: JobConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| WatchSyncError::ConfigParse {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load a single job file. Every problem is fatal.
pub fn load_job_file(path: &Path, name: &str) -> WatchSyncResult<WatchJob> {
    check_permissions(path)?;
    let config = parse_logged(path)?;
    config.into_job(name, path)
}

/// Load the daemon roster.
///
/// `main_config` supplies defaults when present; each regular file in
/// `config_dir` (sorted by name) becomes a job named after the file.
/// Unusable files are skipped with a warning; an empty result is an error.
pub fn load_roster(main_config: &Path, config_dir: &Path) -> WatchSyncResult<Roster> {
    let no_jobs = || WatchSyncError::NoJobs {
        dir: config_dir.to_path_buf(),
    };

    let global = load_global(main_config);

    if let Err(err) = check_permissions(config_dir) {
        warn!("ignoring config directory: {}", err);
        return Err(no_jobs());
    }

    let mut files: Vec<PathBuf> = match fs::read_dir(config_dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.path())
            .collect(),
        Err(err) => {
            warn!("cannot read {}: {}", config_dir.display(), err);
            return Err(no_jobs());
        }
    };
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut jobs = Vec::new();
    for file in files {
        if jobs.len() == MAX_JOBS {
            warn!(
                "job limit of {} reached, skipping {}",
                MAX_JOBS,
                file.display()
            );
            continue;
        }

        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match load_layered(&file, &name, &global) {
            Ok(job) => {
                debug!("loaded job '{}' from {}", job.name, file.display());
                jobs.push(job);
            }
            Err(err) => warn!("skipping {}: {}", file.display(), err),
        }
    }

    Roster::new(jobs).ok_or_else(no_jobs)
}

fn load_global(main_config: &Path) -> JobConfig {
    if !main_config.exists() {
        return JobConfig::default();
    }
    let loaded = check_permissions(main_config).and_then(|()| parse_logged(main_config));
    match loaded {
        Ok(config) => config,
        Err(err) => {
            warn!("ignoring global config: {}", err);
            JobConfig::default()
        }
    }
}

fn load_layered(file: &Path, name: &str, global: &JobConfig) -> WatchSyncResult<WatchJob> {
    check_permissions(file)?;
    parse_logged(file)?.layered_over(global).into_job(name, file)
}

fn parse_logged(path: &Path) -> WatchSyncResult<JobConfig> {
    let (config, warnings) = load_with_warnings(path)?;
    for warning in &warnings {
        warn!("{}", warning);
    }
    Ok(config)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

pub(super) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "local", "root", "remote", "user", "host", "password", "rsync", "delete", "delay_ms",
        "exclude",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
