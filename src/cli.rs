use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use watchsync::config::{DEFAULT_CONFIG_DIR, DEFAULT_MAIN_CONFIG};

/// WatchSync - mirror directories to a remote host as they change
#[derive(Parser, Debug)]
#[command(name = "watchsync")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["config", "daemon"])))]
#[command(
    after_help = "Daemon mode logs to the system journal. Foreground mode logs to the console.\n\
                  Config files and the config directory must not be group/world accessible."
)]
pub struct Cli {
    /// Run in the foreground with a single job file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as a daemon, one job per file in the config directory
    #[arg(short, long)]
    pub daemon: bool,

    /// Global defaults applied to every daemon job
    #[arg(long, value_name = "FILE", default_value = DEFAULT_MAIN_CONFIG)]
    pub main_config: PathBuf,

    /// Directory holding one job file per job
    #[arg(long, value_name = "DIR", default_value = DEFAULT_CONFIG_DIR)]
    pub config_dir: PathBuf,

    /// Stay attached to the terminal in daemon mode (for service managers)
    #[arg(long)]
    pub no_detach: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Foreground {
        config: PathBuf,
    },
    Daemon {
        main_config: PathBuf,
        config_dir: PathBuf,
        detach: bool,
    },
}

impl Cli {
    pub fn mode(&self) -> Mode {
        match &self.config {
            Some(config) => Mode::Foreground {
                config: config.clone(),
            },
            None => Mode::Daemon {
                main_config: self.main_config.clone(),
                config_dir: self.config_dir.clone(),
                detach: !self.no_detach,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_a_mode() {
        assert!(Cli::try_parse_from(["watchsync"]).is_err());
    }

    #[test]
    fn test_cli_modes_are_exclusive() {
        assert!(Cli::try_parse_from(["watchsync", "-c", "job.conf", "-d"]).is_err());
    }

    #[test]
    fn test_cli_parse_foreground() {
        let cli = Cli::try_parse_from(["watchsync", "-c", "/etc/site.conf"]).unwrap();
        assert_eq!(
            cli.mode(),
            Mode::Foreground {
                config: PathBuf::from("/etc/site.conf")
            }
        );
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_parse_daemon_defaults() {
        let cli = Cli::try_parse_from(["watchsync", "-d"]).unwrap();
        assert_eq!(
            cli.mode(),
            Mode::Daemon {
                main_config: PathBuf::from("/etc/watchsync.conf"),
                config_dir: PathBuf::from("/etc/watchsync.d"),
                detach: true,
            }
        );
    }

    #[test]
    fn test_cli_parse_daemon_overrides() {
        let cli = Cli::try_parse_from([
            "watchsync",
            "--daemon",
            "--config-dir",
            "/tmp/jobs",
            "--main-config",
            "/tmp/main.conf",
            "--no-detach",
            "-vv",
        ])
        .unwrap();
        assert_eq!(
            cli.mode(),
            Mode::Daemon {
                main_config: PathBuf::from("/tmp/main.conf"),
                config_dir: PathBuf::from("/tmp/jobs"),
                detach: false,
            }
        );
        assert_eq!(cli.verbose, 2);
    }
}
