use std::path::PathBuf;

use backup_engine::default_config_path;
use clap::{Parser, ValueEnum};
use engine_logging::{LogDestination, LogSettings};
use log::LevelFilter;

/// Back up a directory into an encrypted 7z archive on the first available
/// destination.
#[derive(Debug, Parser)]
#[command(name = "backup7", version)]
pub struct Args {
    /// Configuration file [default: <home>/backup7.configuration]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Where log records are written.
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    /// Log file used by `--log file` and `--log both`.
    #[arg(long, value_name = "PATH", default_value = "./backup7.log")]
    pub log_file: PathBuf,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl Args {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            destination: match self.log {
                LogTarget::File => LogDestination::File,
                LogTarget::Terminal => LogDestination::Terminal,
                LogTarget::Both => LogDestination::Both,
            },
            level: if self.verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
            file: self.log_file.clone(),
        }
    }
}
