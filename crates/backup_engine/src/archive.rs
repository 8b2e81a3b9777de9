use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use backup_core::Config;
use chrono::{Local, NaiveDateTime};
use engine_logging::{engine_info, engine_warn};
use thiserror::Error;

/// Extension of the produced archives.
pub const ARCHIVE_EXTENSION: &str = "7z";

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Destination-File {} already exists", .0.display())]
    TargetExists(PathBuf),
    #[error("Cannot resolve {}: {cause}", .path.display())]
    Canonicalize { path: PathBuf, cause: io::Error },
    #[error("Cannot start the archiver '{command_line}': {cause}")]
    Launch {
        command_line: String,
        cause: io::Error,
    },
    #[error(
        "Failed creating the backup with RC={code}. Try running the Command '{command_line}' by hand."
    )]
    ExitCode { code: i32, command_line: String },
    #[error(
        "Failed creating the backup, the archiver was terminated ({status}). Try running the Command '{command_line}' by hand."
    )]
    Signalled {
        status: ExitStatus,
        command_line: String,
    },
}

/// `backup-YYYYMMDD-HHMMSS.7z` for the given local time.
pub fn archive_file_name(timestamp: NaiveDateTime) -> String {
    format!(
        "backup-{}.{}",
        timestamp.format("%Y%m%d-%H%M%S"),
        ARCHIVE_EXTENSION
    )
}

/// Fully resolved archiver invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveCommand {
    program: PathBuf,
    target: PathBuf,
    password: String,
    source: PathBuf,
}

impl ArchiveCommand {
    /// Resolves the archiver and source to canonical paths and places the
    /// target under `destination`.
    pub fn build(
        config: &Config,
        destination: &Path,
        timestamp: NaiveDateTime,
    ) -> Result<Self, ArchiveError> {
        let program = canonicalize(config.archiver())?;
        let source = canonicalize(config.source())?;
        let target = canonicalize(destination)?.join(archive_file_name(timestamp));
        Ok(Self {
            program,
            target,
            password: config.password().to_string(),
            source,
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Arguments after the program: `a <target> -p<password> -mhe=on <source>`.
    pub fn args(&self) -> Vec<OsString> {
        let mut password = OsString::from("-p");
        password.push(&self.password);
        vec![
            OsString::from("a"),
            self.target.clone().into_os_string(),
            password,
            OsString::from("-mhe=on"),
            self.source.clone().into_os_string(),
        ]
    }

    /// Literal command line, suitable for running by hand.
    pub fn command_line(&self) -> String {
        self.render(&self.password)
    }

    /// Command line with the password masked, for logs.
    pub fn redacted(&self) -> String {
        self.render("***")
    }

    fn render(&self, password: &str) -> String {
        format!(
            "\"{}\" a {} -p{} -mhe=on {}",
            self.program.display(),
            self.target.display(),
            password,
            self.source.display()
        )
    }
}

impl fmt::Display for ArchiveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

/// Runs the external archiver synchronously.
///
/// Meant to be called from a worker task; blocks until the process exits.
#[derive(Debug, Clone, Default)]
pub struct ArchiveRunner;

impl ArchiveRunner {
    pub fn new() -> Self {
        Self
    }

    /// Archives `config.source()` into a timestamped file under `destination`.
    pub fn run(&self, config: &Config, destination: &Path) -> Result<PathBuf, ArchiveError> {
        self.run_at(config, destination, Local::now().naive_local())
    }

    /// Same as [`ArchiveRunner::run`] with an explicit timestamp.
    pub fn run_at(
        &self,
        config: &Config,
        destination: &Path,
        timestamp: NaiveDateTime,
    ) -> Result<PathBuf, ArchiveError> {
        let command = ArchiveCommand::build(config, destination, timestamp)?;
        if command.target().exists() {
            return Err(ArchiveError::TargetExists(command.target().to_path_buf()));
        }

        engine_info!("running archiver: {}", command);
        let status = Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|cause| {
                engine_warn!("cannot start archiver ({}): {}", cause, command);
                ArchiveError::Launch {
                    command_line: command.command_line(),
                    cause,
                }
            })?;

        match status.code() {
            Some(0) => {
                engine_info!("archive written: {:?}", command.target());
                Ok(command.target().to_path_buf())
            }
            Some(code) => {
                engine_warn!("archiver exited with {}: {}", code, command);
                Err(ArchiveError::ExitCode {
                    code,
                    command_line: command.command_line(),
                })
            }
            None => {
                engine_warn!("archiver terminated ({}): {}", status, command);
                Err(ArchiveError::Signalled {
                    status,
                    command_line: command.command_line(),
                })
            }
        }
    }
}

fn canonicalize(path: &Path) -> Result<PathBuf, ArchiveError> {
    path.canonicalize()
        .map_err(|cause| ArchiveError::Canonicalize {
            path: path.to_path_buf(),
            cause,
        })
}
