use std::path::PathBuf;

use crate::{Config, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User confirmed the offered step.
    ConfirmClicked,
    /// User chose "not now".
    DeferClicked,
    /// User asked to run the pipeline again after a failure.
    RetryClicked,
    /// User asked to start over.
    RestartClicked,
    /// User asked for the help page.
    HelpClicked,
    /// User asked to quit.
    TerminateClicked,
    /// Configuration loader finished.
    ConfigLoaded {
        task: TaskId,
        result: Result<Config, String>,
    },
    /// Destination scan finished.
    DestinationResolved {
        task: TaskId,
        result: Result<PathBuf, String>,
    },
    /// Archiver process finished.
    ArchiveFinished {
        task: TaskId,
        result: Result<PathBuf, String>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
