use std::path::{Path, PathBuf};

use crate::view_model::{AppViewModel, UserAction};
use crate::Config;

/// Ticket attached to every issued task effect and echoed back by its result.
pub type TaskId = u64;

/// Externally visible state of the backup workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Start,
    Configured,
    NotConfigured,
    BackupStarted,
    BackupDestFound,
    BackupDestNotFound,
    BackupZipRunning,
    BackupDone,
    Fail,
    HelpInfo,
}

impl Phase {
    /// Terminal phases make no automatic progress; only the user moves on.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Phase::BackupDone
                | Phase::Fail
                | Phase::NotConfigured
                | Phase::BackupDestNotFound
                | Phase::HelpInfo
        )
    }

    /// User actions the presentation layer offers in this phase.
    pub fn actions(self) -> &'static [UserAction] {
        use UserAction::*;
        match self {
            Phase::Start | Phase::BackupStarted | Phase::BackupZipRunning => &[Help, Terminate],
            Phase::Configured => &[Confirm, Defer, Help],
            Phase::BackupDestFound => &[Confirm, Restart, Terminate, Help],
            Phase::NotConfigured => &[Help, Terminate, Restart],
            Phase::BackupDestNotFound | Phase::Fail => &[Retry, Terminate, Help],
            Phase::HelpInfo => &[Restart, Terminate],
            Phase::BackupDone => &[Terminate],
        }
    }

    pub fn allows(self, action: UserAction) -> bool {
        self.actions().contains(&action)
    }
}

/// Phase together with the results it was reached with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    Start,
    Configured {
        config: Config,
    },
    NotConfigured {
        message: String,
    },
    BackupStarted {
        config: Config,
    },
    BackupDestFound {
        config: Config,
        destination: PathBuf,
    },
    BackupDestNotFound {
        config: Config,
        message: String,
    },
    BackupZipRunning {
        config: Config,
        destination: PathBuf,
    },
    BackupDone {
        config: Config,
        destination: PathBuf,
        archive: PathBuf,
    },
    Fail {
        message: String,
    },
    HelpInfo,
}

impl Step {
    fn phase(&self) -> Phase {
        match self {
            Step::Start => Phase::Start,
            Step::Configured { .. } => Phase::Configured,
            Step::NotConfigured { .. } => Phase::NotConfigured,
            Step::BackupStarted { .. } => Phase::BackupStarted,
            Step::BackupDestFound { .. } => Phase::BackupDestFound,
            Step::BackupDestNotFound { .. } => Phase::BackupDestNotFound,
            Step::BackupZipRunning { .. } => Phase::BackupZipRunning,
            Step::BackupDone { .. } => Phase::BackupDone,
            Step::Fail { .. } => Phase::Fail,
            Step::HelpInfo => Phase::HelpInfo,
        }
    }
}

/// Controller state. Owned by the interaction loop and replaced by
/// [`crate::update`] on every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) step: Step,
    pending: Option<TaskId>,
    next_task: TaskId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            step: Step::Start,
            pending: None,
            next_task: 1,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.step.phase()
    }

    pub fn config(&self) -> Option<&Config> {
        match &self.step {
            Step::Configured { config }
            | Step::BackupStarted { config }
            | Step::BackupDestFound { config, .. }
            | Step::BackupDestNotFound { config, .. }
            | Step::BackupZipRunning { config, .. }
            | Step::BackupDone { config, .. } => Some(config),
            _ => None,
        }
    }

    /// Resolved destination directory, once one was found.
    pub fn destination(&self) -> Option<&Path> {
        match &self.step {
            Step::BackupDestFound { destination, .. }
            | Step::BackupZipRunning { destination, .. }
            | Step::BackupDone { destination, .. } => Some(destination),
            _ => None,
        }
    }

    /// Archive written by a successful run.
    pub fn archive(&self) -> Option<&Path> {
        match &self.step {
            Step::BackupDone { archive, .. } => Some(archive),
            _ => None,
        }
    }

    /// Message of the component that failed, in the failure phases.
    pub fn failure(&self) -> Option<&str> {
        match &self.step {
            Step::NotConfigured { message }
            | Step::BackupDestNotFound { message, .. }
            | Step::Fail { message } => Some(message),
            _ => None,
        }
    }

    /// Ticket of the task whose result this state is waiting for.
    pub fn pending(&self) -> Option<TaskId> {
        self.pending
    }

    pub fn is_pending(&self, task: TaskId) -> bool {
        self.pending == Some(task)
    }

    pub fn view(&self) -> AppViewModel {
        let phase = self.phase();
        AppViewModel {
            phase,
            source: self.config().map(|c| c.source().to_path_buf()),
            candidates: self
                .config()
                .map(|c| c.destinations().to_vec())
                .unwrap_or_default(),
            destination: self.destination().map(Path::to_path_buf),
            archive: self.archive().map(Path::to_path_buf),
            failure: self.failure().map(ToOwned::to_owned),
            busy: self.pending.is_some(),
            actions: phase.actions().to_vec(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Successor state settled in `step`, with no task outstanding.
    pub(crate) fn settle(self, step: Step) -> Self {
        Self {
            step,
            pending: None,
            next_task: self.next_task,
            dirty: true,
        }
    }

    /// Successor state in `step` that waits for a newly issued task.
    pub(crate) fn await_task(self, step: Step) -> (Self, TaskId) {
        let task = self.next_task;
        let next = Self {
            step,
            pending: Some(task),
            next_task: task + 1,
            dirty: true,
        };
        (next, task)
    }

    /// Fresh `Start` state. Only the ticket counter survives, so results of
    /// tasks issued before the restart can never match.
    pub(crate) fn restarted(self) -> (Self, TaskId) {
        let fresh = Self {
            next_task: self.next_task,
            ..Self::default()
        };
        fresh.await_task(Step::Start)
    }
}
