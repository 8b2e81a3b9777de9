use std::path::PathBuf;

use crate::Phase;

/// Inputs the presentation layer can send, independent of how they are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// Start the next step (load -> search, search -> archive).
    Confirm,
    /// Leave without running a backup.
    Defer,
    /// Run the whole pipeline again after a failure.
    Retry,
    /// Discard everything and go back to loading the configuration.
    Restart,
    Help,
    /// Exit the process with status 0.
    Terminate,
}

impl UserAction {
    /// Message sent to [`crate::update`] when the user picks this action.
    pub fn msg(self) -> crate::Msg {
        match self {
            UserAction::Confirm => crate::Msg::ConfirmClicked,
            UserAction::Defer => crate::Msg::DeferClicked,
            UserAction::Retry => crate::Msg::RetryClicked,
            UserAction::Restart => crate::Msg::RestartClicked,
            UserAction::Help => crate::Msg::HelpClicked,
            UserAction::Terminate => crate::Msg::TerminateClicked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub source: Option<PathBuf>,
    pub candidates: Vec<PathBuf>,
    pub destination: Option<PathBuf>,
    pub archive: Option<PathBuf>,
    /// Literal message of the failing component.
    pub failure: Option<String>,
    /// A task result is outstanding.
    pub busy: bool,
    pub actions: Vec<UserAction>,
    pub dirty: bool,
}
