use std::path::PathBuf;

use crate::{Config, TaskId};

/// Work requested by [`crate::update`]; executed outside the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadConfig {
        task: TaskId,
    },
    ResolveDestination {
        task: TaskId,
        candidates: Vec<PathBuf>,
    },
    RunArchive {
        task: TaskId,
        config: Config,
        destination: PathBuf,
    },
    Exit {
        code: i32,
    },
}
