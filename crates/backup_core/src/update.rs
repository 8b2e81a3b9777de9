use std::path::PathBuf;

use engine_logging::{engine_debug, engine_info};

use crate::state::Step;
use crate::{AppState, Config, Effect, Msg, Phase, TaskId, UserAction};

/// Initial state plus the configuration load it requires.
pub fn init() -> (AppState, Vec<Effect>) {
    let (state, task) = AppState::new().restarted();
    (state, vec![Effect::LoadConfig { task }])
}

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not apply to the current phase, and task results whose
/// ticket is not the pending one, leave the state untouched.
pub fn update(state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let before = state.phase();
    let (next, effects) = match msg {
        Msg::ConfigLoaded { task, result } => config_loaded(state, task, result),
        Msg::DestinationResolved { task, result } => destination_resolved(state, task, result),
        Msg::ArchiveFinished { task, result } => archive_finished(state, task, result),
        Msg::ConfirmClicked => confirm(state),
        Msg::DeferClicked if before == Phase::Configured => (state, vec![Effect::Exit { code: 0 }]),
        Msg::TerminateClicked => (state, vec![Effect::Exit { code: 0 }]),
        Msg::HelpClicked if before.allows(UserAction::Help) => {
            (state.settle(Step::HelpInfo), Vec::new())
        }
        Msg::RetryClicked | Msg::RestartClicked
            if before.allows(UserAction::Retry) || before.allows(UserAction::Restart) =>
        {
            let (state, task) = state.restarted();
            (state, vec![Effect::LoadConfig { task }])
        }
        Msg::DeferClicked | Msg::HelpClicked | Msg::RetryClicked | Msg::RestartClicked => {
            (state, Vec::new())
        }
        Msg::NoOp => (state, Vec::new()),
    };

    if next.phase() != before {
        engine_debug!("transition {:?} -> {:?}", before, next.phase());
    }
    (next, effects)
}

fn config_loaded(
    state: AppState,
    task: TaskId,
    result: Result<Config, String>,
) -> (AppState, Vec<Effect>) {
    if !state.is_pending(task) || state.phase() != Phase::Start {
        return stale(state, "ConfigLoaded", task);
    }
    let next = match result {
        Ok(config) => state.settle(Step::Configured { config }),
        Err(message) => {
            engine_info!("configuration rejected (task {})", task);
            state.settle(Step::NotConfigured { message })
        }
    };
    (next, Vec::new())
}

fn destination_resolved(
    state: AppState,
    task: TaskId,
    result: Result<PathBuf, String>,
) -> (AppState, Vec<Effect>) {
    if !state.is_pending(task) {
        return stale(state, "DestinationResolved", task);
    }
    let config = match &state.step {
        Step::BackupStarted { config } => config.clone(),
        _ => return stale(state, "DestinationResolved", task),
    };
    let next = match result {
        Ok(destination) => state.settle(Step::BackupDestFound {
            config,
            destination,
        }),
        Err(message) => {
            engine_info!("no destination available (task {})", task);
            state.settle(Step::BackupDestNotFound { config, message })
        }
    };
    (next, Vec::new())
}

fn archive_finished(
    state: AppState,
    task: TaskId,
    result: Result<PathBuf, String>,
) -> (AppState, Vec<Effect>) {
    if !state.is_pending(task) {
        return stale(state, "ArchiveFinished", task);
    }
    let (config, destination) = match &state.step {
        Step::BackupZipRunning {
            config,
            destination,
        } => (config.clone(), destination.clone()),
        _ => return stale(state, "ArchiveFinished", task),
    };
    let next = match result {
        Ok(archive) => state.settle(Step::BackupDone {
            config,
            destination,
            archive,
        }),
        Err(message) => {
            engine_info!("backup failed (task {})", task);
            state.settle(Step::Fail { message })
        }
    };
    (next, Vec::new())
}

fn confirm(state: AppState) -> (AppState, Vec<Effect>) {
    match &state.step {
        Step::Configured { config } => {
            let config = config.clone();
            let candidates = config.destinations().to_vec();
            let (state, task) = state.await_task(Step::BackupStarted { config });
            (state, vec![Effect::ResolveDestination { task, candidates }])
        }
        Step::BackupDestFound {
            config,
            destination,
        } => {
            let config = config.clone();
            let destination = destination.clone();
            let (state, task) = state.await_task(Step::BackupZipRunning {
                config: config.clone(),
                destination: destination.clone(),
            });
            (
                state,
                vec![Effect::RunArchive {
                    task,
                    config,
                    destination,
                }],
            )
        }
        _ => (state, Vec::new()),
    }
}

fn stale(state: AppState, what: &str, task: TaskId) -> (AppState, Vec<Effect>) {
    engine_debug!(
        "ignoring {} for task {} (pending {:?}, phase {:?})",
        what,
        task,
        state.pending(),
        state.phase()
    );
    (state, Vec::new())
}
