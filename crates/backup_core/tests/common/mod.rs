#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Once;

use backup_core::{init, update, AppState, Config, Effect, Msg, TaskId};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

pub fn sample_config() -> Config {
    Config::new(
        PathBuf::from("/data/source"),
        "secret",
        PathBuf::from("/opt/7z/7z"),
        vec![PathBuf::from("/mnt/usb"), PathBuf::from("/mnt/nas")],
    )
}

pub fn task_of(effects: &[Effect]) -> TaskId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::LoadConfig { task }
            | Effect::ResolveDestination { task, .. }
            | Effect::RunArchive { task, .. } => Some(*task),
            Effect::Exit { .. } => None,
        })
        .expect("task effect")
}

/// Drives the machine from `init` to `Configured`.
pub fn configured() -> AppState {
    let (state, effects) = init();
    let task = task_of(&effects);
    let (state, _) = update(
        state,
        Msg::ConfigLoaded {
            task,
            result: Ok(sample_config()),
        },
    );
    state
}

/// Drives the machine to `BackupStarted`, returning the pending ticket.
pub fn backup_started() -> (AppState, TaskId) {
    let (state, effects) = update(configured(), Msg::ConfirmClicked);
    let task = task_of(&effects);
    (state, task)
}

/// Drives the machine to `BackupDestFound` with `/mnt/nas` as destination.
pub fn destination_found() -> AppState {
    let (state, task) = backup_started();
    let (state, _) = update(
        state,
        Msg::DestinationResolved {
            task,
            result: Ok(PathBuf::from("/mnt/nas")),
        },
    );
    state
}

/// Drives the machine to `BackupZipRunning`, returning the pending ticket.
pub fn zip_running() -> (AppState, TaskId) {
    let (state, effects) = update(destination_found(), Msg::ConfirmClicked);
    let task = task_of(&effects);
    (state, task)
}
