mod common;

use std::path::PathBuf;

use backup_core::{init, update, Effect, Msg, Phase};
use common::{backup_started, init_logging, sample_config, task_of, zip_running};

#[test]
fn each_automatic_step_issues_exactly_one_task() {
    init_logging();
    let (state, effects) = init();
    assert_eq!(effects.len(), 1);

    // Unrelated input while loading must not re-issue the load.
    let (state, effects) = update(state, Msg::ConfirmClicked);
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::NoOp);
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Start);
    assert_eq!(state.pending(), Some(1));
}

#[test]
fn noop_while_archiving_changes_nothing() {
    init_logging();
    let (state, task) = zip_running();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(next, state);
    assert!(effects.is_empty());
    assert_eq!(next.pending(), Some(task));
}

#[test]
fn tickets_increase_across_steps() {
    init_logging();
    let (state, effects) = init();
    let first = task_of(&effects);
    let (state, _) = update(
        state,
        Msg::ConfigLoaded {
            task: first,
            result: Ok(sample_config()),
        },
    );
    let (_state, effects) = update(state, Msg::ConfirmClicked);
    let second = task_of(&effects);

    assert!(second > first);
}

#[test]
fn result_with_unknown_ticket_is_ignored() {
    init_logging();
    let (state, task) = backup_started();
    let (next, effects) = update(
        state.clone(),
        Msg::DestinationResolved {
            task: task + 10,
            result: Ok(PathBuf::from("/mnt/usb")),
        },
    );

    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn result_for_another_step_is_ignored() {
    init_logging();
    let (state, task) = backup_started();
    let (next, _) = update(
        state.clone(),
        Msg::ArchiveFinished {
            task,
            result: Ok(PathBuf::from("/mnt/usb/backup.7z")),
        },
    );

    assert_eq!(next, state);
}

#[test]
fn result_arriving_after_help_is_dropped() {
    init_logging();
    let (state, task) = zip_running();
    let (help, _) = update(state, Msg::HelpClicked);
    let (next, effects) = update(
        help.clone(),
        Msg::ArchiveFinished {
            task,
            result: Ok(PathBuf::from("/mnt/nas/backup.7z")),
        },
    );

    assert_eq!(next, help);
    assert_eq!(next.phase(), Phase::HelpInfo);
    assert!(effects.is_empty());
}

#[test]
fn load_from_before_restart_cannot_complete_new_start() {
    init_logging();
    let (state, effects) = init();
    let old_task = task_of(&effects);
    let (help, _) = update(state, Msg::HelpClicked);
    let (restarted, effects) = update(help, Msg::RestartClicked);
    let new_task = task_of(&effects);
    assert_ne!(old_task, new_task);

    let (next, _) = update(
        restarted.clone(),
        Msg::ConfigLoaded {
            task: old_task,
            result: Err("stale".to_string()),
        },
    );
    assert_eq!(next, restarted);

    let (next, _) = update(
        restarted,
        Msg::ConfigLoaded {
            task: new_task,
            result: Ok(sample_config()),
        },
    );
    assert_eq!(next.phase(), Phase::Configured);
}

#[test]
fn run_archive_carries_config_and_destination() {
    init_logging();
    let (_state, task) = zip_running();
    let (state, effects) = {
        let (state, _) = common::backup_started();
        let (state, _) = update(
            state,
            Msg::DestinationResolved {
                task: 2,
                result: Ok(PathBuf::from("/mnt/usb")),
            },
        );
        update(state, Msg::ConfirmClicked)
    };

    assert_eq!(task, 3);
    assert_eq!(state.phase(), Phase::BackupZipRunning);
    match &effects[..] {
        [Effect::RunArchive {
            config,
            destination,
            ..
        }] => {
            assert_eq!(config.password(), "secret");
            assert_eq!(destination, &PathBuf::from("/mnt/usb"));
        }
        other => panic!("unexpected effects: {other:?}"),
    }
}
