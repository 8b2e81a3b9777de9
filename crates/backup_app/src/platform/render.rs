use std::fmt::Write as _;
use std::path::Path;

use backup_core::{AppViewModel, Phase, UserAction};

use super::input::key;

const SAMPLE_CONFIG: &str = "\
password=JSa7az2y6qHG8XXvwac2
source=/srv/backupsource
path7zip=/usr/bin/7z
locations=/mnt/backup1;/mnt/backup2";

fn label(action: UserAction, phase: Phase) -> &'static str {
    match (action, phase) {
        (UserAction::Confirm, Phase::Configured) => "Yes!",
        (UserAction::Confirm, _) => "Start the backup",
        (UserAction::Defer, _) => "Not now, terminate",
        (UserAction::Retry, _) => "Retry",
        (UserAction::Restart, Phase::HelpInfo) => "Restart?",
        (UserAction::Restart, _) => "Restart",
        (UserAction::Help, _) => "Show help information",
        (UserAction::Terminate, _) => "Terminate",
    }
}

fn shown(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_default()
}

/// Text lines for the current screen. `config_path` is shown by the help screen.
pub fn lines(view: &AppViewModel, config_path: &Path) -> Vec<String> {
    let failure = view.failure.as_deref().unwrap_or_default();
    let mut out: Vec<String> = match view.phase {
        Phase::Start => vec!["Loading configuration...".to_string()],
        Phase::Configured => vec!["Start an Update?".to_string()],
        Phase::NotConfigured => vec![format!("Program is not configured: {failure}")],
        Phase::BackupStarted => {
            vec!["Searching the destinations to store the backup...".to_string()]
        }
        Phase::BackupDestFound => vec![format!(
            "Backup destination found: {}",
            shown(view.destination.as_deref())
        )],
        Phase::BackupDestNotFound => vec![format!("Backup cannot run: {failure}")],
        Phase::BackupZipRunning => vec![
            format!(
                "Backup from {} to {} starts.",
                shown(view.source.as_deref()),
                shown(view.destination.as_deref())
            ),
            "Files will be compressed and crypted with the password configured.".to_string(),
            "This will take some time...".to_string(),
        ],
        Phase::BackupDone => {
            let mut done = vec!["Your backup is successfully done".to_string()];
            if let Some(archive) = &view.archive {
                done.push(format!("  {}", archive.display()));
            }
            done
        }
        Phase::Fail => vec!["Backup failed:".to_string(), format!("  {failure}")],
        Phase::HelpInfo => help(config_path),
    };

    let mut actions = String::new();
    for action in &view.actions {
        if !actions.is_empty() {
            actions.push_str("   ");
        }
        let _ = write!(actions, "[{}] {}", key(*action), label(*action, view.phase));
    }
    if !actions.is_empty() {
        out.push(String::new());
        out.push(actions);
    }
    out
}

fn help(config_path: &Path) -> Vec<String> {
    let mut out = vec![
        "This program will copy a password protected 7zip file to a backup location \
         created from the content of a source directory"
            .to_string(),
        "You must configure this program by creating a file".to_string(),
        format!("  {}", config_path.display()),
        "This file must contain configurations similar to this:".to_string(),
    ];
    out.extend(SAMPLE_CONFIG.lines().map(|line| format!("  {line}")));
    out.push(
        "Note that the password, source and locations for backup must not contain spaces \
         or special chars"
            .to_string(),
    );
    out.push("Locations for backup may be multiple separated by ';'".to_string());
    out
}
