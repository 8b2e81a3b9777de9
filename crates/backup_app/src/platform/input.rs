use std::io::{self, BufRead};
use std::thread;

use backup_core::{Msg, UserAction};
use backup_engine::Poster;
use engine_logging::engine_debug;

/// Key the terminal shows for an action.
pub fn key(action: UserAction) -> char {
    match action {
        UserAction::Confirm => 'y',
        UserAction::Defer => 'n',
        UserAction::Retry | UserAction::Restart => 'r',
        UserAction::Help => 'h',
        UserAction::Terminate => 'q',
    }
}

/// Maps a typed line to an action. Matching is on the first non-blank
/// character, case-insensitive.
pub fn parse_action(line: &str) -> Option<UserAction> {
    let first = line.trim().chars().next()?.to_ascii_lowercase();
    match first {
        'y' => Some(UserAction::Confirm),
        'n' => Some(UserAction::Defer),
        'r' => Some(UserAction::Restart),
        'h' => Some(UserAction::Help),
        'q' => Some(UserAction::Terminate),
        _ => None,
    }
}

/// Reads stdin on its own thread and posts the chosen actions.
///
/// End of input counts as Terminate.
pub fn spawn_reader(poster: Poster<Msg>) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("backup-input".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                let msg = parse_action(&line).map_or(Msg::NoOp, UserAction::msg);
                engine_debug!("input {:?} -> {:?}", line, msg);
                if !poster.post(msg) {
                    return;
                }
            }
            poster.post(Msg::TerminateClicked);
        })
}
