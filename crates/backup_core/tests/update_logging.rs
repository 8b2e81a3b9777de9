mod common;

use std::sync::Mutex;

use backup_core::{update, Msg, Phase};
use common::zip_running;
use log::{Log, Metadata, Record};

/// Keeps every formatted record so tests can inspect what reached the log.
struct Recorder {
    lines: Mutex<Vec<String>>,
}

impl Log for Recorder {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.lines.lock().unwrap().push(record.args().to_string());
    }

    fn flush(&self) {}
}

static RECORDER: Recorder = Recorder {
    lines: Mutex::new(Vec::new()),
};

fn install() {
    // Only one test in this binary, so the logger is set exactly once.
    log::set_logger(&RECORDER).unwrap();
    log::set_max_level(log::LevelFilter::Trace);
}

#[test]
fn archive_failure_keeps_password_out_of_the_log() {
    install();
    let (state, task) = zip_running();
    let message = "Failed creating the backup with RC=2. Try running the Command \
                   '\"/usr/bin/7z\" a /mnt/b.7z -pTOPSECRET -mhe=on /src' by hand."
        .to_string();

    let (state, _) = update(
        state,
        Msg::ArchiveFinished {
            task,
            result: Err(message.clone()),
        },
    );

    assert_eq!(state.phase(), Phase::Fail);
    assert_eq!(state.failure(), Some(message.as_str()));
    let lines = RECORDER.lines.lock().unwrap();
    assert!(!lines.is_empty());
    assert!(
        lines.iter().all(|line| !line.contains("TOPSECRET")),
        "{lines:?}"
    );
}
