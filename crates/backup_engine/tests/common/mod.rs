#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

use backup_core::Config;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

/// Writes `text` as the configuration file inside `dir`.
pub fn write_config(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("backup7.configuration");
    fs::write(&path, text).unwrap();
    path
}

/// Shell script standing in for 7z: records its arguments one per line in
/// `args.txt` next to itself, creates the target on success, exits with `code`.
#[cfg(unix)]
pub fn fake_archiver(dir: &Path, code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake7z.sh");
    let args = dir.join("args.txt");
    let script = format!(
        "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\nif [ {code} -eq 0 ]; then printf archive > \"$2\"; fi\nexit {code}\n",
        args.display()
    );
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Arguments recorded by the last [`fake_archiver`] run in `dir`.
pub fn recorded_args(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("args.txt"))
        .unwrap()
        .lines()
        .map(ToOwned::to_owned)
        .collect()
}

pub fn config_for(source: &Path, archiver: &Path, destinations: Vec<PathBuf>) -> Config {
    Config::new(source.to_path_buf(), "pa55", archiver.to_path_buf(), destinations)
}
