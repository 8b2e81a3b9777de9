use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use backup_core::Config;
use engine_logging::{engine_debug, engine_info, engine_warn};
use thiserror::Error;

/// File name of the configuration inside the user's home directory.
pub const CONFIG_FILE_NAME: &str = "backup7.configuration";

const KEY_SOURCE: &str = "source";
const KEY_PASSWORD: &str = "password";
const KEY_ARCHIVER: &str = "path7zip";
const KEY_LOCATIONS: &str = "locations";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No Configuration file found: {}", .0.display())]
    Missing(PathBuf),
    #[error("Wrong line in configuration file {}: '{line}'", .path.display())]
    MalformedLine { path: PathBuf, line: String },
    #[error("No configuration for {key} found in configuration file {}", .path.display())]
    MissingKey { path: PathBuf, key: &'static str },
    #[error(
        "Wrong source in configuration file {}. File {} is not a directory",
        .path.display(),
        .source_dir.display()
    )]
    InvalidSource { path: PathBuf, source_dir: PathBuf },
    #[error(
        "Wrong path7zip in configuration file {}. File {} doesn't exist",
        .path.display(),
        .archiver.display()
    )]
    MissingArchiver { path: PathBuf, archiver: PathBuf },
    #[error("Empty password in configuration file {}", .0.display())]
    EmptyPassword(PathBuf),
    #[error("No backup location in locations of configuration file {}", .0.display())]
    NoLocations(PathBuf),
    #[error("Cannot read configuration file {}: {cause}", .path.display())]
    Io { path: PathBuf, cause: io::Error },
}

/// Default location of the configuration file: `<home>/backup7.configuration`.
///
/// Falls back to the current directory when no home directory is known.
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_FILE_NAME)
}

/// Loads and validates the `key=value` configuration file.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(default_config_path())
    }
}

impl ConfigLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::Missing(self.path.clone()));
            }
            Err(cause) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    cause,
                })
            }
        };
        engine_debug!("read configuration from {:?}", self.path);
        let config = parse_config(&self.path, &text)
            .inspect_err(|err| engine_warn!("configuration rejected: {}", err))?;
        engine_info!(
            "configuration loaded: source={:?}, archiver={:?}, {} destination(s)",
            config.source(),
            config.archiver(),
            config.destinations().len()
        );
        Ok(config)
    }
}

/// Parses and validates configuration text read from `path`.
///
/// Source and archiver are checked against the filesystem; destinations are
/// only split, their existence is checked when a backup starts.
pub fn parse_config(path: &Path, text: &str) -> Result<Config, ConfigError> {
    let entries = parse_entries(path, text)?;
    let required = |key: &'static str| {
        entries
            .get(key)
            .copied()
            .ok_or_else(|| ConfigError::MissingKey {
                path: path.to_path_buf(),
                key,
            })
    };

    let source = PathBuf::from(required(KEY_SOURCE)?);
    if !source.is_dir() {
        return Err(ConfigError::InvalidSource {
            path: path.to_path_buf(),
            source_dir: source,
        });
    }

    let password = required(KEY_PASSWORD)?;
    if password.is_empty() {
        return Err(ConfigError::EmptyPassword(path.to_path_buf()));
    }

    let archiver = PathBuf::from(required(KEY_ARCHIVER)?);
    if !archiver.exists() {
        return Err(ConfigError::MissingArchiver {
            path: path.to_path_buf(),
            archiver,
        });
    }

    let destinations = split_locations(required(KEY_LOCATIONS)?);
    if destinations.is_empty() {
        return Err(ConfigError::NoLocations(path.to_path_buf()));
    }

    Ok(Config::new(source, password, archiver, destinations))
}

/// Splits non-empty lines into `key=value` pairs; later duplicates win.
fn parse_entries<'a>(path: &Path, text: &'a str) -> Result<HashMap<&'a str, &'a str>, ConfigError> {
    let mut entries = HashMap::new();
    for line in text.lines().filter(|line| !line.is_empty()) {
        match line.find('=') {
            Some(pos) if line[..pos].chars().count() >= 2 => {
                entries.insert(&line[..pos], &line[pos + 1..]);
            }
            _ => {
                return Err(ConfigError::MalformedLine {
                    path: path.to_path_buf(),
                    line: line.to_string(),
                })
            }
        }
    }
    Ok(entries)
}

fn split_locations(raw: &str) -> Vec<PathBuf> {
    raw.split(';')
        .filter(|segment| !segment.is_empty())
        .map(PathBuf::from)
        .collect()
}
