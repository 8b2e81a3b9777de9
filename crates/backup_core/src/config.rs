use std::path::{Path, PathBuf};

/// Validated backup configuration.
///
/// Built once per run by the loader in `backup_engine`; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    source: PathBuf,
    password: String,
    archiver: PathBuf,
    destinations: Vec<PathBuf>,
}

impl Config {
    /// Assemble a configuration from already validated parts.
    pub fn new(
        source: PathBuf,
        password: impl Into<String>,
        archiver: PathBuf,
        destinations: Vec<PathBuf>,
    ) -> Self {
        Self {
            source,
            password: password.into(),
            archiver,
            destinations,
        }
    }

    /// Directory whose content is archived.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Archiver executable (`path7zip`).
    pub fn archiver(&self) -> &Path {
        &self.archiver
    }

    /// Candidate destinations in fallback priority order.
    pub fn destinations(&self) -> &[PathBuf] {
        &self.destinations
    }
}
