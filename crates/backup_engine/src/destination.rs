use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine_logging::{engine_debug, engine_info, engine_warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DestinationError {
    #[error("No backup location found (configured: {})", join_paths(.candidates))]
    NoneAvailable { candidates: Vec<PathBuf> },
}

/// Returns the first candidate that exists and is a directory.
///
/// The filesystem is checked on every call; removable drives come and go.
/// A candidate that cannot be inspected counts as unavailable.
pub fn resolve_destination(candidates: &[PathBuf]) -> Result<PathBuf, DestinationError> {
    for candidate in candidates {
        if is_usable(candidate) {
            engine_info!("backup destination found: {:?}", candidate);
            return Ok(candidate.clone());
        }
        engine_debug!("backup destination not available: {:?}", candidate);
    }
    Err(DestinationError::NoneAvailable {
        candidates: candidates.to_vec(),
    })
}

fn is_usable(candidate: &Path) -> bool {
    match fs::metadata(candidate) {
        Ok(meta) => meta.is_dir(),
        Err(err)
            if matches!(
                err.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
            ) =>
        {
            false
        }
        Err(err) => {
            engine_warn!("cannot inspect backup location {:?}: {}", candidate, err);
            false
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
