//! Backup engine: blocking IO behind the core state machine.
mod archive;
mod config;
mod destination;
pub mod task;

pub use archive::{archive_file_name, ArchiveCommand, ArchiveError, ArchiveRunner, ARCHIVE_EXTENSION};
pub use config::{default_config_path, parse_config, ConfigError, ConfigLoader, CONFIG_FILE_NAME};
pub use destination::{resolve_destination, DestinationError};
pub use task::{Poster, TaskError, TaskInbox, TaskRunner};
