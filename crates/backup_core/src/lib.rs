//! Backup core: pure state machine and view-model helpers.
mod config;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use config::Config;
pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, Phase, TaskId};
pub use update::{init, update};
pub use view_model::{AppViewModel, UserAction};
