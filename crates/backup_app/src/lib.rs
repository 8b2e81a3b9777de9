//! Backup7 front end: the interaction loop around the core state machine.
pub mod platform;

pub use platform::controller::Controller;
pub use platform::effects::EffectRunner;
