pub mod app;
pub mod cli;
pub mod controller;
pub mod effects;
pub mod input;
pub mod render;

pub use app::run_app;
