use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use backup_engine::ConfigLoader;
use engine_logging::{engine_info, engine_warn};

use super::cli::Args;
use super::controller::Controller;
use super::{input, render};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Runs the interactive workflow until the user leaves. Returns the exit code.
pub fn run_app(args: &Args) -> anyhow::Result<i32> {
    let config_path = args.config_path();
    engine_info!("backup7 starting, configuration {:?}", config_path);

    let mut controller = Controller::start(ConfigLoader::new(config_path.clone()))
        .context("failed to start the worker runtime")?;
    input::spawn_reader(controller.poster()).context("failed to start the input reader")?;

    let mut stdout = io::stdout().lock();
    let code = loop {
        if controller.consume_dirty() {
            draw(&mut stdout, &controller, &config_path)?;
        }
        if let Some(code) = controller.exit_code() {
            break code;
        }
        if !controller.step() {
            engine_warn!("message channel closed");
            break 0;
        }
    };

    controller.shutdown(SHUTDOWN_GRACE);
    engine_info!("backup7 exiting with {}", code);
    Ok(code)
}

fn draw(out: &mut impl Write, controller: &Controller, config_path: &Path) -> io::Result<()> {
    writeln!(out)?;
    for line in render::lines(&controller.view(), config_path) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
