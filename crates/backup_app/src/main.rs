use std::process;

use backup_app::platform::{cli::Args, run_app};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if !engine_logging::initialize(&args.log_settings()) {
        eprintln!("logging could not be initialized, continuing without it");
    }
    let code = run_app(&args)?;
    process::exit(code);
}
