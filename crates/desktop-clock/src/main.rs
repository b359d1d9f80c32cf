// Release builds are GUI-subsystem so no console window flashes up.
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use std::process::ExitCode;

use clap::Parser;

use desktop_clock_core::{AppError, Config, log_error};

#[derive(Parser)]
#[command(
    name = "desktop-clock",
    version,
    about = "A borderless, always-on-top desktop clock"
)]
struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();

    let config = desktop_clock_core::config::load();
    desktop_clock_core::log::init(&config.logging);

    match run(&config) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            log_error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(windows)]
fn run(config: &Config) -> Result<i32, AppError> {
    desktop_clock_windows::run(config)
}

#[cfg(not(windows))]
fn run(_config: &Config) -> Result<i32, AppError> {
    Err(AppError::Unsupported)
}
