//! Startup, message loop and shutdown of the clock.

use desktop_clock_core::{AppError, Config, TICK_INTERVAL, Ticker, log_error, log_info};

use crate::dpi;
use crate::message_pump::run_message_pump;
use crate::renderer::Renderer;
use crate::window::{self, ClockWindow, Controller};

/// Runs the clock until its window is closed.
///
/// Creates the window and renderer, starts the ticker, shows the window
/// and pumps messages. Returns the exit code carried by `WM_QUIT`. Fails
/// only during startup; paint-time errors are logged and survived.
pub fn run(config: &Config) -> Result<i32, AppError> {
    dpi::enable_dpi_awareness();

    let clock_window =
        ClockWindow::create(&config.window).map_err(|e| AppError::Window(e.to_string()))?;

    let renderer = match Renderer::new(clock_window.hwnd(), &config.text, config.colors.palette())
    {
        Ok(renderer) => renderer,
        Err(e) => {
            log_error!("startup aborted: {e}");
            return Err(e.into());
        }
    };
    window::install(Controller::new(renderer, &config.window));

    let ticker = Ticker::spawn(TICK_INTERVAL, clock_window.redraw_handle());
    clock_window.show(config.window.start_maximized);
    log_info!("clock started");

    let exit_code = run_message_pump();

    ticker.stop();
    log_info!("clock stopped (exit code {exit_code})");
    Ok(exit_code)
}
