use windows::Win32::Foundation::HWND;
use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, GetDpiForWindow, SetProcessDpiAwarenessContext,
};

/// DPI at which one DIP equals one physical pixel.
pub const BASE_DPI: u32 = 96;

/// Declares this process as per-monitor DPI aware (V2).
///
/// Without this, Windows bitmap-stretches the clock on high-DPI
/// monitors and the text turns blurry. With per-monitor awareness we
/// receive raw pixel sizes and scale the render target ourselves.
///
/// Must be called once at process startup, before creating any windows.
pub fn enable_dpi_awareness() {
    // SAFETY: SetProcessDpiAwarenessContext is safe to call once at startup.
    // If it fails (e.g. already set via manifest), we ignore the error.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
}

/// Returns the DPI of the monitor the window is on, or [`BASE_DPI`] if
/// the handle is invalid.
pub fn window_dpi(hwnd: HWND) -> u32 {
    match unsafe { GetDpiForWindow(hwnd) } {
        0 => BASE_DPI,
        dpi => dpi,
    }
}
