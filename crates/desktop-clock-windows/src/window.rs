//! The clock window and its window procedure.
//!
//! The window is a captionless `WS_POPUP`. Dragging is emulated through
//! `WM_NCHITTEST`, and double-clicks toggle maximize/restore. All state
//! the procedure needs lives in a UI-thread [`Controller`].

use std::cell::RefCell;
use std::ffi::c_void;
use std::sync::Once;

use desktop_clock_core::chrome::{self, resolve_hit_test, scale_for_dpi};
use desktop_clock_core::config::WindowConfig;
use desktop_clock_core::{
    Chrome, HitTest, RedrawTarget, ShowCommand, SizeReason, log_error, log_info, log_warn,
};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{InvalidateRect, ScreenToClient, UpdateWindow, ValidateRect};
use windows::Win32::UI::Input::KeyboardAndMouse::ReleaseCapture;
use windows::Win32::UI::WindowsAndMessaging::{
    CS_DBLCLKS, CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, CreateWindowExW, DefWindowProcW,
    DestroyWindow, IDC_SIZEALL, LoadCursorW, PostQuitMessage, RegisterClassW, SW_MAXIMIZE,
    SW_RESTORE, SW_SHOWMAXIMIZED, SW_SHOWNORMAL, SWP_NOACTIVATE, SWP_NOZORDER, SendMessageW,
    SetWindowPos, ShowWindow, WINDOW_EX_STYLE, WM_DESTROY, WM_DPICHANGED, WM_ERASEBKGND,
    WM_LBUTTONDBLCLK, WM_LBUTTONDOWN, WM_NCHITTEST, WM_NCLBUTTONDBLCLK, WM_NCLBUTTONDOWN,
    WM_PAINT, WM_SIZE, WNDCLASSW, WS_EX_TOPMOST, WS_POPUP,
};
use windows::core::{PCWSTR, w};

use crate::clock::SystemClock;
use crate::renderer::{Renderer, client_pixels};

const CLASS_NAME: PCWSTR = w!("DesktopClock");
const WINDOW_TITLE: PCWSTR = w!("Desktop Clock");

static REGISTER_CLASS: Once = Once::new();

// Controller for the clock window, owned by the UI thread.
thread_local! {
    static CONTROLLER: RefCell<Option<Controller>> = const { RefCell::new(None) };
}

/// Per-window state driven by the window procedure.
pub(crate) struct Controller {
    renderer: Renderer,
    chrome: Chrome,
    clock: SystemClock,
    /// Drag strip height in DIPs.
    drag_strip: i32,
}

impl Controller {
    pub(crate) fn new(renderer: Renderer, config: &WindowConfig) -> Self {
        Self {
            renderer,
            chrome: Chrome::new(config.start_maximized),
            clock: SystemClock,
            drag_strip: config.drag_strip,
        }
    }

    fn drag_strip_px(&self) -> i32 {
        scale_for_dpi(self.drag_strip, self.renderer.dpi())
    }
}

/// Installs the controller for the current thread's clock window.
pub(crate) fn install(controller: Controller) {
    CONTROLLER.with(|cell| {
        *cell.borrow_mut() = Some(controller);
    });
}

/// Runs `f` against the controller, if one is installed and not already
/// borrowed further up the stack.
///
/// Win32 re-enters the window procedure from calls like `ShowWindow`,
/// so callers must not issue such calls from inside `f`.
fn with_controller<R>(f: impl FnOnce(&mut Controller) -> R) -> Option<R> {
    CONTROLLER.with(|cell| {
        let mut guard = cell.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    })
}

/// A `Send` handle that lets other threads request a repaint.
#[derive(Debug, Clone, Copy)]
pub struct RedrawHandle(isize);

impl RedrawTarget for RedrawHandle {
    fn request_redraw(&self) {
        // SAFETY: InvalidateRect may be called from any thread. A stale
        // handle makes the call fail, which is harmless.
        unsafe {
            let _ = InvalidateRect(Some(HWND(self.0 as *mut c_void)), None, false);
        }
    }
}

/// The top-level clock window.
pub struct ClockWindow {
    hwnd: HWND,
}

fn ensure_class_registered() {
    REGISTER_CLASS.call_once(|| {
        let cursor = unsafe { LoadCursorW(None, IDC_SIZEALL) }.unwrap_or_default();
        let wc = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW | CS_DBLCLKS,
            lpfnWndProc: Some(clock_wnd_proc),
            hCursor: cursor,
            lpszClassName: CLASS_NAME,
            ..Default::default()
        };
        unsafe {
            RegisterClassW(&wc);
        }
    });
}

impl ClockWindow {
    /// Creates the hidden clock window at its restored size.
    pub fn create(config: &WindowConfig) -> windows::core::Result<Self> {
        ensure_class_registered();

        let ex = if config.topmost {
            WS_EX_TOPMOST
        } else {
            WINDOW_EX_STYLE::default()
        };
        let hwnd = unsafe {
            CreateWindowExW(
                ex,
                CLASS_NAME,
                WINDOW_TITLE,
                WS_POPUP,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                config.width,
                config.height,
                None,
                None,
                None,
                None,
            )?
        };

        Ok(Self { hwnd })
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    pub fn redraw_handle(&self) -> RedrawHandle {
        RedrawHandle(self.hwnd.0 as isize)
    }

    /// Shows the window and paints it immediately.
    pub fn show(&self, maximized: bool) {
        let cmd = if maximized {
            SW_SHOWMAXIMIZED
        } else {
            SW_SHOWNORMAL
        };
        unsafe {
            let _ = ShowWindow(self.hwnd, cmd);
            let _ = UpdateWindow(self.hwnd);
        }
    }
}

impl Drop for ClockWindow {
    fn drop(&mut self) {
        // Already gone after a normal shutdown; the call then just fails.
        unsafe {
            let _ = DestroyWindow(self.hwnd);
        }
    }
}

unsafe extern "system" fn clock_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_PAINT => {
            on_paint(hwnd);
            LRESULT(0)
        }
        // Direct2D repaints the whole client area.
        WM_ERASEBKGND => LRESULT(1),
        WM_SIZE => {
            on_size(hwnd, SizeReason::from_raw(wparam.0));
            LRESULT(0)
        }
        WM_LBUTTONDOWN => {
            on_button_down(hwnd, lparam);
            LRESULT(0)
        }
        WM_LBUTTONDBLCLK => {
            toggle_maximized(hwnd);
            LRESULT(0)
        }
        WM_NCLBUTTONDBLCLK if wparam.0 as isize == HitTest::CAPTION_CODE => {
            toggle_maximized(hwnd);
            LRESULT(0)
        }
        WM_NCHITTEST => on_hit_test(hwnd, wparam, lparam),
        WM_DPICHANGED => {
            on_dpi_changed(hwnd, wparam, lparam);
            LRESULT(0)
        }
        WM_DESTROY => {
            on_destroy();
            LRESULT(0)
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

fn on_paint(hwnd: HWND) {
    let result = with_controller(|c| c.renderer.render(&c.clock));
    match result {
        Some(Err(e)) if e.is_recoverable() => log_warn!("frame skipped: {e}"),
        Some(Err(e)) => log_error!("frame skipped: {e}"),
        _ => {}
    }
    // Always mark the paint handled so WM_PAINT is not redelivered.
    unsafe {
        let _ = ValidateRect(Some(hwnd), None);
    }
}

fn on_size(hwnd: HWND, reason: SizeReason) {
    let (width, height) = client_pixels(hwnd);
    let result = with_controller(|c| {
        let before = c.chrome.state();
        c.chrome.on_resize(reason);
        if c.chrome.state() != before {
            log_info!("window {:?}", c.chrome.state());
        }
        c.renderer.resize(width, height)
    });
    if let Some(Err(e)) = result {
        log_warn!("resize to {width}x{height} failed: {e}");
    }
}

/// Starts an OS move-drag when the press lands in the drag strip.
/// Starts a move for a client press inside the drag strip.
///
/// The strip is normally reported as caption by `on_hit_test`, so presses
/// there never reach this handler. While the pointer is captured no hit
/// test is sent and the press arrives here instead. Presses below the strip
/// are ignored.
fn on_button_down(hwnd: HWND, lparam: LPARAM) {
    let strip = with_controller(|c| c.drag_strip_px()).unwrap_or(chrome::DEFAULT_DRAG_STRIP);
    let (_, y) = point_from_lparam(lparam);
    if resolve_hit_test(HitTest::Client, y, strip) != HitTest::Caption {
        return;
    }
    // The move loop is modal and dispatches messages back into this
    // procedure, so no controller borrow may be held here.
    unsafe {
        let _ = ReleaseCapture();
        SendMessageW(
            hwnd,
            WM_NCLBUTTONDOWN,
            Some(WPARAM(HitTest::Caption.code() as usize)),
            None,
        );
    }
}

fn toggle_maximized(hwnd: HWND) {
    let Some(command) = with_controller(|c| c.chrome.toggle()) else {
        return;
    };
    log_info!("double-click: {command:?}");
    let cmd = match command {
        ShowCommand::Maximize => SW_MAXIMIZE,
        ShowCommand::Restore => SW_RESTORE,
    };
    unsafe {
        let _ = ShowWindow(hwnd, cmd);
    }
}

fn on_hit_test(hwnd: HWND, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let default = unsafe { DefWindowProcW(hwnd, WM_NCHITTEST, wparam, lparam) };
    let default = HitTest::from_code(default.0);
    if default != HitTest::Client {
        return LRESULT(default.code());
    }

    let (x, y) = point_from_lparam(lparam);
    let mut pt = POINT { x, y };
    unsafe {
        let _ = ScreenToClient(hwnd, &mut pt);
    }
    let strip = with_controller(|c| c.drag_strip_px()).unwrap_or(chrome::DEFAULT_DRAG_STRIP);
    LRESULT(resolve_hit_test(default, pt.y, strip).code())
}

fn on_dpi_changed(hwnd: HWND, wparam: WPARAM, lparam: LPARAM) {
    let dpi = ((wparam.0 >> 16) & 0xFFFF) as u32;
    with_controller(|c| c.renderer.set_dpi(dpi));
    log_info!("dpi changed to {dpi}");

    // SAFETY: for WM_DPICHANGED, lParam points to the suggested window
    // rectangle for the new DPI.
    let suggested = unsafe { *(lparam.0 as *const RECT) };
    unsafe {
        let _ = SetWindowPos(
            hwnd,
            None,
            suggested.left,
            suggested.top,
            suggested.right - suggested.left,
            suggested.bottom - suggested.top,
            SWP_NOZORDER | SWP_NOACTIVATE,
        );
    }
}

fn on_destroy() {
    let controller = CONTROLLER.with(|cell| cell.try_borrow_mut().ok().and_then(|mut c| c.take()));
    if let Some(mut controller) = controller {
        controller.renderer.shutdown();
    }
    log_info!("clock window destroyed");
    unsafe { PostQuitMessage(0) };
}

/// Unpacks signed x/y coordinates from a mouse message `LPARAM`.
fn point_from_lparam(lparam: LPARAM) -> (i32, i32) {
    let x = (lparam.0 & 0xFFFF) as u16 as i16 as i32;
    let y = ((lparam.0 >> 16) & 0xFFFF) as u16 as i16 as i32;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lparam_coordinates_are_sign_extended() {
        // Arrange: x = -5, y = 7 as packed by MAKELPARAM.
        let packed = ((7_isize & 0xFFFF) << 16) | (-5_isize & 0xFFFF);

        // Act
        let point = point_from_lparam(LPARAM(packed));

        // Assert
        assert_eq!(point, (-5, 7));
    }

    #[test]
    fn lparam_coordinates_positive() {
        let packed = (50_isize << 16) | 300;

        assert_eq!(point_from_lparam(LPARAM(packed)), (300, 50));
    }
}
