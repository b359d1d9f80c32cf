//! Interaction model for the chrome-less clock window.
//!
//! The window has no caption or border, so dragging and the
//! maximize/restore toggle are emulated. The decisions live here as plain
//! types; the platform layer only translates messages in and commands out.

/// Default height of the draggable strip along the top edge, in DIPs.
pub const DEFAULT_DRAG_STRIP: i32 = 10;

/// Result of a non-client hit-test, reduced to what the clock cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTest {
    Client,
    Caption,
    /// Any other region code, passed through untouched.
    Other(isize),
}

impl HitTest {
    /// Win32 `HTCLIENT`.
    pub const CLIENT_CODE: isize = 1;
    /// Win32 `HTCAPTION`.
    pub const CAPTION_CODE: isize = 2;

    pub fn from_code(code: isize) -> Self {
        match code {
            Self::CLIENT_CODE => Self::Client,
            Self::CAPTION_CODE => Self::Caption,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> isize {
        match self {
            Self::Client => Self::CLIENT_CODE,
            Self::Caption => Self::CAPTION_CODE,
            Self::Other(code) => code,
        }
    }
}

/// Overrides the default hit-test so a thin strip at the top of the
/// client area behaves like a title bar.
///
/// `client_y` is the pointer's vertical position relative to the top of the
/// client area and `strip` the strip height in the same units. Only a
/// default result of [`HitTest::Client`] is ever changed.
pub fn resolve_hit_test(default: HitTest, client_y: i32, strip: i32) -> HitTest {
    match default {
        HitTest::Client if client_y < strip => HitTest::Caption,
        other => other,
    }
}

/// Scales a length in DIPs to physical pixels for the given DPI.
pub fn scale_for_dpi(dips: i32, dpi: u32) -> i32 {
    let dpi = if dpi == 0 { 96 } else { dpi };
    (i64::from(dips) * i64::from(dpi) / 96) as i32
}

/// Why the window was resized, mirroring the `WM_SIZE` request types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeReason {
    Restored,
    Minimized,
    Maximized,
    /// Another window was restored or maximized (`SIZE_MAXSHOW`/`SIZE_MAXHIDE`)
    /// or an unknown code.
    Other,
}

impl SizeReason {
    pub fn from_raw(code: usize) -> Self {
        match code {
            0 => Self::Restored,
            1 => Self::Minimized,
            2 => Self::Maximized,
            _ => Self::Other,
        }
    }
}

/// Show state of the clock window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowState {
    #[default]
    Maximized,
    Restored,
}

/// Show command the platform should issue after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowCommand {
    Maximize,
    Restore,
}

/// Tracks the maximized/restored state of the window.
///
/// Starts maximized since that is how the window is first shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chrome {
    state: ShowState,
}

impl Chrome {
    pub fn new(start_maximized: bool) -> Self {
        let state = if start_maximized {
            ShowState::Maximized
        } else {
            ShowState::Restored
        };
        Self { state }
    }

    pub fn state(&self) -> ShowState {
        self.state
    }

    /// Records the outcome of a resize. Only explicit maximize and restore
    /// change the tracked state.
    pub fn on_resize(&mut self, reason: SizeReason) {
        match reason {
            SizeReason::Maximized => self.state = ShowState::Maximized,
            SizeReason::Restored => self.state = ShowState::Restored,
            SizeReason::Minimized | SizeReason::Other => {}
        }
    }

    /// Flips the state for a double-click and returns the command that
    /// realises it.
    pub fn toggle(&mut self) -> ShowCommand {
        match self.state {
            ShowState::Maximized => {
                self.state = ShowState::Restored;
                ShowCommand::Restore
            }
            ShowState::Restored => {
                self.state = ShowState::Maximized;
                ShowCommand::Maximize
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_strip_becomes_caption() {
        assert_eq!(
            resolve_hit_test(HitTest::Client, 5, DEFAULT_DRAG_STRIP),
            HitTest::Caption
        );
        assert_eq!(
            resolve_hit_test(HitTest::Client, 0, DEFAULT_DRAG_STRIP),
            HitTest::Caption
        );
    }

    #[test]
    fn rest_of_client_is_unchanged() {
        assert_eq!(
            resolve_hit_test(HitTest::Client, 50, DEFAULT_DRAG_STRIP),
            HitTest::Client
        );
        assert_eq!(
            resolve_hit_test(HitTest::Client, DEFAULT_DRAG_STRIP, DEFAULT_DRAG_STRIP),
            HitTest::Client
        );
    }

    #[test]
    fn non_client_results_pass_through() {
        // HTTOPLEFT
        let corner = HitTest::from_code(13);

        assert_eq!(resolve_hit_test(corner, 2, DEFAULT_DRAG_STRIP), corner);
        assert_eq!(resolve_hit_test(corner, 2, DEFAULT_DRAG_STRIP).code(), 13);
    }

    #[test]
    fn hit_test_codes_round_trip() {
        assert_eq!(HitTest::from_code(1), HitTest::Client);
        assert_eq!(HitTest::from_code(2), HitTest::Caption);
        assert_eq!(HitTest::Caption.code(), 2);
    }

    #[test]
    fn strip_scales_with_dpi() {
        assert_eq!(scale_for_dpi(10, 96), 10);
        assert_eq!(scale_for_dpi(10, 144), 15);
        assert_eq!(scale_for_dpi(10, 192), 20);
        assert_eq!(scale_for_dpi(10, 0), 10);
    }

    #[test]
    fn starts_maximized() {
        assert_eq!(Chrome::default().state(), ShowState::Maximized);
        assert_eq!(Chrome::new(false).state(), ShowState::Restored);
    }

    #[test]
    fn double_click_toggles_once_per_click() {
        // Arrange
        let mut chrome = Chrome::new(true);

        // Act / Assert
        assert_eq!(chrome.toggle(), ShowCommand::Restore);
        assert_eq!(chrome.state(), ShowState::Restored);
        assert_eq!(chrome.toggle(), ShowCommand::Maximize);
        assert_eq!(chrome.state(), ShowState::Maximized);
    }

    #[test]
    fn resize_reason_updates_state() {
        let mut chrome = Chrome::new(true);

        chrome.on_resize(SizeReason::Restored);
        assert_eq!(chrome.state(), ShowState::Restored);

        chrome.on_resize(SizeReason::Minimized);
        chrome.on_resize(SizeReason::Other);
        assert_eq!(chrome.state(), ShowState::Restored);

        chrome.on_resize(SizeReason::Maximized);
        assert_eq!(chrome.state(), ShowState::Maximized);
    }

    #[test]
    fn toggle_follows_latest_resize_state() {
        // Arrange: maximized by the OS (e.g. Win+Up) after a restore.
        let mut chrome = Chrome::new(true);
        chrome.on_resize(SizeReason::Restored);
        chrome.on_resize(SizeReason::Maximized);

        // Act
        let command = chrome.toggle();

        // Assert
        assert_eq!(command, ShowCommand::Restore);
        assert_eq!(chrome.state(), ShowState::Restored);
    }

    #[test]
    fn size_reason_from_raw_codes() {
        assert_eq!(SizeReason::from_raw(0), SizeReason::Restored);
        assert_eq!(SizeReason::from_raw(1), SizeReason::Minimized);
        assert_eq!(SizeReason::from_raw(2), SizeReason::Maximized);
        assert_eq!(SizeReason::from_raw(3), SizeReason::Other);
        assert_eq!(SizeReason::from_raw(4), SizeReason::Other);
    }
}
