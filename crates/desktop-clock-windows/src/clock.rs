//! System clock backed by `GetLocalTime`.

use desktop_clock_core::{LocalTime, TimeSource};
use windows::Win32::Foundation::SYSTEMTIME;
use windows::Win32::System::SystemInformation::GetLocalTime;

/// Reads the local wall-clock time from the OS on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> LocalTime {
        let st: SYSTEMTIME = unsafe { GetLocalTime() };
        LocalTime {
            year: st.wYear,
            month: st.wMonth,
            day: st.wDay,
            weekday: st.wDayOfWeek,
            hour: st.wHour,
            minute: st.wMinute,
            second: st.wSecond,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_reports_valid_fields() {
        let now = SystemClock.now();

        assert!((1..=12).contains(&now.month));
        assert!((1..=31).contains(&now.day));
        assert!(now.weekday().is_some());
        assert!(now.hour < 24);
    }
}
