//! Clock text formatting.
//!
//! The platform layer fills a [`LocalTime`] from the system clock; every
//! string shown on screen is derived from it here, so formatting never
//! touches the OS and is testable with a [`FixedClock`].

use std::fmt;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Day of the week, indexed from Sunday like the Win32 `wDayOfWeek` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All weekdays in index order (0 = Sunday).
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Maps a calendar day index (0 = Sunday) to a weekday.
    pub fn from_index(index: u16) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Uppercase English label, as drawn above the time.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sunday => "SUNDAY",
            Self::Monday => "MONDAY",
            Self::Tuesday => "TUESDAY",
            Self::Wednesday => "WEDNESDAY",
            Self::Thursday => "THURSDAY",
            Self::Friday => "FRIDAY",
            Self::Saturday => "SATURDAY",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Before or after noon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

/// Converts a 24-hour value to its 12-hour display form.
///
/// Midnight and noon both display as 12. The returned hour is always in
/// `1..=12` for inputs in `0..=23`.
pub fn twelve_hour(hour: u16) -> (u16, Meridiem) {
    match hour {
        0 => (12, Meridiem::Am),
        12 => (12, Meridiem::Pm),
        h if h > 12 => (h - 12, Meridiem::Pm),
        h => (h, Meridiem::Am),
    }
}

/// Broken-down local time as reported by the platform clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime {
    pub year: u16,
    /// Month of the year, `1..=12`.
    pub month: u16,
    pub day: u16,
    /// Day of the week, `0..=6` with 0 = Sunday.
    pub weekday: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

impl LocalTime {
    pub fn weekday(&self) -> Option<Weekday> {
        Weekday::from_index(self.weekday)
    }

    /// Formats as `HH:MM:SS AM` in 12-hour form.
    pub fn time_string(&self) -> String {
        let (hour, meridiem) = twelve_hour(self.hour);
        format!(
            "{hour:02}:{:02}:{:02} {}",
            self.minute,
            self.second,
            meridiem.as_str()
        )
    }

    /// Formats as `MONTH DD, YYYY`, fully uppercased.
    pub fn date_string(&self) -> String {
        let month = MONTHS
            .get(usize::from(self.month.wrapping_sub(1)))
            .copied()
            .unwrap_or("???");
        format!("{month} {:02}, {}", self.day, self.year).to_uppercase()
    }
}

/// The three strings drawn in one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockSnapshot {
    /// Weekday label, empty if the platform reported an invalid index.
    pub weekday: String,
    pub time: String,
    pub date: String,
}

impl From<&LocalTime> for ClockSnapshot {
    fn from(now: &LocalTime) -> Self {
        Self {
            weekday: now.weekday().map(Weekday::label).unwrap_or_default().into(),
            time: now.time_string(),
            date: now.date_string(),
        }
    }
}

/// Source of the current local time.
///
/// Every call re-reads the clock; nothing is cached. The three
/// `current_*` helpers each take their own reading, so prefer
/// [`TimeSource::snapshot`] when all fields must agree.
pub trait TimeSource {
    fn now(&self) -> LocalTime;

    fn current_weekday(&self) -> Option<Weekday> {
        self.now().weekday()
    }

    fn current_time_string(&self) -> String {
        self.now().time_string()
    }

    fn current_date_string(&self) -> String {
        self.now().date_string()
    }

    /// Reads the clock once and formats every field from that reading.
    fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot::from(&self.now())
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub LocalTime);

impl TimeSource for FixedClock {
    fn now(&self) -> LocalTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u16, minute: u16, second: u16) -> LocalTime {
        LocalTime {
            year: 2024,
            month: 3,
            day: 7,
            weekday: 4,
            hour,
            minute,
            second,
        }
    }

    #[test]
    fn twelve_hour_covers_every_hour() {
        for h in 0..24 {
            // Act
            let (display, meridiem) = twelve_hour(h);

            // Assert
            assert!((1..=12).contains(&display), "hour {h} -> {display}");
            match h {
                0 => assert_eq!((display, meridiem), (12, Meridiem::Am)),
                12 => assert_eq!((display, meridiem), (12, Meridiem::Pm)),
                1..=11 => assert_eq!((display, meridiem), (h, Meridiem::Am)),
                _ => assert_eq!((display, meridiem), (h - 12, Meridiem::Pm)),
            }
        }
    }

    #[test]
    fn time_string_is_zero_padded() {
        assert_eq!(at(0, 5, 9).time_string(), "12:05:09 AM");
        assert_eq!(at(9, 30, 0).time_string(), "09:30:00 AM");
        assert_eq!(at(12, 0, 0).time_string(), "12:00:00 PM");
        assert_eq!(at(23, 59, 59).time_string(), "11:59:59 PM");
    }

    #[test]
    fn weekday_mapping_is_total_for_valid_indices() {
        let labels: Vec<_> = (0..7)
            .map(|i| Weekday::from_index(i).map(Weekday::label))
            .collect();

        assert_eq!(
            labels,
            [
                "SUNDAY",
                "MONDAY",
                "TUESDAY",
                "WEDNESDAY",
                "THURSDAY",
                "FRIDAY",
                "SATURDAY"
            ]
            .map(Some)
        );
        assert_eq!(Weekday::from_index(7), None);
    }

    #[test]
    fn date_string_is_uppercase_long_form() {
        // Arrange
        let now = LocalTime {
            year: 2023,
            month: 9,
            day: 1,
            weekday: 5,
            hour: 10,
            minute: 0,
            second: 0,
        };

        // Act
        let date = now.date_string();

        // Assert
        assert_eq!(date, "SEPTEMBER 01, 2023");
        assert_eq!(date, date.to_uppercase());
    }

    #[test]
    fn every_month_formats_with_full_name() {
        for month in 1..=12 {
            let now = LocalTime { month, ..at(8, 0, 0) };
            let date = now.date_string();
            let name = date.split(' ').next().unwrap_or_default();

            assert_eq!(name, MONTHS[usize::from(month - 1)].to_uppercase());
            assert!(date.ends_with(", 2024"));
        }
    }

    #[test]
    fn invalid_weekday_gives_empty_label() {
        let now = LocalTime {
            weekday: 9,
            ..at(1, 2, 3)
        };

        let snapshot = ClockSnapshot::from(&now);

        assert_eq!(snapshot.weekday, "");
        assert_eq!(snapshot.time, "01:02:03 AM");
    }

    #[test]
    fn snapshot_reads_clock_once() {
        let clock = FixedClock(at(15, 4, 5));

        let snapshot = clock.snapshot();

        assert_eq!(
            snapshot,
            ClockSnapshot {
                weekday: "THURSDAY".into(),
                time: "03:04:05 PM".into(),
                date: "MARCH 07, 2024".into(),
            }
        );
        assert_eq!(clock.current_weekday(), Some(Weekday::Thursday));
        assert_eq!(clock.current_time_string(), snapshot.time);
        assert_eq!(clock.current_date_string(), snapshot.date);
    }
}
