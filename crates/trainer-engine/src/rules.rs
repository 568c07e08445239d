//! Business calendar: operating hours, active weekdays, timezone, and slot size.
//!
//! All checks are made on the instant converted into the business timezone, so
//! "08:00" always means 08:00 on the wall clock of the business, across DST.

use chrono::{DateTime, Datelike, Duration, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use crate::error::RulesError;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Los_Angeles;
pub const DEFAULT_OPEN_HOUR: u32 = 8;
pub const DEFAULT_CLOSE_HOUR: u32 = 17;
pub const DEFAULT_GRANULARITY_MINUTES: u32 = 30;
pub const DEFAULT_WEEKDAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Immutable business-calendar configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRules {
    timezone: Tz,
    open_hour: u32,
    close_hour: u32,
    /// Indexed by `Weekday::num_days_from_monday`.
    weekdays: [bool; 7],
    granularity_minutes: u32,
}

impl TimeRules {
    /// Build validated rules.
    ///
    /// # Errors
    /// - `InvalidTimezone` if `timezone` is not an IANA identifier.
    /// - `InvalidHours` unless `open < close <= 24`.
    /// - `InvalidGranularity` unless the slot length divides an hour evenly.
    /// - `NoWeekdays` if `weekdays` is empty.
    pub fn new(
        timezone: &str,
        open_hour: u32,
        close_hour: u32,
        weekdays: &[Weekday],
        granularity_minutes: u32,
    ) -> Result<Self, RulesError> {
        let timezone: Tz = timezone
            .parse()
            .map_err(|_| RulesError::InvalidTimezone(timezone.to_string()))?;

        if open_hour >= close_hour || close_hour > 24 {
            return Err(RulesError::InvalidHours {
                open: open_hour,
                close: close_hour,
            });
        }

        if granularity_minutes == 0 || 60 % granularity_minutes != 0 {
            return Err(RulesError::InvalidGranularity(granularity_minutes));
        }

        if weekdays.is_empty() {
            return Err(RulesError::NoWeekdays);
        }

        let mut mask = [false; 7];
        for day in weekdays {
            mask[day.num_days_from_monday() as usize] = true;
        }

        Ok(Self {
            timezone,
            open_hour,
            close_hour,
            weekdays: mask,
            granularity_minutes,
        })
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn open_hour(&self) -> u32 {
        self.open_hour
    }

    pub fn close_hour(&self) -> u32 {
        self.close_hour
    }

    pub fn granularity_minutes(&self) -> u32 {
        self.granularity_minutes
    }

    /// Slot length, which is also the fixed appointment duration.
    pub fn granularity(&self) -> Duration {
        Duration::minutes(i64::from(self.granularity_minutes))
    }

    pub fn is_operating_day(&self, day: Weekday) -> bool {
        self.weekdays[day.num_days_from_monday() as usize]
    }

    /// The instant on the business wall clock.
    pub fn to_business_time(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.timezone)
    }

    /// True iff the instant falls on an operating weekday and its local hour
    /// is in `[open, close)`.
    pub fn within_operating_hours(&self, instant: DateTime<Utc>) -> bool {
        let local = self.to_business_time(instant);
        self.is_operating_day(local.weekday())
            && (self.open_hour..self.close_hour).contains(&local.hour())
    }

    /// True iff the instant sits exactly on a slot boundary.
    ///
    /// The minute is read on the business wall clock, not in UTC. The two only
    /// differ for zones whose offset is not a whole multiple of the slot size
    /// (e.g. Asia/Kathmandu, UTC+05:45).
    pub fn is_aligned(&self, instant: DateTime<Utc>) -> bool {
        self.minutes_past_boundary(instant) == 0
            && instant.second() == 0
            && instant.nanosecond() == 0
    }

    /// Whole minutes elapsed since the previous slot boundary.
    pub(crate) fn minutes_past_boundary(&self, instant: DateTime<Utc>) -> u32 {
        self.to_business_time(instant).minute() % self.granularity_minutes
    }
}

impl Default for TimeRules {
    fn default() -> Self {
        let mut weekdays = [false; 7];
        for day in DEFAULT_WEEKDAYS {
            weekdays[day.num_days_from_monday() as usize] = true;
        }
        Self {
            timezone: DEFAULT_TIMEZONE,
            open_hour: DEFAULT_OPEN_HOUR,
            close_hour: DEFAULT_CLOSE_HOUR,
            weekdays,
            granularity_minutes: DEFAULT_GRANULARITY_MINUTES,
        }
    }
}

/// Parse a weekday name such as `"Mon"` or `"friday"`.
pub fn parse_weekday(name: &str) -> Result<Weekday, RulesError> {
    name.trim()
        .parse()
        .map_err(|_| RulesError::InvalidWeekday(name.to_string()))
}
