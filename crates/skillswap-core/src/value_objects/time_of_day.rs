//! Time-of-day value object
//!
//! Appointments store their time as an `"HH:MM"` string. This type owns the
//! parsing and the fixed-length session window math built on top of it.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed session length in minutes. Every booked session occupies the
/// window `[start, start + SESSION_MINUTES]`.
pub const SESSION_MINUTES: i64 = 60;

/// A wall-clock time of day in minutes precision (`"HH:MM"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self, TimeOfDayParseError> {
        if hour > 23 || minute > 59 {
            return Err(TimeOfDayParseError::OutOfRange);
        }
        Ok(Self { hour, minute })
    }

    /// Parse an `"HH:MM"` (or `"H:MM"`) string.
    pub fn parse(s: &str) -> Result<Self, TimeOfDayParseError> {
        let (h, m) = s.split_once(':').ok_or(TimeOfDayParseError::MissingColon)?;
        let hour: u8 = h.trim().parse().map_err(|_| TimeOfDayParseError::NotANumber)?;
        let minute: u8 = m.trim().parse().map_err(|_| TimeOfDayParseError::NotANumber)?;
        Self::new(hour, minute)
    }

    #[inline]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight
    #[inline]
    pub fn as_minutes(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }

    /// Combine with a calendar date into a UTC instant.
    pub fn on(&self, date: NaiveDate) -> DateTime<Utc> {
        let naive = date
            .and_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or_else(|| date.and_hms_opt(0, 0, 0).expect("midnight is valid"));
        Utc.from_utc_datetime(&naive)
    }

    /// The session window `[start, start + SESSION_MINUTES]` for this time
    /// on the given date.
    pub fn session_window(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.on(date);
        (start, start + chrono::Duration::minutes(SESSION_MINUTES))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TimeOfDayParseError {
    #[error("time must be formatted as HH:MM")]
    MissingColon,
    #[error("time components must be numeric")]
    NotANumber,
    #[error("time out of range")]
    OutOfRange,
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = TimeOfDayParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeOfDay::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TimeOfDay::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats() {
        let t = TimeOfDay::parse("09:30").unwrap();
        assert_eq!(t.hour(), 9);
        assert_eq!(t.minute(), 30);
        assert_eq!(t.to_string(), "09:30");

        assert_eq!(TimeOfDay::parse("9:05").unwrap().to_string(), "09:05");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(TimeOfDay::parse("0930").is_err());
        assert!(TimeOfDay::parse("ab:cd").is_err());
        assert!(TimeOfDay::parse("24:00").is_err());
        assert!(TimeOfDay::parse("10:61").is_err());
    }

    #[test]
    fn session_window_spans_sixty_minutes() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let (start, end) = TimeOfDay::parse("10:00").unwrap().session_window(date);
        assert_eq!(end - start, chrono::Duration::minutes(60));
        assert_eq!(start.to_rfc3339(), "2025-03-10T10:00:00+00:00");
    }
}
