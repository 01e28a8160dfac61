//! Eastern-timezone datetime normalization.
//!
//! The workflow anchors every date to the `America/New_York` IANA zone
//! regardless of where a server or client runs. Values are compared by
//! absolute instant, displayed with their real UTC offset (EST −05:00 or
//! EDT −04:00), and expanded from plain calendar dates at an expected day
//! boundary. US DST transitions happen at 02:00 local, so both canonical
//! boundaries (00:00:00.000 and 23:59:59.999) exist and are unambiguous on
//! every calendar day.

use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::LocalResult;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use chrono::TimeZone;
use chrono::Timelike;
use chrono::Utc;
use chrono_tz::America::New_York;
use chrono_tz::Tz;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use thiserror::Error;

use crate::date_types::CalendarOffset;
use crate::date_types::DayBoundary;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TimeError {
    /// The requested components do not name a wall-clock time at all
    /// (e.g. hour 25).
    #[error(
        "{hours:02}:{minutes:02}:{seconds:02}.{milliseconds:03} is not a valid wall-clock time"
    )]
    InvalidWallClock {
        hours: u32,
        minutes: u32,
        seconds: u32,
        milliseconds: u32,
    },
    /// The wall-clock time fell into a DST gap and does not exist on that
    /// day in the Eastern timezone.
    #[error("{date} {time} does not exist in the Eastern timezone")]
    NonexistentLocalTime { date: NaiveDate, time: NaiveTime },
    #[error("adding {days} days to {date} overflows the calendar")]
    DateOverflow { date: NaiveDate, days: i64 },
}

/// A datetime pinned to the Eastern timezone.
///
/// Ordering, equality and hashing all go by absolute instant, so values can
/// be compared even across a DST transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EasternDateTime(DateTime<Tz>);

impl EasternDateTime {
    /// Re-express a UTC instant in Eastern wall-clock terms. The instant is
    /// unchanged; only the calendar projection shifts.
    pub fn from_utc(instant: DateTime<Utc>) -> Self {
        Self(instant.with_timezone(&New_York))
    }

    /// Expand a plain calendar date at a day boundary: 00:00:00.000 local
    /// for start of day, 23:59:59.999 local for end of day.
    pub fn from_local_date(date: NaiveDate, boundary: DayBoundary) -> Result<Self, TimeError> {
        let (hours, minutes, seconds, milliseconds) = boundary.hms_milli();
        let local = local_datetime(date, hours, minutes, seconds, milliseconds)?;
        resolve_local(local)
    }

    /// Whether this value sits exactly on the boundary's wall-clock
    /// signature. Exact to the millisecond; sub-millisecond precision also
    /// fails.
    pub fn is_at_boundary(self, boundary: DayBoundary) -> bool {
        let (hours, minutes, seconds, milliseconds) = boundary.hms_milli();
        self.0.hour() == hours
            && self.0.minute() == minutes
            && self.0.second() == seconds
            && self.0.nanosecond() == milliseconds * 1_000_000
    }

    /// Apply a calendar offset: move the Eastern calendar date by
    /// `offset.days`, then set the wall-clock time to the offset's
    /// hours/minutes/seconds/milliseconds. Crossing a DST transition leaves
    /// the wall-clock result intact, which is the point of doing calendar
    /// arithmetic instead of adding a millisecond count.
    pub fn offset_by(self, offset: &CalendarOffset) -> Result<Self, TimeError> {
        let start = self.0.date_naive();
        let days = Duration::try_days(offset.days).ok_or(TimeError::DateOverflow {
            date: start,
            days: offset.days,
        })?;
        let date = start
            .checked_add_signed(days)
            .ok_or(TimeError::DateOverflow {
                date: start,
                days: offset.days,
            })?;
        let local = local_datetime(
            date,
            offset.hours,
            offset.minutes,
            offset.seconds,
            offset.milliseconds,
        )?;
        resolve_local(local)
    }

    /// The Eastern calendar date this value falls on.
    pub fn date_naive(self) -> NaiveDate {
        self.0.date_naive()
    }
}

fn local_datetime(
    date: NaiveDate,
    hours: u32,
    minutes: u32,
    seconds: u32,
    milliseconds: u32,
) -> Result<NaiveDateTime, TimeError> {
    date.and_hms_milli_opt(hours, minutes, seconds, milliseconds)
        .ok_or(TimeError::InvalidWallClock {
            hours,
            minutes,
            seconds,
            milliseconds,
        })
}

/// Ambiguous wall-clock times (the repeated hour on a fall-back day) resolve
/// to the earlier instant. Neither canonical boundary is ever ambiguous in
/// this zone.
fn resolve_local(local: NaiveDateTime) -> Result<EasternDateTime, TimeError> {
    match New_York.from_local_datetime(&local) {
        LocalResult::Single(zoned) => Ok(EasternDateTime(zoned)),
        LocalResult::Ambiguous(earliest, _) => Ok(EasternDateTime(earliest)),
        LocalResult::None => Err(TimeError::NonexistentLocalTime {
            date: local.date(),
            time: local.time(),
        }),
    }
}

impl fmt::Display for EasternDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

impl Serialize for EasternDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EasternDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let parsed = DateTime::parse_from_rfc3339(&raw).map_err(serde::de::Error::custom)?;
        Ok(Self(parsed.with_timezone(&New_York)))
    }
}

/// What callers hand the engine for a date field: either an exact moment or
/// a plain calendar date still to be expanded at the expected boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateInput {
    Instant(DateTime<Utc>),
    LocalDate(NaiveDate),
}

impl DateInput {
    pub fn to_eastern(self, expected: DayBoundary) -> Result<EasternDateTime, TimeError> {
        match self {
            DateInput::Instant(instant) => Ok(EasternDateTime::from_utc(instant)),
            DateInput::LocalDate(date) => EasternDateTime::from_local_date(date, expected),
        }
    }
}

/// The boundary pair for the current Eastern calendar day, captured once and
/// passed around so every decision in one request agrees on what "today"
/// means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EasternNow {
    pub start_of_day: EasternDateTime,
    pub end_of_day: EasternDateTime,
}

impl EasternNow {
    pub fn capture() -> Result<Self, TimeError> {
        Self::for_instant(Utc::now())
    }

    /// The boundary pair for the Eastern calendar day containing `instant`.
    pub fn for_instant(instant: DateTime<Utc>) -> Result<Self, TimeError> {
        let today = EasternDateTime::from_utc(instant).date_naive();
        Ok(Self {
            start_of_day: EasternDateTime::from_local_date(today, DayBoundary::StartOfDay)?,
            end_of_day: EasternDateTime::from_local_date(today, DayBoundary::EndOfDay)?,
        })
    }

    pub fn at(self, boundary: DayBoundary) -> EasternDateTime {
        match boundary {
            DayBoundary::StartOfDay => self.start_of_day,
            DayBoundary::EndOfDay => self.end_of_day,
        }
    }
}
