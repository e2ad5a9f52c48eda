use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use chrono_tz::Tz;

/// Timed events ending strictly before this hour count as a late-night
/// continuation of the previous day rather than a separate day.
pub const LATE_NIGHT_CUTOFF_HOUR: u32 = 6;

/// A calendar bound: either a day-granularity date or a timestamped instant
///
/// Dates carry no time-of-day and are never timezone-converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
    Date(NaiveDate),
    Instant(DateTime<Tz>),
}

impl Temporal {
    /// Convert an instant into the reference timezone; dates pass through
    pub fn normalize(self, tz: Tz) -> Self {
        match self {
            Temporal::Date(date) => Temporal::Date(date),
            Temporal::Instant(instant) => Temporal::Instant(instant.with_timezone(&tz)),
        }
    }

    /// The calendar day this bound falls on
    pub fn date(&self) -> NaiveDate {
        match self {
            Temporal::Date(date) => *date,
            Temporal::Instant(instant) => instant.date_naive(),
        }
    }

    pub fn month(&self) -> u32 {
        self.date().month()
    }

    pub const fn is_date(&self) -> bool {
        matches!(self, Temporal::Date(_))
    }

    /// Hour of day for instants, `None` for dates
    pub fn hour(&self) -> Option<u32> {
        match self {
            Temporal::Date(_) => None,
            Temporal::Instant(instant) => Some(instant.hour()),
        }
    }

    /// Ordering key at full date/time granularity; dates sort as midnight
    pub fn sort_key(&self) -> NaiveDateTime {
        match self {
            Temporal::Date(date) => date.and_time(NaiveTime::default()),
            Temporal::Instant(instant) => instant.naive_local(),
        }
    }
}

/// Raw event as supplied by the feed, validated but not yet selected
#[derive(Debug, Clone)]
pub struct CalendarEvent {
    pub start: Temporal,
    pub end: Temporal,
    pub title: String,
}

/// Selected event, normalized into the reference timezone
#[derive(Debug, Clone)]
pub struct DisplayEvent {
    pub start: Temporal,
    pub end: Temporal,
    pub title: String,
    pub is_all_day: bool,
}

impl DisplayEvent {
    pub fn from_raw(event: CalendarEvent, tz: Tz) -> Self {
        let start = event.start.normalize(tz);
        let end = event.end.normalize(tz);
        // Either bound being a bare date marks the whole event as all-day
        let is_all_day = start.is_date() || end.is_date();
        DisplayEvent {
            start,
            end,
            title: event.title,
            is_all_day,
        }
    }

    /// Last calendar day the event visibly occupies
    ///
    /// All-day ends are exclusive of their listed day, so one day is
    /// subtracted. A timed end before the late-night cutoff belongs to the
    /// previous day, clamped so it never precedes the start date.
    pub fn visible_end_date(&self) -> NaiveDate {
        let end = self.end.date();
        if self.is_all_day {
            end.checked_sub_days(Days::new(1)).unwrap_or(end)
        } else if self.end.hour().is_some_and(|h| h < LATE_NIGHT_CUTOFF_HOUR) {
            end.checked_sub_days(Days::new(1))
                .unwrap_or(end)
                .max(self.start.date())
        } else {
            end
        }
    }

    pub fn is_single_day(&self) -> bool {
        self.start.date() == self.visible_end_date()
    }

    /// Start time label, only for timed single-day events
    pub fn start_time_label(&self) -> Option<String> {
        match &self.start {
            Temporal::Instant(instant) if !self.is_all_day && self.is_single_day() => {
                Some(instant.format("%H:%M").to_string())
            }
            _ => None,
        }
    }
}
