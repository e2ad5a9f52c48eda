use crate::calendar::models::{CalendarEvent, Temporal};
use crate::error::{malformed_event_error, retrieval_error, CoverResult};
use chrono::{NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use icalendar::{Calendar, CalendarComponent, CalendarDateTime, Component, DatePerhapsTime};
use tracing::debug;

/// Parse the feed text into validated raw events
///
/// Every `VEVENT` must carry `SUMMARY`, `DTSTART` and `DTEND`; a component
/// missing any of them fails the whole run rather than being quarantined.
/// Floating local times are interpreted in the reference timezone.
pub fn parse_events(ics: &str, reference_tz: Tz) -> CoverResult<Vec<CalendarEvent>> {
    let calendar: Calendar = ics
        .parse()
        .map_err(|e: String| retrieval_error(&format!("unparsable calendar feed: {e}")))?;

    let mut events = Vec::new();
    for component in &calendar.components {
        let CalendarComponent::Event(event) = component else {
            continue;
        };

        let title = event
            .get_summary()
            .ok_or_else(|| malformed_event_error("event without SUMMARY"))?
            .to_owned();
        let start = event
            .get_start()
            .ok_or_else(|| malformed_event_error(&format!("event '{title}' without DTSTART")))?;
        let end = event
            .get_end()
            .ok_or_else(|| malformed_event_error(&format!("event '{title}' without DTEND")))?;

        debug!("Parsed event: {}", title);
        events.push(CalendarEvent {
            start: to_temporal(start, reference_tz, &title)?,
            end: to_temporal(end, reference_tz, &title)?,
            title,
        });
    }

    Ok(events)
}

fn to_temporal(value: DatePerhapsTime, reference_tz: Tz, title: &str) -> CoverResult<Temporal> {
    match value {
        DatePerhapsTime::Date(date) => Ok(Temporal::Date(date)),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(instant)) => {
            Ok(Temporal::Instant(instant.with_timezone(&chrono_tz::UTC)))
        }
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => {
            local_instant(reference_tz, naive, title)
        }
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            let tz = tzid.parse::<Tz>().map_err(|_| {
                malformed_event_error(&format!("event '{title}' has unknown timezone '{tzid}'"))
            })?;
            local_instant(tz, date_time, title)
        }
    }
}

fn local_instant(tz: Tz, naive: NaiveDateTime, title: &str) -> CoverResult<Temporal> {
    match tz.from_local_datetime(&naive) {
        chrono::LocalResult::Single(instant) => Ok(Temporal::Instant(instant)),
        chrono::LocalResult::Ambiguous(_, _) => Err(malformed_event_error(&format!(
            "event '{title}' has an ambiguous local time {naive}"
        ))),
        chrono::LocalResult::None => Err(malformed_event_error(&format!(
            "event '{title}' has a nonexistent local time {naive}"
        ))),
    }
}
