use crate::calendar::models::{CalendarEvent, DisplayEvent};
use crate::config::Config;
use chrono::{Datelike, NaiveDateTime};
use chrono_tz::Tz;

/// Select and order the events worth displaying for `target_month`
///
/// Normalizes instants into the reference timezone, drops denylisted
/// titles, keeps only events that have not fully concluded and whose
/// months touch the target window, and stable-sorts by normalized start.
/// Duplicates from the feed are preserved.
pub fn select(
    raw: Vec<CalendarEvent>,
    target_month: u32,
    now: NaiveDateTime,
    tz: Tz,
    config: &Config,
) -> Vec<DisplayEvent> {
    let mut events: Vec<DisplayEvent> = raw
        .into_iter()
        .map(|event| DisplayEvent::from_raw(event, tz))
        .filter(|event| !is_excluded(&event.title, config))
        .filter(|event| is_relevant(event, target_month, now))
        .collect();

    events.sort_by_key(|event| event.start.sort_key());
    events
}

/// Case-insensitive denylist match: marker substrings or exact reserved titles
fn is_excluded(title: &str, config: &Config) -> bool {
    let lowered = title.to_lowercase();
    config
        .exclude_markers
        .iter()
        .any(|marker| lowered.contains(marker.as_str()))
        || config
            .exclude_titles
            .iter()
            .any(|reserved| lowered == reserved.as_str())
}

/// An event is relevant while the end of either bound's day is still ahead
/// of `now` and its months touch the target window.
///
/// The upper month bound deliberately does not wrap at December: for a
/// December target, events starting in or before December are retained,
/// including spans running into January.
fn is_relevant(event: &DisplayEvent, target_month: u32, now: NaiveDateTime) -> bool {
    let start = event.start.date();
    let end = event.end.date();

    let not_concluded = start >= now.date() || end >= now.date();
    let in_window = (start.month() >= target_month || end.month() >= target_month)
        && start.month() <= target_month;

    not_concluded && in_window
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::models::Temporal;
    use chrono::{NaiveDate, TimeZone};
    use chrono_tz::Europe::Amsterdam;

    fn all_day(title: &str, start: (i32, u32, u32), end: (i32, u32, u32)) -> CalendarEvent {
        CalendarEvent {
            start: Temporal::Date(NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap()),
            end: Temporal::Date(NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap()),
            title: title.to_string(),
        }
    }

    fn timed(title: &str, y: i32, m: u32, d: u32, h: u32, min: u32) -> CalendarEvent {
        let start = Amsterdam.with_ymd_and_hms(y, m, d, h, min, 0).unwrap();
        CalendarEvent {
            start: Temporal::Instant(start),
            end: Temporal::Instant(start + chrono::Duration::hours(2)),
            title: title.to_string(),
        }
    }

    fn june_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn run(events: Vec<CalendarEvent>, month: u32, now: NaiveDateTime) -> Vec<DisplayEvent> {
        select(events, month, now, Amsterdam, &Config::default())
    }

    #[test]
    fn denylist_removes_exactly_the_reserved_titles() {
        let events = vec![
            timed("ALV vergadering", 2024, 6, 5, 20, 0),
            timed("Vergaderingen plannen", 2024, 6, 6, 20, 0),
            timed("Kelder-Bestelling", 2024, 6, 7, 20, 0),
            timed("TENTAMENWEEK", 2024, 6, 8, 20, 0),
            timed("kelder-bestelling ophalen", 2024, 6, 9, 20, 0),
            timed("Borrel", 2024, 6, 10, 20, 0),
        ];
        let selected = run(events, 6, june_now());
        let titles: Vec<&str> = selected.iter().map(|e| e.title.as_str()).collect();
        // Marker matches as substring, reserved titles only as exact match
        assert_eq!(titles, vec!["kelder-bestelling ophalen", "Borrel"]);
    }

    #[test]
    fn concluded_events_are_dropped() {
        let events = vec![
            timed("Afgelopen", 2024, 6, 5, 20, 0),
            timed("Vandaag", 2024, 6, 10, 9, 0),
            timed("Binnenkort", 2024, 6, 20, 20, 0),
        ];
        let now = NaiveDate::from_ymd_opt(2024, 6, 10)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap();
        let titles: Vec<String> = run(events, 6, now).into_iter().map(|e| e.title).collect();
        // An event earlier today survives until the end of its day
        assert_eq!(titles, vec!["Vandaag", "Binnenkort"]);
    }

    #[test]
    fn month_window_keeps_spans_into_target() {
        let events = vec![
            all_day("Meiweek", (2024, 5, 27), (2024, 6, 3)),
            timed("Junidrink", 2024, 6, 14, 20, 0),
            timed("Julikamp", 2024, 7, 2, 10, 0),
        ];
        let titles: Vec<String> = run(events, 6, june_now())
            .into_iter()
            .map(|e| e.title)
            .collect();
        // A span reaching into June counts, a July start does not
        assert_eq!(titles, vec!["Meiweek", "Junidrink"]);
    }

    #[test]
    fn december_window_does_not_wrap_to_nothing() {
        let now = NaiveDate::from_ymd_opt(2024, 12, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let events = vec![
            timed("Kerstborrel", 2024, 12, 19, 20, 0),
            all_day("Wintersport", (2024, 12, 28), (2025, 1, 5)),
        ];
        let selected = run(events, 12, now);
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn sorted_by_start_with_stable_ties() {
        let events = vec![
            timed("Laat", 2024, 6, 20, 20, 0),
            timed("Eerste om acht", 2024, 6, 10, 20, 0),
            timed("Tweede om acht", 2024, 6, 10, 20, 0),
            all_day("Hele dag", (2024, 6, 10), (2024, 6, 11)),
        ];
        let titles: Vec<String> = run(events, 6, june_now())
            .into_iter()
            .map(|e| e.title)
            .collect();
        // The all-day event sorts as midnight, equal starts keep input order
        assert_eq!(
            titles,
            vec!["Hele dag", "Eerste om acht", "Tweede om acht", "Laat"]
        );
    }

    #[test]
    fn timezone_normalization_applies_before_windowing() {
        // 23:00 UTC on May 31 is already June 1 in Amsterdam
        let start = chrono_tz::UTC.with_ymd_and_hms(2024, 5, 31, 23, 0, 0).unwrap();
        let events = vec![CalendarEvent {
            start: Temporal::Instant(start),
            end: Temporal::Instant(start + chrono::Duration::hours(2)),
            title: "Nachtborrel".to_string(),
        }];
        let selected = run(events, 6, june_now());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].start.month(), 6);
    }

    #[test]
    fn inverted_range_is_tolerated() {
        let events = vec![all_day("Omgekeerd", (2024, 6, 20), (2024, 6, 10))];
        let selected = run(events, 6, june_now());
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn duplicates_are_preserved() {
        let events = vec![
            timed("Borrel", 2024, 6, 14, 20, 0),
            timed("Borrel", 2024, 6, 14, 20, 0),
        ];
        assert_eq!(run(events, 6, june_now()).len(), 2);
    }
}
