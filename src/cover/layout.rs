use crate::calendar::models::DisplayEvent;
use crate::config::Config;
use chrono::Datelike;

pub const FONT_SIZE: f32 = 18.0;

pub const EVENT_X_DATE_ICON: i32 = 100;
pub const EVENT_X_DATE_TEXT: i32 = 122;
pub const EVENT_X_NAME: i32 = 275;
pub const EVENT_X_TIME_ICON: i32 = 812;
pub const EVENT_X_TIME_TEXT: i32 = 835;

pub const EVENT_START_Y: i32 = 185;
pub const EVENT_HEIGHT: i32 = 27;

/// Maximum visible rows; the last one becomes the summary row when the
/// month has more events than fit.
pub const MAX_VISIBLE_ROWS: usize = 9;

/// One planned event row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub y: i32,
    pub date_label: String,
    pub time_label: Option<String>,
    pub title: String,
}

/// Overflow row collapsing the events that did not fit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub y: i32,
    pub text: String,
}

/// Complete row plan for one cover, ready to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPlan {
    pub rows: Vec<EventRow>,
    pub summary: Option<SummaryRow>,
}

/// Plan the visible rows for `month`
///
/// Only events starting in `month` produce rows; adjacent-month survivors
/// of the selector's coarser window are excluded from rows and count
/// alike. With more than [`MAX_VISIBLE_ROWS`] matching events, the first
/// eight get rows and the ninth position becomes a summary row.
pub fn plan_rows(events: &[DisplayEvent], month: u32, config: &Config) -> RowPlan {
    let matching: Vec<&DisplayEvent> = events
        .iter()
        .filter(|event| event.start.month() == month)
        .collect();

    let truncated = matching.len() > MAX_VISIBLE_ROWS;
    let visible = if truncated {
        MAX_VISIBLE_ROWS - 1
    } else {
        matching.len()
    };

    let mut rows = Vec::with_capacity(visible);
    let mut y = EVENT_START_Y;
    for event in &matching[..visible] {
        rows.push(EventRow {
            y,
            date_label: date_label(event, config),
            time_label: event.start_time_label(),
            title: event.title.clone(),
        });
        y += EVENT_HEIGHT;
    }

    let summary = truncated.then(|| SummaryRow {
        y,
        text: format!(
            "+{} {}",
            matching.len() - visible,
            config.more_events_label
        ),
    });

    RowPlan { rows, summary }
}

/// Date column label: a single day, or a "day – day" range with the
/// month named once.
pub fn date_label(event: &DisplayEvent, config: &Config) -> String {
    let start = event.start.date();
    let month = config.month_name(start.month());
    if event.is_single_day() {
        format!("{} {}", start.day(), month)
    } else {
        format!(
            "{} \u{2013} {} {}",
            start.day(),
            event.visible_end_date().day(),
            month
        )
    }
}
