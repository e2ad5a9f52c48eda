use crate::error::{retrieval_error, CoverResult};
use tracing::info;

/// Fetch the raw iCalendar text from the configured feed URL
///
/// Any network or HTTP-status failure is fatal for the run; there are no
/// retries.
pub fn fetch_calendar(url: &str) -> CoverResult<String> {
    info!("Fetching calendar feed from {}", url);

    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let body = response.text()?;

    if body.is_empty() {
        return Err(retrieval_error("calendar feed returned an empty body"));
    }

    info!("Fetched {} bytes of calendar data", body.len());
    Ok(body)
}
