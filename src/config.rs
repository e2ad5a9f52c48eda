use crate::error::{config_error, CoverResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

/// Default public feed to pull events from
pub const DEFAULT_CALENDAR_URL: &str = "https://calendar.google.com/calendar/ical/\
                                        via.uvastudent.org_rdn1ffk47v0gmla0oni69egmhk%40\
                                        group.calendar.google.com/public/basic.ics";

/// Optional configuration file, merged over the defaults when present
const CONFIG_FILE: &str = "config/covergen.toml";

/// Main configuration structure for the cover generator
///
/// Denylist entries are matched against lower-cased titles and are
/// expected to be lower-case themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL of the public iCalendar feed
    pub calendar_url: String,
    /// Reference timezone all timestamps are normalized into
    pub timezone: String,
    /// Month names in display order, one fixed locale, 12 entries
    pub month_names: Vec<String>,
    /// Substring markers that exclude an event by title
    pub exclude_markers: Vec<String>,
    /// Exact titles reserved for internal events, excluded from display
    pub exclude_titles: Vec<String>,
    /// Background template image
    pub template_path: String,
    /// Text font, regular weight
    pub font_regular_path: String,
    /// Text font, bold weight
    pub font_bold_path: String,
    /// Symbolic/icon font
    pub font_icon_path: String,
    /// Directory the finished cover is written into
    pub output_dir: String,
    /// Heading prefix, completed with month name and year at render time
    pub heading: String,
    /// Static footer line
    pub footer: String,
    /// Suffix of the overflow summary row ("+N <label>")
    pub more_events_label: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            calendar_url: DEFAULT_CALENDAR_URL.to_string(),
            timezone: "Europe/Amsterdam".to_string(),
            month_names: [
                "januari",
                "februari",
                "maart",
                "april",
                "mei",
                "juni",
                "juli",
                "augustus",
                "september",
                "oktober",
                "november",
                "december",
            ]
            .map(String::from)
            .to_vec(),
            exclude_markers: vec!["vergadering".to_string()],
            exclude_titles: vec!["kelder-bestelling".to_string(), "tentamenweek".to_string()],
            template_path: "resources/cover_template.png".to_string(),
            font_regular_path: "resources/SourceSansPro-Regular.ttf".to_string(),
            font_bold_path: "resources/SourceSansPro-Bold.ttf".to_string(),
            font_icon_path: "resources/font-awesome.otf".to_string(),
            output_dir: "output".to_string(),
            heading: "Activiteitenkalender".to_string(),
            footer: "meer informatie op via.uvastudent.org".to_string(),
            more_events_label: "activiteiten in deze maand".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the optional config file and environment
    pub fn load() -> CoverResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = match fs::read_to_string(CONFIG_FILE) {
            Ok(content) => toml::from_str::<Config>(&content)?,
            Err(_) => Config::default(),
        };

        // Environment overrides
        if let Ok(url) = env::var("CALENDAR_URL") {
            config.calendar_url = url;
        }
        if let Ok(timezone) = env::var("COVERGEN_TIMEZONE") {
            config.timezone = timezone;
        }
        if let Ok(output_dir) = env::var("COVERGEN_OUTPUT_DIR") {
            config.output_dir = output_dir;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse the configured reference timezone
    pub fn reference_timezone(&self) -> CoverResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Unknown timezone: {}", self.timezone)))
    }

    /// Display name for a month number (1..=12)
    pub fn month_name(&self, month: u32) -> &str {
        &self.month_names[(month - 1) as usize]
    }

    fn validate(&self) -> CoverResult<()> {
        if self.month_names.len() != 12 {
            return Err(config_error(&format!(
                "month_names must have 12 entries, got {}",
                self.month_names.len()
            )));
        }
        self.reference_timezone()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.month_name(6), "juni");
        assert_eq!(config.month_name(12), "december");
    }

    #[test]
    fn rejects_short_month_table() {
        let config = Config {
            month_names: vec!["januari".to_string()],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unknown_timezone() {
        let config = Config {
            timezone: "Europe/Nergenshuizen".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
