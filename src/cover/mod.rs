pub mod draw;
pub mod layout;

use crate::calendar::models::DisplayEvent;
use crate::config::Config;
use crate::error::CoverResult;
use tracing::info;

/// Render the selected events for one month into JPEG bytes
pub fn generate(
    events: &[DisplayEvent],
    month: u32,
    year: i32,
    config: &Config,
) -> CoverResult<Vec<u8>> {
    let mut img = draw::load_template(&config.template_path)?;
    let fonts = draw::load_fonts(config)?;

    let plan = layout::plan_rows(events, month, config);
    info!(
        "Planned {} event rows{}",
        plan.rows.len(),
        if plan.summary.is_some() {
            " plus a summary row"
        } else {
            ""
        }
    );

    let heading = format!(
        "{} \u{2013} {} {}",
        config.heading,
        config.month_name(month),
        year
    );
    draw::draw_cover(&mut img, &plan, &heading, &config.footer, &fonts);

    draw::encode_jpeg(&img)
}
