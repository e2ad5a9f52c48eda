use crate::config::Config;
use crate::cover::layout::{
    RowPlan, EVENT_X_DATE_ICON, EVENT_X_DATE_TEXT, EVENT_X_NAME, EVENT_X_TIME_ICON,
    EVENT_X_TIME_TEXT, FONT_SIZE,
};
use crate::error::{resource_error, CoverResult};
use ab_glyph::{FontVec, PxScale};
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::fs;
use tracing::info;

const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

// Font Awesome glyphs
const CALENDAR_ICON: &str = "\u{f274}";
const CLOCK_ICON: &str = "\u{f017}";

const HEADING_Y: i32 = 110;
const FOOTER_MARGIN_BOTTOM: i32 = 48;

// The summary row is centered in the content band, not the full canvas
const SUMMARY_BAND_WIDTH: i32 = 860;
const SUMMARY_BAND_OFFSET: i32 = 50;

pub const JPEG_QUALITY: u8 = 99;

/// The three font weights the cover uses
pub struct Fonts {
    pub icon: FontVec,
    pub regular: FontVec,
    pub bold: FontVec,
}

/// Load all fonts; a missing or corrupt file is fatal at startup
pub fn load_fonts(config: &Config) -> CoverResult<Fonts> {
    Ok(Fonts {
        icon: load_font(&config.font_icon_path)?,
        regular: load_font(&config.font_regular_path)?,
        bold: load_font(&config.font_bold_path)?,
    })
}

fn load_font(path: &str) -> CoverResult<FontVec> {
    let bytes =
        fs::read(path).map_err(|e| resource_error(&format!("failed to read font {path}: {e}")))?;
    FontVec::try_from_vec(bytes).map_err(|_| resource_error(&format!("invalid font data in {path}")))
}

/// Load the background template as RGB pixels
pub fn load_template(path: &str) -> CoverResult<RgbImage> {
    let img = image::open(path)
        .map_err(|e| resource_error(&format!("failed to open template image {path}: {e}")))?;
    info!(
        "Template loaded with dimensions {}x{}",
        img.width(),
        img.height()
    );
    Ok(img.to_rgb8())
}

/// Draw heading, event rows, summary and footer onto the template
///
/// Heading and footer are centered using the measured text width and are
/// drawn even when the plan holds no rows.
pub fn draw_cover(img: &mut RgbImage, plan: &RowPlan, heading: &str, footer: &str, fonts: &Fonts) {
    let scale = PxScale::from(FONT_SIZE);
    let width = img.width() as i32;
    let height = img.height() as i32;

    let (heading_w, _) = text_size(scale, &fonts.bold, heading);
    draw_text_mut(
        img,
        TEXT_COLOR,
        (width - heading_w as i32) / 2,
        HEADING_Y,
        scale,
        &fonts.bold,
        heading,
    );

    for row in &plan.rows {
        draw_text_mut(
            img,
            TEXT_COLOR,
            EVENT_X_DATE_ICON,
            row.y,
            scale,
            &fonts.icon,
            CALENDAR_ICON,
        );
        draw_text_mut(
            img,
            TEXT_COLOR,
            EVENT_X_DATE_TEXT,
            row.y - 3,
            scale,
            &fonts.bold,
            &row.date_label,
        );
        // Titles are drawn verbatim; overlong ones run past the canvas edge
        draw_text_mut(
            img,
            TEXT_COLOR,
            EVENT_X_NAME,
            row.y - 3,
            scale,
            &fonts.regular,
            &row.title,
        );
        if let Some(time) = &row.time_label {
            draw_text_mut(
                img,
                TEXT_COLOR,
                EVENT_X_TIME_ICON,
                row.y,
                scale,
                &fonts.icon,
                CLOCK_ICON,
            );
            draw_text_mut(
                img,
                TEXT_COLOR,
                EVENT_X_TIME_TEXT,
                row.y - 3,
                scale,
                &fonts.bold,
                time,
            );
        }
    }

    if let Some(summary) = &plan.summary {
        let (w, _) = text_size(scale, &fonts.bold, &summary.text);
        draw_text_mut(
            img,
            TEXT_COLOR,
            (SUMMARY_BAND_WIDTH - w as i32) / 2 + SUMMARY_BAND_OFFSET,
            summary.y + 5,
            scale,
            &fonts.bold,
            &summary.text,
        );
    }

    let (footer_w, _) = text_size(scale, &fonts.regular, footer);
    draw_text_mut(
        img,
        TEXT_COLOR,
        (width - footer_w as i32) / 2,
        height - FOOTER_MARGIN_BOTTOM,
        scale,
        &fonts.regular,
        footer,
    );
}

/// Encode the finished canvas as JPEG bytes
///
/// Fixed quality settings keep the output byte-identical for identical
/// pixel input.
pub fn encode_jpeg(img: &RgbImage) -> CoverResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
    encoder.encode_image(img)?;
    Ok(buffer)
}
