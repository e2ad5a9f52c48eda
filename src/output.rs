use crate::error::{persistence_error, CoverResult};
use chrono::NaiveDateTime;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// Create the output directory if it does not exist yet
///
/// "Already exists" is the one recoverable condition in the whole run;
/// every other filesystem error is fatal.
pub fn create_output_dir(path: &str) -> CoverResult<()> {
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(persistence_error(&format!(
            "failed to create output directory {path}: {e}"
        ))),
    }
}

/// Timestamped output filename
pub fn cover_filename(timestamp: NaiveDateTime) -> String {
    format!("via_fbcover_{}.jpg", timestamp.format("%y%m%d%H%M%S"))
}

/// Write the encoded cover into the output directory, returning its path
pub fn write_cover(dir: &str, jpeg: &[u8], timestamp: NaiveDateTime) -> CoverResult<PathBuf> {
    create_output_dir(dir)?;

    let path = Path::new(dir).join(cover_filename(timestamp));
    fs::write(&path, jpeg)
        .map_err(|e| persistence_error(&format!("failed to write {}: {e}", path.display())))?;

    info!("Cover image written to {}", path.display());
    Ok(path)
}
