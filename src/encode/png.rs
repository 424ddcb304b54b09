use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::foundation::error::{PosterError, PosterResult};
use crate::render::compositor::PosterFrame;

/// File name prefix of exported posters.
pub const EXPORT_PREFIX: &str = "magic-poster-";

/// `magic-poster-<timestamp_ms>.png`
pub fn export_file_name(timestamp_ms: u128) -> String {
    format!("{EXPORT_PREFIX}{timestamp_ms}.png")
}

/// Milliseconds since the Unix epoch (0 if the clock is before it).
pub fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Encode a frame as PNG bytes with straight alpha.
pub fn encode_png(frame: &PosterFrame) -> PosterResult<Vec<u8>> {
    let img = frame.to_rgba_image()?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PosterError::export(format!("encode png: {e}")))?;
    Ok(buf)
}

/// An encoded poster together with its download name.
#[derive(Clone, Debug)]
pub struct ExportedPoster {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl ExportedPoster {
    #[tracing::instrument(skip(frame), fields(width = frame.width, height = frame.height))]
    pub fn from_frame(frame: &PosterFrame, timestamp_ms: u128) -> PosterResult<Self> {
        let png = encode_png(frame)?;
        tracing::debug!(bytes = png.len(), "poster encoded");
        Ok(Self {
            file_name: export_file_name(timestamp_ms),
            width: frame.width,
            height: frame.height,
            png,
        })
    }

    /// Write into `dir` (created if missing) and return the full path.
    pub fn write_to_dir(&self, dir: &Path) -> PosterResult<PathBuf> {
        std::fs::create_dir_all(dir).map_err(|e| {
            PosterError::export(format!("create output dir '{}': {e}", dir.display()))
        })?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.png)
            .map_err(|e| PosterError::export(format!("write '{}': {e}", path.display())))?;
        Ok(path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
