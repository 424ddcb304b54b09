use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use base64::Engine as _;

use crate::foundation::core::{Canvas, premultiply_rgba8_in_place};
use crate::foundation::error::{PosterError, PosterResult};

/// Where a poster background comes from.
///
/// Backgrounds are handed over by the image provider as opaque references: a file on disk, an
/// inline `data:` URL, or raw encoded bytes already in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackgroundSource {
    /// Encoded image file on disk.
    Path(PathBuf),
    /// `data:image/...;base64,...` URL.
    DataUrl(String),
    /// `http(s)` URL. Fetching is the provider's job, so loading these always fails.
    Remote(String),
    /// Encoded image bytes.
    Bytes(Arc<[u8]>),
}

impl BackgroundSource {
    /// Classify a background reference string.
    pub fn parse(reference: &str) -> Self {
        let r = reference.trim();
        let lower = r.get(..8).unwrap_or(r).to_ascii_lowercase();
        if lower.starts_with("data:") {
            Self::DataUrl(r.to_owned())
        } else if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Remote(r.to_owned())
        } else {
            Self::Path(PathBuf::from(r))
        }
    }

    /// Resolve relative file paths against `base_dir`; other sources are returned unchanged.
    pub fn resolve_against(self, base_dir: &Path) -> Self {
        match self {
            Self::Path(p) if p.is_relative() => Self::Path(base_dir.join(p)),
            other => other,
        }
    }

    /// Short description for logs and error messages (never the full data URL payload).
    pub fn describe(&self) -> String {
        match self {
            Self::Path(p) => p.display().to_string(),
            Self::DataUrl(u) => {
                let head = u.split(',').next().unwrap_or("data:");
                format!("{head},<{} bytes>", u.len())
            }
            Self::Remote(u) => u.clone(),
            Self::Bytes(b) => format!("<{} bytes>", b.len()),
        }
    }
}

/// A decoded background raster in premultiplied RGBA8.
///
/// Immutable once loaded; every render copies it onto a fresh canvas.
#[derive(Clone, Debug)]
pub struct Background {
    canvas: Canvas,
    rgba8_premul: Arc<Vec<u8>>,
}

impl Background {
    /// Load and decode a background from any supported source.
    #[tracing::instrument(skip(source), fields(source = %source.describe()))]
    pub fn load(source: &BackgroundSource) -> PosterResult<Self> {
        let bytes = read_source(source)?;
        let bg = Self::decode(&bytes)?;
        tracing::debug!(
            width = bg.canvas.width,
            height = bg.canvas.height,
            "background decoded"
        );
        Ok(bg)
    }

    /// Decode encoded image bytes (PNG, JPEG, ... as supported by `image`).
    pub fn decode(bytes: &[u8]) -> PosterResult<Self> {
        let dyn_img = image::load_from_memory(bytes)
            .map_err(|e| PosterError::load(format!("decode background image: {e}")))?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_straight_rgba8(width, height, rgba.into_raw())
    }

    /// Build a background from straight-alpha RGBA8 pixels.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> PosterResult<Self> {
        let canvas = Canvas::new(width, height).map_err(|e| PosterError::load(e.to_string()))?;
        if rgba.len() != canvas.rgba_len() {
            return Err(PosterError::load(format!(
                "background byte len {} does not match {width}x{height}",
                rgba.len()
            )));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            canvas,
            rgba8_premul: Arc::new(rgba),
        })
    }

    /// Uniformly filled background, handy for previews without a provider image.
    pub fn solid(width: u32, height: u32, straight_rgba: [u8; 4]) -> PosterResult<Self> {
        let canvas = Canvas::new(width, height)?;
        let px = straight_rgba.repeat((width as usize) * (height as usize));
        debug_assert_eq!(px.len(), canvas.rgba_len());
        Self::from_straight_rgba8(width, height, px)
    }

    /// Native pixel dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Premultiplied pixel bytes, row-major.
    pub fn rgba8_premul(&self) -> &[u8] {
        self.rgba8_premul.as_slice()
    }
}

fn read_source(source: &BackgroundSource) -> PosterResult<Vec<u8>> {
    match source {
        BackgroundSource::Path(p) => std::fs::read(p)
            .with_context(|| format!("read background '{}'", p.display()))
            .map_err(|e| PosterError::load(format!("{e:#}"))),
        BackgroundSource::DataUrl(u) => decode_data_url(u),
        BackgroundSource::Remote(u) => Err(PosterError::load(format!(
            "remote background '{u}' must be fetched by the image provider first"
        ))),
        BackgroundSource::Bytes(b) => Ok(b.to_vec()),
    }
}

/// Decode the payload of a base64 `data:` URL.
pub(crate) fn decode_data_url(url: &str) -> PosterResult<Vec<u8>> {
    let rest = url
        .get(5..)
        .filter(|_| url[..5].eq_ignore_ascii_case("data:"))
        .ok_or_else(|| PosterError::load("data url must start with 'data:'"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| PosterError::load("data url is missing ',' separator"))?;
    if !meta
        .split(';')
        .any(|part| part.eq_ignore_ascii_case("base64"))
    {
        return Err(PosterError::load("only base64 data urls are supported"));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| PosterError::load(format!("invalid base64 in data url: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
