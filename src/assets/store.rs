use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use sha2::Digest as _;

use crate::foundation::error::{PosterError, PosterResult};
use crate::poster::model::FontWeight;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// A single font face loaded from raw bytes.
///
/// Each face keeps its own font collection so shaping can never pick a glyph from a different
/// file than the one the rasterizer draws with.
pub struct FontFace {
    family: String,
    bytes: Arc<Vec<u8>>,
    font_ctx: parley::FontContext,
    data: vello_cpu::peniko::FontData,
}

impl FontFace {
    /// Register font bytes (TTF/OTF); the first family in the file is used.
    pub fn from_bytes(bytes: Vec<u8>) -> PosterResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| PosterError::load("no font families registered from font bytes"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PosterError::load("registered font family has no name"))?
            .to_string();

        let bytes = Arc::new(bytes);
        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
            0,
        );
        Ok(Self {
            family,
            bytes,
            font_ctx,
            data,
        })
    }

    /// Read and register a font file.
    pub fn from_path(path: &Path) -> PosterResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font '{}'", path.display()))
            .map_err(|e| PosterError::load(format!("{e:#}")))?;
        Self::from_bytes(bytes)
    }

    /// Family name as reported by the font.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Lowercase hex SHA-256 of the font file, for diagnosing which file was picked up.
    pub fn sha256_hex(&self) -> String {
        let digest = sha2::Sha256::digest(self.bytes.as_slice());
        let mut out = String::with_capacity(digest.len() * 2);
        for b in digest {
            out.push_str(&format!("{:02x}", b));
        }
        out
    }

    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.data
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("bytes", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

/// The faces used for the two poster weights.
#[derive(Debug)]
pub struct FontSet {
    bold: FontFace,
    medium: Option<FontFace>,
}

impl FontSet {
    /// `medium` falls back to `bold` when absent.
    pub fn new(bold: FontFace, medium: Option<FontFace>) -> Self {
        Self { bold, medium }
    }

    pub fn face(&self, weight: FontWeight) -> &FontFace {
        match weight {
            FontWeight::Bold => &self.bold,
            FontWeight::Medium => self.medium.as_ref().unwrap_or(&self.bold),
        }
    }

    pub(crate) fn face_mut(&mut self, weight: FontWeight) -> &mut FontFace {
        match weight {
            FontWeight::Bold => &mut self.bold,
            FontWeight::Medium => self.medium.as_mut().unwrap_or(&mut self.bold),
        }
    }
}

/// Stateful helper for building single-line Parley layouts.
pub(crate) struct TextLayoutEngine {
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape `text` as one unbroken line with `face`.
    pub(crate) fn layout_line(
        &mut self,
        face: &mut FontFace,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> PosterResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PosterError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut face.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(face.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}
