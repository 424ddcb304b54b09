use crate::foundation::core::Canvas;
use crate::foundation::error::PosterResult;
use crate::layout::wrap::wrap_paragraphs;
use crate::poster::model::{FontWeight, LayerRole, PosterLayer};

/// Lines may use at most this fraction of the canvas width before wrapping.
pub const MAX_LINE_WIDTH_FRACTION: f64 = 0.9;

/// Font request handed to the text renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpec {
    /// Pixel size (em height).
    pub size_px: f32,
    /// Face weight.
    pub weight: FontWeight,
}

/// One wrapped line with its anchor in canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    /// Alignment anchor; see [`crate::TextAlign`].
    pub anchor_x: f64,
    /// Alphabetic baseline.
    pub baseline_y: f64,
}

/// A text block after sizing and wrapping, ready to be drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockLayout {
    pub role: LayerRole,
    pub font: FontSpec,
    /// Vertical distance between consecutive baselines.
    pub line_advance: f64,
    pub lines: Vec<PlacedLine>,
}

impl BlockLayout {
    /// True when nothing in the block would produce pixels.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.text.is_empty())
    }
}

/// Maximum wrapped line width for a canvas.
pub fn max_line_width(canvas: Canvas) -> f32 {
    (f64::from(canvas.width) * MAX_LINE_WIDTH_FRACTION) as f32
}

/// Size, wrap and position one layer.
///
/// A layer whose pixel size rounds to zero lays out no lines at all.
pub fn layout_block<M>(
    role: LayerRole,
    layer: &PosterLayer,
    canvas: Canvas,
    mut measure: M,
) -> PosterResult<BlockLayout>
where
    M: FnMut(&str, FontSpec) -> PosterResult<f32>,
{
    let size_px = layer.font_size_px(canvas);
    let font = FontSpec {
        size_px: size_px as f32,
        weight: layer.font_weight,
    };
    let line_advance = f64::from(size_px) * role.line_height_multiplier();

    if size_px == 0 {
        tracing::debug!(role = role.as_str(), "font size rounds to 0 px, layer skipped");
        return Ok(BlockLayout {
            role,
            font,
            line_advance,
            lines: Vec::new(),
        });
    }

    let (anchor_x, start_y) = layer.anchor_px(canvas);
    let wrapped = wrap_paragraphs(&layer.text, max_line_width(canvas), |s| measure(s, font))?;
    let lines = wrapped
        .into_iter()
        .enumerate()
        .map(|(i, text)| PlacedLine {
            text,
            anchor_x,
            baseline_y: start_y + (i as f64) * line_advance,
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        role = role.as_str(),
        size_px,
        lines = lines.len(),
        "layer laid out"
    );
    Ok(BlockLayout {
        role,
        font,
        line_advance,
        lines,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/block.rs"]
mod tests;
