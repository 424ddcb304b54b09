use crate::assets::color::TextColor;
use crate::assets::store::{FontSet, TextBrushRgba8, TextLayoutEngine};
use crate::foundation::error::PosterResult;
use crate::layout::block::FontSpec;
use crate::poster::model::TextAlign;

/// A single line ready to be filled.
#[derive(Clone, Copy, Debug)]
pub struct TextLine<'a> {
    pub text: &'a str,
    pub font: FontSpec,
    /// Alignment anchor in canvas pixels.
    pub anchor_x: f64,
    /// Alphabetic baseline in canvas pixels.
    pub baseline_y: f64,
    pub align: TextAlign,
    pub color: TextColor,
}

/// Measures and draws single lines of text.
///
/// The compositor owns wrapping and vertical placement; alignment against `anchor_x` is the
/// renderer's job, exactly like a 2D canvas `fillText` with `textAlign` set.
pub trait TextRenderer {
    /// Advance width of `text` in pixels.
    fn measure(&mut self, text: &str, font: FontSpec) -> PosterResult<f32>;

    /// Fill `line` into `ctx`. Implementations set their own transform and paint.
    fn fill_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        line: &TextLine<'_>,
    ) -> PosterResult<()>;
}

impl<T: TextRenderer + ?Sized> TextRenderer for Box<T> {
    fn measure(&mut self, text: &str, font: FontSpec) -> PosterResult<f32> {
        (**self).measure(text, font)
    }

    fn fill_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        line: &TextLine<'_>,
    ) -> PosterResult<()> {
        (**self).fill_line(ctx, line)
    }
}

/// Parley-shaped, `vello_cpu`-rasterized text from user supplied font files.
pub struct FontTextRenderer {
    fonts: FontSet,
    engine: TextLayoutEngine,
}

impl FontTextRenderer {
    pub fn new(fonts: FontSet) -> Self {
        Self {
            fonts,
            engine: TextLayoutEngine::new(),
        }
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }
}

impl TextRenderer for FontTextRenderer {
    fn measure(&mut self, text: &str, font: FontSpec) -> PosterResult<f32> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let face = self.fonts.face_mut(font.weight);
        let layout = self
            .engine
            .layout_line(face, text, font.size_px, TextBrushRgba8::default())?;
        Ok(layout.width())
    }

    fn fill_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        line: &TextLine<'_>,
    ) -> PosterResult<()> {
        if line.text.is_empty() {
            return Ok(());
        }
        let c = line.color;
        let brush = TextBrushRgba8 {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        };
        let face = self.fonts.face_mut(line.font.weight);
        let layout = self
            .engine
            .layout_line(face, line.text, line.font.size_px, brush)?;
        let font = face.font_data().clone();

        let width = f64::from(layout.width());
        let first_baseline = layout
            .lines()
            .next()
            .map(|l| f64::from(l.metrics().baseline))
            .unwrap_or(0.0);
        let origin_x = line.anchor_x - width * line.align.anchor_fraction();
        let origin_y = line.baseline_y - first_baseline;
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin_x, origin_y)));

        for layout_line in layout.lines() {
            for item in layout_line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}
