use crate::assets::decode::Background;
use crate::foundation::core::{Canvas, unpremultiply_rgba8_in_place};
use crate::foundation::error::{PosterError, PosterResult};
use crate::layout::block::{BlockLayout, layout_block};
use crate::poster::model::{LayerRole, PosterDocument, PosterStyle};
use crate::render::composite::{over_in_place, over_patch};
use crate::render::shadow::{ShadowParams, cast_shadow};
use crate::render::text::{TextLine, TextRenderer};

/// A finished poster raster.
///
/// Pixels are premultiplied RGBA8, row-major, at the background's native size.
#[derive(Clone, Debug, PartialEq)]
pub struct PosterFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PosterFrame {
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Premultiplied pixel at `(x, y)`; `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Straight-alpha copy suitable for encoding.
    pub fn to_rgba_image(&self) -> PosterResult<image::RgbaImage> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| PosterError::render("frame byte len does not match its size"))
    }
}

/// Renders poster documents over decoded backgrounds.
///
/// Every call to [`PosterCompositor::render`] starts from a fresh copy of the background; nothing
/// from a previous render can leak into the next one.
pub struct PosterCompositor<R> {
    text: R,
    ctx: Option<vello_cpu::RenderContext>,
}

impl<R: TextRenderer> PosterCompositor<R> {
    pub fn new(text: R) -> Self {
        Self { text, ctx: None }
    }

    pub fn text_renderer(&self) -> &R {
        &self.text
    }

    pub fn text_renderer_mut(&mut self) -> &mut R {
        &mut self.text
    }

    /// Wrap and place one layer of `doc` for `canvas` without drawing it.
    pub fn layout(
        &mut self,
        doc: &PosterDocument,
        role: LayerRole,
        canvas: Canvas,
    ) -> PosterResult<BlockLayout> {
        let text = &mut self.text;
        layout_block(role, doc.layer(role), canvas, |s, font| text.measure(s, font))
    }

    /// Render `doc` over `background`: headline first, then subtext, each optionally shadowed.
    #[tracing::instrument(
        skip_all,
        fields(
            width = tracing::field::Empty,
            height = tracing::field::Empty,
            shadow = doc.style.shadow_enabled
        )
    )]
    pub fn render(
        &mut self,
        background: &Background,
        doc: &PosterDocument,
    ) -> PosterResult<PosterFrame> {
        doc.validate()?;
        let canvas = background.canvas();
        let span = tracing::Span::current();
        span.record("width", canvas.width);
        span.record("height", canvas.height);

        let mut out = background.rgba8_premul().to_vec();
        let shadow = ShadowParams::for_canvas(canvas);
        for role in LayerRole::DRAW_ORDER {
            let block = self.layout(doc, role, canvas)?;
            if block.is_blank() {
                tracing::debug!(role = role.as_str(), "blank layer, nothing to draw");
                continue;
            }

            let layer = self.rasterize(&block, &doc.style, canvas)?;
            // One shadow per block, cast from all of its lines at once.
            if doc.style.shadow_enabled
                && let Some(patch) = cast_shadow(&layer, canvas, &shadow)?
            {
                over_patch(&mut out, canvas.width, canvas.height, &patch)?;
            }
            over_in_place(&mut out, &layer)?;
        }

        Ok(PosterFrame {
            width: canvas.width,
            height: canvas.height,
            data: out,
        })
    }

    /// Draw a block's lines onto a transparent full-canvas layer.
    fn rasterize(
        &mut self,
        block: &BlockLayout,
        style: &PosterStyle,
        canvas: Canvas,
    ) -> PosterResult<Vec<u8>> {
        let (w, h) = (canvas.width_u16(), canvas.height_u16());
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();

        let drawn = block.lines.iter().try_for_each(|line| {
            if line.text.is_empty() {
                return Ok(());
            }
            self.text.fill_line(
                &mut ctx,
                &TextLine {
                    text: &line.text,
                    font: block.font,
                    anchor_x: line.anchor_x,
                    baseline_y: line.baseline_y,
                    align: style.text_align,
                    color: style.text_color,
                },
            )
        });
        if let Err(e) = drawn {
            self.ctx = Some(ctx);
            return Err(e);
        }

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);
        Ok(pixmap.data_as_u8_slice().to_vec())
    }
}
