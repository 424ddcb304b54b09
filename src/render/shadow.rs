//! Soft drop shadow cast by a rendered text layer.
//!
//! The shadow is the layer's coverage tinted `rgba(0, 0, 0, 0.5)`, blurred with a Gaussian whose
//! sigma is half the blur length (the 2D canvas `shadowBlur` convention) and shifted by a small
//! offset. Blur length and offset scale with canvas width so the look is resolution independent.

use crate::foundation::core::Canvas;
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::mul_div255_u8;
use crate::render::composite::Patch;

/// Blur length as a fraction of canvas width.
pub const BLUR_FRACTION: f64 = 0.01;
/// Offset along both axes as a fraction of canvas width.
pub const OFFSET_FRACTION: f64 = 0.002;
/// Shadow opacity (`0.5` in 8-bit).
pub const SHADOW_ALPHA: u8 = 128;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowParams {
    pub blur_px: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub alpha: u8,
}

impl ShadowParams {
    /// The studio shadow for a given canvas.
    pub fn for_canvas(canvas: Canvas) -> Self {
        let w = f64::from(canvas.width);
        Self {
            blur_px: w * BLUR_FRACTION,
            offset_x: w * OFFSET_FRACTION,
            offset_y: w * OFFSET_FRACTION,
            alpha: SHADOW_ALPHA,
        }
    }

    /// Gaussian sigma in pixels.
    pub fn sigma(&self) -> f32 {
        (self.blur_px / 2.0) as f32
    }

    /// Kernel radius covering three sigmas.
    pub fn radius(&self) -> u32 {
        (f64::from(self.sigma()) * 3.0).ceil().max(0.0) as u32
    }
}

/// Build the shadow patch for a full-canvas premultiplied layer.
///
/// Returns `None` when the layer has no coverage. The patch only spans the layer's bounding box
/// grown by the blur radius, so large canvases with little text stay cheap.
pub fn cast_shadow(
    layer: &[u8],
    canvas: Canvas,
    params: &ShadowParams,
) -> PosterResult<Option<Patch>> {
    if layer.len() != canvas.rgba_len() {
        return Err(PosterError::render("shadow layer byte len mismatch"));
    }
    let Some((bx0, by0, bx1, by1)) = alpha_bounds(layer, canvas.width) else {
        return Ok(None);
    };

    let r = params.radius();
    let pw = (bx1 - bx0) + 2 * r;
    let ph = (by1 - by0) + 2 * r;
    let mut tinted = vec![0u8; (pw as usize) * (ph as usize) * 4];
    let alpha = u16::from(params.alpha);
    for y in by0..by1 {
        for x in bx0..bx1 {
            let a = layer[((y as usize) * (canvas.width as usize) + x as usize) * 4 + 3];
            if a == 0 {
                continue;
            }
            let ty = (y - by0 + r) as usize;
            let tx = (x - bx0 + r) as usize;
            tinted[(ty * pw as usize + tx) * 4 + 3] = mul_div255_u8(u16::from(a), alpha);
        }
    }

    let data = if r == 0 {
        tinted
    } else {
        let kernel = gaussian_kernel_q16(r, params.sigma())?;
        let mut tmp = vec![0u8; tinted.len()];
        let mut out = vec![0u8; tinted.len()];
        blur_rgba8_premul_q16(&tinted, &mut out, &mut tmp, pw, ph, &kernel);
        out
    };

    Ok(Some(Patch {
        x: i64::from(bx0) - i64::from(r) + params.offset_x.round() as i64,
        y: i64::from(by0) - i64::from(r) + params.offset_y.round() as i64,
        width: pw,
        height: ph,
        data,
    }))
}

/// Half-open bounding box `[x0, x1) x [y0, y1)` of pixels with non-zero alpha.
fn alpha_bounds(rgba: &[u8], width: u32) -> Option<(u32, u32, u32, u32)> {
    let w = width as usize;
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (i, px) in rgba.chunks_exact(4).enumerate() {
        if px[3] == 0 {
            continue;
        }
        let x = (i % w) as u32;
        let y = (i / w) as u32;
        bounds = Some(match bounds {
            None => (x, y, x + 1, y + 1),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1)),
        });
    }
    bounds
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> PosterResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(PosterError::validation("blur sigma must be finite and > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Put the rounding residue on the center tap so the kernel sums to exactly 1.0.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Separable blur: one pass along X into `tmp`, one along Y into `dst`.
fn blur_rgba8_premul_q16(
    src: &[u8],
    dst: &mut [u8],
    tmp: &mut [u8],
    width: u32,
    height: u32,
    kernel_q16: &[u32],
) {
    if kernel_q16.len() == 1 {
        dst.copy_from_slice(src);
        return;
    }
    blur_pass_q16(src, tmp, width, height, kernel_q16, Axis::X);
    blur_pass_q16(tmp, dst, width, height, kernel_q16, Axis::Y);
}

/// One 1D convolution pass; samples past the edge clamp to the border pixel.
fn blur_pass_q16(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i64;
    let (w, h) = (i64::from(width), i64::from(height));
    let extent = match axis {
        Axis::X => w,
        Axis::Y => h,
    };
    for y in 0..h {
        for x in 0..w {
            let along = match axis {
                Axis::X => x,
                Axis::Y => y,
            };
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let s = (along + ki as i64 - radius).clamp(0, extent - 1);
                let (sx, sy) = match axis {
                    Axis::X => (s, y),
                    Axis::Y => (x, s),
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for (a, &v) in acc.iter_mut().zip(&src[idx..idx + 4]) {
                    *a += u64::from(kw) * u64::from(v);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            for (d, a) in dst[out..out + 4].iter_mut().zip(acc) {
                *d = q16_to_u8(a);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/shadow.rs"]
mod tests;
