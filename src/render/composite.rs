use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u8};

pub type PremulRgba8 = [u8; 4];

/// Source-over for one premultiplied pixel.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3] as u16;
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    out[3] = add_sat_u8(src[3], mul_div255_u8(u16::from(dst[3]), inv));
    for c in 0..3 {
        let dc = mul_div255_u8(u16::from(dst[c]), inv);
        out[c] = add_sat_u8(src[c], dc);
    }
    out
}

/// Source-over of a full-size layer onto `dst`.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> PosterResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PosterError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Premultiplied RGBA8 tile placed at `(x, y)` in canvas pixels; may hang off any edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Patch {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Source-over of `patch` onto a `width x height` canvas, clipped to the canvas.
pub fn over_patch(dst: &mut [u8], width: u32, height: u32, patch: &Patch) -> PosterResult<()> {
    if dst.len() != (width as usize) * (height as usize) * 4 {
        return Err(PosterError::render("canvas byte len mismatch"));
    }
    if patch.data.len() != (patch.width as usize) * (patch.height as usize) * 4 {
        return Err(PosterError::render("patch byte len mismatch"));
    }

    let x0 = patch.x.max(0);
    let y0 = patch.y.max(0);
    let x1 = (patch.x + i64::from(patch.width)).min(i64::from(width));
    let y1 = (patch.y + i64::from(patch.height)).min(i64::from(height));
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    for y in y0..y1 {
        let py = (y - patch.y) as usize;
        for x in x0..x1 {
            let px = (x - patch.x) as usize;
            let si = (py * patch.width as usize + px) * 4;
            let s = &patch.data[si..si + 4];
            if s[3] == 0 {
                continue;
            }
            let di = ((y as usize) * (width as usize) + x as usize) * 4;
            let d = &mut dst[di..di + 4];
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
