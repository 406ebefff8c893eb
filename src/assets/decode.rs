use anyhow::Context;

use crate::foundation::core::{Frame, MatrixSize, Pixel};
use crate::foundation::error::{ColibriError, ColibriResult};

/// Channel threshold at or above which a pixel counts as background white.
const WHITE_KEY_MIN: u8 = 240;

/// Alpha below which a decoded pixel is treated as fully transparent.
const ALPHA_KEY_MAX: u8 = 128;

/// Decode encoded image bytes into an N×N sprite frame.
///
/// The image is aspect-fit into the matrix with nearest-neighbor sampling and
/// centered; near-white and mostly-transparent pixels key to empty so typical
/// white-background sprite art reads as a cut-out.
pub fn decode_sprite(bytes: &[u8], size: MatrixSize) -> ColibriResult<Frame> {
    let dyn_img = image::load_from_memory(bytes).context("decode sprite from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (w, h) = rgba.dimensions();
    if w == 0 || h == 0 {
        return Err(ColibriError::asset("sprite image has a zero dimension"));
    }

    let n = size.n();
    let fit = (n as f64 / f64::from(w)).min(n as f64 / f64::from(h));
    let out_w = ((f64::from(w) * fit).floor() as usize).clamp(1, n);
    let out_h = ((f64::from(h) * fit).floor() as usize).clamp(1, n);
    let off_x = (n - out_w) / 2;
    let off_y = (n - out_h) / 2;

    let mut frame = Frame::empty(size);
    for ty in 0..out_h {
        for tx in 0..out_w {
            let sx = ((tx as f64 / fit).floor() as u32).min(w - 1);
            let sy = ((ty as f64 / fit).floor() as u32).min(h - 1);
            let px = key_pixel(rgba.get_pixel(sx, sy).0);
            if !px.is_empty() {
                frame.set((off_x + tx) as i64, (off_y + ty) as i64, px);
            }
        }
    }
    Ok(frame)
}

fn key_pixel([r, g, b, a]: [u8; 4]) -> Pixel {
    if a < ALPHA_KEY_MAX {
        return Pixel::EMPTY;
    }
    if r >= WHITE_KEY_MIN && g >= WHITE_KEY_MIN && b >= WHITE_KEY_MIN {
        return Pixel::EMPTY;
    }
    Pixel::new(r, g, b)
}

/// Deterministic fallback sprite: a solid centered block covering half the
/// matrix edge. Substituted when decoding fails so the engine always has a
/// valid sprite to animate.
pub fn fallback_sprite(size: MatrixSize, color: Pixel) -> Frame {
    let n = size.n();
    let edge = n / 2;
    let off = n / 4;
    let mut frame = Frame::empty(size);
    for y in off..off + edge {
        for x in off..off + edge {
            frame.set(x as i64, y as i64, color);
        }
    }
    frame
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
