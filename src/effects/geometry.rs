//! Nearest-neighbor sprite blitting and the breathing scale envelope.
//!
//! All effects funnel their pixel writes through [`Blit::draw`], which
//! bounds-checks every target and source coordinate and silently skips
//! invalid ones. Nothing here clamps a trajectory back into range; an
//! off-screen actor simply produces no writes.

use crate::effects::color::Tint;
use crate::foundation::core::{Frame, MatrixSize, Quadrant};

/// Axis-aligned region of the matrix, `[x0, x1) × [y0, y1)` in pixel
/// coordinates. Used both as a draw clip and as an actor's motion space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Region {
    pub(crate) x0: f64,
    pub(crate) y0: f64,
    pub(crate) x1: f64,
    pub(crate) y1: f64,
}

impl Region {
    pub(crate) fn full(size: MatrixSize) -> Self {
        Self {
            x0: 0.0,
            y0: 0.0,
            x1: size.nf(),
            y1: size.nf(),
        }
    }

    pub(crate) fn quadrant(q: Quadrant, size: MatrixSize) -> Self {
        let (ox, oy) = q.origin(size);
        let edge = size.half() as f64;
        Self {
            x0: ox as f64,
            y0: oy as f64,
            x1: ox as f64 + edge,
            y1: oy as f64 + edge,
        }
    }

    /// Region edge length. Regions are always square here.
    pub(crate) fn edge(&self) -> f64 {
        self.x1 - self.x0
    }

    pub(crate) fn center(&self) -> (f64, f64) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    pub(crate) fn contains(&self, x: i64, y: i64) -> bool {
        let (xf, yf) = (x as f64, y as f64);
        xf >= self.x0 && xf < self.x1 && yf >= self.y0 && yf < self.y1
    }
}

/// One sprite draw: nearest-neighbor resample of the full sprite to
/// `floor(N·scale)` pixels with its top-left corner at the origin.
///
/// Target pixel `(tx, ty)` samples source `floor((t − origin) / scale)`;
/// out-of-bounds source or target coordinates are skipped. With
/// `only_if_empty` a pixel is written only when the target is still empty,
/// which makes draw order an explicit priority among overlapping draws.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Blit {
    pub(crate) scale: f64,
    pub(crate) origin_x: f64,
    pub(crate) origin_y: f64,
    pub(crate) clip: Region,
    pub(crate) only_if_empty: bool,
    pub(crate) tint: Option<Tint>,
}

impl Blit {
    /// A full-frame, overwrite-mode, untinted blit at `scale` with the sprite
    /// center at `(cx, cy)`.
    pub(crate) fn centered(target_size: MatrixSize, sprite: &Frame, scale: f64, cx: f64, cy: f64) -> Self {
        let scaled = (sprite.size().nf() * scale).floor();
        Self {
            scale,
            origin_x: cx - scaled / 2.0,
            origin_y: cy - scaled / 2.0,
            clip: Region::full(target_size),
            only_if_empty: false,
            tint: None,
        }
    }

    pub(crate) fn draw(&self, target: &mut Frame, sprite: &Frame) {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return;
        }
        let src_n = sprite.size().n() as i64;
        let scaled = (sprite.size().nf() * self.scale).floor() as i64;
        if scaled <= 0 {
            return;
        }

        let ox = self.origin_x.floor() as i64;
        let oy = self.origin_y.floor() as i64;

        for ty in oy..oy + scaled {
            for tx in ox..ox + scaled {
                if !self.clip.contains(tx, ty) {
                    continue;
                }
                let sx = (((tx - ox) as f64) / self.scale).floor() as i64;
                let sy = (((ty - oy) as f64) / self.scale).floor() as i64;
                if sx < 0 || sy < 0 || sx >= src_n || sy >= src_n {
                    continue;
                }
                let Some(src) = sprite.get(sx, sy) else {
                    continue;
                };
                if src.is_empty() {
                    continue;
                }
                if self.only_if_empty {
                    match target.get(tx, ty) {
                        Some(existing) if existing.is_empty() => {}
                        _ => continue,
                    }
                }
                let px = match self.tint {
                    Some(tint) => tint.apply(src),
                    None => src,
                };
                target.set(tx, ty, px);
            }
        }
    }
}

/// Sinusoidal breathing modulation: `base · (0.8 + 0.3·sin(2t))`, time-driven
/// so its phase is independent of the tick rate.
pub(crate) fn breathing_scale(base: f64, elapsed_secs: f64) -> f64 {
    base * (0.8 + 0.3 * (2.0 * elapsed_secs).sin())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/geometry.rs"]
mod tests;
