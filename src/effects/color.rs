//! Deterministic per-pixel color transforms.
//!
//! Two families: fixed channel transforms used by the split-quadrant
//! compositor and swarm actor tints ([`ColorMod`]), and the RGB→HSL→RGB
//! remap that gives pollination and swarm actors their identity
//! ([`HslShift`]). Both are pure functions: no hidden state, bit-reproducible
//! for fixed inputs.

use crate::foundation::core::Pixel;

/// Convert a pixel to `(hue_degrees, saturation, lightness)` with hue in
/// `[0, 360)` and saturation/lightness in `[0, 1]`, using the standard
/// max/min/delta formulas. Hue of an achromatic pixel is 0.
pub fn rgb_to_hsl(px: Pixel) -> (f64, f64, f64) {
    let r = f64::from(px.r) / 255.0;
    let g = f64::from(px.g) / 255.0;
    let b = f64::from(px.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    if delta == 0.0 {
        return (0.0, 0.0, l);
    }

    let s = delta / (1.0 - (2.0 * l - 1.0).abs());
    let h = if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    (h.rem_euclid(360.0), s, l)
}

/// Convert HSL back to a pixel via the standard chroma/intermediate/match
/// construction. Inverse of [`rgb_to_hsl`] up to u8 rounding.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Pixel {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    fn to_u8(v: f64) -> u8 {
        ((v * 255.0).round()).clamp(0.0, 255.0) as u8
    }

    Pixel::new(to_u8(r + m), to_u8(g + m), to_u8(b + m))
}

/// Hue/saturation/brightness remap applied per actor.
///
/// The hue offset is added modulo 360 (normalized non-negative); saturation
/// and brightness multipliers are clamped so the scaled values never exceed 1.
/// With a zero offset and unit multipliers this is the identity.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HslShift {
    /// Hue offset in degrees.
    pub hue_deg: f64,
    /// Saturation multiplier.
    pub saturation: f64,
    /// Lightness ("brightness") multiplier.
    pub brightness: f64,
}

impl HslShift {
    /// Pure-hue rotation with unit saturation/brightness.
    pub fn hue(hue_deg: f64) -> Self {
        Self {
            hue_deg,
            saturation: 1.0,
            brightness: 1.0,
        }
    }

    /// Apply the remap. Empty pixels pass through unchanged.
    pub fn apply(self, px: Pixel) -> Pixel {
        if px.is_empty() {
            return px;
        }
        let (h, s, l) = rgb_to_hsl(px);
        let h = (h + self.hue_deg).rem_euclid(360.0);
        let s = (s * self.saturation).clamp(0.0, 1.0);
        let l = (l * self.brightness).clamp(0.0, 1.0);
        hsl_to_rgb(h, s, l)
    }
}

/// Fixed per-quadrant / per-actor channel transform.
///
/// The first four variants are the split-quadrant transforms in quadrant
/// index order; the hue rotations extend the set to the six swarm actor
/// tints selected by `actor_index % 6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ColorMod {
    /// Boost red, attenuate green/blue.
    RedShift,
    /// Boost blue, attenuate red/green.
    BlueShift,
    /// Scale every channel up, clamped into a mid band.
    SaturationBoost,
    /// Swap red and blue channels.
    ChannelSwap,
    /// Rotate hue by +120° through the HSL round trip.
    HueRotate120,
    /// Rotate hue by +240° through the HSL round trip.
    HueRotate240,
}

impl ColorMod {
    /// The split-quadrant transforms, indexed by quadrant.
    pub const QUADRANT: [ColorMod; 4] = [
        ColorMod::RedShift,
        ColorMod::BlueShift,
        ColorMod::SaturationBoost,
        ColorMod::ChannelSwap,
    ];

    /// All six actor tints in selection order.
    pub const ACTOR: [ColorMod; 6] = [
        ColorMod::RedShift,
        ColorMod::BlueShift,
        ColorMod::SaturationBoost,
        ColorMod::ChannelSwap,
        ColorMod::HueRotate120,
        ColorMod::HueRotate240,
    ];

    /// Tint for a swarm actor index.
    pub fn for_actor(index: usize) -> ColorMod {
        Self::ACTOR[index % Self::ACTOR.len()]
    }

    /// Apply the transform. Empty pixels pass through unchanged.
    pub fn apply(self, px: Pixel) -> Pixel {
        if px.is_empty() {
            return px;
        }
        match self {
            Self::RedShift => Pixel::new(
                scaled(px.r, 1.3, 30, 255),
                scaled(px.g, 0.7, 20, 255),
                scaled(px.b, 0.6, 20, 255),
            ),
            Self::BlueShift => Pixel::new(
                scaled(px.r, 0.6, 20, 255),
                scaled(px.g, 0.8, 20, 255),
                scaled(px.b, 1.4, 30, 255),
            ),
            Self::SaturationBoost => Pixel::new(
                scaled(px.r, 1.2, 25, 240),
                scaled(px.g, 1.2, 25, 240),
                scaled(px.b, 1.2, 25, 240),
            ),
            Self::ChannelSwap => Pixel::new(px.b.max(20), px.g.max(20), px.r.max(20)),
            Self::HueRotate120 => HslShift::hue(120.0).apply(px),
            Self::HueRotate240 => HslShift::hue(240.0).apply(px),
        }
    }
}

fn scaled(c: u8, factor: f64, floor: u8, ceil: u8) -> u8 {
    let v = (f64::from(c) * factor).round();
    (v.clamp(f64::from(floor), f64::from(ceil))) as u8
}

/// Per-draw pixel tint applied by the blit primitive.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Tint {
    /// Fixed channel transform.
    Mod(ColorMod),
    /// HSL hue/saturation/brightness remap.
    Hsl(HslShift),
}

impl Tint {
    /// Apply the tint. Empty pixels pass through unchanged.
    pub fn apply(self, px: Pixel) -> Pixel {
        match self {
            Self::Mod(m) => m.apply(px),
            Self::Hsl(h) => h.apply(px),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/color.rs"]
mod tests;
