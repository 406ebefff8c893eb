use crate::assets::decode::{decode_sprite, fallback_sprite};
use crate::foundation::core::{Frame, MatrixSize, Pixel, Tick};
use crate::foundation::error::{ColibriError, ColibriResult};

/// Fallback color for the flying subject when its sprite fails to decode.
const BIRD_FALLBACK: Pixel = Pixel::new(255, 140, 0);

/// Fallback color for the flower when its sprite fails to decode.
const FLOWER_FALLBACK: Pixel = Pixel::new(255, 105, 180);

/// Immutable sprite set consumed by the effect engine.
///
/// Two sprites represent alternating wing positions of the flying subject;
/// one represents the stationary flower. All decoding is front-loaded here;
/// nothing at tick time performs IO or mutates a sprite.
#[derive(Clone, Debug)]
pub struct SpriteStore {
    size: MatrixSize,
    wing_up: Frame,
    wing_down: Frame,
    flower: Frame,
}

impl SpriteStore {
    /// Build a store from already-decoded frames; every frame must match
    /// `size`.
    pub fn new(
        size: MatrixSize,
        wing_up: Frame,
        wing_down: Frame,
        flower: Frame,
    ) -> ColibriResult<Self> {
        for (name, frame) in [
            ("wing_up", &wing_up),
            ("wing_down", &wing_down),
            ("flower", &flower),
        ] {
            if frame.size() != size {
                return Err(ColibriError::asset(format!(
                    "sprite '{name}' does not match matrix size {}",
                    size.n()
                )));
            }
        }
        Ok(Self {
            size,
            wing_up,
            wing_down,
            flower,
        })
    }

    /// Decode the three sprites from encoded image bytes, substituting a
    /// deterministic fallback block (and logging a warning) for any sprite
    /// that fails to decode. This constructor never fails.
    pub fn load_or_fallback(
        size: MatrixSize,
        wing_up_bytes: &[u8],
        wing_down_bytes: &[u8],
        flower_bytes: &[u8],
    ) -> Self {
        let decode = |name: &str, bytes: &[u8], color: Pixel| match decode_sprite(bytes, size) {
            Ok(frame) => frame,
            Err(err) => {
                tracing::warn!(sprite = name, error = %err, "sprite decode failed, using fallback block");
                fallback_sprite(size, color)
            }
        };
        Self {
            size,
            wing_up: decode("wing_up", wing_up_bytes, BIRD_FALLBACK),
            wing_down: decode("wing_down", wing_down_bytes, BIRD_FALLBACK),
            flower: decode("flower", flower_bytes, FLOWER_FALLBACK),
        }
    }

    /// The matrix size every sprite in this store was decoded for.
    pub fn size(&self) -> MatrixSize {
        self.size
    }

    /// Flight-phase sprite for a tick; the wings alternate at the session
    /// tick rate.
    pub fn flight(&self, tick: Tick) -> &Frame {
        if tick.0 % 2 == 0 {
            &self.wing_up
        } else {
            &self.wing_down
        }
    }

    /// The stationary flower sprite.
    pub fn flower(&self) -> &Frame {
        &self.flower
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
