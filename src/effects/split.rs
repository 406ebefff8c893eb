//! Four-quadrant split compositing.
//!
//! Each quadrant receives the full sprite resampled to quadrant size and a
//! fixed per-quadrant color transform. The movement and swarm combinations
//! rerun their models independently per quadrant in quadrant-local
//! coordinates, with every write clipped to the owning quadrant.

use std::f64::consts::FRAC_PI_2;

use crate::composition::model::SwarmParams;
use crate::effects::color::{ColorMod, Tint};
use crate::effects::geometry::{Blit, Region};
use crate::effects::swarm::SwarmEffect;
use crate::effects::waypoint::WaypointModel;
use crate::foundation::core::{Frame, MatrixSize, Quadrant, TickCtx};
use crate::foundation::math::Rng64;

/// Sprite scale inside a quadrant when the movement combination is active,
/// relative to the base geometric scale.
const MOVE_SCALE_RATIO: f64 = 0.5;
/// Tick stagger between the initial pauses of the four quadrant movers.
const MOVE_STAGGER_TICKS: u32 = 5;

/// Breathing factor for quadrant `i`: quadrant-specific speed `1.5 + 0.4·i`
/// and phase offset `i·π/2`.
fn quadrant_breath(index: usize, elapsed_secs: f64) -> f64 {
    let speed = 1.5 + 0.4 * index as f64;
    let phase = index as f64 * FRAC_PI_2;
    0.8 + 0.3 * (speed * elapsed_secs + phase).sin()
}

/// Render the plain split composite: the full sprite fills each quadrant
/// (scale 0.5), transformed by that quadrant's [`ColorMod`]. With breathing,
/// each quadrant's size oscillates independently and the shrunk sprite stays
/// centered in its quadrant with the gap left empty.
pub(crate) fn render_split(target: &mut Frame, sprite: &Frame, ctx: TickCtx, breathing: bool) {
    let size = target.size();
    for q in Quadrant::ALL {
        let i = q.index();
        let region = Region::quadrant(q, size);
        let scale = if breathing {
            0.5 * quadrant_breath(i, ctx.elapsed_secs)
        } else {
            0.5
        };
        let (cx, cy) = region.center();
        let mut blit = Blit::centered(size, sprite, scale, cx, cy);
        blit.clip = region;
        blit.tint = Some(Tint::Mod(ColorMod::QUADRANT[i]));
        blit.draw(target, sprite);
    }
}

/// Split + movement: an independent waypoint model per quadrant, bounded to
/// quadrant-local coordinates, with staggered initial pauses.
#[derive(Clone, Debug)]
pub(crate) struct SplitMove {
    models: [WaypointModel; 4],
    scale: f64,
}

impl SplitMove {
    pub(crate) fn generate(size: MatrixSize, base_scale: f64, rng: &mut Rng64) -> Self {
        let scale = base_scale * MOVE_SCALE_RATIO;
        let margin = size.nf() * scale / 2.0;
        let models = Quadrant::ALL.map(|q| {
            let region = Region::quadrant(q, size);
            WaypointModel::new(
                region,
                margin.min(region.edge() / 2.0),
                q.index() as u32 * MOVE_STAGGER_TICKS,
                rng,
            )
        });
        Self { models, scale }
    }

    pub(crate) fn step_and_draw(
        &mut self,
        target: &mut Frame,
        sprite: &Frame,
        ctx: TickCtx,
        rng: &mut Rng64,
        breathing: bool,
    ) {
        let size = target.size();
        for q in Quadrant::ALL {
            let i = q.index();
            let pos = self.models[i].step(rng);
            let scale = if breathing {
                self.scale * quadrant_breath(i, ctx.elapsed_secs)
            } else {
                self.scale
            };
            let mut blit = Blit::centered(size, sprite, scale, pos.x, pos.y);
            blit.clip = Region::quadrant(q, size);
            blit.tint = Some(Tint::Mod(ColorMod::QUADRANT[i]));
            blit.draw(target, sprite);
        }
    }
}

/// Split + swarm: an independent population per quadrant with quadrant-local
/// trajectory ranges and quadrant-clipped drawing.
#[derive(Clone, Debug)]
pub(crate) struct SplitSwarm {
    quads: [SwarmEffect; 4],
}

impl SplitSwarm {
    pub(crate) fn generate(params: SwarmParams, size: MatrixSize, rng: &mut Rng64) -> Self {
        let quads = Quadrant::ALL
            .map(|q| SwarmEffect::generate(params, Region::quadrant(q, size), size, rng));
        Self { quads }
    }

    pub(crate) fn step_and_draw(
        &mut self,
        target: &mut Frame,
        sprite: &Frame,
        ctx: TickCtx,
        rng: &mut Rng64,
        breathing: bool,
    ) {
        for quad in &mut self.quads {
            quad.step_and_draw(target, sprite, ctx, rng, breathing);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/split.rs"]
mod tests;
