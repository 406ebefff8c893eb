//! Pollination choreography: four staggered actors fly in from off-screen
//! left, hover at the flower's pollination point, then exit toward the upper
//! right, on a fixed 640-tick cycle.
//!
//! Actor phase is a pure function of the cycle tick, which keeps the phase
//! windows mutually exclusive and makes a cycle wrap an exact reset of all
//! actor state. Draw order depends on phase: inbound and pollinating actors
//! render beneath the flower, outbound actors above it.

use std::f64::consts::{PI, TAU};

use crate::assets::store::SpriteStore;
use crate::effects::color::{HslShift, Tint};
use crate::effects::geometry::Blit;
use crate::foundation::core::{Frame, TickCtx, Vec2};
use crate::foundation::math::lerp;

/// Ticks in one full pollination cycle.
pub(crate) const CYCLE_TICKS: u64 = 640;
/// Number of choreographed actors.
pub(crate) const ACTOR_COUNT: usize = 4;
/// Tick offset between consecutive actors' starts.
const STAGGER_TICKS: u64 = 160;
const FLY_IN_TICKS: u64 = 40;
const POLLINATE_TICKS: u64 = 80;
const FLY_OUT_TICKS: u64 = 40;

/// Actor scale while flying; FlyOut shrinks from this.
const ACTOR_SCALE: f64 = 0.3;
/// Flower sprite scale.
const FLOWER_SCALE: f64 = 0.6;
/// How far off-screen the entry and exit points sit, in pixels.
const OFF_SCREEN: f64 = 6.0;
/// Vertical arc amplitude during FlyIn.
const ARC_AMPLITUDE: f64 = 3.0;
/// Maximum scale shrink over FlyOut.
const FLY_OUT_SHRINK: f64 = 0.6;

/// Phase of one pollination actor at a given cycle tick. Progress values are
/// in `(0, 1]` within their phase window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PollinationPhase {
    /// Off-screen at the start coordinate, waiting for the stagger offset.
    Waiting,
    /// Interpolating from off-screen left to the pollination point.
    FlyIn(f64),
    /// Jittering around the pollination point.
    Pollinate(f64),
    /// Interpolating from the pollination point off the upper-right edge.
    FlyOut(f64),
}

/// The choreography state machine. Owns nothing but the cycle timer; all
/// per-actor state derives from it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PollinationEffect {
    cycle_tick: u64,
}

impl PollinationEffect {
    pub(crate) fn new() -> Self {
        Self { cycle_tick: 0 }
    }

    /// Phase of `actor` at `cycle_tick`. Pure; exercised directly by tests.
    pub(crate) fn phase_for(actor: usize, cycle_tick: u64) -> PollinationPhase {
        let start = actor as u64 * STAGGER_TICKS;
        if cycle_tick <= start {
            return PollinationPhase::Waiting;
        }
        let local = cycle_tick - start;
        if local <= FLY_IN_TICKS {
            PollinationPhase::FlyIn(local as f64 / FLY_IN_TICKS as f64)
        } else if local <= FLY_IN_TICKS + POLLINATE_TICKS {
            PollinationPhase::Pollinate((local - FLY_IN_TICKS) as f64 / POLLINATE_TICKS as f64)
        } else if local <= FLY_IN_TICKS + POLLINATE_TICKS + FLY_OUT_TICKS {
            PollinationPhase::FlyOut(
                (local - FLY_IN_TICKS - POLLINATE_TICKS) as f64 / FLY_OUT_TICKS as f64,
            )
        } else {
            PollinationPhase::Waiting
        }
    }

    pub(crate) fn cycle_tick(&self) -> u64 {
        self.cycle_tick
    }

    /// Advance the cycle one tick and compose the frame: inbound and
    /// pollinating actors first, then the flower over them, then outbound
    /// actors over the flower.
    pub(crate) fn step_and_draw(&mut self, target: &mut Frame, sprites: &SpriteStore, ctx: TickCtx) {
        let size = target.size();
        let n = size.nf();
        let flower_point = Vec2::new(0.5 * n, 0.35 * n);
        let start = Vec2::new(-OFF_SCREEN, 0.55 * n);
        let exit = Vec2::new(n + OFF_SCREEN, -OFF_SCREEN);

        let phases: Vec<PollinationPhase> = (0..ACTOR_COUNT)
            .map(|i| Self::phase_for(i, self.cycle_tick))
            .collect();
        let pollination_active = phases
            .iter()
            .any(|p| matches!(p, PollinationPhase::Pollinate(_)));

        let bird = sprites.flight(ctx.tick);

        // Beneath the flower: inbound and pollinating actors.
        for (i, phase) in phases.iter().enumerate() {
            if matches!(phase, PollinationPhase::FlyIn(_) | PollinationPhase::Pollinate(_)) {
                draw_actor(target, bird, i, *phase, start, flower_point, exit);
            }
        }

        draw_flower(target, sprites.flower(), ctx.elapsed_secs, pollination_active);

        // Above the flower: outbound actors.
        for (i, phase) in phases.iter().enumerate() {
            if matches!(phase, PollinationPhase::FlyOut(_)) {
                draw_actor(target, bird, i, *phase, start, flower_point, exit);
            }
        }

        self.cycle_tick = (self.cycle_tick + 1) % CYCLE_TICKS;
    }
}

/// Position and scale of an actor in a given phase.
fn actor_placement(
    phase: PollinationPhase,
    start: Vec2,
    flower_point: Vec2,
    exit: Vec2,
) -> (Vec2, f64) {
    match phase {
        PollinationPhase::Waiting => (start, ACTOR_SCALE),
        PollinationPhase::FlyIn(p) => {
            let x = lerp(start.x, flower_point.x, p);
            let y = lerp(start.y, flower_point.y, p) - ARC_AMPLITUDE * (p * PI).sin();
            (Vec2::new(x, y), ACTOR_SCALE)
        }
        PollinationPhase::Pollinate(p) => {
            let x = flower_point.x + 1.5 * (p * TAU * 8.0).sin();
            let y = flower_point.y + 0.8 * (p * TAU * 10.0).sin();
            (Vec2::new(x, y), ACTOR_SCALE)
        }
        PollinationPhase::FlyOut(p) => {
            let x = lerp(flower_point.x, exit.x, p);
            let y = lerp(flower_point.y, exit.y, p);
            (Vec2::new(x, y), ACTOR_SCALE * (1.0 - FLY_OUT_SHRINK * p))
        }
    }
}

/// Fixed per-actor identity: evenly spaced hue offsets with a slight
/// saturation/brightness bias so the four birds stay distinguishable.
fn actor_tint(index: usize) -> Tint {
    Tint::Hsl(HslShift {
        hue_deg: 360.0 / ACTOR_COUNT as f64 * index as f64,
        saturation: 1.0 - 0.04 * index as f64,
        brightness: 1.0 - 0.03 * index as f64,
    })
}

fn draw_actor(
    target: &mut Frame,
    bird: &Frame,
    index: usize,
    phase: PollinationPhase,
    start: Vec2,
    flower_point: Vec2,
    exit: Vec2,
) {
    let (pos, scale) = actor_placement(phase, start, flower_point, exit);
    let mut blit = Blit::centered(target.size(), bird, scale, pos.x, pos.y);
    blit.tint = Some(actor_tint(index));
    blit.draw(target, bird);
}

/// The flower sits bottom-centered and wiggles horizontally: a gentle idle
/// sway, or a pronounced combined-sinusoid shake while any actor pollinates.
fn draw_flower(target: &mut Frame, flower: &Frame, elapsed_secs: f64, pollination_active: bool) {
    let n = target.size().nf();
    let amplitude = if pollination_active { 0.8 } else { 0.2 };
    let wiggle =
        amplitude * ((elapsed_secs * 6.0).sin() + 0.5 * (elapsed_secs * 9.5).sin());

    let scaled = (n * FLOWER_SCALE).floor();
    let blit = Blit {
        scale: FLOWER_SCALE,
        origin_x: (n - scaled) / 2.0 + wiggle,
        origin_y: n - scaled,
        clip: crate::effects::geometry::Region::full(target.size()),
        only_if_empty: false,
        tint: None,
    };
    blit.draw(target, flower);
}

#[cfg(test)]
#[path = "../../tests/unit/effects/pollinate.rs"]
mod tests;
