//! Multi-actor swarm motion.
//!
//! Each actor follows a continuous-progress trajectory across an extended
//! region (50% beyond the visible edge on both sides of travel) with a
//! sinusoidal perpendicular sway and an intermittent "lingering" slow-down.
//! The arena is regenerated wholesale on any structural parameter change
//! because speed spacing is derived jointly across the population.

use std::f64::consts::TAU;

use crate::composition::model::SwarmParams;
use crate::effects::color::{ColorMod, Tint};
use crate::effects::geometry::{Blit, Region, breathing_scale};
use crate::foundation::core::{Frame, MatrixSize, TickCtx};
use crate::foundation::math::Rng64;

/// Trajectory overshoot past each region edge, as a fraction of the edge.
const OVERSHOOT: f64 = 0.25;
/// Per-tick probability of a linger-capable, visible actor starting to
/// linger.
const LINGER_CHANCE: f64 = 0.002;
/// Linger duration bounds, seconds.
const LINGER_SECS: (f64, f64) = (2.0, 6.0);
/// Cooldown after a linger before the next one, seconds.
const COOLDOWN_SECS: (f64, f64) = (3.0, 8.0);
/// Extra scale applied on 32-pixel sessions so actors stay legible.
const SMALL_MATRIX_BOOST: f64 = 1.3;

#[derive(Clone, Copy, Debug, PartialEq)]
enum LingerPhase {
    Idle,
    Lingering { until_secs: f64 },
    Cooldown { until_secs: f64 },
}

/// Direction class assigned at generation, fixed for the actor's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Heading {
    Rightward,
    Leftward,
    Downward,
    Upward,
}

impl Heading {
    fn for_index(index: usize) -> Self {
        match index % 4 {
            0 => Self::Rightward,
            1 => Self::Leftward,
            2 => Self::Downward,
            _ => Self::Upward,
        }
    }
}

/// One swarm actor. Owned exclusively by its [`SwarmEffect`] arena.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SwarmActor {
    heading: Heading,
    progress: f64,
    speed: f64,
    size_mul: f64,
    /// Perpendicular base position as a fraction of the region edge.
    lane: f64,
    phase: f64,
    wobble_speed: f64,
    wobble_amount: f64,
    tint: ColorMod,
    linger_capable: bool,
    linger: LingerPhase,
}

impl SwarmActor {
    /// Continuous trajectory progress in `[0, 1)`.
    pub(crate) fn progress(&self) -> f64 {
        self.progress
    }

    pub(crate) fn speed(&self) -> f64 {
        self.speed
    }

    pub(crate) fn is_lingering(&self) -> bool {
        matches!(self.linger, LingerPhase::Lingering { .. })
    }
}

/// A swarm population bound to one region (the full matrix, or one quadrant
/// for the split combination).
#[derive(Clone, Debug)]
pub(crate) struct SwarmEffect {
    region: Region,
    params: SwarmParams,
    scale_boost: f64,
    population: Vec<SwarmActor>,
}

impl SwarmEffect {
    /// Generate a fresh arena. Speeds span `[speed_min, speed_max]` evenly
    /// across the population (both endpoints hit for count >= 2); sizes and
    /// wobble constants are drawn independently per actor; roughly 40% of
    /// actors are linger-capable.
    pub(crate) fn generate(
        params: SwarmParams,
        region: Region,
        size: MatrixSize,
        rng: &mut Rng64,
    ) -> Self {
        let count = params.count;
        let mut population = Vec::with_capacity(count);
        for i in 0..count {
            let spread = if count >= 2 {
                i as f64 / (count - 1) as f64
            } else {
                0.5
            };
            population.push(SwarmActor {
                heading: Heading::for_index(i),
                progress: rng.next_f64_01(),
                speed: params.speed_min + (params.speed_max - params.speed_min) * spread,
                size_mul: rng.range_f64(params.size_min, params.size_max),
                lane: rng.range_f64(0.2, 0.8),
                phase: rng.range_f64(0.0, TAU),
                wobble_speed: rng.range_f64(0.6, 1.6),
                wobble_amount: rng.range_f64(0.02, 0.06),
                tint: ColorMod::for_actor(i),
                linger_capable: i % 5 < 2,
                linger: LingerPhase::Idle,
            });
        }
        Self {
            region,
            params,
            scale_boost: match size {
                MatrixSize::X32 => SMALL_MATRIX_BOOST,
                MatrixSize::X64 => 1.0,
            },
            population,
        }
    }

    /// Advance every actor one tick and draw them into `target` in arena
    /// index order. A pixel is written only if still empty, so the index
    /// order is the priority among overlapping actors.
    pub(crate) fn step_and_draw(
        &mut self,
        target: &mut Frame,
        sprite: &Frame,
        ctx: TickCtx,
        rng: &mut Rng64,
        breathing: bool,
    ) {
        let edge = self.region.edge();
        let range = edge * (1.0 + 2.0 * OVERSHOOT);
        let breath = if breathing {
            breathing_scale(1.0, ctx.elapsed_secs)
        } else {
            1.0
        };

        for actor in &mut self.population {
            let along = actor.progress * range - OVERSHOOT * edge;
            let visible = along >= 0.0 && along < edge;
            step_linger(actor, ctx.elapsed_secs, visible, rng);

            let speed = effective_speed(actor, &self.params, ctx.elapsed_secs);
            actor.progress = (actor.progress + (speed * 0.5) / range).rem_euclid(1.0);

            let along = actor.progress * range - OVERSHOOT * edge;
            let sway = (actor.progress * TAU + actor.phase).sin() * 0.1 * edge;
            let wobble =
                (ctx.elapsed_secs * actor.wobble_speed).sin() * actor.wobble_amount * edge;
            let perp = actor.lane * edge + sway + wobble;

            let (x, y) = match actor.heading {
                Heading::Rightward => (self.region.x0 + along, self.region.y0 + perp),
                Heading::Leftward => (self.region.x0 + edge - along, self.region.y0 + perp),
                Heading::Downward => (self.region.x0 + perp, self.region.y0 + along),
                Heading::Upward => (self.region.x0 + perp, self.region.y0 + edge - along),
            };

            let scale = (0.2 + 0.15 * (3.0 * ctx.elapsed_secs + actor.phase).sin())
                * actor.size_mul
                * self.scale_boost
                * breath;

            let mut blit = Blit::centered(target.size(), sprite, scale, x, y);
            blit.clip = self.region;
            blit.only_if_empty = true;
            blit.tint = Some(Tint::Mod(actor.tint));
            blit.draw(target, sprite);
        }
    }

    pub(crate) fn population(&self) -> &[SwarmActor] {
        &self.population
    }

    /// One tick's maximum progress increment, for continuity checks.
    pub(crate) fn max_progress_step(&self) -> f64 {
        let range = self.region.edge() * (1.0 + 2.0 * OVERSHOOT);
        (self.params.speed_max * 0.5) / range
    }
}

fn step_linger(actor: &mut SwarmActor, elapsed_secs: f64, visible: bool, rng: &mut Rng64) {
    actor.linger = match actor.linger {
        LingerPhase::Idle => {
            if actor.linger_capable && visible && rng.chance(LINGER_CHANCE) {
                LingerPhase::Lingering {
                    until_secs: elapsed_secs + rng.range_f64(LINGER_SECS.0, LINGER_SECS.1),
                }
            } else {
                LingerPhase::Idle
            }
        }
        LingerPhase::Lingering { until_secs } => {
            if elapsed_secs >= until_secs {
                LingerPhase::Cooldown {
                    until_secs: elapsed_secs + rng.range_f64(COOLDOWN_SECS.0, COOLDOWN_SECS.1),
                }
            } else {
                LingerPhase::Lingering { until_secs }
            }
        }
        LingerPhase::Cooldown { until_secs } => {
            if elapsed_secs >= until_secs {
                LingerPhase::Idle
            } else {
                LingerPhase::Cooldown { until_secs }
            }
        }
    };
}

/// Speed actually applied this tick. Lingering drops to roughly 30% of the
/// configured minimum with a gentle sinusoidal variation; it never touches
/// `progress` itself, only its rate of change.
fn effective_speed(actor: &SwarmActor, params: &SwarmParams, elapsed_secs: f64) -> f64 {
    match actor.linger {
        LingerPhase::Lingering { .. } => {
            params.speed_min * (0.3 + 0.05 * (2.0 * elapsed_secs).sin())
        }
        _ => actor.speed.clamp(params.speed_min, params.speed_max),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/swarm.rs"]
mod tests;
