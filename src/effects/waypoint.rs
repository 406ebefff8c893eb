//! Random-waypoint steering for the movement effect.
//!
//! One model per moving subject: pick a random target inside the motion
//! region, damp toward it, hover with a small jitter, repeat. The same model
//! serves full-matrix movement and quadrant-local movement (with staggered
//! initial pauses) by parameterizing the region.

use crate::effects::geometry::Region;
use crate::foundation::core::Vec2;
use crate::foundation::math::Rng64;

/// Minimum hover duration before a new target is drawn, in ticks.
const PAUSE_MIN_TICKS: u32 = 15;
/// Exclusive maximum hover duration, in ticks.
const PAUSE_MAX_TICKS: u32 = 30;
/// Exponential damping factor applied per tick while moving.
const APPROACH_RATE: f64 = 0.8;
/// Manhattan distance below which the subject snaps onto its target.
const ARRIVAL_DISTANCE: f64 = 1.0;
/// Hover jitter amplitude in pixels.
const HOVER_AMPLITUDE: f64 = 1.5;
/// Hover jitter angular rate per tick.
const HOVER_RATE: f64 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WaypointState {
    /// Paused at the target, jittering vertically.
    Hovering {
        pause_ticks: u32,
        pause_limit: u32,
    },
    /// Damping toward the target.
    Moving,
}

/// Two-state waypoint steering model. Runs indefinitely once created; the
/// engine recreates it (recentered) whenever the effect is (re)enabled.
#[derive(Clone, Copy, Debug)]
pub(crate) struct WaypointModel {
    pos: Vec2,
    target: Vec2,
    state: WaypointState,
    region: Region,
    margin: f64,
}

impl WaypointModel {
    /// A model centered in `region`. `margin` keeps targets clear of the
    /// edges (proportional to the rendered sprite scale); `initial_pause`
    /// staggers quadrant-local copies so they do not move in lockstep.
    pub(crate) fn new(region: Region, margin: f64, initial_pause: u32, rng: &mut Rng64) -> Self {
        let (cx, cy) = region.center();
        let center = Vec2::new(cx, cy);
        Self {
            pos: center,
            target: center,
            state: WaypointState::Hovering {
                pause_ticks: initial_pause,
                pause_limit: rng.range_u32(PAUSE_MIN_TICKS, PAUSE_MAX_TICKS),
            },
            region,
            margin,
        }
    }

    /// Advance one tick and return the render position (hover jitter
    /// applied).
    pub(crate) fn step(&mut self, rng: &mut Rng64) -> Vec2 {
        match self.state {
            WaypointState::Hovering {
                pause_ticks,
                pause_limit,
            } => {
                let pause_ticks = pause_ticks + 1;
                if pause_ticks > pause_limit {
                    self.target = self.draw_target(rng);
                    self.state = WaypointState::Moving;
                    self.pos
                } else {
                    self.state = WaypointState::Hovering {
                        pause_ticks,
                        pause_limit,
                    };
                    Vec2::new(
                        self.pos.x,
                        self.target.y
                            + HOVER_AMPLITUDE * (HOVER_RATE * f64::from(pause_ticks)).sin(),
                    )
                }
            }
            WaypointState::Moving => {
                let delta = self.target - self.pos;
                self.pos += delta * APPROACH_RATE;
                let remaining = self.target - self.pos;
                if remaining.x.abs() + remaining.y.abs() < ARRIVAL_DISTANCE {
                    self.pos = self.target;
                    self.state = WaypointState::Hovering {
                        pause_ticks: 0,
                        pause_limit: rng.range_u32(PAUSE_MIN_TICKS, PAUSE_MAX_TICKS),
                    };
                }
                self.pos
            }
        }
    }

    fn draw_target(&self, rng: &mut Rng64) -> Vec2 {
        let x0 = self.region.x0 + self.margin;
        let x1 = self.region.x1 - self.margin;
        let y0 = self.region.y0 + self.margin;
        let y1 = self.region.y1 - self.margin;
        if x1 <= x0 || y1 <= y0 {
            // Margin swallowed the whole region; park on the center.
            let (cx, cy) = self.region.center();
            return Vec2::new(cx, cy);
        }
        Vec2::new(rng.range_f64(x0, x1), rng.range_f64(y0, y1))
    }

    pub(crate) fn state(&self) -> WaypointState {
        self.state
    }

    pub(crate) fn position(&self) -> Vec2 {
        self.pos
    }

    pub(crate) fn target(&self) -> Vec2 {
        self.target
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/waypoint.rs"]
mod tests;
