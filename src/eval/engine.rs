use crate::assets::store::SpriteStore;
use crate::composition::model::{ActiveComposition, EffectFlag, EngineConfig, SwarmParams};
use crate::effects::geometry::{Blit, Region, breathing_scale};
use crate::effects::pollinate::PollinationEffect;
use crate::effects::split::{SplitMove, SplitSwarm, render_split};
use crate::effects::swarm::SwarmEffect;
use crate::effects::waypoint::WaypointModel;
use crate::foundation::core::{Frame, MatrixSize, TickCtx};
use crate::foundation::error::{ColibriError, ColibriResult};
use crate::foundation::math::Rng64;

/// The per-tick effect composition engine.
///
/// Owns the sprite store, the active composition, the seeded random source,
/// and all per-effect actor state. Each call to [`Engine::tick`] advances the
/// active effects exactly one step and returns the composed frame; effects
/// read only the immutable sprites and their own private state, never the
/// previous output.
///
/// Structural parameter changes (actor count, speed/size bounds) discard and
/// regenerate whole actor arenas; a matrix-size change discards everything.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    composition: ActiveComposition,
    sprites: SpriteStore,
    rng: Rng64,
    swarm: Option<SwarmEffect>,
    split_swarm: Option<SplitSwarm>,
    waypoint: Option<WaypointModel>,
    split_move: Option<SplitMove>,
    pollination: Option<PollinationEffect>,
}

impl Engine {
    /// Build an engine. Out-of-range scalar parameters are auto-corrected
    /// (and logged); a sprite/matrix size mismatch is an error.
    pub fn new(config: EngineConfig, sprites: SpriteStore, seed: u64) -> ColibriResult<Self> {
        let config = config.normalized();
        if sprites.size() != config.size {
            return Err(ColibriError::validation(format!(
                "sprite store is sized for {} but config wants {}",
                sprites.size().n(),
                config.size.n()
            )));
        }
        Ok(Self {
            config,
            composition: ActiveComposition::default(),
            sprites,
            rng: Rng64::new(seed),
            swarm: None,
            split_swarm: None,
            waypoint: None,
            split_move: None,
            pollination: None,
        })
    }

    /// The active engine configuration (after normalization).
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The currently active composition.
    pub fn composition(&self) -> ActiveComposition {
        self.composition
    }

    /// Replace the active composition, discarding the state of every effect
    /// the new composition does not carry.
    #[tracing::instrument(skip(self))]
    pub fn set_composition(&mut self, composition: ActiveComposition) {
        if composition == self.composition {
            return;
        }
        self.composition = composition;
        self.prune_state();
    }

    /// Toggle one effect flag on, applying the mutual-exclusion clearing
    /// rules of the composition model.
    pub fn enable(&mut self, flag: EffectFlag) {
        self.set_composition(self.composition.enable(flag));
    }

    /// Toggle one effect flag off.
    pub fn disable(&mut self, flag: EffectFlag) {
        self.set_composition(self.composition.disable(flag));
    }

    /// Replace swarm parameters. A structural change: all swarm arenas are
    /// discarded and lazily regenerated on the next tick.
    #[tracing::instrument(skip(self))]
    pub fn set_swarm_params(&mut self, params: SwarmParams) {
        self.config.swarm = params.normalized();
        self.swarm = None;
        self.split_swarm = None;
        tracing::debug!("swarm arenas discarded for regeneration");
    }

    /// Replace the base geometric scale. Waypoint margins derive from it, so
    /// movement state is discarded and regenerated on the next tick.
    #[tracing::instrument(skip(self))]
    pub fn set_scale(&mut self, scale: f64) {
        self.config.scale = scale;
        self.config = self.config.normalized();
        self.waypoint = None;
        self.split_move = None;
    }

    /// Change the matrix size. Treated as a full reset: every actor arena
    /// and waypoint model is discarded, and a sprite store decoded for the
    /// new size must be supplied.
    #[tracing::instrument(skip(self, sprites))]
    pub fn set_matrix_size(
        &mut self,
        size: MatrixSize,
        sprites: SpriteStore,
    ) -> ColibriResult<()> {
        if sprites.size() != size {
            return Err(ColibriError::validation(format!(
                "sprite store is sized for {} but matrix size is {}",
                sprites.size().n(),
                size.n()
            )));
        }
        self.config.size = size;
        self.sprites = sprites;
        self.swarm = None;
        self.split_swarm = None;
        self.waypoint = None;
        self.split_move = None;
        self.pollination = None;
        tracing::debug!(edge = size.n(), "matrix size changed, all effect state reset");
        Ok(())
    }

    /// Compose the frame for one tick.
    #[tracing::instrument(skip(self), fields(tick = ctx.tick.0))]
    pub fn tick(&mut self, ctx: TickCtx) -> ColibriResult<Frame> {
        if !ctx.elapsed_secs.is_finite() || ctx.elapsed_secs < 0.0 {
            return Err(ColibriError::evaluation(
                "elapsed_secs must be finite and >= 0",
            ));
        }

        let size = self.config.size;
        let mut frame = Frame::empty(size);

        match self.composition {
            ActiveComposition::Pollination => {
                let effect = self.pollination.get_or_insert_with(PollinationEffect::new);
                effect.step_and_draw(&mut frame, &self.sprites, ctx);
            }
            ActiveComposition::Swarm { split, breathing } => {
                let sprite = self.sprites.flight(ctx.tick);
                if split {
                    let effect = self.split_swarm.get_or_insert_with(|| {
                        SplitSwarm::generate(self.config.swarm, size, &mut self.rng)
                    });
                    effect.step_and_draw(&mut frame, sprite, ctx, &mut self.rng, breathing);
                } else {
                    let effect = self.swarm.get_or_insert_with(|| {
                        SwarmEffect::generate(
                            self.config.swarm,
                            Region::full(size),
                            size,
                            &mut self.rng,
                        )
                    });
                    effect.step_and_draw(&mut frame, sprite, ctx, &mut self.rng, breathing);
                }
            }
            ActiveComposition::Geometric {
                split,
                breathing,
                moving,
            } => {
                let sprite = self.sprites.flight(ctx.tick);
                match (split, moving) {
                    (true, true) => {
                        let effect = self.split_move.get_or_insert_with(|| {
                            SplitMove::generate(size, self.config.scale, &mut self.rng)
                        });
                        effect.step_and_draw(&mut frame, sprite, ctx, &mut self.rng, breathing);
                    }
                    (true, false) => render_split(&mut frame, sprite, ctx, breathing),
                    (false, moving) => {
                        let scale = if breathing {
                            breathing_scale(self.config.scale, ctx.elapsed_secs)
                        } else {
                            self.config.scale
                        };
                        let center = if moving {
                            let margin = size.nf() * self.config.scale / 2.0;
                            let model = self.waypoint.get_or_insert_with(|| {
                                WaypointModel::new(
                                    Region::full(size),
                                    margin.min(size.nf() / 2.0),
                                    0,
                                    &mut self.rng,
                                )
                            });
                            model.step(&mut self.rng)
                        } else {
                            let mid = size.nf() / 2.0;
                            crate::foundation::core::Vec2::new(mid, mid)
                        };
                        Blit::centered(size, sprite, scale, center.x, center.y)
                            .draw(&mut frame, sprite);
                    }
                }
            }
        }

        Ok(frame)
    }

    /// Drop the state of every effect absent from the active composition.
    fn prune_state(&mut self) {
        match self.composition {
            ActiveComposition::Pollination => {
                self.swarm = None;
                self.split_swarm = None;
                self.waypoint = None;
                self.split_move = None;
            }
            ActiveComposition::Swarm { split, .. } => {
                self.pollination = None;
                self.waypoint = None;
                self.split_move = None;
                if split {
                    self.swarm = None;
                } else {
                    self.split_swarm = None;
                }
            }
            ActiveComposition::Geometric { split, moving, .. } => {
                self.pollination = None;
                self.swarm = None;
                self.split_swarm = None;
                if !(moving && !split) {
                    self.waypoint = None;
                }
                if !(moving && split) {
                    self.split_move = None;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/engine.rs"]
mod tests;
