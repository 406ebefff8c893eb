//! Colibri is a tick-driven sprite effect engine for square RGB LED matrices.
//!
//! Given a small set of immutable source sprites (two wing positions of a
//! hummingbird plus a static flower) and an injected time sample, the engine
//! composes exactly one N×N pixel [`Frame`] per tick by running the currently
//! active effect composition: geometric scale/translate with optional
//! "breathing", a four-quadrant split compositor, a random-waypoint movement
//! model, a multi-actor swarm, or the staggered pollination choreography.
//!
//! # Pipeline overview
//!
//! 1. **Sprites**: decoded once into a [`SpriteStore`]; never mutated after.
//! 2. **Composition**: an [`ActiveComposition`] variant selects the effect
//!    family; invalid flag combinations are unrepresentable.
//! 3. **Tick**: [`Engine::tick`] consumes a [`TickCtx`] (tick count + elapsed
//!    seconds, both injected) and produces the next [`Frame`].
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: all randomness flows from a single seeded
//!   generator; time is an explicit parameter, never an ambient clock read.
//! - **No IO at tick time**: sprite decoding is front-loaded in the store.
//! - **Defensive drawing**: every pixel write is bounds-checked; out-of-range
//!   coordinates are skipped, never clamped.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod assets;
mod composition;
mod effects;
mod eval;
mod foundation;

pub use assets::decode::{decode_sprite, fallback_sprite};
pub use assets::store::SpriteStore;
pub use composition::model::{ActiveComposition, EffectFlag, EngineConfig, SwarmParams};
pub use effects::color::{ColorMod, HslShift, Tint, hsl_to_rgb, rgb_to_hsl};
pub use eval::engine::Engine;
pub use foundation::core::{Frame, MatrixSize, Pixel, Point, Quadrant, Tick, TickCtx, Vec2};
pub use foundation::error::{ColibriError, ColibriResult};
