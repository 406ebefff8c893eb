use super::*;
use crate::foundation::core::Pixel;

const RED: Pixel = Pixel::new(255, 60, 50);

fn engine(size: MatrixSize) -> Engine {
    let bird = Frame::solid(size, RED);
    let flower = Frame::solid(size, Pixel::new(255, 105, 180));
    let sprites = SpriteStore::new(size, bird.clone(), bird, flower).unwrap();
    let config = EngineConfig {
        size,
        ..EngineConfig::default()
    };
    Engine::new(config, sprites, 42).unwrap()
}

fn ctx(t: u64) -> TickCtx {
    TickCtx::at(t, 1.0 / 30.0)
}

#[test]
fn new_rejects_mismatched_sprite_store() {
    let sprites = SpriteStore::new(
        MatrixSize::X32,
        Frame::empty(MatrixSize::X32),
        Frame::empty(MatrixSize::X32),
        Frame::empty(MatrixSize::X32),
    )
    .unwrap();
    let config = EngineConfig::default(); // X64
    assert!(Engine::new(config, sprites, 0).is_err());
}

#[test]
fn frames_always_have_n_squared_pixels() {
    for size in [MatrixSize::X32, MatrixSize::X64] {
        let mut engine = engine(size);
        engine.enable(EffectFlag::Swarm);
        for t in 0..30 {
            let frame = engine.tick(ctx(t)).unwrap();
            assert_eq!(frame.size(), size);
            assert_eq!(frame.pixels().len(), size.n() * size.n());
        }
    }
}

#[test]
fn default_composition_draws_a_centered_subject() {
    let mut engine = engine(MatrixSize::X64);
    let frame = engine.tick(ctx(0)).unwrap();
    // Base scale 0.5 over a solid sprite: a 32x32 centered block.
    assert_eq!(frame.lit_count(), 32 * 32);
    assert_eq!(frame.get(32, 32), Some(RED));
    assert_eq!(frame.get(0, 0), Some(Pixel::EMPTY));
}

#[test]
fn breathing_modulates_the_subject_size_over_time() {
    let mut engine = engine(MatrixSize::X64);
    engine.enable(EffectFlag::Breathing);
    let sizes: Vec<usize> = (0..90)
        .map(|t| engine.tick(ctx(t)).unwrap().lit_count())
        .collect();
    let min = *sizes.iter().min().unwrap();
    let max = *sizes.iter().max().unwrap();
    assert!(min < max, "breathing never changed the rendered size");
    // Envelope bounds: scale in [0.25, 0.55] of a 64 edge.
    assert!(min >= 16 * 16);
    assert!(max <= 36 * 36);
}

#[test]
fn pollination_draws_the_flower_from_the_first_tick() {
    let mut engine = engine(MatrixSize::X64);
    engine.enable(EffectFlag::Pollination);
    let frame = engine.tick(ctx(0)).unwrap();
    // Bottom-center belongs to the 0.6-scale flower.
    assert_eq!(frame.get(32, 60), Some(Pixel::new(255, 105, 180)));
}

#[test]
fn enable_applies_the_clearing_rules() {
    let mut engine = engine(MatrixSize::X64);
    engine.enable(EffectFlag::Split);
    engine.enable(EffectFlag::Move);
    engine.enable(EffectFlag::Pollination);
    assert_eq!(engine.composition(), ActiveComposition::Pollination);

    engine.disable(EffectFlag::Pollination);
    assert_eq!(engine.composition(), ActiveComposition::default());

    engine.enable(EffectFlag::Swarm);
    engine.enable(EffectFlag::Move);
    assert!(!engine.composition().is_enabled(EffectFlag::Swarm));
    assert!(engine.composition().is_enabled(EffectFlag::Move));
}

#[test]
fn tick_rejects_invalid_elapsed_time() {
    let mut engine = engine(MatrixSize::X64);
    for bad in [-0.1, f64::NAN, f64::INFINITY] {
        let ctx = TickCtx {
            tick: crate::foundation::core::Tick(0),
            elapsed_secs: bad,
        };
        assert!(engine.tick(ctx).is_err(), "accepted elapsed_secs {bad}");
    }
}

#[test]
fn set_matrix_size_requires_a_matching_store() {
    let mut engine = engine(MatrixSize::X64);
    let wrong = SpriteStore::new(
        MatrixSize::X64,
        Frame::empty(MatrixSize::X64),
        Frame::empty(MatrixSize::X64),
        Frame::empty(MatrixSize::X64),
    )
    .unwrap();
    assert!(engine.set_matrix_size(MatrixSize::X32, wrong).is_err());

    let bird = Frame::solid(MatrixSize::X32, RED);
    let right = SpriteStore::new(
        MatrixSize::X32,
        bird.clone(),
        bird,
        Frame::solid(MatrixSize::X32, Pixel::new(255, 105, 180)),
    )
    .unwrap();
    engine.set_matrix_size(MatrixSize::X32, right).unwrap();
    let frame = engine.tick(ctx(0)).unwrap();
    assert_eq!(frame.size(), MatrixSize::X32);
    assert_eq!(frame.pixels().len(), 32 * 32);
}

#[test]
fn config_normalization_happens_at_construction() {
    let size = MatrixSize::X64;
    let bird = Frame::solid(size, RED);
    let sprites = SpriteStore::new(size, bird.clone(), bird.clone(), bird).unwrap();
    let engine = Engine::new(
        EngineConfig {
            scale: -3.0,
            swarm: SwarmParams {
                count: 0,
                ..SwarmParams::default()
            },
            ..EngineConfig::default()
        },
        sprites,
        7,
    )
    .unwrap();
    assert_eq!(engine.config().scale, 0.5);
    assert_eq!(engine.config().swarm.count, 1);
}

#[test]
fn swarm_param_change_regenerates_the_arena() {
    let mut engine = engine(MatrixSize::X64);
    engine.enable(EffectFlag::Swarm);
    engine.tick(ctx(0)).unwrap();
    assert!(engine.swarm.is_some());

    engine.set_swarm_params(SwarmParams {
        count: 3,
        ..SwarmParams::default()
    });
    assert!(engine.swarm.is_none());

    engine.tick(ctx(1)).unwrap();
    let arena = engine.swarm.as_ref().unwrap();
    assert_eq!(arena.population().len(), 3);
}

#[test]
fn pruning_drops_state_the_composition_no_longer_carries() {
    let mut engine = engine(MatrixSize::X64);
    engine.enable(EffectFlag::Move);
    engine.tick(ctx(0)).unwrap();
    assert!(engine.waypoint.is_some());

    engine.enable(EffectFlag::Swarm);
    assert!(engine.waypoint.is_none());
    engine.tick(ctx(1)).unwrap();
    assert!(engine.swarm.is_some());

    engine.enable(EffectFlag::Pollination);
    assert!(engine.swarm.is_none());
}

#[test]
fn identical_seeds_replay_identically() {
    let run = |seed: u64| -> Vec<Frame> {
        let size = MatrixSize::X64;
        let bird = Frame::solid(size, RED);
        let sprites =
            SpriteStore::new(size, bird.clone(), bird.clone(), bird).unwrap();
        let mut engine = Engine::new(
            EngineConfig {
                size,
                ..EngineConfig::default()
            },
            sprites,
            seed,
        )
        .unwrap();
        engine.enable(EffectFlag::Swarm);
        engine.enable(EffectFlag::Move);
        (0..120).map(|t| engine.tick(ctx(t)).unwrap()).collect()
    };
    assert_eq!(run(42), run(42));
    assert_ne!(run(42), run(43));
}
