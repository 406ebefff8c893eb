use super::*;
use crate::foundation::core::Pixel;

fn params(count: usize) -> SwarmParams {
    SwarmParams {
        count,
        ..SwarmParams::default()
    }
}

fn ctx(t: u64) -> TickCtx {
    TickCtx::at(t, 1.0 / 30.0)
}

#[test]
fn speeds_span_the_configured_range_inclusively() {
    let mut rng = Rng64::new(11);
    let effect = SwarmEffect::generate(
        params(8),
        Region::full(MatrixSize::X64),
        MatrixSize::X64,
        &mut rng,
    );

    let pop = effect.population();
    assert_eq!(pop.len(), 8);
    let speeds: Vec<f64> = pop.iter().map(SwarmActor::speed).collect();
    let defaults = SwarmParams::default();
    assert_eq!(speeds[0], defaults.speed_min);
    assert_eq!(speeds[7], defaults.speed_max);
    for pair in speeds.windows(2) {
        assert!(pair[0] < pair[1], "speeds not strictly increasing: {speeds:?}");
    }
}

#[test]
fn single_actor_sits_in_the_middle_of_the_speed_range() {
    let mut rng = Rng64::new(11);
    let effect = SwarmEffect::generate(
        params(1),
        Region::full(MatrixSize::X64),
        MatrixSize::X64,
        &mut rng,
    );
    let defaults = SwarmParams::default();
    let expected = defaults.speed_min + (defaults.speed_max - defaults.speed_min) * 0.5;
    assert_eq!(effect.population()[0].speed(), expected);
}

#[test]
fn progress_stays_in_unit_interval_and_moves_continuously() {
    let mut rng = Rng64::new(5);
    let size = MatrixSize::X64;
    let mut effect = SwarmEffect::generate(params(6), Region::full(size), size, &mut rng);
    let sprite = Frame::solid(size, Pixel::new(255, 60, 50));

    let max_step = effect.max_progress_step();
    let mut last: Vec<f64> = effect.population().iter().map(SwarmActor::progress).collect();
    for t in 0..600 {
        let mut frame = Frame::empty(size);
        effect.step_and_draw(&mut frame, &sprite, ctx(t), &mut rng, false);
        for (actor, prev) in effect.population().iter().zip(&last) {
            let p = actor.progress();
            assert!((0.0..1.0).contains(&p), "progress escaped unit interval: {p}");
            let step = (p - prev).rem_euclid(1.0);
            assert!(
                step <= max_step + 1e-12,
                "progress jumped by {step} (max {max_step})"
            );
        }
        last = effect.population().iter().map(SwarmActor::progress).collect();
    }
}

#[test]
fn lingering_actor_advances_slower_than_its_cruise_speed() {
    let mut actor_params = SwarmParams::default();
    actor_params.count = 2;
    let mut rng = Rng64::new(1);
    let effect = SwarmEffect::generate(
        actor_params,
        Region::full(MatrixSize::X64),
        MatrixSize::X64,
        &mut rng,
    );
    let mut actor = effect.population()[0];
    let cruise = effective_speed(&actor, &actor_params, 1.0);
    actor.linger = LingerPhase::Lingering { until_secs: 100.0 };
    let lingering = effective_speed(&actor, &actor_params, 1.0);
    assert!(actor.is_lingering());
    assert!(lingering < cruise * 0.5, "linger speed {lingering} vs cruise {cruise}");
    assert!(lingering >= actor_params.speed_min * 0.25);
}

#[test]
fn linger_expiry_enters_cooldown_then_returns_to_idle() {
    let mut rng = Rng64::new(2);
    let effect = SwarmEffect::generate(
        params(5),
        Region::full(MatrixSize::X64),
        MatrixSize::X64,
        &mut rng,
    );
    let mut actor = effect.population()[0];
    actor.linger = LingerPhase::Lingering { until_secs: 10.0 };

    step_linger(&mut actor, 10.0, true, &mut rng);
    let LingerPhase::Cooldown { until_secs } = actor.linger else {
        panic!("expected cooldown after linger expiry");
    };
    assert!((13.0..18.0).contains(&until_secs));

    step_linger(&mut actor, until_secs, true, &mut rng);
    assert_eq!(actor.linger, LingerPhase::Idle);
}

#[test]
fn actors_draw_with_first_writer_priority() {
    // Two actor arenas over the same region: whatever the first draw call
    // wrote must survive the second verbatim.
    let size = MatrixSize::X64;
    let region = Region::full(size);
    let mut rng = Rng64::new(77);
    let mut first = SwarmEffect::generate(params(4), region, size, &mut rng);
    let mut second = SwarmEffect::generate(params(4), region, size, &mut rng);
    let sprite = Frame::solid(size, Pixel::new(255, 60, 50));

    let mut result = None;
    for t in 0..120 {
        let mut frame = Frame::empty(size);
        first.step_and_draw(&mut frame, &sprite, ctx(t), &mut rng, false);
        let reference = frame.clone();
        second.step_and_draw(&mut frame, &sprite, ctx(t), &mut rng, false);
        if reference.lit_count() > 0 {
            result = Some((frame, reference));
            break;
        }
    }
    let (frame, reference) = result.expect("first arena never became visible");
    for (a, b) in frame.pixels().iter().zip(reference.pixels()) {
        if !b.is_empty() {
            assert_eq!(a, b, "occupied pixel was overwritten");
        }
    }
}

#[test]
fn small_matrix_actors_render_larger() {
    let mut rng = Rng64::new(9);
    let small = SwarmEffect::generate(
        params(3),
        Region::full(MatrixSize::X32),
        MatrixSize::X32,
        &mut rng,
    );
    let mut rng = Rng64::new(9);
    let large = SwarmEffect::generate(
        params(3),
        Region::full(MatrixSize::X64),
        MatrixSize::X64,
        &mut rng,
    );
    assert_eq!(small.scale_boost, 1.3);
    assert_eq!(large.scale_boost, 1.0);
}
