use super::*;

fn geometric(split: bool, breathing: bool, moving: bool) -> ActiveComposition {
    ActiveComposition::Geometric {
        split,
        breathing,
        moving,
    }
}

#[test]
fn pollination_clears_everything_else() {
    let busy = geometric(true, true, true);
    let c = busy.enable(EffectFlag::Pollination);
    assert_eq!(c, ActiveComposition::Pollination);
    for flag in [
        EffectFlag::Split,
        EffectFlag::Swarm,
        EffectFlag::Move,
        EffectFlag::Breathing,
    ] {
        assert!(!c.is_enabled(flag));
    }
    assert!(c.is_enabled(EffectFlag::Pollination));
}

#[test]
fn movement_and_swarm_exclude_each_other() {
    let c = geometric(true, true, false).enable(EffectFlag::Swarm);
    assert_eq!(
        c,
        ActiveComposition::Swarm {
            split: true,
            breathing: true
        }
    );
    assert!(!c.is_enabled(EffectFlag::Move));

    // Re-enabling movement drops the swarm but keeps split and breathing.
    let c = c.enable(EffectFlag::Move);
    assert_eq!(c, geometric(true, true, true));
    assert!(!c.is_enabled(EffectFlag::Swarm));
}

#[test]
fn split_and_breathing_survive_family_switches() {
    let c = ActiveComposition::default()
        .enable(EffectFlag::Split)
        .enable(EffectFlag::Breathing)
        .enable(EffectFlag::Swarm)
        .enable(EffectFlag::Move)
        .enable(EffectFlag::Swarm);
    assert_eq!(
        c,
        ActiveComposition::Swarm {
            split: true,
            breathing: true
        }
    );
}

#[test]
fn enabling_after_pollination_starts_from_a_clean_slate() {
    let c = ActiveComposition::Pollination.enable(EffectFlag::Split);
    assert_eq!(c, geometric(true, false, false));

    let c = ActiveComposition::Pollination.enable(EffectFlag::Swarm);
    assert_eq!(
        c,
        ActiveComposition::Swarm {
            split: false,
            breathing: false
        }
    );
}

#[test]
fn disabling_returns_to_sensible_states() {
    assert_eq!(
        ActiveComposition::Pollination.disable(EffectFlag::Pollination),
        ActiveComposition::default()
    );
    assert_eq!(
        ActiveComposition::Swarm {
            split: true,
            breathing: false
        }
        .disable(EffectFlag::Swarm),
        geometric(true, false, false)
    );
    assert_eq!(
        geometric(true, true, true).disable(EffectFlag::Move),
        geometric(true, true, false)
    );
    // Disabling a flag that is not set is a no-op.
    assert_eq!(
        geometric(false, false, false).disable(EffectFlag::Swarm),
        ActiveComposition::default()
    );
    assert_eq!(
        ActiveComposition::Pollination.disable(EffectFlag::Split),
        ActiveComposition::Pollination
    );
}

#[test]
fn swarm_params_normalization_nudges_conflicting_bounds() {
    let p = SwarmParams {
        count: 0,
        speed_min: 5.0,
        speed_max: 2.0,
        size_min: -1.0,
        size_max: 1.3,
    }
    .normalized();
    assert_eq!(p.count, 1);
    assert_eq!(p.speed_min, 5.0);
    assert_eq!(p.speed_max, 5.5);
    assert_eq!(p.size_min, 0.7);
    assert_eq!(p.size_max, 1.3);

    let p = SwarmParams {
        size_min: 1.3,
        size_max: 1.3,
        ..SwarmParams::default()
    }
    .normalized();
    assert!((p.size_max - 1.4).abs() < 1e-12);

    let p = SwarmParams {
        speed_min: f64::NAN,
        ..SwarmParams::default()
    }
    .normalized();
    assert_eq!(p.speed_min, 2.0);
}

#[test]
fn engine_config_normalization_bounds_the_scale() {
    let c = EngineConfig {
        scale: 0.0,
        ..EngineConfig::default()
    }
    .normalized();
    assert_eq!(c.scale, 0.5);

    let c = EngineConfig {
        scale: 9.0,
        ..EngineConfig::default()
    }
    .normalized();
    assert_eq!(c.scale, 2.0);

    let c = EngineConfig::default().normalized();
    assert_eq!(c, EngineConfig::default());
}

#[test]
fn composition_round_trips_through_serde() {
    for c in [
        ActiveComposition::Pollination,
        geometric(true, false, true),
        ActiveComposition::Swarm {
            split: false,
            breathing: true,
        },
    ] {
        let json = serde_json::to_string(&c).unwrap();
        let back: ActiveComposition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    let json = serde_json::to_string(&EngineConfig::default()).unwrap();
    let back: EngineConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, EngineConfig::default());
}
