use glitch_wasm::config::{GlitchConfig, INITIAL_SLOTS, PHOTO_SOURCES, ZONES};
use glitch_wasm::photos::{slice_polygon, GlitchEngine, GlitchKind};

/// No recurring effect ever fires; effects are triggered by hand.
fn quiet() -> GlitchConfig {
    GlitchConfig {
        jitter_every: 1_000_000_000,
        glitch_chance: 0.0,
        flicker_chance: 0.0,
        relocate_chance: 0.0,
        slice_chance: 0.0,
        burst_chance: 0.0,
        ..GlitchConfig::default()
    }
}

fn opacity_of(engine: &GlitchEngine, i: usize) -> f64 {
    engine.photos()[i].style().opacity.parse().unwrap()
}

#[test]
fn photos_start_in_layout_slots() {
    let mut engine = GlitchEngine::new(4, quiet(), 1, 0);
    let first = &engine.photos()[0];
    assert_eq!(first.style().left, "-8vw");
    assert_eq!(first.style().top, "5vh");
    assert_eq!(first.style().width, "22vw");
    assert_eq!(first.style().transform, "rotate(-2deg)");
    assert_eq!(first.style().opacity, "0.8");
    assert!(first.visible && !first.glitching);

    for (photo, slot) in engine.photos().iter().zip(INITIAL_SLOTS) {
        assert_eq!((photo.base_x, photo.base_y, photo.base_rotation), (slot.x, slot.y, slot.rotation));
    }
    assert_eq!(engine.take_dirty(), vec![0, 1, 2, 3]);
    assert!(engine.take_dirty().is_empty());
}

#[test]
fn extra_photos_reuse_slots() {
    let engine = GlitchEngine::new(6, quiet(), 1, 0);
    assert_eq!(engine.photos()[4].base_x, INITIAL_SLOTS[0].x);
    assert_eq!(engine.photos()[5].base_rotation, INITIAL_SLOTS[1].rotation);
}

#[test]
fn glitch_clears_within_its_window() {
    for seed in 0..50 {
        let mut engine = GlitchEngine::new(4, quiet(), seed, 0);
        engine.glitch(0);
        assert!(engine.photos()[0].glitching);

        engine.advance_to(49);
        assert!(engine.photos()[0].glitching, "seed {seed} ended early");

        engine.advance_to(130);
        let photo = &engine.photos()[0];
        assert!(!photo.glitching, "seed {seed}");
        assert_eq!(photo.style().filter, "");
        assert_eq!(photo.style().transform, "rotate(-2deg)");
    }
}

#[test]
fn running_glitch_blocks_a_second_one() {
    let mut engine = GlitchEngine::new(4, quiet(), 3, 0);
    engine.glitch_with(1, GlitchKind::Invert);
    engine.glitch_with(1, GlitchKind::Blur);
    assert_eq!(engine.photos()[1].style().filter, "invert(1)");
}

#[test]
fn skew_glitch_distorts_transform_only() {
    let mut engine = GlitchEngine::new(4, quiet(), 3, 0);
    engine.glitch_with(2, GlitchKind::Skew);
    let style = engine.photos()[2].style();
    assert!(style.transform.contains("skewX("), "{}", style.transform);
    assert_eq!(style.filter, "");
}

#[test]
fn flicker_dims_then_restores_resting_opacity() {
    for seed in 0..20 {
        let mut engine = GlitchEngine::new(4, quiet(), seed, 0);
        engine.flicker(3);
        let dim = opacity_of(&engine, 3);
        assert!((0.1..0.3).contains(&dim), "seed {seed}: {dim}");
        engine.advance_to(80);
        assert_eq!(engine.photos()[3].style().opacity, "0.8");
    }
}

#[test]
fn relocation_lands_inside_a_zone_and_reappears() {
    let mut swapped = 0;
    for seed in 0..40 {
        let mut engine = GlitchEngine::new(4, quiet(), seed, 0);
        engine.relocate(1);
        {
            let photo = &engine.photos()[1];
            assert!(!photo.visible);
            assert_eq!(photo.style().opacity, "0");
            assert_eq!(photo.style().transition, "opacity 0.3s");
        }

        engine.advance_to(499);
        assert_eq!(engine.photos()[1].base_x, 75.0);

        engine.advance_to(500);
        let photo = &engine.photos()[1];
        assert!(
            ZONES.iter().any(|z| z.contains(photo.base_x, photo.base_y)),
            "seed {seed}: ({}, {})",
            photo.base_x,
            photo.base_y
        );
        assert!((-4.0..4.0).contains(&photo.base_rotation));
        assert!((15.0..30.0).contains(&photo.width));
        assert_eq!(photo.style().left, format!("{}vw", photo.base_x));
        assert!(!photo.visible);
        if let Some(src) = photo.style().src {
            assert!(PHOTO_SOURCES.contains(&src));
            swapped += 1;
        }

        engine.advance_to(600);
        let photo = &engine.photos()[1];
        assert!(photo.visible);
        assert_eq!(photo.style().opacity, "0.8");
        assert_eq!(photo.style().transition, "opacity 0.3s");

        engine.advance_to(900);
        assert_eq!(engine.photos()[1].style().transition, "");
    }
    assert!(swapped > 0 && swapped < 40, "swapped {swapped} of 40");
}

#[test]
fn hidden_photo_is_left_alone() {
    let mut engine = GlitchEngine::new(4, quiet(), 9, 0);
    engine.relocate(0);
    engine.relocate(0);
    engine.glitch(0);
    engine.flicker(0);
    engine.slice(0);

    let photo = &engine.photos()[0];
    assert!(!photo.glitching);
    assert_eq!(photo.style().opacity, "0");
    assert_eq!(photo.style().clip_path, "");
}

#[test]
fn flicker_ending_during_relocation_keeps_photo_hidden() {
    let mut engine = GlitchEngine::new(4, quiet(), 4, 0);
    engine.flicker(2);
    engine.relocate(2);

    engine.advance_to(80);
    let photo = &engine.photos()[2];
    assert_eq!(photo.style().opacity, "0");
    assert!(!photo.visible);

    engine.advance_to(600);
    let photo = &engine.photos()[2];
    assert_eq!(photo.style().opacity, "0.8");
    assert!(photo.visible);
}

#[test]
fn tick_exactly_one_period_late_still_fires() {
    let config = GlitchConfig {
        jitter_every: 80,
        ..quiet()
    };
    let mut stepped = GlitchEngine::new(4, config.clone(), 12, 0);
    stepped.advance_to(80);
    stepped.advance_to(160);

    let mut jumped = GlitchEngine::new(4, config, 12, 0);
    jumped.advance_to(160);

    for (a, b) in stepped.photos().iter().zip(jumped.photos()) {
        assert_eq!(a.style(), b.style());
    }
}

#[test]
fn jitter_skips_glitching_and_hidden_photos() {
    let config = GlitchConfig {
        jitter_every: 80,
        ..quiet()
    };
    let mut engine = GlitchEngine::new(4, config, 5, 0);
    engine.relocate(0);
    engine.glitch_with(1, GlitchKind::Invert);

    engine.advance_to(45);
    assert!(engine.photos()[1].glitching);
    engine.advance_to(80);

    assert_eq!(engine.photos()[0].style().transform, "rotate(-2deg)");
    for i in 2..4 {
        let t = &engine.photos()[i].style().transform;
        assert!(t.starts_with("translate("), "photo {i}: {t}");
    }
}

#[test]
fn slice_cuts_three_to_five_bands_then_clears() {
    for seed in 0..20 {
        let mut engine = GlitchEngine::new(4, quiet(), seed, 0);
        engine.slice(2);
        let clip = engine.photos()[2].style().clip_path.clone();
        assert!(clip.starts_with("polygon(") && clip.ends_with(')'), "{clip}");
        let points = clip.matches(", ").count() + 1;
        assert!([12, 16, 20].contains(&points), "seed {seed}: {points} points");

        engine.advance_to(120);
        assert_eq!(engine.photos()[2].style().clip_path, "");
    }
}

#[test]
fn slice_polygon_stacks_shifted_bands() {
    assert_eq!(
        slice_polygon(&[0.0, -6.0, 0.0]),
        "polygon(0.00% 0.00%, 100.00% 0.00%, 100.00% 33.33%, 0.00% 33.33%, \
         -6.00% 33.33%, 94.00% 33.33%, 94.00% 66.67%, -6.00% 66.67%, \
         0.00% 66.67%, 100.00% 66.67%, 100.00% 100.00%, 0.00% 100.00%)"
    );
}

#[test]
fn burst_glitches_photos_in_rapid_pulses() {
    let config = GlitchConfig {
        burst_hit_chance: 1.0,
        ..quiet()
    };
    let mut engine = GlitchEngine::new(4, config, 11, 0);
    engine.burst();
    engine.advance_to(39);
    assert!(engine.photos().iter().all(|p| !p.glitching));

    engine.advance_to(40);
    assert!(engine.photos().iter().all(|p| p.glitching));

    // last pulse at 200ms, longest glitch 129ms
    engine.advance_to(330);
    assert!(engine.photos().iter().all(|p| !p.glitching));
}

#[test]
fn same_seed_replays_the_same_animation() {
    let mut a = GlitchEngine::new(4, GlitchConfig::default(), 42, 0);
    let mut b = GlitchEngine::new(4, GlitchConfig::default(), 42, 0);
    for frame in 0..600u64 {
        a.advance_to(frame * 16);
        b.advance_to(frame * 16);
    }
    for (pa, pb) in a.photos().iter().zip(b.photos()) {
        assert_eq!(pa.style(), pb.style());
    }
}

#[test]
fn long_run_keeps_styles_well_formed() {
    let mut engine = GlitchEngine::new(4, GlitchConfig::default(), 7, 0);
    let mut touched = 0;
    for frame in 1..=3750u64 {
        engine.advance_to(frame * 16);
        touched += engine.take_dirty().len();
        for photo in engine.photos() {
            let o = photo.style().opacity.parse::<f64>().unwrap();
            assert!((0.0..=0.8).contains(&o));
            if !photo.visible {
                assert_eq!(photo.style().opacity, "0");
            }
        }
    }
    assert!(touched > 0);
}

#[test]
fn stalled_clock_does_not_replay_missed_ticks() {
    let mut engine = GlitchEngine::new(4, GlitchConfig::default(), 8, 0);
    engine.advance_to(3_600_000);
    assert_eq!(engine.now(), 3_600_000);
    engine.advance_to(3_600_100);
    assert_eq!(engine.now(), 3_600_100);
}
