use animnoise::{ParameterSet, Wave, evaluate};

const EPSILON: f64 = 1e-12;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn sample_frames() -> impl Iterator<Item = f64> {
    (-50..50).map(|i| i as f64 * 0.37)
}

fn parameter_grid() -> Vec<ParameterSet> {
    let mut grid = Vec::new();
    for smoothing in [0.0, 0.3, 0.6] {
        for frequency in [0.1, 1.0] {
            for seed in [-3, 99] {
                grid.push(
                    ParameterSet::default()
                        .with_smoothing(smoothing)
                        .with_frequency(frequency)
                        .with_seed(seed)
                        .with_smooth_iterations(30),
                );
            }
        }
    }
    grid
}

#[test]
fn test_legacy_golden_frames() {
    let params = ParameterSet::default();
    let golden = [
        (0.0, -0.23801603665632143),
        (1.0, -0.15867070460882138),
        (7.0, -0.10310547671054497),
        (12.0, 0.35256221656910136),
        (100.0, 0.5280781407481681),
        (-3.0, -0.15867070460882138),
        (-9.0, 0.0956607067253466),
        (10.5, 0.06482909554196946),
    ];
    for (frame, expected) in golden {
        let value = evaluate(frame, &params);
        assert!(approx_eq(value, expected), "frame {frame}: {value} != {expected}");
    }
}

#[test]
fn test_negative_frames_truncate_toward_zero() {
    let params = ParameterSet::default();
    assert_eq!(evaluate(-3.0, &params), evaluate(1.0, &params));
}

#[test]
fn test_legacy_golden_seeds() {
    let value = evaluate(50.0, &ParameterSet::default().with_seed(-5));
    assert!(approx_eq(value, 0.10081328079697649));

    let params = ParameterSet::default()
        .with_seed(123456789)
        .with_smoothing(0.2)
        .with_smooth_iterations(7);
    assert!(approx_eq(evaluate(3.0, &params), -0.19537948407683564));
}

#[test]
fn test_noise_phase_offsets_seed_by_whole_units() {
    let by_phase = evaluate(3.0, &ParameterSet::default().with_phase(-2.9));
    let by_seed = evaluate(3.0, &ParameterSet::default().with_seed(-1));
    assert_eq!(by_phase, by_seed);
    assert!(approx_eq(by_phase, 0.0956607067253466));
}

#[test]
fn test_determinism() {
    for params in parameter_grid() {
        for frame in sample_frames() {
            let a = evaluate(frame, &params);
            let b = evaluate(frame, &params);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}

#[test]
fn test_order_independence() {
    let params = ParameterSet::default().with_seed(17);
    let alone = evaluate(5.0, &params);

    let mut seen = Vec::new();
    for frame in [5.0, 3.0, 5.0, 1.0] {
        seen.push((frame, evaluate(frame, &params)));
    }
    for (frame, value) in seen {
        if frame == 5.0 {
            assert_eq!(value, alone);
        }
    }
}

#[test]
fn test_boundedness() {
    for params in parameter_grid() {
        for wave in [Wave::Noise, Wave::Sine] {
            let params = params.with_wave(wave);
            for frame in sample_frames() {
                let value = evaluate(frame, &params);
                assert!((-1.0..=1.0).contains(&value), "{wave} at {frame}: {value}");
            }
        }
    }
}

#[test]
fn test_rectify_invariant() {
    for params in parameter_grid() {
        for wave in [Wave::Noise, Wave::Sine] {
            let plain = params.with_wave(wave).with_amplitude(-2.5).with_offset(0.0);
            let rectified = plain.with_rectify(true).with_offset(4.0);
            for frame in sample_frames() {
                let expected = evaluate(frame, &plain).abs() + 4.0;
                assert!(approx_eq(evaluate(frame, &rectified), expected));
            }
        }
    }
}

#[test]
fn test_continuity_across_integer_boundaries() {
    for params in parameter_grid() {
        // Negative frames truncate toward zero, so only the forward axis is seamless
        let mut previous = evaluate(0.0, &params);
        for i in 1..600 {
            let frame = i as f64 * 0.01;
            let value = evaluate(frame, &params);
            // A jump would be on the order of the full [-1, 1] range
            assert!(
                (value - previous).abs() < 0.1,
                "jump at {frame}: {previous} -> {value}"
            );
            previous = value;
        }
    }
}

#[test]
fn test_sine_exactness() {
    let params = ParameterSet::default().with_wave(Wave::Sine).with_frequency(1.0);
    assert!(approx_eq(evaluate(0.25, &params), 1.0));
    assert!(approx_eq(evaluate(0.0, &params), 0.0));
    assert!(approx_eq(evaluate(0.75, &params), -1.0));
}

#[test]
fn test_amplitude_offset_composition() {
    for params in parameter_grid() {
        for wave in [Wave::Noise, Wave::Sine] {
            let unit = params.with_wave(wave);
            for (amplitude, offset) in [(2.0, 0.5), (-1.5, 3.0), (0.0, -7.0), (10.0, 0.0)] {
                let scaled = unit.with_amplitude(amplitude).with_offset(offset);
                for frame in sample_frames().step_by(7) {
                    let expected = amplitude * evaluate(frame, &unit) + offset;
                    assert!((evaluate(frame, &scaled) - expected).abs() < 1e-9);
                }
            }
        }
    }
}

#[test]
fn test_seed_sensitivity() {
    for params in parameter_grid() {
        let next = params.with_seed(params.seed + 1);
        assert!(
            sample_frames().any(|f| evaluate(f, &params) != evaluate(f, &next)),
            "seed {} and {} produced identical curves",
            params.seed,
            next.seed
        );
    }
}

#[test]
fn test_out_of_range_parameters_clamp() {
    let clamped = ParameterSet::default().with_smoothing(1.0).with_frequency(1.0);
    let wild = ParameterSet::default().with_smoothing(9.0).with_frequency(4.0);
    for frame in sample_frames() {
        assert_eq!(evaluate(frame, &wild), evaluate(frame, &clamped));
    }

    let one = ParameterSet::default().with_smooth_iterations(1);
    let negative = ParameterSet::default().with_smooth_iterations(-10);
    assert_eq!(evaluate(4.0, &negative), evaluate(4.0, &one));
}

#[test]
fn test_zero_frequency_is_constant() {
    let params = ParameterSet::default().with_frequency(0.0);
    let first = evaluate(0.0, &params);
    for frame in sample_frames() {
        assert_eq!(evaluate(frame, &params), first);
    }
}
