#![cfg(feature = "macros")]

use animnoise::{ParameterSet, Wave, evaluate, params};

#[test]
fn test_params_macro_empty_is_default() {
    let p = params! {};
    assert_eq!(p, ParameterSet::default());
}

#[test]
fn test_params_macro_fields() {
    let p = params! {
        smoothing: 0.8,
        amplitude: 3,
        offset: -1.5,
        seed: 42,
        wave: Sine,
    };
    assert_eq!(p.smoothing, 0.8);
    assert_eq!(p.amplitude, 3.0);
    assert_eq!(p.offset, -1.5);
    assert_eq!(p.seed, 42);
    assert_eq!(p.wave, Wave::Sine);
    assert_eq!(p.frequency, 0.25);
}

#[test]
fn test_params_macro_host_names() {
    let p = params! { smoothIterations: 12, rect: true, wav: "noise", p: 90 };
    assert_eq!(p.smooth_iterations, 12);
    assert!(p.rectify);
    assert_eq!(p.wave, Wave::Noise);
    assert_eq!(p.phase, 90.0);
}

#[test]
fn test_params_macro_runtime_values() {
    let base = 0.1;
    let wave = Wave::Sine;
    let p = params! { frequency: base * 2.0, wave: wave };
    assert_eq!(p.frequency, 0.2);
    assert_eq!(p.wave, Wave::Sine);
}

#[test]
fn test_params_macro_evaluates() {
    let p = params! { wave: Sine, frequency: 1 };
    assert!((evaluate(0.25, &p) - 1.0).abs() < 1e-12);
}

#[test]
fn test_params_macro_const() {
    const SHAKE: ParameterSet = params! { amplitude: 0.5, seed: -3 };
    assert_eq!(SHAKE.amplitude, 0.5);
    assert_eq!(SHAKE.seed, -3);
}
