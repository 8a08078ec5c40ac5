//! Sine generator.

use crate::params::ParameterSet;
use std::f64::consts::PI;

/// Raw sine value before amplitude, rectification and offset.
///
/// One cycle spans `1 / frequency` frames and `phase` is in degrees. Unlike a
/// running oscillator there is no phase accumulator, so any frame can be
/// evaluated directly.
///
/// # Examples
///
/// ```
/// use animnoise::oscillators::sine_value;
/// use animnoise::{ParameterSet, Wave};
///
/// let params = ParameterSet::default().with_wave(Wave::Sine).with_frequency(1.0);
/// assert!((sine_value(0.25, &params) - 1.0).abs() < 1e-12);
/// ```
pub fn sine_value(frame: f64, params: &ParameterSet) -> f64 {
    (params.phase.to_radians() + frame * params.frequency * PI * 2.0).sin()
}
