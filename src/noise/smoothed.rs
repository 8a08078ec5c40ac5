//! Smoothed noise generator.

use super::draw::KeyedDraw;
use super::filter::{FilterWindow, filter_chain};
use crate::params::ParameterSet;
use std::f64::consts::PI;

/// Eases a sub-frame fraction in `[0, 1]`.
///
/// Averages a linear ramp with a cosine ease-in, which keeps the blend
/// monotonic and inside `[0, 1]`.
///
/// # Examples
///
/// ```
/// use animnoise::noise::ease_fraction;
///
/// assert_eq!(ease_fraction(0.0), 0.0);
/// assert!((ease_fraction(1.0) - 1.0).abs() < 1e-12);
/// assert!(ease_fraction(0.5) < 0.5);
/// ```
pub fn ease_fraction(fraction: f64) -> f64 {
    (1.0 - (fraction * PI * 0.5).cos() + fraction) * 0.5
}

/// Splits a warped frame into the integer window key and the eased blend
/// weight.
///
/// The integer part truncates toward zero while the fraction is the floored
/// remainder, so warped frames in `(-1, 0)` reuse window 0.
fn split_frame(warped: f64) -> (i64, f64) {
    let fraction = ease_fraction(warped.rem_euclid(1.0));
    (warped.trunc() as i64, fraction)
}

/// Raw noise value before amplitude, rectification and offset.
///
/// `params` must already be sanitized. The result lies in `[-1, 1]`.
pub fn noise_value<D: KeyedDraw>(draw: &D, frame: f64, params: &ParameterSet) -> f64 {
    let (integer_frame, fraction) = split_frame(frame * params.frequency);

    let seed = integer_frame
        .saturating_add(params.seed)
        .saturating_add(params.phase.trunc() as i64);

    let window = FilterWindow::from_params(params);
    let (current, previous) = filter_chain(draw, seed, window);

    previous * (1.0 - fraction) + current * fraction
}
