//! Exponential filter chain over keyed draws.

use super::draw::KeyedDraw;
use crate::params::ParameterSet;

/// Headroom factor keeping the feedback coefficient below unity.
pub const SMOOTHING_HEADROOM: f64 = 0.95;

/// Coefficients and window length for [`filter_chain`].
///
/// `a` weights the accumulated value, `b = 1 - a` weights each fresh draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterWindow {
    pub a: f64,
    pub b: f64,
    pub iterations: i64,
}

impl FilterWindow {
    /// Builds a window, clamping `a` to `[0, SMOOTHING_HEADROOM]` and the
    /// iteration count to at least 1.
    ///
    /// # Arguments
    ///
    /// * `a` - Feedback weight of the previous filter output
    /// * `iterations` - Number of draws folded into each value
    pub fn new(a: f64, iterations: i64) -> Self {
        let a = a.clamp(0.0, SMOOTHING_HEADROOM);
        Self {
            a,
            b: 1.0 - a,
            iterations: iterations.max(1),
        }
    }

    /// Window for already-sanitized parameters.
    pub fn from_params(params: &ParameterSet) -> Self {
        Self::new(params.smoothing * SMOOTHING_HEADROOM, params.smooth_iterations)
    }
}

/// Runs the exponential moving average over the `iterations` keys preceding
/// `seed` and returns `(current, previous)` remapped to `[-1, 1]`.
///
/// `current` is the filter output after the last step (key `seed - 1`),
/// `previous` the output one step earlier. Both are pure functions of
/// `(seed, window)` and the draw source.
///
/// # Examples
///
/// ```
/// use animnoise::noise::{FilterWindow, MersenneDraw, filter_chain};
///
/// let window = FilterWindow::new(0.475, 100);
/// let (current, previous) = filter_chain(&MersenneDraw, 10, window);
/// assert!((-1.0..=1.0).contains(&current));
/// assert!((-1.0..=1.0).contains(&previous));
/// ```
pub fn filter_chain<D: KeyedDraw>(draw: &D, seed: i64, window: FilterWindow) -> (f64, f64) {
    let n = window.iterations.max(1);
    let start = seed.saturating_sub(n);

    let mut value = draw.draw(start.saturating_sub(1));
    let mut previous = value;
    let mut key = start;
    for _ in 0..n {
        previous = value;
        value = draw.draw(key) * window.b + value * window.a;
        key = key.saturating_add(1);
    }

    (value * 2.0 - 1.0, previous * 2.0 - 1.0)
}
