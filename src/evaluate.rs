//! Curve evaluation entry point.
//!
//! [`evaluate`] is the single operation hosts call once per requested sample.
//! It is a pure function of `(frame, params)`: no caching, no state carried
//! between calls, safe to call from any number of threads at once.

use crate::noise::{KeyedDraw, MersenneDraw, noise_value};
use crate::oscillators::sine_value;
use crate::params::{ParameterSet, Wave};

/// Evaluates a curve with a specific draw source.
///
/// The default draw source reproduces legacy curves; use
/// [`Evaluator::with_draw`] to plug in another [`KeyedDraw`].
///
/// # Examples
///
/// ```
/// use animnoise::{Evaluator, ParameterSet};
/// use animnoise::noise::SeededDraw;
/// use rand::rngs::StdRng;
///
/// let evaluator = Evaluator::with_draw(SeededDraw::<StdRng>::new());
/// let params = ParameterSet::default();
/// assert_eq!(evaluator.evaluate(12.0, &params), evaluator.evaluate(12.0, &params));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator<D: KeyedDraw = MersenneDraw> {
    draw: D,
}

impl Evaluator<MersenneDraw> {
    /// Creates an evaluator using the legacy-compatible draw source.
    pub fn new() -> Self {
        Self { draw: MersenneDraw }
    }
}

impl<D: KeyedDraw> Evaluator<D> {
    /// Creates an evaluator using a custom draw source.
    ///
    /// # Arguments
    ///
    /// * `draw` - Keyed random source used for every noise value
    pub fn with_draw(draw: D) -> Self {
        Self { draw }
    }

    /// Returns the draw source.
    pub fn draw(&self) -> &D {
        &self.draw
    }

    /// Evaluates the curve at `frame`.
    ///
    /// Parameters are sanitized first, so out-of-range values are clamped
    /// rather than rejected.
    pub fn evaluate(&self, frame: f64, params: &ParameterSet) -> f64 {
        let params = params.sanitized();
        let raw = match params.wave {
            Wave::Sine => sine_value(frame, &params),
            Wave::Noise => noise_value(&self.draw, frame, &params),
        };
        shape(raw, &params)
    }
}

/// Applies amplitude, optional rectification, then offset.
///
/// # Examples
///
/// ```
/// use animnoise::{ParameterSet, shape};
///
/// let params = ParameterSet::default()
///     .with_amplitude(2.0)
///     .with_rectify(true)
///     .with_offset(1.0);
/// assert_eq!(shape(-0.25, &params), 1.5);
/// ```
pub fn shape(raw: f64, params: &ParameterSet) -> f64 {
    let mut result = raw * params.amplitude;
    if params.rectify {
        result = result.abs();
    }
    result + params.offset
}

/// Evaluates the curve at `frame` with the legacy-compatible draw source.
///
/// # Examples
///
/// ```
/// use animnoise::{ParameterSet, Wave, evaluate};
///
/// let noise = ParameterSet::default();
/// let v = evaluate(12.0, &noise);
/// assert!((-1.0..=1.0).contains(&v));
///
/// let sine = ParameterSet::default().with_wave(Wave::Sine).with_frequency(1.0);
/// assert!((evaluate(0.25, &sine) - 1.0).abs() < 1e-12);
/// ```
pub fn evaluate(frame: f64, params: &ParameterSet) -> f64 {
    Evaluator::new().evaluate(frame, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_dispatches_on_wave() {
        let noise = ParameterSet::default().with_frequency(1.0);
        let sine = noise.with_wave(Wave::Sine);
        assert!((evaluate(0.25, &sine) - 1.0).abs() < EPSILON);
        assert!(
            (evaluate(0.25, &noise) - noise_value(&MersenneDraw, 0.25, &noise.sanitized())).abs()
                < EPSILON
        );
    }

    #[test]
    fn test_shape_order() {
        let params = ParameterSet::default().with_amplitude(-3.0).with_offset(0.5);
        assert_eq!(shape(0.5, &params), -1.0);

        let params = params.with_rectify(true);
        assert_eq!(shape(0.5, &params), 2.0);
    }

    #[test]
    fn test_custom_params_match_legacy() {
        let params = ParameterSet {
            smoothing: 0.8,
            offset: 2.0,
            amplitude: 3.0,
            frequency: 0.5,
            seed: 9,
            smooth_iterations: 20,
            rectify: true,
            phase: 4.7,
            wave: Wave::Noise,
        };
        let value = evaluate(37.0, &params);
        assert!((value - 2.1544703073949996).abs() < EPSILON, "got {value}");
    }

    #[test]
    fn test_zero_smoothing_uses_minimum() {
        let params = ParameterSet::default().with_smoothing(0.0).with_frequency(1.0);
        let value = evaluate(5.0, &params);
        assert!((value - -0.5277391922449511).abs() < EPSILON, "got {value}");
    }

    #[test]
    fn test_out_of_range_is_clamped_not_rejected() {
        let wild = ParameterSet::default().with_smoothing(4.0).with_frequency(9.0);
        let clamped = ParameterSet::default().with_smoothing(1.0).with_frequency(1.0);
        for frame in [0.0, 3.5, 17.0] {
            assert_eq!(evaluate(frame, &wild), evaluate(frame, &clamped));
        }
    }

    #[test]
    fn test_evaluator_is_shareable_across_threads() {
        let evaluator = Evaluator::new();
        let params = ParameterSet::default();
        let expected: Vec<f64> = (0..64).map(|f| evaluator.evaluate(f as f64, &params)).collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let evaluator = &evaluator;
                    let params = &params;
                    scope.spawn(move || {
                        (0..64usize)
                            .rev()
                            .map(|f| (f, evaluator.evaluate(f as f64, params)))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            for handle in handles {
                for (f, value) in handle.join().unwrap() {
                    assert_eq!(value, expected[f]);
                }
            }
        });
    }
}
