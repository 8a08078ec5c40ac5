//! Frame-stepping playback of a curve.

use super::Signal;
use crate::evaluate::Evaluator;
use crate::noise::{KeyedDraw, MersenneDraw};
use crate::params::ParameterSet;

/// Plays a curve back as a [`Signal`], one frame position per sample.
///
/// Positions are computed as `start + index * step` rather than accumulated,
/// so sample `i` is always exactly the curve evaluated at that position.
/// Seeking is free because the underlying evaluation keeps no history.
///
/// # Examples
///
/// ```
/// use animnoise::{CurveSignal, ParameterSet, Signal, evaluate};
///
/// let params = ParameterSet::default();
/// let mut curve = CurveSignal::new(params, 10.0, 0.5);
/// assert_eq!(curve.next_sample(), evaluate(10.0, &params));
/// assert_eq!(curve.next_sample(), evaluate(10.5, &params));
///
/// curve.seek(-4.0);
/// assert_eq!(curve.next_sample(), evaluate(-4.0, &params));
/// ```
#[derive(Debug, Clone)]
pub struct CurveSignal<D: KeyedDraw = MersenneDraw> {
    evaluator: Evaluator<D>,
    params: ParameterSet,
    start: f64,
    step: f64,
    index: u64,
}

impl CurveSignal<MersenneDraw> {
    /// Creates a playback cursor at `start`, advancing `step` frames per sample.
    ///
    /// # Arguments
    ///
    /// * `params` - Curve parameters, replaceable later with `set_params`
    /// * `start` - Frame of the first sample
    /// * `step` - Frames advanced per sample (e.g., 24.0 / 48000.0 to play a
    ///   24 fps curve at audio rate)
    pub fn new(params: ParameterSet, start: f64, step: f64) -> Self {
        Self::with_evaluator(Evaluator::new(), params, start, step)
    }
}

impl<D: KeyedDraw> CurveSignal<D> {
    /// Creates a playback cursor with a custom evaluator.
    pub fn with_evaluator(evaluator: Evaluator<D>, params: ParameterSet, start: f64, step: f64) -> Self {
        Self {
            evaluator,
            params,
            start,
            step,
            index: 0,
        }
    }

    /// Frame position of the next sample.
    pub fn frame(&self) -> f64 {
        self.start + self.index as f64 * self.step
    }

    /// Frames advanced per sample.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Moves the cursor so the next sample is taken at `frame`.
    pub fn seek(&mut self, frame: f64) {
        self.start = frame;
        self.index = 0;
    }

    /// Changes the step, keeping the current position.
    pub fn set_step(&mut self, step: f64) {
        let frame = self.frame();
        self.step = step;
        self.seek(frame);
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Replaces the parameters; takes effect from the next sample.
    pub fn set_params(&mut self, params: ParameterSet) {
        self.params = params;
    }
}

impl<D: KeyedDraw> Signal for CurveSignal<D> {
    fn next_sample(&mut self) -> f64 {
        let value = self.evaluator.evaluate(self.frame(), &self.params);
        self.index += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::evaluate;
    use crate::params::Wave;

    #[test]
    fn test_samples_match_evaluate() {
        let params = ParameterSet::default().with_seed(5);
        let mut curve = CurveSignal::new(params, -3.0, 0.25);
        for i in 0..40 {
            let frame = -3.0 + i as f64 * 0.25;
            assert_eq!(curve.frame(), frame);
            assert_eq!(curve.next_sample(), evaluate(frame, &params));
        }
    }

    #[test]
    fn test_process_buffer() {
        let params = ParameterSet::default().with_wave(Wave::Sine);
        let mut curve = CurveSignal::new(params, 0.0, 1.0);
        let mut buffer = vec![0.0; 16];
        curve.process(&mut buffer);
        for (i, sample) in buffer.iter().enumerate() {
            assert_eq!(*sample, evaluate(i as f64, &params));
        }
        assert_eq!(curve.frame(), 16.0);
    }

    #[test]
    fn test_scrubbing_backwards_matches_forward() {
        let params = ParameterSet::default();
        let mut forward = CurveSignal::new(params, 0.0, 1.0);
        let values: Vec<f64> = (0..10).map(|_| forward.next_sample()).collect();

        let mut scrub = CurveSignal::new(params, 0.0, 1.0);
        for frame in (0..10).rev() {
            scrub.seek(frame as f64);
            assert_eq!(scrub.next_sample(), values[frame]);
        }
    }

    #[test]
    fn test_set_step_keeps_position() {
        let mut curve = CurveSignal::new(ParameterSet::default(), 2.0, 1.0);
        curve.next_sample();
        curve.next_sample();
        curve.set_step(0.5);
        assert_eq!(curve.frame(), 4.0);
        curve.next_sample();
        assert_eq!(curve.frame(), 4.5);
        assert_eq!(curve.step(), 0.5);
    }

    #[test]
    fn test_set_params() {
        let mut curve = CurveSignal::new(ParameterSet::default(), 0.0, 1.0);
        let sine = ParameterSet::default().with_wave(Wave::Sine).with_phase(90.0);
        curve.set_params(sine);
        assert_eq!(curve.params().wave, Wave::Sine);
        assert!((curve.next_sample() - 1.0).abs() < 1e-12);
    }
}
