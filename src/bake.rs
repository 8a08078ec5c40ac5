//! Baking curves into sample buffers.
//!
//! Baking evaluates a curve over a frame range up front, for hosts that want
//! keyframes instead of a live node or for auditioning a curve offline.

use crate::params::ParameterSet;
use crate::signals::{CurveSignal, Signal};

/// Largest buffer [`bake`] will allocate, in samples.
pub const MAX_BAKE_SAMPLES: usize = 1 << 24;

/// Samples the curve over `[start, end)` every `step` frames.
///
/// # Arguments
///
/// * `params` - Curve parameters
/// * `start` - First frame sampled
/// * `end` - Exclusive end of the frame range
/// * `step` - Frames between consecutive samples
///
/// Returns an empty buffer when the range is empty or unbounded, when
/// `step` is not a positive finite number, or when the range would need
/// more than [`MAX_BAKE_SAMPLES`] samples.
///
/// # Examples
///
/// ```
/// use animnoise::{ParameterSet, bake, evaluate};
///
/// let params = ParameterSet::default();
/// let samples = bake(&params, 0.0, 10.0, 0.5);
/// assert_eq!(samples.len(), 20);
/// assert_eq!(samples[3], evaluate(1.5, &params));
/// ```
pub fn bake(params: &ParameterSet, start: f64, end: f64, step: f64) -> Vec<f64> {
    if !step.is_finite() || step <= 0.0 || !start.is_finite() || !end.is_finite() || end <= start {
        return Vec::new();
    }

    let count = ((end - start) / step).ceil();
    if !count.is_finite() || count > MAX_BAKE_SAMPLES as f64 {
        return Vec::new();
    }
    let count = count as usize;
    let mut curve = CurveSignal::new(*params, start, step);
    let mut samples = vec![0.0; count];
    curve.process(&mut samples);
    samples
}

/// Writes samples as a mono 32-bit float WAV file.
///
/// # Arguments
///
/// * `path` - Destination file, created or truncated
/// * `samples` - Sample values, written as `f32` without clamping
/// * `sample_rate` - Rate stored in the WAV header, in samples per second
///
/// # Examples
///
/// ```no_run
/// use animnoise::{ParameterSet, bake, write_wav};
///
/// let samples = bake(&ParameterSet::default(), 0.0, 240.0, 1.0);
/// write_wav("jitter.wav", &samples, 24).unwrap();
/// ```
#[cfg(feature = "wav-export")]
pub fn write_wav<P: AsRef<std::path::Path>>(
    path: P,
    samples: &[f64],
    sample_rate: u32,
) -> Result<(), hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample as f32)?;
    }
    writer.finalize()
}
