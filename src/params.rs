//! Curve parameters.
//!
//! A [`ParameterSet`] describes the shape of one noise or sine curve. It has no
//! identity beyond its field values, so callers are free to build one per
//! evaluation or keep one around and tweak it between frames.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smoothing value substituted when the requested smoothing is exactly zero.
pub const MIN_SMOOTHING: f64 = 0.01;

/// Error type for parsing a [`Wave`] from a string.
#[derive(Debug, Clone, PartialEq)]
pub enum WaveParseError {
    /// The input string was empty
    Empty,
    /// The input did not name a known wave
    Unknown(String),
}

impl fmt::Display for WaveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaveParseError::Empty => write!(f, "input string is empty"),
            WaveParseError::Unknown(s) => write!(f, "unknown wave: '{}'", s),
        }
    }
}

impl std::error::Error for WaveParseError {}

/// Selects which generator produces the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Wave {
    /// Smoothed pseudo-random noise
    #[default]
    Noise,
    /// Closed-form sine wave
    Sine,
}

impl Wave {
    /// Host-side enum index (`Noise = 0`, `Sine = 1`).
    pub fn index(self) -> i64 {
        match self {
            Wave::Noise => 0,
            Wave::Sine => 1,
        }
    }

    /// Converts a host-side enum index back into a wave.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Wave::Noise),
            1 => Some(Wave::Sine),
            _ => None,
        }
    }

    /// Display name used by hosts for the enum field.
    pub fn name(self) -> &'static str {
        match self {
            Wave::Noise => "Noise",
            Wave::Sine => "Sine",
        }
    }
}

impl FromStr for Wave {
    type Err = WaveParseError;

    /// Parses `"noise"`/`"sine"` (any case) or the enum indices `"0"`/`"1"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use animnoise::Wave;
    ///
    /// assert_eq!("Sine".parse::<Wave>(), Ok(Wave::Sine));
    /// assert_eq!("0".parse::<Wave>(), Ok(Wave::Noise));
    /// assert!("square".parse::<Wave>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(WaveParseError::Empty);
        }
        match s.to_ascii_lowercase().as_str() {
            "noise" | "0" => Ok(Wave::Noise),
            "sine" | "1" => Ok(Wave::Sine),
            _ => Err(WaveParseError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Wave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters describing one animated curve.
///
/// Values outside their documented ranges are accepted here and clamped by
/// [`ParameterSet::sanitized`] at evaluation time, so a curve never fails
/// mid-playback because a host pushed an out-of-range value.
///
/// # Examples
///
/// ```
/// use animnoise::{ParameterSet, Wave};
///
/// let params = ParameterSet::default()
///     .with_seed(7)
///     .with_amplitude(2.5)
///     .with_wave(Wave::Sine);
/// assert_eq!(params.seed, 7);
/// assert_eq!(params.smoothing, 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ParameterSet {
    /// Low-pass filter strength in [0, 1]
    pub smoothing: f64,
    /// Additive bias, applied last
    pub offset: f64,
    /// Multiplicative scale, applied before `offset`
    pub amplitude: f64,
    /// Time-axis warp factor in [0, 1]
    pub frequency: f64,
    /// Base seed offsetting the pseudo-random sequence
    pub seed: i64,
    /// Length of the filter's convergence window
    pub smooth_iterations: i64,
    /// Take the absolute value before applying `offset`
    pub rectify: bool,
    /// Sine: phase in degrees. Noise: extra integer seed offset.
    pub phase: f64,
    /// Which generator to use
    pub wave: Wave,
}

impl ParameterSet {
    /// Default parameters, usable in const contexts.
    pub const DEFAULT: ParameterSet = ParameterSet {
        smoothing: 0.5,
        offset: 0.0,
        amplitude: 1.0,
        frequency: 0.25,
        seed: 1,
        smooth_iterations: 100,
        rectify: false,
        phase: 0.0,
        wave: Wave::Noise,
    };

    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_smooth_iterations(mut self, iterations: i64) -> Self {
        self.smooth_iterations = iterations;
        self
    }

    pub fn with_rectify(mut self, rectify: bool) -> Self {
        self.rectify = rectify;
        self
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_wave(mut self, wave: Wave) -> Self {
        self.wave = wave;
        self
    }

    /// Returns the effective parameters the evaluator works with.
    ///
    /// - `smoothing` and `frequency` are clamped to [0, 1]
    /// - a `smoothing` of exactly zero becomes [`MIN_SMOOTHING`]
    /// - `smooth_iterations` is raised to at least 1
    /// - non-finite reals fall back to their defaults
    ///
    /// # Examples
    ///
    /// ```
    /// use animnoise::ParameterSet;
    ///
    /// let p = ParameterSet::default()
    ///     .with_smoothing(0.0)
    ///     .with_frequency(3.0)
    ///     .with_smooth_iterations(-4)
    ///     .sanitized();
    /// assert_eq!(p.smoothing, 0.01);
    /// assert_eq!(p.frequency, 1.0);
    /// assert_eq!(p.smooth_iterations, 1);
    /// ```
    pub fn sanitized(&self) -> Self {
        let d = Self::DEFAULT;

        let mut smoothing = finite_or(self.smoothing, d.smoothing).clamp(0.0, 1.0);
        if smoothing == 0.0 {
            smoothing = MIN_SMOOTHING;
        }

        Self {
            smoothing,
            offset: finite_or(self.offset, d.offset),
            amplitude: finite_or(self.amplitude, d.amplitude),
            frequency: finite_or(self.frequency, d.frequency).clamp(0.0, 1.0),
            seed: self.seed,
            smooth_iterations: self.smooth_iterations.max(1),
            rectify: self.rectify,
            phase: finite_or(self.phase, d.phase),
            wave: self.wave,
        }
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}
