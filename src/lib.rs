//! animnoise - Smoothed random animation curves
//!
//! This library evaluates procedural curves for driving animated attributes:
//! band-limited random noise that wanders smoothly from frame to frame, or a
//! plain sine wave, both scaled and offset into the range an animator wants.
//!
//! ```
//! use animnoise::{ParameterSet, Wave, evaluate};
//!
//! let params = ParameterSet::default().with_amplitude(2.0).with_seed(7);
//! let value = evaluate(48.0, &params);
//! assert!(value.abs() <= 2.0);
//!
//! let sine = ParameterSet::default().with_wave(Wave::Sine);
//! assert_eq!(evaluate(0.0, &sine), 0.0);
//! ```

pub mod bake;
pub mod evaluate;
pub mod host;
pub mod noise;
pub mod oscillators;
pub mod params;
#[cfg(feature = "serde")]
pub mod preset;
pub mod signals;

// Re-export commonly used types at the crate root
pub use bake::{MAX_BAKE_SAMPLES, bake};
#[cfg(feature = "wav-export")]
pub use bake::write_wav;
pub use evaluate::{Evaluator, evaluate, shape};
pub use params::{MIN_SMOOTHING, ParameterSet, Wave, WaveParseError};
#[cfg(feature = "serde")]
pub use preset::{PresetError, load_preset, save_preset};
pub use signals::{CurveSignal, Signal};

#[cfg(feature = "macros")]
pub use animnoise_macros::params;
