//! Closed-form oscillators evaluated directly at a frame.

mod sine;

pub use sine::sine_value;
