//! Smoothed pseudo-random noise.
//!
//! This module contains the keyed draw sources, the exponential filter chain
//! built on top of them, and the noise generator that blends filtered samples
//! across frame boundaries.

mod draw;
mod filter;
mod smoothed;

pub use draw::{KeyedDraw, MersenneDraw, SeededDraw};
pub use filter::{FilterWindow, SMOOTHING_HEADROOM, filter_chain};
pub use smoothed::{ease_fraction, noise_value};
