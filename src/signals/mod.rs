//! Signal abstractions for playing curves back over time.
//!
//! This module provides:
//! - `Signal` trait for anything that produces a stream of samples
//! - `CurveSignal` for walking a curve along the frame axis

mod core;
mod curve;

pub use core::Signal;
pub use curve::CurveSignal;
