//! Sample stream trait.

/// A source of successive samples, such as a curve being played back.
pub trait Signal {
    /// Produces the next sample and advances.
    fn next_sample(&mut self) -> f64;

    /// Fills `buffer` with consecutive samples.
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

/// A constant value is a signal that never changes.
///
/// # Examples
///
/// ```
/// use animnoise::Signal;
///
/// let mut constant = 0.5_f64;
/// let mut buffer = vec![0.0; 4];
/// constant.process(&mut buffer);
/// assert_eq!(buffer, vec![0.5, 0.5, 0.5, 0.5]);
/// ```
impl Signal for f64 {
    fn next_sample(&mut self) -> f64 {
        *self
    }

    fn process(&mut self, buffer: &mut [f64]) {
        buffer.fill(*self);
    }
}
