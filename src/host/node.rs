//! Attribute-level adapter between a host dependency graph and the evaluator.

use crate::evaluate::Evaluator;
use crate::params::{ParameterSet, Wave};
use std::fmt;
use tracing::trace;

/// Plugs exposed by a noise node, named as the host sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Time,
    Smoothing,
    Offset,
    Amplitude,
    Frequency,
    Seed,
    SmoothIterations,
    Rectify,
    Phase,
    Wave,
    Output,
}

impl Attribute {
    /// Every attribute in declaration order.
    pub const ALL: [Attribute; 11] = [
        Attribute::Time,
        Attribute::Offset,
        Attribute::Amplitude,
        Attribute::Frequency,
        Attribute::SmoothIterations,
        Attribute::Output,
        Attribute::Rectify,
        Attribute::Wave,
        Attribute::Phase,
        Attribute::Smoothing,
        Attribute::Seed,
    ];

    pub fn long_name(self) -> &'static str {
        match self {
            Attribute::Time => "time",
            Attribute::Smoothing => "smoothing",
            Attribute::Offset => "offset",
            Attribute::Amplitude => "amplitude",
            Attribute::Frequency => "frequency",
            Attribute::Seed => "seed",
            Attribute::SmoothIterations => "smoothIterations",
            Attribute::Rectify => "rectify",
            Attribute::Phase => "phase",
            Attribute::Wave => "wave",
            Attribute::Output => "output",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Attribute::Time => "tm",
            Attribute::Smoothing => "smooth",
            Attribute::Offset => "off",
            Attribute::Amplitude => "amp",
            Attribute::Frequency => "frequency",
            Attribute::Seed => "seed",
            Attribute::SmoothIterations => "smiter",
            Attribute::Rectify => "rect",
            Attribute::Phase => "p",
            Attribute::Wave => "wav",
            Attribute::Output => "out",
        }
    }

    /// Looks an attribute up by long or short name.
    ///
    /// # Examples
    ///
    /// ```
    /// use animnoise::host::Attribute;
    ///
    /// assert_eq!(Attribute::from_name("smiter"), Some(Attribute::SmoothIterations));
    /// assert_eq!(Attribute::from_name("output"), Some(Attribute::Output));
    /// assert_eq!(Attribute::from_name("color"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.long_name() == name || a.short_name() == name)
    }

    /// Whether the attribute can be written by the host.
    pub fn is_input(self) -> bool {
        self != Attribute::Output
    }

    /// Whether a change to `self` dirties `other`.
    pub fn affects(self, other: Attribute) -> bool {
        self.is_input() && other == Attribute::Output
    }

    /// Whether animators may key the attribute.
    pub fn is_keyable(self) -> bool {
        matches!(
            self,
            Attribute::Smoothing
                | Attribute::Offset
                | Attribute::Amplitude
                | Attribute::Frequency
                | Attribute::Rectify
                | Attribute::Phase
                | Attribute::Wave
        )
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

/// A value travelling through a plug.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttrValue {
    Float(f64),
    Int(i64),
    Bool(bool),
    Wave(Wave),
}

impl AttrValue {
    fn as_float(self) -> Option<f64> {
        match self {
            AttrValue::Float(v) => Some(v),
            AttrValue::Int(v) => Some(v as f64),
            _ => None,
        }
    }

    fn as_int(self) -> Option<i64> {
        match self {
            AttrValue::Int(v) => Some(v),
            AttrValue::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            _ => None,
        }
    }

    fn as_bool(self) -> Option<bool> {
        match self {
            AttrValue::Bool(v) => Some(v),
            AttrValue::Int(v) => Some(v != 0),
            AttrValue::Float(v) if v.is_finite() => Some(v != 0.0),
            _ => None,
        }
    }

    fn as_wave(self) -> Option<Wave> {
        match self {
            AttrValue::Wave(w) => Some(w),
            AttrValue::Int(i) => Wave::from_index(i),
            AttrValue::Float(v) if v.is_finite() => Wave::from_index(v.trunc() as i64),
            _ => None,
        }
    }

    /// Numeric view used when a plug drives a plain float attribute.
    pub fn to_f64(self) -> f64 {
        match self {
            AttrValue::Float(v) => v,
            AttrValue::Int(v) => v as f64,
            AttrValue::Bool(v) => f64::from(u8::from(v)),
            AttrValue::Wave(w) => w.index() as f64,
        }
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<Wave> for AttrValue {
    fn from(value: Wave) -> Self {
        AttrValue::Wave(value)
    }
}

/// Error type for attribute access on a [`NoiseNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeError {
    /// No attribute with that name exists
    Unknown(String),
    /// The attribute is computed and cannot be set
    ReadOnly(Attribute),
    /// The value does not fit the attribute's type
    TypeMismatch {
        attribute: Attribute,
        value: AttrValue,
    },
}

impl fmt::Display for AttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeError::Unknown(name) => write!(f, "unknown attribute: '{}'", name),
            AttributeError::ReadOnly(attr) => write!(f, "attribute '{}' is read-only", attr),
            AttributeError::TypeMismatch { attribute, value } => {
                write!(f, "cannot set '{}' from {:?}", attribute, value)
            }
        }
    }
}

impl std::error::Error for AttributeError {}

/// Host-facing noise node.
///
/// Holds the node's input plugs and a cached output. Writing any input marks
/// the output dirty; reading the output recomputes it only when dirty. The
/// cache is an optimisation: the value is always `evaluate(trunc(time))` for
/// the current inputs.
///
/// # Examples
///
/// ```
/// use animnoise::host::{Attribute, NoiseNode};
/// use animnoise::{ParameterSet, evaluate};
///
/// let mut node = NoiseNode::new("jitter");
/// node.set(Attribute::Time, 12.6.into()).unwrap();
/// node.set(Attribute::Amplitude, 2.0.into()).unwrap();
///
/// let expected = evaluate(12.0, &ParameterSet::default().with_amplitude(2.0));
/// assert_eq!(node.output(), expected);
/// ```
#[derive(Debug, Clone)]
pub struct NoiseNode {
    name: String,
    time: f64,
    params: ParameterSet,
    output: f64,
    dirty: bool,
    evaluator: Evaluator,
}

impl NoiseNode {
    /// Node type name registered with hosts.
    pub const TYPE_NAME: &'static str = "animNoise";

    /// Creates a node with default parameters at time 0.
    ///
    /// # Arguments
    ///
    /// * `name` - Node name as the host sees it
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time: 0.0,
            params: ParameterSet::default(),
            output: 0.0,
            dirty: true,
            evaluator: Evaluator::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Replaces every curve parameter at once.
    pub fn set_params(&mut self, params: ParameterSet) {
        self.params = params;
        self.dirty = true;
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Whether the next [`NoiseNode::output`] call will recompute.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes an input plug.
    pub fn set(&mut self, attribute: Attribute, value: AttrValue) -> Result<(), AttributeError> {
        let mismatch = || AttributeError::TypeMismatch { attribute, value };
        let p = &mut self.params;
        match attribute {
            Attribute::Output => return Err(AttributeError::ReadOnly(attribute)),
            Attribute::Time => self.time = value.as_float().ok_or_else(mismatch)?,
            Attribute::Smoothing => p.smoothing = value.as_float().ok_or_else(mismatch)?,
            Attribute::Offset => p.offset = value.as_float().ok_or_else(mismatch)?,
            Attribute::Amplitude => p.amplitude = value.as_float().ok_or_else(mismatch)?,
            Attribute::Frequency => p.frequency = value.as_float().ok_or_else(mismatch)?,
            Attribute::Phase => p.phase = value.as_float().ok_or_else(mismatch)?,
            Attribute::Seed => p.seed = value.as_int().ok_or_else(mismatch)?,
            Attribute::SmoothIterations => {
                p.smooth_iterations = value.as_int().ok_or_else(mismatch)?
            }
            Attribute::Rectify => p.rectify = value.as_bool().ok_or_else(mismatch)?,
            Attribute::Wave => p.wave = value.as_wave().ok_or_else(mismatch)?,
        }
        self.dirty = true;
        Ok(())
    }

    /// Writes an input plug by long or short name.
    pub fn set_by_name(&mut self, name: &str, value: AttrValue) -> Result<(), AttributeError> {
        let attribute =
            Attribute::from_name(name).ok_or_else(|| AttributeError::Unknown(name.to_string()))?;
        self.set(attribute, value)
    }

    /// Reads a plug, computing the output if needed.
    pub fn get(&mut self, attribute: Attribute) -> AttrValue {
        match attribute {
            Attribute::Time => AttrValue::Float(self.time),
            Attribute::Smoothing => AttrValue::Float(self.params.smoothing),
            Attribute::Offset => AttrValue::Float(self.params.offset),
            Attribute::Amplitude => AttrValue::Float(self.params.amplitude),
            Attribute::Frequency => AttrValue::Float(self.params.frequency),
            Attribute::Phase => AttrValue::Float(self.params.phase),
            Attribute::Seed => AttrValue::Int(self.params.seed),
            Attribute::SmoothIterations => AttrValue::Int(self.params.smooth_iterations),
            Attribute::Rectify => AttrValue::Bool(self.params.rectify),
            Attribute::Wave => AttrValue::Wave(self.params.wave),
            Attribute::Output => AttrValue::Float(self.output()),
        }
    }

    /// Current output value, recomputed if any input changed.
    pub fn output(&mut self) -> f64 {
        if self.dirty {
            // Host time is truncated to a whole frame before evaluation
            let frame = if self.time.is_finite() { self.time.trunc() } else { 0.0 };
            self.output = self.evaluator.evaluate(frame, &self.params);
            self.dirty = false;
            trace!(node = %self.name, frame, output = self.output, "recomputed");
        }
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::evaluate;

    #[test]
    fn test_names_unique_and_resolvable() {
        for attr in Attribute::ALL {
            assert_eq!(Attribute::from_name(attr.long_name()), Some(attr));
            assert_eq!(Attribute::from_name(attr.short_name()), Some(attr));
        }
    }

    #[test]
    fn test_every_input_affects_output() {
        for attr in Attribute::ALL {
            assert_eq!(attr.affects(Attribute::Output), attr.is_input());
            assert!(!attr.affects(Attribute::Time));
        }
        assert!(!Attribute::Output.is_input());
    }

    #[test]
    fn test_output_truncates_time() {
        let mut node = NoiseNode::new("n");
        let params = ParameterSet::default().with_frequency(0.5);
        node.set_params(params);
        node.set(Attribute::Time, AttrValue::Float(7.9)).unwrap();
        assert_eq!(node.output(), evaluate(7.0, &params));

        node.set(Attribute::Time, AttrValue::Float(-2.5)).unwrap();
        assert_eq!(node.output(), evaluate(-2.0, &params));
    }

    #[test]
    fn test_dirty_tracking() {
        let mut node = NoiseNode::new("n");
        assert!(node.is_dirty());
        let first = node.output();
        assert!(!node.is_dirty());
        assert_eq!(node.output(), first);

        node.set(Attribute::Seed, AttrValue::Int(2)).unwrap();
        assert!(node.is_dirty());
        let second = node.output();
        assert_eq!(second, evaluate(0.0, &ParameterSet::default().with_seed(2)));
    }

    #[test]
    fn test_value_coercion() {
        let mut node = NoiseNode::new("n");
        node.set(Attribute::Seed, AttrValue::Float(4.8)).unwrap();
        node.set(Attribute::SmoothIterations, AttrValue::Float(-3.2)).unwrap();
        node.set(Attribute::Amplitude, AttrValue::Int(3)).unwrap();
        node.set(Attribute::Rectify, AttrValue::Int(1)).unwrap();
        node.set(Attribute::Wave, AttrValue::Int(1)).unwrap();

        let p = *node.params();
        assert_eq!(p.seed, 4);
        assert_eq!(p.smooth_iterations, -3);
        assert_eq!(p.amplitude, 3.0);
        assert!(p.rectify);
        assert_eq!(p.wave, Wave::Sine);
    }

    #[test]
    fn test_float_drives_rectify_and_wave() {
        let mut node = NoiseNode::new("n");
        node.set(Attribute::Rectify, AttrValue::Float(0.5)).unwrap();
        node.set(Attribute::Wave, AttrValue::Float(1.7)).unwrap();
        assert!(node.params().rectify);
        assert_eq!(node.params().wave, Wave::Sine);

        node.set(Attribute::Rectify, AttrValue::Float(0.0)).unwrap();
        node.set(Attribute::Wave, AttrValue::Float(0.0)).unwrap();
        assert!(!node.params().rectify);
        assert_eq!(node.params().wave, Wave::Noise);

        assert!(matches!(
            node.set(Attribute::Rectify, AttrValue::Float(f64::NAN)),
            Err(AttributeError::TypeMismatch { .. })
        ));
        assert!(matches!(
            node.set(Attribute::Wave, AttrValue::Float(2.0)),
            Err(AttributeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut node = NoiseNode::new("n");
        assert_eq!(
            node.set(Attribute::Output, AttrValue::Float(1.0)),
            Err(AttributeError::ReadOnly(Attribute::Output))
        );
        assert!(matches!(
            node.set(Attribute::Wave, AttrValue::Int(5)),
            Err(AttributeError::TypeMismatch { .. })
        ));
        assert!(matches!(
            node.set(Attribute::Smoothing, AttrValue::Bool(true)),
            Err(AttributeError::TypeMismatch { .. })
        ));
        assert!(matches!(
            node.set(Attribute::Seed, AttrValue::Float(f64::NAN)),
            Err(AttributeError::TypeMismatch { .. })
        ));
        assert!(matches!(
            node.set_by_name("colour", AttrValue::Int(1)),
            Err(AttributeError::Unknown(_))
        ));
    }

    #[test]
    fn test_get_roundtrip() {
        let mut node = NoiseNode::new("n");
        node.set_by_name("amp", AttrValue::Float(1.5)).unwrap();
        node.set_by_name("wav", AttrValue::Wave(Wave::Sine)).unwrap();
        assert_eq!(node.get(Attribute::Amplitude), AttrValue::Float(1.5));
        assert_eq!(node.get(Attribute::Wave), AttrValue::Wave(Wave::Sine));
        let out = node.output();
        assert_eq!(node.get(Attribute::Output), AttrValue::Float(out));
    }
}
