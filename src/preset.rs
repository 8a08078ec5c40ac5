//! TOML presets for curve parameters.
//!
//! Presets may be sparse: any key left out takes its default value. Keys use
//! the host attribute spelling (`smoothIterations`), and `wave` is
//! `"noise"` or `"sine"`.
//!
//! ```toml
//! smoothing = 0.8
//! amplitude = 2.5
//! seed = 42
//! wave = "noise"
//! ```

use crate::params::ParameterSet;
use std::fmt;
use std::fs;
use std::path::Path;

/// Error type for loading and saving presets.
#[derive(Debug)]
pub enum PresetError {
    /// The preset file could not be read or written
    Io(std::io::Error),
    /// The preset text is not a valid parameter set
    Parse(toml::de::Error),
    /// The parameter set could not be encoded
    Serialize(toml::ser::Error),
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetError::Io(err) => write!(f, "preset i/o failed: {}", err),
            PresetError::Parse(err) => write!(f, "invalid preset: {}", err),
            PresetError::Serialize(err) => write!(f, "could not encode preset: {}", err),
        }
    }
}

impl std::error::Error for PresetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PresetError::Io(err) => Some(err),
            PresetError::Parse(err) => Some(err),
            PresetError::Serialize(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for PresetError {
    fn from(err: std::io::Error) -> Self {
        PresetError::Io(err)
    }
}

impl From<toml::de::Error> for PresetError {
    fn from(err: toml::de::Error) -> Self {
        PresetError::Parse(err)
    }
}

impl From<toml::ser::Error> for PresetError {
    fn from(err: toml::ser::Error) -> Self {
        PresetError::Serialize(err)
    }
}

impl ParameterSet {
    /// Parses a preset from TOML text.
    ///
    /// Values are taken as written; clamping happens at evaluation time.
    ///
    /// # Examples
    ///
    /// ```
    /// use animnoise::{ParameterSet, Wave};
    ///
    /// let params = ParameterSet::from_toml_str("seed = 4\nwave = \"sine\"").unwrap();
    /// assert_eq!(params.seed, 4);
    /// assert_eq!(params.wave, Wave::Sine);
    /// assert_eq!(params.smoothing, 0.5);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, PresetError> {
        Ok(toml::from_str(text)?)
    }

    /// Encodes the parameters as TOML text.
    pub fn to_toml_string(&self) -> Result<String, PresetError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Reads a preset file.
pub fn load_preset<P: AsRef<Path>>(path: P) -> Result<ParameterSet, PresetError> {
    let text = fs::read_to_string(path)?;
    ParameterSet::from_toml_str(&text)
}

/// Writes a preset file, replacing any existing one.
pub fn save_preset<P: AsRef<Path>>(path: P, params: &ParameterSet) -> Result<(), PresetError> {
    fs::write(path, params.to_toml_string()?)?;
    Ok(())
}
