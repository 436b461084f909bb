//! Validation settings.
//!
//! Settings can be built in code or loaded from a TOML file:
//!
//! ```toml
//! min_segment_length = 0.5
//! parallel = true
//! model_directory = "models/rhine"
//! ```

use crate::core::error::{HydroError, HydroResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default minimum length of a computational segment.
pub const DEFAULT_MIN_SEGMENT_LENGTH: f64 = 1.0;

/// Caller-supplied parameters of a validation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Segments shorter than this are reported as warnings.
    pub min_segment_length: f64,
    /// Run validators on the rayon thread pool.
    pub parallel: bool,
    /// Base directory for relative wind file paths.
    pub model_directory: Option<PathBuf>,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            min_segment_length: DEFAULT_MIN_SEGMENT_LENGTH,
            parallel: false,
            model_directory: None,
        }
    }
}

impl ValidationSettings {
    /// Set the minimum segment length.
    pub fn with_min_segment_length(mut self, length: f64) -> Self {
        self.min_segment_length = length;
        self
    }

    /// Enable or disable parallel validation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the directory relative file references are resolved against.
    pub fn with_model_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.model_directory = Some(directory.into());
        self
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> HydroResult<Self> {
        let settings: Self = toml::from_str(text)?;
        settings.check()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> HydroResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject settings no validator can work with.
    pub fn check(&self) -> HydroResult<()> {
        if !self.min_segment_length.is_finite() || self.min_segment_length <= 0.0 {
            return Err(HydroError::invalid_setting(
                "min_segment_length",
                format!("must be a finite value greater than 0, got {}", self.min_segment_length),
            ));
        }
        Ok(())
    }

    /// Resolve a file reference against the model directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.model_directory {
            Some(directory) if path.is_relative() => directory.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = ValidationSettings::default();
        assert_eq!(settings.min_segment_length, 1.0);
        assert!(!settings.parallel);
        assert!(settings.check().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let settings = ValidationSettings::from_toml_str("parallel = true").unwrap();
        assert!(settings.parallel);
        assert_eq!(settings.min_segment_length, DEFAULT_MIN_SEGMENT_LENGTH);
    }

    #[test]
    fn test_rejects_non_positive_segment_length() {
        let result = ValidationSettings::from_toml_str("min_segment_length = 0.0");
        assert!(matches!(result, Err(HydroError::InvalidSettings { .. })));

        let nan = ValidationSettings::default().with_min_segment_length(f64::NAN);
        assert!(nan.check().is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = ValidationSettings::from_toml_str("min_segment_length = \"long\"");
        assert!(matches!(result, Err(HydroError::Settings(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_segment_length = 2.5").unwrap();
        writeln!(file, "model_directory = \"/data/model\"").unwrap();

        let settings = ValidationSettings::load(file.path()).unwrap();
        assert_eq!(settings.min_segment_length, 2.5);
        assert_eq!(
            settings.resolve(Path::new("wind.amu")),
            PathBuf::from("/data/model/wind.amu")
        );
        assert_eq!(
            settings.resolve(Path::new("/abs/wind.amu")),
            PathBuf::from("/abs/wind.amu")
        );
    }
}
