// Types module - Data structures for per-clip feature summaries
//
// A FeatureSummary is produced once per clip by an external extractor and
// consumed read-only by the scorer. Field names match the extractor's JSON
// dumps, so summaries written by the analysis scripts load unchanged.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{InputError, ScoringError};

/// Clip-level averages of the extracted audio features
///
/// Vector-valued fields are ordered per coefficient: `cepstral_means[i]` is
/// the mean of the i-th cepstral coefficient over all frames, and
/// `chroma_means[k]` the mean energy of pitch class k.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSummary {
    /// Clip duration in seconds (> 0)
    pub duration: f64,

    /// Sample rate in Hz (> 0)
    pub sample_rate: u32,

    /// Root-mean-square energy of the whole clip
    pub rms_energy: f64,

    /// Mean zero-crossing rate over all frames
    pub zero_crossing_rate_mean: f64,

    /// Mean spectral centroid in Hz
    pub spectral_centroid_mean: f64,

    /// Mean spectral rolloff in Hz
    pub spectral_rolloff_mean: f64,

    /// Mean spectral bandwidth in Hz
    pub spectral_bandwidth_mean: f64,

    /// Per-coefficient cepstral means (typically 13)
    #[serde(alias = "mfcc_mean")]
    pub cepstral_means: Vec<f64>,

    /// Per-pitch-class chroma means (typically 12)
    #[serde(alias = "chroma_mean")]
    pub chroma_means: Vec<f64>,

    /// Estimated tempo in beats per minute (> 0)
    pub tempo: f64,

    /// Harmonic energy divided by total energy
    pub harmonic_ratio: f64,

    /// Percussive energy divided by total energy
    pub percussive_ratio: f64,
}

impl FeatureSummary {
    /// Parse a summary from JSON
    ///
    /// `source` names the origin (file path or label) for error messages.
    /// Parsing does not validate values; scoring does.
    pub fn from_json(data: &str, source: &str) -> Result<Self, InputError> {
        serde_json::from_str(data).map_err(|err| InputError::Parse {
            source: source.to_string(),
            reason: err.to_string(),
        })
    }

    /// Load a summary from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, InputError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| InputError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        Self::from_json(&contents, &path.display().to_string())
    }

    /// Check the value constraints of a single summary
    ///
    /// Duration and tempo must be finite and > 0, sample rate > 0, every
    /// other scalar finite and >= 0, and both vectors non-empty with finite
    /// elements.
    pub fn validate(&self) -> Result<(), ScoringError> {
        require_positive("duration", self.duration)?;
        require_positive("tempo", self.tempo)?;
        if self.sample_rate == 0 {
            return Err(ScoringError::invalid("sample_rate", "must be > 0"));
        }

        let non_negative = [
            ("rms_energy", self.rms_energy),
            ("zero_crossing_rate_mean", self.zero_crossing_rate_mean),
            ("spectral_centroid_mean", self.spectral_centroid_mean),
            ("spectral_rolloff_mean", self.spectral_rolloff_mean),
            ("spectral_bandwidth_mean", self.spectral_bandwidth_mean),
            ("harmonic_ratio", self.harmonic_ratio),
            ("percussive_ratio", self.percussive_ratio),
        ];
        for (field, value) in non_negative {
            require_non_negative(field, value)?;
        }

        require_finite_vector("cepstral_means", &self.cepstral_means)?;
        require_finite_vector("chroma_means", &self.chroma_means)?;
        Ok(())
    }

    /// Check that two summaries can be compared
    ///
    /// Both must be valid on their own and every vector field must have the
    /// same length in both.
    pub fn validate_pair(&self, other: &FeatureSummary) -> Result<(), ScoringError> {
        self.validate()?;
        other.validate()?;

        let vectors = [
            ("cepstral_means", &self.cepstral_means, &other.cepstral_means),
            ("chroma_means", &self.chroma_means, &other.chroma_means),
        ];
        for (field, a, b) in vectors {
            if a.len() != b.len() {
                return Err(ScoringError::invalid(
                    field,
                    format!("length mismatch ({} vs {})", a.len(), b.len()),
                ));
            }
        }
        Ok(())
    }
}

fn require_positive(field: &str, value: f64) -> Result<(), ScoringError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ScoringError::invalid(
            field,
            format!("must be finite and > 0 (got {})", value),
        ));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: f64) -> Result<(), ScoringError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ScoringError::invalid(
            field,
            format!("must be finite and >= 0 (got {})", value),
        ));
    }
    Ok(())
}

fn require_finite_vector(field: &str, values: &[f64]) -> Result<(), ScoringError> {
    if values.is_empty() {
        return Err(ScoringError::invalid(field, "must not be empty"));
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(ScoringError::invalid(
            field,
            format!("element {} is not finite", index),
        ));
    }
    Ok(())
}
