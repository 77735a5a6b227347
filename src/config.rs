//! Configuration management for comparison, batch and report settings
//!
//! Settings are read from a JSON file so thresholds and pool sizes can be
//! tuned without recompiling. Every section and field is optional; missing
//! values take their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analysis::consensus::DEFAULT_CONSENSUS_TOLERANCE;

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub comparison: ComparisonConfig,
    pub batch: BatchConfig,
    pub report: ReportConfig,
}

/// Clip comparison parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Maximum gap between feature and fingerprint scores that still counts
    /// as agreement
    pub consensus_tolerance: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            consensus_tolerance: DEFAULT_CONSENSUS_TOLERANCE,
        }
    }
}

/// Batch scoring parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of scoring workers; 0 uses one per available CPU
    pub worker_threads: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { worker_threads: 4 }
    }
}

impl BatchConfig {
    /// Worker count with the 0 = "all CPUs" rule applied
    pub fn resolved_workers(&self) -> usize {
        if self.worker_threads > 0 {
            return self.worker_threads;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

/// Output formatting parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Indent JSON output
    pub pretty_json: bool,
    /// Decimal places for similarity values in tables
    pub precision: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            pretty_json: true,
            precision: 3,
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration, or defaults if the file is missing or its
    /// JSON is invalid
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.comparison.consensus_tolerance, 0.1);
        assert_eq!(config.batch.worker_threads, 4);
        assert!(config.report.pretty_json);
        assert_eq!(config.report.precision, 3);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{ "batch": { "worker_threads": 0 } }"#).unwrap();
        assert_eq!(parsed.batch.worker_threads, 0);
        assert_eq!(parsed.comparison, ComparisonConfig::default());
        assert_eq!(parsed.report, ReportConfig::default());
        assert!(parsed.batch.resolved_workers() >= 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::json!({
            "comparison": { "consensus_tolerance": 0.25 },
            "report": { "precision": 5 }
        });
        write!(file, "{json}").unwrap();

        let config = AppConfig::load_from_file(file.path());
        assert_eq!(config.comparison.consensus_tolerance, 0.25);
        assert_eq!(config.report.precision, 5);
        assert!(config.report.pretty_json);
    }

    #[test]
    fn test_missing_or_malformed_file_falls_back_to_defaults() {
        let missing = AppConfig::load_from_file("/nonexistent/similarity_config.json");
        assert_eq!(missing, AppConfig::default());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert_eq!(AppConfig::load_from_file(file.path()), AppConfig::default());
    }
}
