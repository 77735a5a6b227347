//! Batch manifest: the clips to load and the pairs to compare.
//!
//! ```json
//! {
//!   "version": 1,
//!   "clips": [
//!     { "id": "ref", "summary_path": "ref.json", "fingerprint": "AQAD..." },
//!     { "id": "take2", "summary": { "duration": 10.0, "...": "..." } }
//!   ],
//!   "pairs": [{ "id": "ref-vs-take2", "a": "ref", "b": "take2" }]
//! }
//! ```
//!
//! Relative `summary_path`s resolve against the directory holding the
//! manifest file.

use crate::analysis::features::FeatureSummary;
use crate::batch::ScoringJob;
use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Parsed and validated batch manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchManifest {
    pub version: u32,
    pub clips: Vec<ClipEntry>,
    pub pairs: Vec<PairEntry>,
    /// Directory that relative summary paths resolve against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// A clip and where its feature summary comes from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClipEntry {
    pub id: String,
    #[serde(default)]
    pub summary: Option<FeatureSummary>,
    #[serde(default)]
    pub summary_path: Option<PathBuf>,
    #[serde(default)]
    pub fingerprint: Option<String>,
}

/// A pair of clip ids to compare.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PairEntry {
    #[serde(default)]
    pub id: Option<String>,
    pub a: String,
    pub b: String,
}

impl PairEntry {
    /// Explicit id, or "a:b" when none was given.
    pub fn label(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("{}:{}", self.a, self.b))
    }
}

impl BatchManifest {
    /// Load a manifest file; relative summary paths resolve next to it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, InputError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| InputError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        let mut manifest = Self::parse(&contents, &path.display().to_string())?;
        manifest.base_dir = path.parent().map(Path::to_path_buf);
        Ok(manifest)
    }

    /// Parse manifest contents from JSON and validate invariants.
    pub fn from_json(data: &str) -> Result<Self, InputError> {
        Self::parse(data, "manifest")
    }

    fn parse(data: &str, source: &str) -> Result<Self, InputError> {
        let manifest: BatchManifest =
            serde_json::from_str(data).map_err(|err| InputError::Parse {
                source: source.to_string(),
                reason: err.to_string(),
            })?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Return a clip entry by id, if present.
    pub fn find(&self, id: &str) -> Option<&ClipEntry> {
        self.clips.iter().find(|clip| clip.id == id)
    }

    fn validate(&self) -> Result<(), InputError> {
        if self.version == 0 {
            return Err(manifest_error("manifest version must be > 0"));
        }
        if self.pairs.is_empty() {
            return Err(manifest_error("manifest must contain at least one pair"));
        }

        let mut seen = HashSet::new();
        for clip in &self.clips {
            clip.validate()?;
            if !seen.insert(clip.id.as_str()) {
                return Err(manifest_error(format!(
                    "duplicate clip id detected: {}",
                    clip.id
                )));
            }
        }

        for (index, pair) in self.pairs.iter().enumerate() {
            for id in [&pair.a, &pair.b] {
                if !seen.contains(id.as_str()) {
                    return Err(manifest_error(format!(
                        "pair {} refers to unknown clip {}",
                        index, id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Resolve every clip's summary and build one job per pair.
    ///
    /// Each summary is loaded once and shared between the jobs that use it.
    pub fn into_jobs(&self) -> Result<Vec<ScoringJob>, InputError> {
        let mut summaries: HashMap<&str, Arc<FeatureSummary>> = HashMap::new();
        for clip in &self.clips {
            let summary = match (&clip.summary, &clip.summary_path) {
                (Some(summary), _) => summary.clone(),
                (None, Some(path)) => FeatureSummary::load(self.resolve(path))?,
                (None, None) => {
                    return Err(manifest_error(format!(
                        "clip {} has no summary source",
                        clip.id
                    )))
                }
            };
            summaries.insert(clip.id.as_str(), Arc::new(summary));
        }

        let mut jobs = Vec::with_capacity(self.pairs.len());
        for pair in &self.pairs {
            let (Some(a), Some(b)) = (
                summaries.get(pair.a.as_str()),
                summaries.get(pair.b.as_str()),
            ) else {
                return Err(manifest_error(format!(
                    "pair {} refers to an unknown clip",
                    pair.label()
                )));
            };

            let fingerprints = self
                .fingerprint_of(&pair.a)
                .zip(self.fingerprint_of(&pair.b))
                .map(|(fa, fb)| (fa.to_string(), fb.to_string()));

            jobs.push(ScoringJob {
                id: pair.label(),
                a_id: pair.a.clone(),
                b_id: pair.b.clone(),
                a: Arc::clone(a),
                b: Arc::clone(b),
                fingerprints,
            });
        }

        log::debug!(
            "Manifest resolved: {} clips, {} jobs",
            summaries.len(),
            jobs.len()
        );
        Ok(jobs)
    }

    fn fingerprint_of(&self, id: &str) -> Option<&str> {
        self.find(id).and_then(|clip| clip.fingerprint.as_deref())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ClipEntry {
    fn validate(&self) -> Result<(), InputError> {
        if self.id.trim().is_empty() {
            return Err(manifest_error("clip id cannot be empty"));
        }
        match (&self.summary, &self.summary_path) {
            (Some(_), None) | (None, Some(_)) => Ok(()),
            (Some(_), Some(_)) => Err(manifest_error(format!(
                "clip {} must not set both summary and summary_path",
                self.id
            ))),
            (None, None) => Err(manifest_error(format!(
                "clip {} must set summary or summary_path",
                self.id
            ))),
        }
    }
}

fn manifest_error(reason: impl Into<String>) -> InputError {
    InputError::Invalid {
        reason: reason.into(),
    }
}
