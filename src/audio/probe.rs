// Probe module - WAV header inspection and duration cross-check
//
// A summary's `duration` comes from the feature extractor. Comparing it with
// the length stored in the WAV header catches summaries that were computed
// from a truncated or resampled copy of the clip.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::features::FeatureSummary;
use crate::analysis::similarity::scalar_closeness;
use crate::error::InputError;

/// Stream properties read from a WAV header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipInfo {
    pub duration_seconds: f64,
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

/// Read the header of a WAV file
///
/// Duration is the per-channel frame count divided by the sample rate.
pub fn probe_wav<P: AsRef<Path>>(path: P) -> Result<ClipInfo, InputError> {
    let path = path.as_ref();
    let reader = hound::WavReader::open(path).map_err(|err| match err {
        hound::Error::IoError(io) => InputError::Io {
            path: path.display().to_string(),
            reason: io.to_string(),
        },
        other => InputError::UnsupportedAudio {
            path: path.display().to_string(),
            reason: other.to_string(),
        },
    })?;

    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return Err(InputError::UnsupportedAudio {
            path: path.display().to_string(),
            reason: "sample rate is zero".to_string(),
        });
    }

    let info = ClipInfo {
        duration_seconds: f64::from(reader.duration()) / f64::from(spec.sample_rate),
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bits_per_sample: spec.bits_per_sample,
    };

    log::debug!(
        "Probed {}: {:.3}s, {} Hz, {} ch, {} bit",
        path.display(),
        info.duration_seconds,
        info.sample_rate,
        info.channels,
        info.bits_per_sample
    );

    Ok(info)
}

/// Agreement between a summary's duration and the probed file duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationCheck {
    pub summary_seconds: f64,
    pub probed_seconds: f64,
    /// Absolute difference in seconds
    pub difference_seconds: f64,
    /// Relative closeness of the two durations in [0, 1]
    pub accuracy: f64,
    /// Sample rates of summary and file match
    pub sample_rate_matches: bool,
}

impl DurationCheck {
    pub fn new(summary: &FeatureSummary, clip: &ClipInfo) -> Self {
        Self {
            summary_seconds: summary.duration,
            probed_seconds: clip.duration_seconds,
            difference_seconds: (summary.duration - clip.duration_seconds).abs(),
            accuracy: scalar_closeness(summary.duration, clip.duration_seconds),
            sample_rate_matches: summary.sample_rate == clip.sample_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, InputErrorCodes};
    use crate::testing::sample_summary;
    use std::io::Write;

    fn write_wav(path: &Path, sample_rate: u32, channels: u16, frames: u32) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..frames * u32::from(channels) {
            writer.write_sample((i % 200) as i16 - 100).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_probe_reads_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        write_wav(&path, 8_000, 2, 12_000);

        let info = probe_wav(&path).unwrap();
        assert_eq!(info.sample_rate, 8_000);
        assert_eq!(info.channels, 2);
        assert_eq!(info.bits_per_sample, 16);
        assert!((info.duration_seconds - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = probe_wav("/nonexistent/clip.wav").unwrap_err();
        assert_eq!(err.code(), InputErrorCodes::IO);
    }

    #[test]
    fn test_non_wav_is_unsupported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a RIFF header").unwrap();

        let err = probe_wav(file.path()).unwrap_err();
        assert_eq!(err.code(), InputErrorCodes::UNSUPPORTED_AUDIO);
    }

    #[test]
    fn test_duration_check() {
        let summary = sample_summary();
        let clip = ClipInfo {
            duration_seconds: 8.0,
            sample_rate: 22_050,
            channels: 1,
            bits_per_sample: 16,
        };

        let check = DurationCheck::new(&summary, &clip);
        assert_eq!(check.difference_seconds, 2.0);
        assert!((check.accuracy - 0.8).abs() < 1e-12);
        assert!(check.sample_rate_matches);
    }
}
