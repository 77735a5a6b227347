//! Deterministic summary builders for tests and harnesses.
//!
//! The values resemble what the extractor reports for a few seconds of
//! mixed music at 22.05 kHz: 13 cepstral means with a dominant first
//! coefficient and a chroma profile peaking on one pitch class.

use crate::analysis::features::FeatureSummary;

/// Number of cepstral coefficients in the sample summaries.
pub const SAMPLE_CEPSTRAL_LEN: usize = 13;

/// Number of pitch classes in the sample summaries.
pub const SAMPLE_CHROMA_LEN: usize = 12;

/// A valid reference summary.
pub fn sample_summary() -> FeatureSummary {
    FeatureSummary {
        duration: 10.0,
        sample_rate: 22_050,
        rms_energy: 0.12,
        zero_crossing_rate_mean: 0.08,
        spectral_centroid_mean: 2_150.0,
        spectral_rolloff_mean: 4_300.0,
        spectral_bandwidth_mean: 1_900.0,
        cepstral_means: vec![
            -210.0, 95.0, -12.5, 30.2, -4.1, 11.7, -8.3, 5.6, -2.2, 3.9, -1.4, 2.8, -0.6,
        ],
        chroma_means: vec![
            0.42, 0.18, 0.25, 0.31, 0.66, 0.29, 0.22, 0.51, 0.19, 0.27, 0.24, 0.33,
        ],
        tempo: 120.0,
        harmonic_ratio: 0.6,
        percussive_ratio: 0.4,
    }
}

/// A summary that differs from [`sample_summary`] on every feature.
pub fn contrasting_summary() -> FeatureSummary {
    FeatureSummary {
        duration: 4.0,
        sample_rate: 44_100,
        rms_energy: 0.03,
        zero_crossing_rate_mean: 0.21,
        spectral_centroid_mean: 5_400.0,
        spectral_rolloff_mean: 9_800.0,
        spectral_bandwidth_mean: 3_100.0,
        cepstral_means: vec![
            -80.0, -20.0, 40.0, -35.0, 22.0, -18.0, 9.0, -11.0, 6.0, -7.5, 4.0, -3.0, 1.5,
        ],
        chroma_means: vec![
            0.21, 0.58, 0.17, 0.23, 0.14, 0.47, 0.61, 0.12, 0.36, 0.15, 0.52, 0.11,
        ],
        tempo: 85.0,
        harmonic_ratio: 0.2,
        percussive_ratio: 0.75,
    }
}
