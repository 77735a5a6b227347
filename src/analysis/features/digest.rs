// Digest module - content hash of a feature summary
//
// The digest is the "hand-rolled" feature fingerprint: a fixed-length hex
// string that changes whenever any summary value changes. It identifies
// exact duplicates only; two digests say nothing about how close the
// underlying clips are.

use sha2::{Digest, Sha256};

use super::types::FeatureSummary;

impl FeatureSummary {
    /// Hex SHA-256 over a canonical little-endian encoding of every field
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();

        hasher.update(self.duration.to_le_bytes());
        hasher.update(self.sample_rate.to_le_bytes());
        for value in [
            self.rms_energy,
            self.zero_crossing_rate_mean,
            self.spectral_centroid_mean,
            self.spectral_rolloff_mean,
            self.spectral_bandwidth_mean,
        ] {
            hasher.update(value.to_le_bytes());
        }
        for vector in [&self.cepstral_means, &self.chroma_means] {
            // length prefix keeps [1,2]+[3] distinct from [1]+[2,3]
            hasher.update((vector.len() as u64).to_le_bytes());
            for value in vector {
                hasher.update(value.to_le_bytes());
            }
        }
        for value in [self.tempo, self.harmonic_ratio, self.percussive_ratio] {
            hasher.update(value.to_le_bytes());
        }

        format!("{:x}", hasher.finalize())
    }
}
