// Correlation module - Pearson correlation of paired coefficient means
//
// Formula: r = Σ(x - x̄)(y - ȳ) / sqrt(Σ(x - x̄)² × Σ(y - ȳ)²)
//
// The raw coefficient lies in [-1, 1]. Similarity is clamped to [0, 1]:
// anti-correlated profiles count as fully dissimilar.

use crate::analysis::features::FeatureKind;
use crate::error::ScoringError;

/// Pearson correlation of two equal-length vectors
///
/// # Errors
/// * `InvalidInput` if the lengths differ
/// * `UndefinedCorrelation` if either vector has fewer than two elements or
///   is constant
pub fn pearson(feature: FeatureKind, a: &[f64], b: &[f64]) -> Result<f64, ScoringError> {
    if a.len() != b.len() {
        return Err(ScoringError::invalid(
            feature.name(),
            format!("length mismatch ({} vs {})", a.len(), b.len()),
        ));
    }
    if a.len() < 2 || is_constant(a) || is_constant(b) {
        return Err(undefined(feature));
    }

    // Pearson is scale invariant; normalising keeps the sums away from
    // overflow and underflow for very large or very small coefficients
    let a = normalized(a);
    let b = normalized(b);

    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance_a = 0.0;
    let mut variance_b = 0.0;
    for (&x, &y) in a.iter().zip(&b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        covariance += dx * dy;
        variance_a += dx * dx;
        variance_b += dy * dy;
    }

    let r = covariance / (variance_a * variance_b).sqrt();
    if !r.is_finite() {
        return Err(undefined(feature));
    }
    Ok(r)
}

/// Correlation similarity clamped into [0, 1]
pub fn correlation_similarity(
    feature: FeatureKind,
    a: &[f64],
    b: &[f64],
) -> Result<f64, ScoringError> {
    pearson(feature, a, b).map(|r| r.clamp(0.0, 1.0))
}

// Divide by the largest magnitude so every element lies in [-1, 1].
// Only called on non-constant vectors, so the scale is never zero.
fn normalized(values: &[f64]) -> Vec<f64> {
    let scale = values.iter().fold(0.0_f64, |max, v| max.max(v.abs()));
    values.iter().map(|v| v / scale).collect()
}

// Exact comparison: the mean of a constant vector need not equal its
// elements, so variance alone would miss it.
fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|&v| v == values[0])
}

fn undefined(feature: FeatureKind) -> ScoringError {
    ScoringError::UndefinedCorrelation {
        feature: feature.name().to_string(),
    }
}
