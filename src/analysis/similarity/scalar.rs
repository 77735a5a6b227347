// Scalar module - similarity of two non-negative measurements

/// Relative closeness of two non-negative values
///
/// Formula: similarity = max(0, 1 - |a - b| / max(a, b))
///
/// Two zero measurements are identical: returns 1.0 when max(a, b) == 0.
pub fn scalar_closeness(a: f64, b: f64) -> f64 {
    let magnitude = a.max(b);
    if magnitude == 0.0 {
        return 1.0;
    }
    (1.0 - (a - b).abs() / magnitude).max(0.0)
}

/// Absolute closeness of two ratios
///
/// Formula: similarity = max(0, 1 - |a - b|)
///
/// No normalization by magnitude: energy ratios already live near [0, 1].
pub fn ratio_difference(a: f64, b: f64) -> f64 {
    (1.0 - (a - b).abs()).max(0.0)
}
