use super::median;

/// Minimum sample size before a threshold is reported.
pub const MIN_SAMPLE: usize = 10;

/// Flags anomalously high intrinsic values across a batch.
///
/// The threshold is `median + 3 * population standard deviation`. It is
/// advisory: the analyzer exposes it for reporting and marks buy candidates
/// above it, but never filters on it.
pub struct OutlierDetector;

impl OutlierDetector {
    /// `None` when fewer than [`MIN_SAMPLE`] values are available.
    pub fn detect(intrinsic_values: &[f64]) -> Option<f64> {
        if intrinsic_values.len() < MIN_SAMPLE {
            return None;
        }

        let median_value = median(intrinsic_values);
        let std_dev = population_std_dev(intrinsic_values);
        Some(median_value + 3.0 * std_dev)
    }
}

fn population_std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
