//! Valuation and screening calculations.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`bond_yield`] | Risk-free yield resolution with clamping and fallback |
//! | [`growth`] | Net-income CAGR growth estimation |
//! | [`intrinsic`] | Adjusted-Graham intrinsic value and margin of safety |
//! | [`criteria`] | Fixed seven-criterion buy battery |
//! | [`outlier`] | Median + 3σ advisory threshold over a batch |

pub mod bond_yield;
pub mod criteria;
pub mod growth;
pub mod intrinsic;
pub mod outlier;

pub use bond_yield::BondYieldResolver;
pub use criteria::CriteriaEvaluator;
pub use growth::GrowthRateEstimator;
pub use intrinsic::IntrinsicValueCalculator;
pub use outlier::OutlierDetector;

/// Median of a non-empty slice. Averages the middle pair for even lengths.
pub(crate) fn median(values: &[f64]) -> f64 {
    debug_assert!(!values.is_empty());
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
