use std::sync::Arc;

use crate::audit::AuditSink;
use crate::{GrowthRate, Symbol};

use super::median;

/// Estimates a forward growth rate from historical net income.
///
/// The estimate is a compound annual growth rate between the median of the
/// earliest three observations and the median of the latest three, clamped
/// into [0, 10%]. Whenever the history is missing, too short, or the math
/// degenerates, the configured default is substituted and recorded as an
/// assumption in the audit log.
#[derive(Clone)]
pub struct GrowthRateEstimator {
    audit: Arc<dyn AuditSink>,
    default_growth: f64,
}

impl GrowthRateEstimator {
    pub fn new(audit: Arc<dyn AuditSink>, default_growth: f64) -> Self {
        Self {
            audit,
            default_growth,
        }
    }

    /// Estimate for one ticker, logging an assumption when the default is
    /// substituted.
    pub fn estimate(&self, symbol: &Symbol, history: &[f64]) -> GrowthRate {
        match estimate_cagr(history) {
            Some(cagr) => GrowthRate::clamped(cagr),
            None => {
                self.audit
                    .assumption(symbol, "growth_rate", self.default_growth);
                GrowthRate::assumed(self.default_growth)
            }
        }
    }
}

/// Raw CAGR over a net-income history, or `None` when the inputs cannot
/// support the calculation.
fn estimate_cagr(history: &[f64]) -> Option<f64> {
    if history.len() < 3 {
        return None;
    }

    let initial = median(&history[..3]);
    let final_ = median(&history[history.len() - 3..]);
    let years = history.len() - 1;

    if initial <= 0.0 || final_ <= 0.0 || years == 0 {
        return None;
    }

    let cagr = (final_ / initial).powf(1.0 / years as f64) - 1.0;
    cagr.is_finite().then_some(cagr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::MemoryAuditSink;

    fn estimator_with(audit: Arc<MemoryAuditSink>) -> GrowthRateEstimator {
        GrowthRateEstimator::new(audit, GrowthRate::DEFAULT)
    }

    #[test]
    fn short_history_returns_exactly_the_default() {
        let audit = Arc::new(MemoryAuditSink::new());
        let estimator = estimator_with(audit.clone());
        let symbol = Symbol::parse("AAPL").expect("valid");

        let rate = estimator.estimate(&symbol, &[100.0, 110.0]);
        assert_eq!(rate.as_f64(), GrowthRate::DEFAULT);

        let lines = audit.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("AAPL: Assumed growth_rate = 0.03"));
    }

    #[test]
    fn steady_growth_produces_positive_clamped_rate() {
        let audit = Arc::new(MemoryAuditSink::new());
        let estimator = estimator_with(audit);
        let symbol = Symbol::parse("MSFT").expect("valid");

        // 5% annual growth over 6 years; the endpoint medians dampen the
        // measured rate but it stays well within the band.
        let history: Vec<f64> = (0..6).map(|y| 100.0 * 1.05f64.powi(y)).collect();
        let rate = estimator.estimate(&symbol, &history);

        assert!(rate.as_f64() > 0.02);
        assert!(rate.as_f64() < 0.05);
    }

    #[test]
    fn exploding_growth_is_clamped_to_upper_bound() {
        let audit = Arc::new(MemoryAuditSink::new());
        let estimator = estimator_with(audit);
        let symbol = Symbol::parse("NVDA").expect("valid");

        let rate = estimator.estimate(&symbol, &[1.0, 2.0, 4.0, 400.0, 800.0, 1600.0]);
        assert_eq!(rate.as_f64(), GrowthRate::MAX);
    }

    #[test]
    fn negative_income_falls_back_to_default() {
        let audit = Arc::new(MemoryAuditSink::new());
        let estimator = estimator_with(audit.clone());
        let symbol = Symbol::parse("UBER").expect("valid");

        let rate = estimator.estimate(&symbol, &[-50.0, -20.0, -10.0, 5.0]);
        assert_eq!(rate.as_f64(), GrowthRate::DEFAULT);
        assert_eq!(audit.lines().len(), 1);
    }

    #[test]
    fn shrinking_income_clamps_to_zero_not_default() {
        let audit = Arc::new(MemoryAuditSink::new());
        let estimator = estimator_with(audit.clone());
        let symbol = Symbol::parse("IBM").expect("valid");

        let rate = estimator.estimate(&symbol, &[200.0, 180.0, 160.0, 140.0, 120.0]);
        assert_eq!(rate.as_f64(), 0.0);
        // A computed (if clamped) rate is not an assumption.
        assert!(audit.lines().is_empty());
    }
}
