use std::sync::Arc;

use crate::audit::AuditSink;
use crate::provider::MarketDataProvider;
use crate::{BondYield, Symbol};

/// Reference long-duration risk-free instrument (10-year US treasury index).
pub const REFERENCE_INSTRUMENT: &str = "^TNX";

/// Resolves the batch-wide risk-free yield.
///
/// Fetches the latest close of the reference instrument, converts from
/// percentage points to a decimal fraction, and clamps into the sane range.
/// Any failure is logged to the audit sink and the configured default is
/// returned as-given. Never errors; called at most once per batch run.
#[derive(Clone)]
pub struct BondYieldResolver {
    audit: Arc<dyn AuditSink>,
    default_yield: f64,
}

impl BondYieldResolver {
    pub fn new(audit: Arc<dyn AuditSink>, default_yield: f64) -> Self {
        Self {
            audit,
            default_yield,
        }
    }

    pub async fn resolve(&self, provider: &dyn MarketDataProvider) -> BondYield {
        let symbol = match Symbol::parse(REFERENCE_INSTRUMENT) {
            Ok(symbol) => symbol,
            Err(error) => return self.fall_back(&error.to_string()),
        };

        match provider.bond_yield_series(&symbol).await {
            Ok(closes) => match closes.last() {
                Some(latest) if latest.is_finite() => BondYield::clamped(latest / 100.0),
                _ => self.fall_back("bond yield series was empty or non-finite"),
            },
            Err(error) => self.fall_back(&error.to_string()),
        }
    }

    fn fall_back(&self, reason: &str) -> BondYield {
        self.audit.error(&format!(
            "Error fetching bond yield: {reason}. Using default yield of {}%.",
            self.default_yield * 100.0
        ));
        BondYield::assumed(self.default_yield)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FixtureProvider;
    use crate::audit::MemoryAuditSink;

    #[tokio::test]
    async fn converts_latest_close_to_decimal_and_clamps() {
        let audit = Arc::new(MemoryAuditSink::new());
        let provider = FixtureProvider::new().with_bond_yield_series(vec![4.1, 4.3, 4.5]);
        let resolver = BondYieldResolver::new(audit, BondYield::DEFAULT);

        let yield_ = resolver.resolve(&provider).await;
        assert!((yield_.as_f64() - 0.045).abs() < 1e-12);
    }

    #[tokio::test]
    async fn clamps_extreme_fetched_yield() {
        let audit = Arc::new(MemoryAuditSink::new());
        let provider = FixtureProvider::new().with_bond_yield_series(vec![55.0]);
        let resolver = BondYieldResolver::new(audit, BondYield::DEFAULT);

        let yield_ = resolver.resolve(&provider).await;
        assert_eq!(yield_.as_f64(), BondYield::MAX);
    }

    #[tokio::test]
    async fn falls_back_to_default_on_fetch_failure() {
        let audit = Arc::new(MemoryAuditSink::new());
        let provider = FixtureProvider::new(); // no series configured
        let resolver = BondYieldResolver::new(audit.clone(), 0.044);

        let yield_ = resolver.resolve(&provider).await;
        assert_eq!(yield_.as_f64(), 0.044);

        let lines = audit.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("ERROR"));
        assert!(lines[0].contains("default yield"));
    }

    #[tokio::test]
    async fn default_is_returned_unclamped() {
        let audit = Arc::new(MemoryAuditSink::new());
        let provider = FixtureProvider::new();
        let resolver = BondYieldResolver::new(audit, 0.5);

        let yield_ = resolver.resolve(&provider).await;
        assert_eq!(yield_.as_f64(), 0.5);
    }
}
