//! Batch orchestration: per-ticker analysis with isolated failures.
//!
//! Each ticker moves `Pending -> Fetching -> Evaluating` and lands in
//! exactly one terminal state (`Bought`, `NotBought`, `Failed`). Terminal
//! states are final; there are no retries within a run. A failed ticker is
//! reported and never disturbs a sibling analysis.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::audit::AuditSink;
use crate::pacing::RequestPacer;
use crate::provider::MarketDataProvider;
use crate::valuation::intrinsic::margin_of_safety;
use crate::valuation::{
    BondYieldResolver, CriteriaEvaluator, GrowthRateEstimator, IntrinsicValueCalculator,
    OutlierDetector,
};
use crate::{BatchResult, BondYield, GrowthRate, Recommendation, Symbol, TickerReport};

/// Scheduling model for a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduling {
    /// Fan-out one task per ticker, bounded by `max_concurrency` permits.
    Concurrent { max_concurrency: usize },
    /// One ticker at a time with a fixed inter-request delay.
    Sequential { delay: Duration },
}

/// Batch analyzer configuration; concurrency is an explicit parameter, not
/// an implicit executor property.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzerConfig {
    pub scheduling: Scheduling,
    pub default_yield: f64,
    pub default_growth: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            scheduling: Scheduling::Concurrent { max_concurrency: 8 },
            default_yield: BondYield::DEFAULT,
            default_growth: GrowthRate::DEFAULT,
        }
    }
}

/// Terminal state of one ticker's analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum TickerOutcome {
    Bought(TickerReport),
    NotBought(TickerReport),
    Failed(Symbol),
}

/// Runs the valuation pipeline over a ticker batch.
#[derive(Clone)]
pub struct BatchAnalyzer {
    provider: Arc<dyn MarketDataProvider>,
    audit: Arc<dyn AuditSink>,
    growth: GrowthRateEstimator,
    intrinsic: IntrinsicValueCalculator,
    config: AnalyzerConfig,
}

impl BatchAnalyzer {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        audit: Arc<dyn AuditSink>,
        config: AnalyzerConfig,
    ) -> Self {
        Self {
            provider,
            growth: GrowthRateEstimator::new(audit.clone(), config.default_growth),
            intrinsic: IntrinsicValueCalculator::new(audit.clone()),
            audit,
            config,
        }
    }

    /// Analyzes one ticker against an already-resolved bond yield.
    pub async fn analyze_one(&self, symbol: &Symbol, bond_yield: BondYield) -> TickerOutcome {
        let snapshot = match self.provider.snapshot(symbol).await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                self.audit
                    .error(&format!("{symbol} analysis failed: {error}"));
                return TickerOutcome::Failed(symbol.clone());
            }
        };

        let growth = self
            .growth
            .estimate(symbol, &snapshot.net_income_history);
        let intrinsic_value =
            self.intrinsic
                .compute(
                    snapshot.trailing_eps.unwrap_or(0.0),
                    growth,
                    bond_yield,
                    snapshot.current_price,
                );
        let margin = margin_of_safety(intrinsic_value, snapshot.current_price);

        let (recommendation, criteria) =
            CriteriaEvaluator::evaluate(&snapshot, intrinsic_value, margin);

        let report = TickerReport {
            symbol: symbol.clone(),
            recommendation,
            criteria,
            intrinsic_value,
            margin_of_safety: margin,
        };

        match recommendation {
            Recommendation::Buy => TickerOutcome::Bought(report),
            _ => TickerOutcome::NotBought(report),
        }
    }

    /// Resolves the batch-wide bond yield, once, before per-ticker work.
    pub async fn resolve_bond_yield(&self) -> BondYield {
        BondYieldResolver::new(self.audit.clone(), self.config.default_yield)
            .resolve(self.provider.as_ref())
            .await
    }

    /// Runs the full batch and aggregates terminal states.
    ///
    /// Outcomes are joined against the input ticker order under both
    /// scheduling modes, so the result is deterministic given deterministic
    /// provider data.
    pub async fn run(&self, symbols: &[Symbol]) -> BatchResult {
        let bond_yield = self.resolve_bond_yield().await;

        let outcomes = match self.config.scheduling {
            Scheduling::Concurrent { max_concurrency } => {
                self.run_concurrent(symbols, bond_yield, max_concurrency)
                    .await
            }
            Scheduling::Sequential { delay } => {
                self.run_sequential(symbols, bond_yield, delay).await
            }
        };

        Self::aggregate(outcomes)
    }

    async fn run_concurrent(
        &self,
        symbols: &[Symbol],
        bond_yield: BondYield,
        max_concurrency: usize,
    ) -> Vec<TickerOutcome> {
        let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));

        let handles: Vec<_> = symbols
            .iter()
            .map(|symbol| {
                let analyzer = self.clone();
                let symbol = symbol.clone();
                let semaphore = semaphore.clone();
                tokio::spawn(async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .expect("analysis semaphore is never closed");
                    analyzer.analyze_one(&symbol, bond_yield).await
                })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(symbols.len());
        for (symbol, handle) in symbols.iter().zip(handles) {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(join_error) => {
                    // A panicking task fails its own ticker only.
                    self.audit.error(&format!(
                        "Critical failure for {symbol}: {join_error}"
                    ));
                    outcomes.push(TickerOutcome::Failed(symbol.clone()));
                }
            }
        }
        outcomes
    }

    async fn run_sequential(
        &self,
        symbols: &[Symbol],
        bond_yield: BondYield,
        delay: Duration,
    ) -> Vec<TickerOutcome> {
        let pacer = RequestPacer::new(delay);
        let mut outcomes = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            pacer.pace().await;
            outcomes.push(self.analyze_one(symbol, bond_yield).await);
        }
        outcomes
    }

    fn aggregate(outcomes: Vec<TickerOutcome>) -> BatchResult {
        let mut buys = Vec::new();
        let mut not_buys = Vec::new();
        let mut errors = Vec::new();
        let mut intrinsic_values = Vec::new();

        for outcome in outcomes {
            match outcome {
                TickerOutcome::Bought(report) => {
                    intrinsic_values.push(report.intrinsic_value);
                    buys.push(report);
                }
                TickerOutcome::NotBought(report) => {
                    intrinsic_values.push(report.intrinsic_value);
                    not_buys.push(report);
                }
                TickerOutcome::Failed(symbol) => errors.push(symbol),
            }
        }

        let outlier_threshold = OutlierDetector::detect(&intrinsic_values);

        BatchResult {
            buys,
            not_buys,
            errors,
            outlier_threshold,
        }
    }
}
