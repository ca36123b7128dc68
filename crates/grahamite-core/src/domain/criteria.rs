use serde::{Deserialize, Serialize};

use crate::Symbol;

/// One named pass/fail test with the raw value it observed.
///
/// `observed` is absent when the metric itself was missing upstream (e.g. a
/// ticker with no reported EPS still produces the EPS criterion, failed,
/// with no observed value). Criterion names are drawn from the fixed
/// battery, so the type serializes but is not rebuilt from JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Criterion {
    pub name: &'static str,
    pub passed: bool,
    pub observed: Option<f64>,
}

impl Criterion {
    pub fn new(name: &'static str, passed: bool, observed: Option<f64>) -> Self {
        Self {
            name,
            passed,
            observed,
        }
    }
}

/// Ordered criteria battery for one ticker.
///
/// The full battery holds exactly seven criteria in a fixed order; when the
/// EPS gate fails the vector holds only that single criterion.
pub type CriteriaVector = Vec<Criterion>;

/// Aggregate classification for one ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Buy,
    NotBuy,
    /// The ticker could not be analyzed at all; no criteria were produced.
    Error,
}

/// Full analysis result for one analyzable ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerReport {
    pub symbol: Symbol,
    pub recommendation: Recommendation,
    pub criteria: CriteriaVector,
    pub intrinsic_value: f64,
    pub margin_of_safety: f64,
}

impl TickerReport {
    pub fn is_buy(&self) -> bool {
        self.recommendation == Recommendation::Buy
    }
}

/// Aggregated output of a batch run.
///
/// `errors` preserves the input ticker order. Buy and not-buy lists are
/// joined against input order as well, so output is deterministic under
/// both scheduling modes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub buys: Vec<TickerReport>,
    pub not_buys: Vec<TickerReport>,
    pub errors: Vec<Symbol>,
    /// Advisory median + 3σ bound over the batch's intrinsic values; absent
    /// when the sample was too small. Flags, never filters.
    pub outlier_threshold: Option<f64>,
}

impl BatchResult {
    pub fn analyzed_count(&self) -> usize {
        self.buys.len() + self.not_buys.len()
    }
}
