use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use crate::provider::{MarketDataProvider, ProviderError};
use crate::{Symbol, TickerSnapshot};

/// Deterministic in-memory provider for tests and offline runs.
///
/// Snapshots and failures are registered per symbol; unregistered symbols
/// report missing data, which exercises the same path as a real upstream
/// outage.
#[derive(Default)]
pub struct FixtureProvider {
    snapshots: HashMap<Symbol, Result<TickerSnapshot, ProviderError>>,
    bond_yield_series: Option<Vec<f64>>,
}

impl FixtureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(mut self, snapshot: TickerSnapshot) -> Self {
        self.snapshots
            .insert(snapshot.symbol.clone(), Ok(snapshot));
        self
    }

    pub fn with_failure(mut self, symbol: Symbol, error: ProviderError) -> Self {
        self.snapshots.insert(symbol, Err(error));
        self
    }

    pub fn with_bond_yield_series(mut self, closes: Vec<f64>) -> Self {
        self.bond_yield_series = Some(closes);
        self
    }
}

impl MarketDataProvider for FixtureProvider {
    fn snapshot<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<TickerSnapshot, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            match self.snapshots.get(symbol) {
                Some(result) => result.clone(),
                None => Err(ProviderError::missing_data(format!(
                    "no fixture registered for {symbol}"
                ))),
            }
        })
    }

    fn bond_yield_series<'a>(
        &'a self,
        _symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f64>, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            self.bond_yield_series.clone().ok_or_else(|| {
                ProviderError::unavailable("no bond yield series registered in fixture")
            })
        })
    }
}
