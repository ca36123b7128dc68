use serde::{Deserialize, Serialize};

use crate::{Symbol, ValidationError};

/// Per-ticker metrics snapshot.
///
/// Produced fresh by a provider for each analysis, never mutated, and
/// dropped once criteria evaluation is done. `trailing_eps` stays optional
/// because a missing EPS gates the whole evaluation; every other missing
/// field is normalized to `0.0` by the provider and simply fails its
/// criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSnapshot {
    pub symbol: Symbol,
    pub current_price: f64,
    pub trailing_eps: Option<f64>,
    pub trailing_pe: f64,
    pub price_to_book: f64,
    pub debt_to_equity: f64,
    /// Dividend yield in percentage points (e.g. 2.0 for 2%).
    pub dividend_yield: f64,
    /// Annual net income, ordered oldest to newest, sparse entries removed.
    pub net_income_history: Vec<f64>,
}

impl TickerSnapshot {
    pub fn new(
        symbol: Symbol,
        current_price: f64,
        trailing_eps: Option<f64>,
        trailing_pe: f64,
        price_to_book: f64,
        debt_to_equity: f64,
        dividend_yield: f64,
        net_income_history: Vec<f64>,
    ) -> Result<Self, ValidationError> {
        validate_finite("current_price", current_price)?;
        validate_non_negative("current_price", current_price)?;
        if let Some(eps) = trailing_eps {
            validate_finite("trailing_eps", eps)?;
        }
        validate_finite("trailing_pe", trailing_pe)?;
        validate_finite("price_to_book", price_to_book)?;
        validate_finite("debt_to_equity", debt_to_equity)?;
        validate_finite("dividend_yield", dividend_yield)?;

        Ok(Self {
            symbol,
            current_price,
            trailing_eps,
            trailing_pe,
            price_to_book,
            debt_to_equity,
            dividend_yield,
            net_income_history,
        })
    }
}

pub(crate) fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

pub(crate) fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
