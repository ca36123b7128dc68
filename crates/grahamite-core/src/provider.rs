//! Market-data provider contract.
//!
//! Providers supply a per-ticker metrics snapshot (including net-income
//! history) and the reference bond-yield close series. Every call is
//! fallible; the engine treats any [`ProviderError`] uniformly as "data
//! unavailable" for that call and never lets one ticker's failure reach a
//! sibling analysis.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{Symbol, TickerSnapshot};

/// Provider-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    Unavailable,
    RateLimited,
    InvalidRequest,
    MissingData,
    Internal,
}

/// Structured provider error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    message: String,
    retryable: bool,
}

impl ProviderError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn missing_data(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::MissingData,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ProviderErrorKind::Unavailable => "provider.unavailable",
            ProviderErrorKind::RateLimited => "provider.rate_limited",
            ProviderErrorKind::InvalidRequest => "provider.invalid_request",
            ProviderErrorKind::MissingData => "provider.missing_data",
            ProviderErrorKind::Internal => "provider.internal",
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ProviderError {}

/// Upstream market-data contract.
///
/// Implementations must be `Send + Sync`; one provider instance is shared
/// across all concurrent ticker analyses of a batch.
pub trait MarketDataProvider: Send + Sync {
    /// Fetches the metrics snapshot for one ticker, net-income history
    /// included (oldest to newest, sparse entries removed).
    fn snapshot<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<TickerSnapshot, ProviderError>> + Send + 'a>>;

    /// Fetches recent closes of the reference risk-free instrument, in
    /// percentage points, oldest to newest.
    fn bond_yield_series<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f64>, ProviderError>> + Send + 'a>>;
}
