//! # Grahamite Core
//!
//! Valuation and screening engine for the grahamite stock screener.
//!
//! ## Overview
//!
//! Grahamite classifies each ticker of a batch as Buy, NotBuy, or Error
//! against an adjusted-Graham intrinsic-value heuristic:
//!
//! - **Bond-yield resolution** with clamping and a fixed default fallback
//! - **Growth estimation** from net-income history (median-smoothed CAGR)
//! - **Intrinsic value** with logarithmic growth dampening and a 5x price cap
//! - **Seven-criterion battery** gated on positive EPS
//! - **Outlier detection** (median + 3σ) across the batch, advisory only
//! - **Batch analysis** with isolated per-ticker failures, concurrent or
//!   sequential rate-limited scheduling
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Yahoo, test fixture) |
//! | [`analyzer`] | Batch orchestration and failure isolation |
//! | [`audit`] | Injected append-only assumption/error log |
//! | [`domain`] | Domain types (Symbol, TickerSnapshot, criteria, results) |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`pacing`] | Fixed-interval request pacing |
//! | [`provider`] | Market-data provider contract |
//! | [`valuation`] | Valuation and screening calculations |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use grahamite_core::{
//!     AnalyzerConfig, BatchAnalyzer, FileAuditSink, Symbol, YahooProvider,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = Arc::new(YahooProvider::new(10_000));
//!     let audit = Arc::new(FileAuditSink::open("assumptions.log")?);
//!     let analyzer = BatchAnalyzer::new(provider, audit, AnalyzerConfig::default());
//!
//!     let symbols = vec![Symbol::parse("AAPL")?, Symbol::parse("MSFT")?];
//!     let result = analyzer.run(&symbols).await;
//!
//!     for report in &result.buys {
//!         println!("{}: intrinsic {:.2}", report.symbol, report.intrinsic_value);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Failure model
//!
//! Provider failures are recovered locally: the bond yield and growth rate
//! fall back to documented defaults (logged as assumptions), and a ticker
//! whose fetch fails is downgraded to the Error classification without
//! touching any sibling ticker.

pub mod adapters;
pub mod analyzer;
pub mod audit;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod pacing;
pub mod provider;
pub mod valuation;

// Adapter implementations
pub use adapters::{FixtureProvider, YahooProvider};

// Batch analysis
pub use analyzer::{AnalyzerConfig, BatchAnalyzer, Scheduling, TickerOutcome};

// Audit sink
pub use audit::{AuditLevel, AuditSink, FileAuditSink, MemoryAuditSink, NoopAuditSink};

// Domain models
pub use domain::{
    BatchResult, BondYield, Criterion, CriteriaVector, GrowthRate, Recommendation, Symbol,
    TickerReport, TickerSnapshot,
};

// Error types
pub use error::{CoreError, ValidationError};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};

// Pacing
pub use pacing::RequestPacer;

// Provider contract
pub use provider::{MarketDataProvider, ProviderError, ProviderErrorKind};

// Valuation components
pub use valuation::{
    BondYieldResolver, CriteriaEvaluator, GrowthRateEstimator, IntrinsicValueCalculator,
    OutlierDetector,
};
