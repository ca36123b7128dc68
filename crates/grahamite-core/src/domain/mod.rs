//! Canonical domain types for the screening engine.
//!
//! All types validate their invariants at construction and are immutable
//! afterwards. A [`TickerSnapshot`] is owned by the analysis of exactly one
//! ticker; [`BondYield`] is resolved once per batch and copied read-only
//! into every analysis.

mod criteria;
mod metrics;
mod rates;
mod symbol;

pub use criteria::{BatchResult, Criterion, CriteriaVector, Recommendation, TickerReport};
pub use metrics::TickerSnapshot;
pub use rates::{BondYield, GrowthRate};
pub use symbol::Symbol;
