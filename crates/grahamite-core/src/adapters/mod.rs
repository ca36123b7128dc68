//! Provider adapters.
//!
//! | Adapter | Description |
//! |---------|-------------|
//! | [`YahooProvider`] | Yahoo Finance quoteSummary + chart endpoints |
//! | [`FixtureProvider`] | Deterministic in-memory data for tests |

mod fixture;
mod yahoo;

pub use fixture::FixtureProvider;
pub use yahoo::YahooProvider;
