use serde::{Deserialize, Serialize};

/// Long-duration risk-free yield as a decimal fraction.
///
/// Resolved once per batch run and shared read-only across all ticker
/// analyses. `clamped` is for fetched values; `assumed` passes a configured
/// default through unchanged, as-given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BondYield(f64);

impl BondYield {
    pub const MIN: f64 = 0.01;
    pub const MAX: f64 = 0.10;
    pub const DEFAULT: f64 = 0.044;

    /// Clamp a fetched yield into the sane [1%, 10%] range.
    pub fn clamped(raw: f64) -> Self {
        Self(raw.clamp(Self::MIN, Self::MAX))
    }

    /// Use a configured fallback yield without clamping.
    pub fn assumed(default_yield: f64) -> Self {
        Self(default_yield)
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }
}

/// Forward growth-rate estimate as a decimal fraction in [0, 0.10].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrowthRate(f64);

impl GrowthRate {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 0.10;
    pub const DEFAULT: f64 = 0.03;

    pub fn clamped(raw: f64) -> Self {
        Self(raw.clamp(Self::MIN, Self::MAX))
    }

    pub fn assumed(default_growth: f64) -> Self {
        Self(default_growth)
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }
}
