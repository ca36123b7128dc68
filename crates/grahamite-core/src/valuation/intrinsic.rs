use std::sync::Arc;

use crate::audit::AuditSink;
use crate::{BondYield, GrowthRate};

/// Margin-of-safety clamp bounds, in percentage points.
pub const MARGIN_MIN: f64 = -50.0;
pub const MARGIN_MAX: f64 = 100.0;

/// Hard cap on intrinsic value relative to the current price.
pub const PRICE_CAP_MULTIPLE: f64 = 5.0;

/// Computes an adjusted-Graham intrinsic value.
///
/// `intrinsic = eps * (7 + 1.5 * min(ln(1 + g*100), 2)) * (4.4 / yield)`,
/// capped at five times the current price. The logarithmic dampening and the
/// price cap bound the output against extreme or erroneous growth and yield
/// inputs; both are load-bearing and must not be removed.
#[derive(Clone)]
pub struct IntrinsicValueCalculator {
    audit: Arc<dyn AuditSink>,
}

impl IntrinsicValueCalculator {
    pub fn new(audit: Arc<dyn AuditSink>) -> Self {
        Self { audit }
    }

    /// Returns 0 for non-positive EPS or bond yield (a skipped computation,
    /// not an error); otherwise the capped intrinsic value.
    pub fn compute(
        &self,
        eps: f64,
        growth: GrowthRate,
        bond_yield: BondYield,
        current_price: f64,
    ) -> f64 {
        if eps <= 0.0 || bond_yield.as_f64() <= 0.0 {
            self.audit
                .warning("Invalid EPS or bond yield. Skipping intrinsic value calculation.");
            return 0.0;
        }

        let adjusted_growth = 7.0 + 1.5 * (growth.as_f64() * 100.0).ln_1p().min(2.0);
        let intrinsic = eps * adjusted_growth * (4.4 / bond_yield.as_f64());

        intrinsic.min(PRICE_CAP_MULTIPLE * current_price)
    }
}

/// Margin of safety in percentage points, clamped to [-50, 100].
///
/// A non-positive price means the quote is unknown, so the unclamped margin
/// is 0 rather than a total-loss sentinel.
pub fn margin_of_safety(intrinsic: f64, current_price: f64) -> f64 {
    let raw = if current_price != 0.0 {
        ((intrinsic - current_price) / current_price) * 100.0
    } else {
        0.0
    };
    raw.clamp(MARGIN_MIN, MARGIN_MAX)
}
