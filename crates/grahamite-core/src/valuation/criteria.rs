use crate::{Criterion, CriteriaVector, Recommendation, TickerSnapshot};

/// Evaluates the fixed value/quality criteria battery.
///
/// Criterion order is fixed for reporting:
///
/// 1. EPS > 0
/// 2. P/E < 20
/// 3. P/B < 2
/// 4. Debt-to-Equity < 0.5
/// 5. Intrinsic Value > Current Price
/// 6. Margin of Safety > 30%
/// 7. Dividend Yield > 0
///
/// A non-positive (or missing) EPS gates everything: only the failed EPS
/// criterion is returned and no other criterion is evaluated.
pub struct CriteriaEvaluator;

impl CriteriaEvaluator {
    pub fn evaluate(
        snapshot: &TickerSnapshot,
        intrinsic_value: f64,
        margin_of_safety: f64,
    ) -> (Recommendation, CriteriaVector) {
        let eps = snapshot.trailing_eps;
        if eps.map_or(true, |eps| eps <= 0.0) {
            return (
                Recommendation::NotBuy,
                vec![Criterion::new("EPS > 0", false, eps)],
            );
        }

        let criteria = vec![
            Criterion::new("EPS > 0", true, eps),
            Criterion::new(
                "P/E < 20",
                snapshot.trailing_pe < 20.0,
                Some(snapshot.trailing_pe),
            ),
            Criterion::new(
                "P/B < 2",
                snapshot.price_to_book < 2.0,
                Some(snapshot.price_to_book),
            ),
            Criterion::new(
                "Debt-to-Equity < 0.5",
                snapshot.debt_to_equity < 0.5,
                Some(snapshot.debt_to_equity),
            ),
            Criterion::new(
                "Intrinsic Value > Current Price",
                intrinsic_value > snapshot.current_price,
                Some(intrinsic_value),
            ),
            Criterion::new(
                "Margin of Safety > 30%",
                margin_of_safety > 30.0,
                Some(margin_of_safety),
            ),
            Criterion::new(
                "Dividend Yield > 0",
                snapshot.dividend_yield > 0.0,
                Some(snapshot.dividend_yield),
            ),
        ];

        let recommendation = if criteria.iter().all(|c| c.passed) {
            Recommendation::Buy
        } else {
            Recommendation::NotBuy
        };

        (recommendation, criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Symbol;

    fn snapshot(eps: Option<f64>) -> TickerSnapshot {
        TickerSnapshot::new(
            Symbol::parse("AAPL").expect("valid"),
            100.0,
            eps,
            15.0,
            1.0,
            0.3,
            2.0,
            vec![],
        )
        .expect("valid snapshot")
    }

    #[test]
    fn all_criteria_pass_yields_buy() {
        let snap = snapshot(Some(5.0));
        let (recommendation, criteria) = CriteriaEvaluator::evaluate(&snap, 200.0, 100.0);

        assert_eq!(recommendation, Recommendation::Buy);
        assert_eq!(criteria.len(), 7);
        assert!(criteria.iter().all(|c| c.passed));
    }

    #[test]
    fn negative_eps_gates_all_other_criteria() {
        let snap = snapshot(Some(-1.0));
        let (recommendation, criteria) = CriteriaEvaluator::evaluate(&snap, 200.0, 100.0);

        assert_eq!(recommendation, Recommendation::NotBuy);
        assert_eq!(criteria.len(), 1);
        assert_eq!(criteria[0].name, "EPS > 0");
        assert!(!criteria[0].passed);
        assert_eq!(criteria[0].observed, Some(-1.0));
    }

    #[test]
    fn missing_eps_gates_with_absent_observed_value() {
        let snap = snapshot(None);
        let (recommendation, criteria) = CriteriaEvaluator::evaluate(&snap, 200.0, 100.0);

        assert_eq!(recommendation, Recommendation::NotBuy);
        assert_eq!(criteria.len(), 1);
        assert_eq!(criteria[0].observed, None);
    }

    #[test]
    fn single_failed_criterion_downgrades_to_not_buy() {
        let mut snap = snapshot(Some(5.0));
        snap.dividend_yield = 0.0;
        let (recommendation, criteria) = CriteriaEvaluator::evaluate(&snap, 200.0, 100.0);

        assert_eq!(recommendation, Recommendation::NotBuy);
        assert_eq!(criteria.len(), 7);
        assert_eq!(criteria.iter().filter(|c| !c.passed).count(), 1);
        assert_eq!(criteria[6].name, "Dividend Yield > 0");
    }

    #[test]
    fn thresholds_are_strict() {
        let mut snap = snapshot(Some(5.0));
        snap.trailing_pe = 20.0;
        let (_, criteria) = CriteriaEvaluator::evaluate(&snap, 200.0, 100.0);
        assert!(!criteria[1].passed, "P/E exactly 20 must fail");

        let snap = snapshot(Some(5.0));
        let (_, criteria) = CriteriaEvaluator::evaluate(&snap, 200.0, 30.0);
        assert!(!criteria[5].passed, "margin exactly 30 must fail");
    }
}
