//! Behavior-driven tests for batch orchestration.
//!
//! These tests verify HOW the analyzer schedules ticker work and isolates
//! failures: one ticker's provider outage never disturbs its siblings, and
//! both scheduling modes produce deterministic, input-ordered output.

use std::sync::Arc;
use std::time::Duration;

use grahamite_core::{
    AnalyzerConfig, BatchAnalyzer, FixtureProvider, MemoryAuditSink, ProviderError,
    Recommendation, Scheduling, TickerOutcome,
};

use grahamite_tests::{loss_making_snapshot, strong_value_snapshot, symbol};

fn analyzer(provider: FixtureProvider, config: AnalyzerConfig) -> (BatchAnalyzer, Arc<MemoryAuditSink>) {
    let audit = Arc::new(MemoryAuditSink::new());
    (
        BatchAnalyzer::new(Arc::new(provider), audit.clone(), config),
        audit,
    )
}

#[tokio::test]
async fn when_one_provider_call_fails_only_that_ticker_errors() {
    // Given: three tickers, the middle one unavailable upstream
    let provider = FixtureProvider::new()
        .with_bond_yield_series(vec![4.4])
        .with_snapshot(strong_value_snapshot("AAPL"))
        .with_failure(symbol("GONE"), ProviderError::unavailable("upstream down"))
        .with_snapshot(loss_making_snapshot("UBER"));
    let (analyzer, audit) = analyzer(provider, AnalyzerConfig::default());

    // When: the batch runs concurrently
    let result = analyzer
        .run(&[symbol("AAPL"), symbol("GONE"), symbol("UBER")])
        .await;

    // Then: exactly the failed ticker is in the error list
    assert_eq!(result.errors, vec![symbol("GONE")]);

    // And: the siblings classified exactly as they would standalone
    assert_eq!(result.buys.len(), 1);
    assert_eq!(result.buys[0].symbol, symbol("AAPL"));
    assert_eq!(result.not_buys.len(), 1);
    assert_eq!(result.not_buys[0].symbol, symbol("UBER"));
    assert_eq!(result.not_buys[0].recommendation, Recommendation::NotBuy);

    // And: the failure is on the audit record
    assert!(audit
        .lines()
        .iter()
        .any(|line| line.contains("GONE analysis failed")));
}

#[tokio::test]
async fn error_list_preserves_input_order() {
    let provider = FixtureProvider::new()
        .with_bond_yield_series(vec![4.4])
        .with_failure(symbol("ZZZ"), ProviderError::unavailable("down"))
        .with_failure(symbol("AAA"), ProviderError::unavailable("down"))
        .with_snapshot(strong_value_snapshot("MID"));
    let (analyzer, _audit) = analyzer(provider, AnalyzerConfig::default());

    let result = analyzer
        .run(&[symbol("ZZZ"), symbol("MID"), symbol("AAA")])
        .await;

    assert_eq!(result.errors, vec![symbol("ZZZ"), symbol("AAA")]);
}

#[tokio::test]
async fn sequential_and_concurrent_modes_agree_on_classification() {
    let build = || {
        FixtureProvider::new()
            .with_bond_yield_series(vec![4.4])
            .with_snapshot(strong_value_snapshot("AAA"))
            .with_snapshot(loss_making_snapshot("BBB"))
            .with_failure(symbol("CCC"), ProviderError::unavailable("down"))
    };
    let symbols = [symbol("AAA"), symbol("BBB"), symbol("CCC")];

    let (concurrent, _) = analyzer(build(), AnalyzerConfig::default());
    let (sequential, _) = analyzer(
        build(),
        AnalyzerConfig {
            scheduling: Scheduling::Sequential {
                delay: Duration::from_millis(1),
            },
            ..AnalyzerConfig::default()
        },
    );

    let concurrent_result = concurrent.run(&symbols).await;
    let sequential_result = sequential.run(&symbols).await;

    assert_eq!(concurrent_result, sequential_result);
}

#[tokio::test]
async fn standalone_analysis_matches_batch_membership() {
    let provider = FixtureProvider::new()
        .with_bond_yield_series(vec![4.4])
        .with_snapshot(strong_value_snapshot("AAPL"));
    let (analyzer, _audit) = analyzer(provider, AnalyzerConfig::default());

    let bond_yield = analyzer.resolve_bond_yield().await;
    let outcome = analyzer.analyze_one(&symbol("AAPL"), bond_yield).await;

    let report = match outcome {
        TickerOutcome::Bought(report) => report,
        other => panic!("expected a buy, got {other:?}"),
    };

    let batch = analyzer.run(&[symbol("AAPL")]).await;
    assert_eq!(batch.buys, vec![report]);
}

#[tokio::test]
async fn large_batches_expose_an_outlier_threshold() {
    // Given: eleven analyzable tickers, one with an extreme valuation
    let mut provider = FixtureProvider::new().with_bond_yield_series(vec![4.4]);
    let mut symbols = Vec::new();
    for i in 0..10 {
        let name = format!("TCK{i}");
        provider = provider.with_snapshot(strong_value_snapshot(&name));
        symbols.push(symbol(&name));
    }
    provider = provider.with_snapshot(loss_making_snapshot("LOSS"));
    symbols.push(symbol("LOSS"));

    let (analyzer, _audit) = analyzer(provider, AnalyzerConfig::default());

    // When: the batch runs
    let result = analyzer.run(&symbols).await;

    // Then: the advisory threshold is present and nothing was filtered
    assert!(result.outlier_threshold.is_some());
    assert_eq!(result.analyzed_count(), 11);
}

#[tokio::test]
async fn concurrency_bound_of_one_still_completes_every_ticker() {
    let provider = FixtureProvider::new()
        .with_bond_yield_series(vec![4.4])
        .with_snapshot(strong_value_snapshot("AAA"))
        .with_snapshot(strong_value_snapshot("BBB"))
        .with_snapshot(strong_value_snapshot("CCC"));
    let (analyzer, _audit) = analyzer(
        provider,
        AnalyzerConfig {
            scheduling: Scheduling::Concurrent { max_concurrency: 1 },
            ..AnalyzerConfig::default()
        },
    );

    let result = analyzer
        .run(&[symbol("AAA"), symbol("BBB"), symbol("CCC")])
        .await;

    assert_eq!(result.buys.len(), 3);
    assert!(result.errors.is_empty());
}
