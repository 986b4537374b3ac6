mod common;

use common::{FailingSource, StaticSource, test_registry};
use multi_dex_price_scanner::{
    PriceScannerError, PriceSource, Source, SourceStatus, Token, compute_stats, detect_arbitrage,
    poll_once,
};
use std::time::{Duration, Instant};

const TIMEOUT: Duration = Duration::from_millis(200);

#[tokio::test]
async fn test_groups_quotes_by_token_in_fetch_order() {
    let sources = vec![
        StaticSource::boxed(Source::Raydium, vec![("SOL", 102.345), ("BONK", 0.000012)]),
        StaticSource::boxed(Source::Orca, vec![("SOL", 102.456)]),
        StaticSource::boxed(Source::Jupiter, vec![("SOL", 102.567), ("BONK", 0.0000121)]),
    ];

    let result = poll_once(&sources, &test_registry(), TIMEOUT).await;

    assert_eq!(result.snapshots.len(), 3, "one snapshot per registry token");
    let sol: Vec<Source> = result.snapshots["SOL"]
        .quotes
        .iter()
        .map(|q| q.source.clone())
        .collect();
    assert_eq!(sol, vec![Source::Raydium, Source::Orca, Source::Jupiter]);
    assert_eq!(result.snapshots["BONK"].len(), 2);
    assert!(result.snapshots["USDC"].is_empty());
    assert_eq!(result.successful_sources(), 3);
    assert_eq!(result.failed_sources(), 0);
    assert_eq!(result.dropped_quotes, 0);

    let stats = compute_stats(&result.snapshots["SOL"]).unwrap();
    assert!((stats.avg - 102.456).abs() < 1e-9);

    // BONK spreads ~0.833%, SOL ~0.217%: both clear 0.2, widest first
    let opportunities = detect_arbitrage(&result.snapshots, 0.2);
    assert_eq!(opportunities.len(), 2);
    assert_eq!(opportunities[0].token, "BONK");
    assert_eq!(opportunities[0].buy_source, Source::Raydium);
    assert_eq!(opportunities[0].sell_source, Source::Jupiter);
    assert_eq!(opportunities[1].token, "SOL");
    assert_eq!(opportunities[1].buy_source, Source::Raydium);
    assert_eq!(opportunities[1].sell_source, Source::Jupiter);

    let wide_only = detect_arbitrage(&result.snapshots, 0.3);
    assert_eq!(wide_only.len(), 1);
    assert_eq!(wide_only[0].token, "BONK");
}

#[tokio::test]
async fn test_one_failing_source_does_not_block_others() {
    let sources = vec![
        StaticSource::boxed(Source::Raydium, vec![("SOL", 100.0)]),
        FailingSource::boxed(Source::Birdeye),
        StaticSource::boxed(Source::Orca, vec![("SOL", 101.0)]),
    ];

    let result = poll_once(&sources, &test_registry(), TIMEOUT).await;

    assert_eq!(result.snapshots["SOL"].len(), 2);
    assert_eq!(result.failed_sources(), 1);
    match &result.sources[1].status {
        SourceStatus::Failed { error } => assert!(error.contains("Birdeye API error")),
        other => panic!("expected Birdeye failure, got {:?}", other),
    }
    assert_eq!(result.sources[1].source, Source::Birdeye);
}

#[tokio::test]
async fn test_total_failure_still_returns_empty_snapshots() {
    let sources = vec![
        FailingSource::boxed(Source::Jupiter),
        FailingSource::boxed(Source::Raydium),
    ];

    let result = poll_once(&sources, &test_registry(), TIMEOUT).await;

    assert_eq!(result.snapshots.len(), 3);
    assert!(result.snapshots.values().all(|s| s.is_empty()));
    assert_eq!(result.failed_sources(), 2);
    assert!(detect_arbitrage(&result.snapshots, 0.0).is_empty());
    assert!(result.snapshots.values().all(|s| compute_stats(s).is_none()));
}

#[tokio::test]
async fn test_no_sources_at_all() {
    let sources: Vec<Box<dyn PriceSource>> = Vec::new();
    let result = poll_once(&sources, &test_registry(), TIMEOUT).await;

    assert_eq!(result.snapshots.len(), 3);
    assert!(result.sources.is_empty());
    assert_eq!(result.total_quotes(), 0);
}

#[tokio::test]
async fn test_slow_sources_time_out_within_one_window() {
    let sources = vec![
        StaticSource::boxed(Source::Jupiter, vec![("SOL", 100.0)]),
        StaticSource::hanging(Source::Raydium),
        StaticSource::boxed(Source::Orca, vec![("SOL", 100.2)]),
        StaticSource::hanging(Source::Birdeye),
        StaticSource::boxed(Source::Meteora, vec![("SOL", 100.1)]),
    ];

    let started = Instant::now();
    let result = poll_once(&sources, &test_registry(), TIMEOUT).await;
    let elapsed = started.elapsed();

    // Two timeouts run side by side, not back to back
    assert!(elapsed >= TIMEOUT);
    assert!(
        elapsed < TIMEOUT * 2,
        "cycle took {:?}, expected about one timeout window",
        elapsed
    );

    assert_eq!(result.snapshots["SOL"].len(), 3);
    let timed_out: Vec<Source> = result
        .sources
        .iter()
        .filter(|r| r.status == SourceStatus::TimedOut)
        .map(|r| r.source.clone())
        .collect();
    assert_eq!(timed_out, vec![Source::Raydium, Source::Birdeye]);
}

#[tokio::test]
async fn test_fetch_reports_timeout_error() {
    let source = StaticSource {
        source: Source::Orca,
        prices: vec![("SOL", 1.0)],
        delay: Some(Duration::from_secs(5)),
    };
    let tokens = vec![Token::create("SOL", common::SOL_MINT)];

    match source.fetch(&tokens, Duration::from_millis(20)).await {
        Err(PriceScannerError::Timeout {
            source_name,
            timeout,
        }) => {
            assert_eq!(source_name, "Orca");
            assert_eq!(timeout, Duration::from_millis(20));
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_prices_are_dropped() {
    let sources = vec![
        StaticSource::boxed(
            Source::Raydium,
            vec![("SOL", -5.0), ("BONK", f64::NAN), ("BONK", 0.0)],
        ),
        StaticSource::boxed(Source::Orca, vec![("BONK", f64::INFINITY)]),
    ];

    let result = poll_once(&sources, &test_registry(), TIMEOUT).await;

    assert!(result.snapshots["SOL"].is_empty());
    assert!(compute_stats(&result.snapshots["SOL"]).is_none());
    assert!(result.snapshots["BONK"].is_empty());
    assert_eq!(result.dropped_quotes, 4);
    // Dropped quotes are not a source failure
    assert_eq!(result.failed_sources(), 0);
    assert_eq!(
        result.sources[0].status,
        SourceStatus::Ok {
            accepted: 0,
            dropped: 3
        }
    );
}

#[tokio::test]
async fn test_unknown_tokens_and_duplicates_are_dropped() {
    let sources = vec![
        StaticSource::boxed(
            Source::Jupiter,
            vec![("SOL", 100.0), ("SOL", 250.0), ("WIF", 2.5)],
        ),
        // Second fetcher claiming the same source name loses to the first
        StaticSource::boxed(Source::Jupiter, vec![("SOL", 300.0)]),
        StaticSource::boxed(Source::Orca, vec![("SOL", 100.5)]),
    ];

    let result = poll_once(&sources, &test_registry(), TIMEOUT).await;

    let sol = &result.snapshots["SOL"];
    assert_eq!(sol.len(), 2);
    assert_eq!(sol.quotes[0].source, Source::Jupiter);
    assert_eq!(sol.quotes[0].price, 100.0);
    assert_eq!(sol.quotes[1].source, Source::Orca);
    assert!(!result.snapshots.contains_key("WIF"));
    assert_eq!(result.dropped_quotes, 3);
}

#[tokio::test]
async fn test_pegged_tokens_are_rewritten_to_peg() {
    let sources = vec![
        StaticSource::boxed(Source::Jupiter, vec![("USDC", 0.9998)]),
        StaticSource::boxed(Source::Raydium, vec![("USDC", 1.0004)]),
    ];

    let result = poll_once(&sources, &test_registry(), TIMEOUT).await;

    let usdc = &result.snapshots["USDC"];
    assert_eq!(usdc.len(), 2);
    assert!(usdc.quotes.iter().all(|q| q.price == 1.0));
    assert_eq!(compute_stats(usdc).unwrap().spread_pct, 0.0);
    assert!(detect_arbitrage(&result.snapshots, 0.0).is_empty());
}

#[tokio::test]
async fn test_custom_source_with_builtin_name_is_deduplicated() {
    let sources = vec![
        StaticSource::boxed(Source::Orca, vec![("SOL", 100.0)]),
        StaticSource::boxed(Source::Custom("Orca".to_string()), vec![("SOL", 105.0)]),
    ];

    let result = poll_once(&sources, &test_registry(), TIMEOUT).await;

    let sol = &result.snapshots["SOL"];
    assert_eq!(sol.len(), 1);
    assert_eq!(sol.quotes[0].price, 100.0);
    assert_eq!(result.dropped_quotes, 1);

    let opportunities = detect_arbitrage(&result.snapshots, 0.0);
    assert!(opportunities.is_empty());
}
