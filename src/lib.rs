//! `multi-dex-price-scanner`
//!
//! Poll several Solana price APIs at once, group their quotes per token,
//! compute cross-source statistics and flag buy/sell spreads worth a look.
//!
//! ## Quickstart
//!
//! ```no_run
//! use multi_dex_price_scanner::{
//!     PriceScanner, Source, TokenRegistry, build_sources, compute_stats, detect_arbitrage,
//! };
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), multi_dex_price_scanner::PriceScannerError> {
//! let sources = build_sources(&Source::builtin(), None)?;
//! let scanner = PriceScanner::new(sources, TokenRegistry::solana_default(), Duration::from_secs(3));
//!
//! let cycle = scanner.poll_once().await;
//! if let Some(stats) = compute_stats(&cycle.snapshots["SOL"]) {
//!     println!("SOL avg={} spread={}%", stats.avg, stats.spread_pct);
//! }
//! for opp in detect_arbitrage(&cycle.snapshots, 0.3) {
//!     println!("{}: buy {} sell {} ({:.3}%)", opp.token, opp.buy_source, opp.sell_source, opp.spread_pct);
//! }
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod config;
pub mod report;
pub mod runner;
pub mod scanner;
pub mod sources;
pub mod tokens;

// Re-export common types
pub use common::{Confidence, HttpSource, PriceScannerError, PriceSource, Quote, Source};
pub use config::ScannerConfig;
pub use report::{CycleReport, JsonFileSink, LogSink, ReportSink};
pub use runner::{RunOptions, run_cycle, run_scanner};
pub use scanner::{
    ArbitrageOpportunity, CycleResult, PriceScanner, SourceReport, SourceStatus, TokenSnapshot,
    TokenStats, compute_all_stats, compute_stats, detect_arbitrage, poll_once,
};
pub use sources::{Birdeye, Jupiter, Meteora, Orca, Raydium, build_sources};
pub use tokens::{Token, TokenRegistry};
