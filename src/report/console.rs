use crate::common::PriceScannerError;
use crate::report::{CycleReport, ReportSink};
use async_trait::async_trait;
use tracing::info;

/// Prints prices, per-source deviations and opportunities through `tracing`.
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

/// Stats line per token, followed by its per-source deviations sorted by
/// price (cheapest first).
fn price_lines(report: &CycleReport) -> Vec<String> {
    let mut lines = Vec::new();

    for (token, stats) in &report.stats {
        let Some(stats) = stats else {
            lines.push(format!("{}: no prices available", token));
            continue;
        };

        lines.push(format!(
            "{}: avg ${:.6} | min ${:.6} | max ${:.6} | spread {:.3}%",
            token, stats.avg, stats.min, stats.max, stats.spread_pct
        ));

        let mut deviations: Vec<_> = stats.deviations.iter().collect();
        deviations.sort_by(|a, b| a.price.total_cmp(&b.price));
        for d in deviations {
            lines.push(format!(
                "    {:<12} ${:>14.6} ({:+.3}%)",
                d.source.name(),
                d.price,
                d.deviation_pct
            ));
        }
    }

    lines
}

fn opportunity_lines(report: &CycleReport) -> Vec<String> {
    if report.arbitrage_opportunities.is_empty() {
        return vec!["no significant arbitrage opportunities detected".to_string()];
    }

    report
        .arbitrage_opportunities
        .iter()
        .map(|opp| {
            format!(
                "{}: buy @ {} ${:.6} -> sell @ {} ${:.6} | spread {:.3}% (before fees)",
                opp.token,
                opp.buy_source,
                opp.buy_price,
                opp.sell_source,
                opp.sell_price,
                opp.spread_pct
            )
        })
        .collect()
}

#[async_trait]
impl ReportSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    async fn publish(&self, report: &CycleReport) -> Result<(), PriceScannerError> {
        info!(cycle = report.cycle, time = %report.formatted_time, "prices across sources");
        for line in price_lines(report) {
            info!("{}", line);
        }

        if !report.arbitrage_opportunities.is_empty() {
            info!(
                count = report.arbitrage_opportunities.len(),
                "arbitrage opportunities detected"
            );
        }
        for line in opportunity_lines(report) {
            info!("{}", line);
        }
        Ok(())
    }
}
