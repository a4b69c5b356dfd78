//! Report pipeline: fetch → aggregate → price
//!
//! [`ReportPipeline::run`] performs exactly one fetch and returns either a
//! priced [`UsageReport`] or the reason it could not be produced. Rendering
//! and the process exit status are left to the caller.

use crate::aggregation::Aggregator;
use crate::config::ReportConfig;
use crate::cost_calculator::CostCalculator;
use crate::error::Result;
use crate::pricing_table::PricingTable;
use crate::report::UsageReport;
use crate::types::{GroupBy, ReportPeriod, UsageBucket};
use crate::usage_fetcher::UsageFetcher;
use std::sync::Arc;
use tracing::info;

/// Aggregate buckets and price every model
///
/// Infallible; an empty bucket list gives an empty report.
pub fn build_report(
    period: ReportPeriod,
    buckets: &[UsageBucket],
    calculator: &CostCalculator,
) -> UsageReport {
    let usage = Aggregator::aggregate(buckets);
    UsageReport::build(period, usage, |model, tokens| {
        calculator.calculate_cost(tokens, model)
    })
}

/// Wires the fetcher and the cost estimator together
pub struct ReportPipeline {
    fetcher: UsageFetcher,
    calculator: CostCalculator,
    group_by: Vec<GroupBy>,
}

impl ReportPipeline {
    /// Create a pipeline from its parts
    pub fn new(fetcher: UsageFetcher, calculator: CostCalculator, group_by: Vec<GroupBy>) -> Self {
        Self {
            fetcher,
            calculator,
            group_by,
        }
    }

    /// Build the fetcher and pricing table described by `config`
    pub fn from_config(config: &ReportConfig) -> Result<Self> {
        let table = PricingTable::load(config.pricing_file.as_deref())?;
        let fetcher = UsageFetcher::new(config)?;
        Ok(Self::new(
            fetcher,
            CostCalculator::new(Arc::new(table)),
            config.group_by.clone(),
        ))
    }

    /// Fetch, aggregate, and price the usage for `period`
    ///
    /// # Errors
    ///
    /// Returns [`ApiUsageError::Fetch`](crate::error::ApiUsageError::Fetch) when
    /// the usage report could not be retrieved; nothing is aggregated then.
    pub async fn run(&self, period: ReportPeriod) -> Result<UsageReport> {
        info!(
            "Fetching usage from {} to {} ({} days)",
            period.start, period.end, period.days
        );
        let buckets = self.fetcher.fetch(&period, &self.group_by).await?;

        let report = build_report(period, &buckets, &self.calculator);
        info!(
            "Report covers {} models, estimated total ${:.2}",
            report.models.len(),
            report.totals.cost
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TokenCounts;
    use chrono::NaiveDate;

    fn period() -> ReportPeriod {
        ReportPeriod::ending_on(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(), 30).unwrap()
    }

    fn calculator() -> CostCalculator {
        CostCalculator::new(Arc::new(PricingTable::embedded().unwrap()))
    }

    #[test]
    fn test_build_report_haiku_scenario() {
        let buckets = vec![UsageBucket::new(
            Some("claude-3-haiku"),
            TokenCounts::new(2_000_000, 500_000, 0, 0),
        )];
        let report = build_report(period(), &buckets, &calculator());

        assert_eq!(report.models.len(), 1);
        assert_eq!(report.models[0].cost, 1.125);
        assert_eq!(report.totals.cost, 1.125);
        assert_eq!(report.totals.tokens.input_tokens, 2_000_000);
    }

    #[test]
    fn test_build_report_empty() {
        let report = build_report(period(), &[], &calculator());
        assert!(report.models.is_empty());
        assert_eq!(report.totals.tokens, TokenCounts::default());
        assert_eq!(report.totals.cost, 0.0);
    }

    #[test]
    fn test_build_report_sums_costs() {
        let buckets = vec![
            UsageBucket::new(Some("claude-3-opus"), TokenCounts::new(1_000_000, 0, 0, 0)),
            UsageBucket::new(Some("claude-3-haiku"), TokenCounts::new(0, 1_000_000, 0, 0)),
            UsageBucket::new(None, TokenCounts::new(1_000_000, 0, 0, 0)),
        ];
        let report = build_report(period(), &buckets, &calculator());
        // 15.00 + 1.25 + 3.00 (fallback)
        assert!((report.totals.cost - 19.25).abs() < 1e-9);
        assert_eq!(report.models[2].model.as_str(), "unknown");
        assert_eq!(report.models[2].cost, 3.0);
    }
}
