//! Report data types for apiusage
//!
//! Pure data structures describing a priced usage report. A report is built
//! from an [`AggregatedUsage`] and a pricing function, so this crate does not
//! depend on where prices come from.

use crate::aggregation::AggregatedUsage;
use crate::types::{ModelName, ReportPeriod, TokenCounts};
use serde::{Deserialize, Serialize};

/// Usage and estimated cost for one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelReport {
    /// Model identifier
    pub model: ModelName,
    /// Token counts summed over the window
    pub tokens: TokenCounts,
    /// Estimated cost in USD
    pub cost: f64,
}

/// Grand totals of a report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportTotals {
    /// Token counts summed over every model
    pub tokens: TokenCounts,
    /// Estimated cost in USD summed over every model
    pub cost: f64,
}

impl ReportTotals {
    /// Sum the rows of a report
    pub fn from_models(models: &[ModelReport]) -> Self {
        let mut totals = Self::default();
        for model in models {
            totals.tokens += model.tokens;
            totals.cost += model.cost;
        }
        totals
    }
}

/// A priced usage report for one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageReport {
    /// Window the report covers
    pub period: ReportPeriod,
    /// Per-model rows, sorted by model identifier
    pub models: Vec<ModelReport>,
    /// Grand totals
    pub totals: ReportTotals,
}

impl UsageReport {
    /// Price every model of an aggregate with `price`
    ///
    /// Totals are the sums of the per-model rows, which equal the aggregate's
    /// grand totals.
    ///
    /// # Examples
    /// ```
    /// use apiusage_core::aggregation::Aggregator;
    /// use apiusage_core::report::UsageReport;
    /// use apiusage_core::types::{ReportPeriod, TokenCounts, UsageBucket};
    /// use chrono::NaiveDate;
    ///
    /// let period = ReportPeriod::ending_on(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(), 30).unwrap();
    /// let buckets = vec![UsageBucket::new(Some("m"), TokenCounts::new(1_000_000, 0, 0, 0))];
    /// let usage = Aggregator::aggregate(&buckets);
    ///
    /// let report = UsageReport::build(period, usage, |_, tokens| tokens.input_tokens as f64 / 1e6);
    /// assert_eq!(report.totals.cost, 1.0);
    /// ```
    pub fn build<F>(period: ReportPeriod, usage: AggregatedUsage, mut price: F) -> Self
    where
        F: FnMut(&ModelName, &TokenCounts) -> f64,
    {
        let models: Vec<ModelReport> = usage
            .models
            .into_iter()
            .map(|(model, tokens)| {
                let cost = price(&model, &tokens);
                ModelReport {
                    model,
                    tokens,
                    cost,
                }
            })
            .collect();

        let totals = ReportTotals::from_models(&models);
        debug_assert_eq!(totals.tokens, usage.totals);

        Self {
            period,
            models,
            totals,
        }
    }

    /// Report with no usage at all
    pub fn empty(period: ReportPeriod) -> Self {
        Self::build(period, AggregatedUsage::default(), |_, _| 0.0)
    }
}
