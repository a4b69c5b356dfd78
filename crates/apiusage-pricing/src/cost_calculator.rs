//! Cost calculator module for estimating usage costs
//!
//! Costs are estimated from input and output tokens only, using the tier the
//! [`PricingTable`] selects for a model. Cached and cache-creation tokens are
//! reported but not priced.
//!
//! # Examples
//!
//! ```
//! use apiusage_pricing::{CostCalculator, PricingTable};
//! use std::sync::Arc;
//!
//! let calculator = CostCalculator::new(Arc::new(PricingTable::embedded().unwrap()));
//!
//! // 2M input + 0.5M output on claude-3-haiku: 2 × 0.25 + 0.5 × 1.25
//! let cost = calculator.estimate(2_000_000, 500_000, "claude-3-haiku");
//! assert!((cost - 1.125).abs() < 1e-12);
//! ```

use crate::pricing_table::{PricingTable, PricingTier};
use apiusage_core::types::{ModelName, TokenCounts};
use std::sync::Arc;
use tracing::debug;

const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// Estimates costs from token usage and a pricing table
pub struct CostCalculator {
    /// Pricing table instance
    table: Arc<PricingTable>,
}

impl CostCalculator {
    /// Create a new CostCalculator over a pricing table
    pub fn new(table: Arc<PricingTable>) -> Self {
        Self { table }
    }

    /// The table this calculator prices with
    pub fn table(&self) -> &PricingTable {
        &self.table
    }

    /// Estimate the cost of `input_tokens` and `output_tokens` on `model`
    ///
    /// Pure; unmatched models are priced with the fallback tier.
    pub fn estimate(&self, input_tokens: u64, output_tokens: u64, model: &str) -> f64 {
        let tier = self.table.tier_for(model);
        let cost = Self::calculate_from_tier(input_tokens, output_tokens, tier);
        debug!(
            "Estimated ${:.6} for {} input / {} output tokens on {}",
            cost, input_tokens, output_tokens, model
        );
        cost
    }

    /// Estimate the cost of aggregated counters for a model
    pub fn calculate_cost(&self, tokens: &TokenCounts, model: &ModelName) -> f64 {
        self.estimate(tokens.input_tokens, tokens.output_tokens, model.as_str())
    }

    /// Cost of the given token counts at a tier's rates
    ///
    /// `input / 1e6 × input_rate + output / 1e6 × output_rate`
    pub fn calculate_from_tier(input_tokens: u64, output_tokens: u64, tier: &PricingTier) -> f64 {
        let input_cost = input_tokens as f64 / TOKENS_PER_MILLION * tier.input_per_million;
        let output_cost = output_tokens as f64 / TOKENS_PER_MILLION * tier.output_per_million;
        input_cost + output_cost
    }
}
