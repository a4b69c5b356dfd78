//! Pricing table and cost estimator for apiusage
//!
//! This crate holds the static per-model price table and turns
//! token counts into estimated USD costs.

pub mod cost_calculator;
pub mod pricing_table;

pub use cost_calculator::CostCalculator;
pub use pricing_table::{PricingRule, PricingTable, PricingTier};
