//! Per-model aggregation of usage buckets
//!
//! Folds the raw buckets of one fetch into running totals keyed by model,
//! computing the grand totals in the same pass. Summation is order
//! independent; models come back in lexicographic order because the map is a
//! `BTreeMap`.

use crate::types::{ModelName, TokenCounts, UsageBucket};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Result of folding a set of buckets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedUsage {
    /// Totals per model, ordered by model identifier
    pub models: BTreeMap<ModelName, TokenCounts>,
    /// Totals across every bucket
    pub totals: TokenCounts,
}

impl AggregatedUsage {
    /// Add one bucket into the per-model and grand totals
    pub fn add_bucket(&mut self, bucket: &UsageBucket) {
        let tokens = bucket.tokens();
        *self.models.entry(bucket.model_name()).or_default() += tokens;
        self.totals += tokens;
    }

    /// Whether no bucket has been seen for any model
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Aggregates usage buckets into per-model totals
pub struct Aggregator;

impl Aggregator {
    /// Fold every bucket into per-model totals and grand totals
    ///
    /// An empty input yields an empty aggregate with zero totals.
    ///
    /// # Examples
    /// ```
    /// use apiusage_core::aggregation::Aggregator;
    /// use apiusage_core::types::{TokenCounts, UsageBucket};
    ///
    /// let buckets = vec![
    ///     UsageBucket::new(Some("claude-3-haiku"), TokenCounts::new(100, 10, 0, 0)),
    ///     UsageBucket::new(Some("claude-3-haiku"), TokenCounts::new(50, 5, 1, 0)),
    /// ];
    /// let usage = Aggregator::aggregate(&buckets);
    /// assert_eq!(usage.models.len(), 1);
    /// assert_eq!(usage.totals, TokenCounts::new(150, 15, 1, 0));
    /// ```
    pub fn aggregate<'a>(buckets: impl IntoIterator<Item = &'a UsageBucket>) -> AggregatedUsage {
        let mut usage = AggregatedUsage::default();
        let mut seen = 0usize;
        for bucket in buckets {
            usage.add_bucket(bucket);
            seen += 1;
        }
        debug!(
            "Aggregated {} buckets into {} models",
            seen,
            usage.models.len()
        );
        usage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UNKNOWN_MODEL;
    use proptest::prelude::*;

    fn bucket(model: Option<&str>, input: u64, output: u64, cached: u64, creation: u64) -> UsageBucket {
        UsageBucket::new(model, TokenCounts::new(input, output, cached, creation))
    }

    #[test]
    fn test_empty_input() {
        let usage = Aggregator::aggregate(&[]);
        assert!(usage.is_empty());
        assert_eq!(usage.totals, TokenCounts::default());
    }

    #[test]
    fn test_groups_by_model() {
        let buckets = vec![
            bucket(Some("claude-sonnet-4-5"), 100, 20, 5, 1),
            bucket(Some("claude-3-haiku"), 10, 2, 0, 0),
            bucket(Some("claude-sonnet-4-5"), 200, 40, 0, 3),
        ];
        let usage = Aggregator::aggregate(&buckets);

        assert_eq!(usage.models.len(), 2);
        assert_eq!(
            usage.models[&ModelName::new("claude-sonnet-4-5")],
            TokenCounts::new(300, 60, 5, 4)
        );
        assert_eq!(
            usage.models[&ModelName::new("claude-3-haiku")],
            TokenCounts::new(10, 2, 0, 0)
        );
        assert_eq!(usage.totals, TokenCounts::new(310, 62, 5, 4));
    }

    #[test]
    fn test_missing_model_goes_to_unknown() {
        let buckets = vec![bucket(None, 7, 3, 0, 0), bucket(None, 1, 1, 0, 0)];
        let usage = Aggregator::aggregate(&buckets);
        assert_eq!(
            usage.models[&ModelName::new(UNKNOWN_MODEL)],
            TokenCounts::new(8, 4, 0, 0)
        );
    }

    #[test]
    fn test_models_are_sorted() {
        let buckets = vec![
            bucket(Some("zeta"), 1, 0, 0, 0),
            bucket(Some("alpha"), 1, 0, 0, 0),
            bucket(Some("claude-3-opus"), 1, 0, 0, 0),
        ];
        let usage = Aggregator::aggregate(&buckets);
        let names: Vec<_> = usage.models.keys().map(ModelName::as_str).collect();
        assert_eq!(names, vec!["alpha", "claude-3-opus", "zeta"]);
    }

    #[test]
    fn test_counters_saturate_at_max() {
        let buckets = vec![
            bucket(Some("claude-3-haiku"), u64::MAX, 0, 0, 0),
            bucket(Some("claude-3-haiku"), 1, 2, 0, 0),
            bucket(Some("claude-3-opus"), 5, 0, 0, 0),
        ];
        let usage = Aggregator::aggregate(&buckets);

        assert_eq!(
            usage.models[&ModelName::new("claude-3-haiku")],
            TokenCounts::new(u64::MAX, 2, 0, 0)
        );
        assert_eq!(usage.totals.input_tokens, u64::MAX);
        assert_eq!(usage.totals.output_tokens, 2);
        assert_eq!(usage.totals.total(), u64::MAX);
    }

    prop_compose! {
        fn arb_bucket()(
            model in prop::option::of(prop::sample::select(vec![
                "claude-3-haiku",
                "claude-3-opus",
                "claude-sonnet-4-5",
                "claude-opus-4-5-20251101",
            ])),
            input in 0u64..10_000_000,
            output in 0u64..5_000_000,
            cached in 0u64..1_000_000,
            creation in 0u64..1_000_000,
        ) -> UsageBucket {
            bucket(model, input, output, cached, creation)
        }
    }

    proptest! {
        #[test]
        fn prop_totals_conserve_counts(buckets in prop::collection::vec(arb_bucket(), 0..50)) {
            let usage = Aggregator::aggregate(&buckets);
            let summed = usage
                .models
                .values()
                .fold(TokenCounts::default(), |acc, tokens| acc + *tokens);
            prop_assert_eq!(summed, usage.totals);
        }

        #[test]
        fn prop_order_does_not_matter(
            buckets in prop::collection::vec(arb_bucket(), 0..50),
            rotate in 0usize..50,
        ) {
            let forward = Aggregator::aggregate(&buckets);
            let reversed = Aggregator::aggregate(buckets.iter().rev());
            prop_assert_eq!(&forward, &reversed);

            let mut rotated = buckets.clone();
            if !rotated.is_empty() {
                let mid = rotate % rotated.len();
                rotated.rotate_left(mid);
            }
            prop_assert_eq!(&forward, &Aggregator::aggregate(&rotated));
        }
    }
}
