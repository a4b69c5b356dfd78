//! Usage-report response models
//!
//! Two body shapes are understood: a flat `buckets` list of per-model records,
//! and the Admin API's `data` list of time buckets each holding `results`.
//! Both are flattened into [`UsageBucket`]s.

use apiusage_core::types::{UsageBucket, deserialize_count, deserialize_lenient};
use serde::Deserialize;

/// Body of a successful usage-report response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageReportResponse {
    /// Flat per-model records
    #[serde(default)]
    pub buckets: Vec<UsageBucket>,
    /// Time buckets in the Admin API shape
    #[serde(default)]
    pub data: Vec<TimeBucket>,
    /// Whether another page exists
    #[serde(default)]
    pub has_more: Option<bool>,
    /// Cursor for the next page
    #[serde(default)]
    pub next_page: Option<String>,
}

impl UsageReportResponse {
    /// Every record of the response as a usage bucket
    pub fn into_buckets(self) -> Vec<UsageBucket> {
        let mut buckets = self.buckets;
        buckets.extend(
            self.data
                .into_iter()
                .flat_map(|time_bucket| time_bucket.results)
                .map(UsageBucket::from),
        );
        buckets
    }
}

/// One time window of the Admin API shape
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeBucket {
    /// Window start (RFC 3339)
    #[serde(default)]
    pub starting_at: Option<String>,
    /// Window end (RFC 3339)
    #[serde(default)]
    pub ending_at: Option<String>,
    /// Usage rows in this window
    #[serde(default)]
    pub results: Vec<UsageResult>,
}

/// One usage row inside a time bucket
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageResult {
    /// Model, present when grouped by model
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub model: Option<String>,
    #[serde(
        default,
        alias = "input_tokens",
        deserialize_with = "deserialize_count"
    )]
    pub uncached_input_tokens: u64,
    #[serde(
        default,
        alias = "cached_input_tokens",
        deserialize_with = "deserialize_count"
    )]
    pub cache_read_input_tokens: u64,
    /// Cache writes broken down by TTL
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub cache_creation: Option<CacheCreation>,
    /// Cache writes as a single counter
    #[serde(default, deserialize_with = "deserialize_count")]
    pub cache_creation_input_tokens: u64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub output_tokens: u64,
}

/// Cache-creation breakdown
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CacheCreation {
    #[serde(default, deserialize_with = "deserialize_count")]
    pub ephemeral_1h_input_tokens: u64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub ephemeral_5m_input_tokens: u64,
}

impl CacheCreation {
    pub fn total(&self) -> u64 {
        self.ephemeral_1h_input_tokens
            .saturating_add(self.ephemeral_5m_input_tokens)
    }
}

impl From<UsageResult> for UsageBucket {
    fn from(result: UsageResult) -> Self {
        let cache_creation = result
            .cache_creation_input_tokens
            .saturating_add(result.cache_creation.map_or(0, |c| c.total()));
        Self {
            model: result.model,
            input_tokens: result.uncached_input_tokens,
            output_tokens: result.output_tokens,
            cached_input_tokens: result.cache_read_input_tokens,
            cache_creation_tokens: cache_creation,
        }
    }
}
