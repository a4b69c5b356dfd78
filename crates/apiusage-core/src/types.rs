//! Core domain types for apiusage
//!
//! This module contains the fundamental types used throughout the apiusage crates.
//! These types provide strong typing for model names, token counts, usage buckets,
//! grouping dimensions, and the reporting window.

use crate::error::{ApiUsageError, Result};
use chrono::{Days, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::ops::{Add, AddAssign};
use tracing::warn;

/// Model identifier used when a bucket carries no model
pub const UNKNOWN_MODEL: &str = "unknown";

/// Strongly-typed model name wrapper
///
/// Ordering is lexicographic on the identifier, which is the order models
/// are presented in a report.
///
/// # Examples
/// ```
/// use apiusage_core::types::ModelName;
///
/// let model = ModelName::new("claude-3-haiku");
/// assert_eq!(model.as_str(), "claude-3-haiku");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModelName(String);

impl ModelName {
    /// Create a new ModelName from any string-like type
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The placeholder name for buckets without a model identifier
    pub fn unknown() -> Self {
        Self(UNKNOWN_MODEL.to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ModelName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Token counts for usage tracking
///
/// # Examples
/// ```
/// use apiusage_core::types::TokenCounts;
///
/// let tokens = TokenCounts::new(100, 50, 10, 5);
/// assert_eq!(tokens.total(), 165);
///
/// let combined = tokens + TokenCounts::new(50, 25, 5, 2);
/// assert_eq!(combined.input_tokens, 150);
/// ```
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenCounts {
    /// Input tokens billed at the full input rate
    pub input_tokens: u64,
    /// Output tokens generated
    pub output_tokens: u64,
    /// Input tokens served from the prompt cache
    pub cached_input_tokens: u64,
    /// Input tokens written to the prompt cache
    pub cache_creation_tokens: u64,
}

impl TokenCounts {
    /// Create new TokenCounts
    pub fn new(
        input_tokens: u64,
        output_tokens: u64,
        cached_input_tokens: u64,
        cache_creation_tokens: u64,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            cached_input_tokens,
            cache_creation_tokens,
        }
    }

    /// Calculate total tokens, saturating at `u64::MAX`
    pub fn total(&self) -> u64 {
        self.input_tokens
            .saturating_add(self.output_tokens)
            .saturating_add(self.cached_input_tokens)
            .saturating_add(self.cache_creation_tokens)
    }

    /// Whether every counter is zero
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl Add for TokenCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            input_tokens: self.input_tokens.saturating_add(other.input_tokens),
            output_tokens: self.output_tokens.saturating_add(other.output_tokens),
            cached_input_tokens: self.cached_input_tokens.saturating_add(other.cached_input_tokens),
            cache_creation_tokens: self
                .cache_creation_tokens
                .saturating_add(other.cache_creation_tokens),
        }
    }
}

impl AddAssign for TokenCounts {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Deserialize a token counter, mapping anything but a non-negative integer to zero
///
/// Use together with `#[serde(default)]` so that absent fields are zero too.
/// `null` is zero silently; strings, floats and negative numbers are zero
/// with a warning, so one bad field never loses the whole report.
pub fn deserialize_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(0);
    }
    Ok(value.as_u64().unwrap_or_else(|| {
        warn!("Malformed token counter {value}, counting it as 0");
        0
    }))
}

/// Deserialize an optional field, mapping a value of the wrong shape to `None`
pub fn deserialize_lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value.clone())
        .inspect_err(|e| warn!("Ignoring malformed field {value}: {e}"))
        .ok())
}

/// One usage record returned by the usage-report endpoint
///
/// Deserializes from the flat record shape
/// `{model, input_tokens, output_tokens, cached_input_tokens, cache_creation_input_tokens}`.
/// Missing or `null` counters are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageBucket {
    /// Model identifier, absent when the report is not grouped by model
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub model: Option<String>,
    /// Input tokens
    #[serde(default, deserialize_with = "deserialize_count")]
    pub input_tokens: u64,
    /// Output tokens
    #[serde(default, deserialize_with = "deserialize_count")]
    pub output_tokens: u64,
    /// Cached input tokens
    #[serde(
        default,
        alias = "cache_read_input_tokens",
        deserialize_with = "deserialize_count"
    )]
    pub cached_input_tokens: u64,
    /// Cache creation tokens
    #[serde(
        default,
        rename = "cache_creation_input_tokens",
        deserialize_with = "deserialize_count"
    )]
    pub cache_creation_tokens: u64,
}

impl UsageBucket {
    /// Create a bucket for a model with the given counters
    pub fn new(model: Option<&str>, tokens: TokenCounts) -> Self {
        Self {
            model: model.map(str::to_string),
            input_tokens: tokens.input_tokens,
            output_tokens: tokens.output_tokens,
            cached_input_tokens: tokens.cached_input_tokens,
            cache_creation_tokens: tokens.cache_creation_tokens,
        }
    }

    /// The bucket's model, or `unknown` when it has none
    pub fn model_name(&self) -> ModelName {
        match self.model.as_deref() {
            Some(name) if !name.is_empty() => ModelName::new(name),
            _ => ModelName::unknown(),
        }
    }

    /// The bucket's counters
    pub fn tokens(&self) -> TokenCounts {
        TokenCounts::new(
            self.input_tokens,
            self.output_tokens,
            self.cached_input_tokens,
            self.cache_creation_tokens,
        )
    }
}

/// Dimension the usage-report endpoint can group buckets by
///
/// # Examples
/// ```
/// use apiusage_core::types::GroupBy;
/// use std::str::FromStr;
///
/// assert_eq!(GroupBy::from_str("api-key-id").unwrap(), GroupBy::ApiKeyId);
/// assert_eq!(GroupBy::ApiKeyId.as_api_str(), "api_key_id");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// Group by model
    #[default]
    Model,
    /// Group by API key
    ApiKeyId,
    /// Group by workspace
    WorkspaceId,
    /// Group by service tier
    ServiceTier,
    /// Group by context window
    ContextWindow,
}

impl GroupBy {
    /// Value sent in the `group_by[]` query parameter
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::ApiKeyId => "api_key_id",
            Self::WorkspaceId => "workspace_id",
            Self::ServiceTier => "service_tier",
            Self::ContextWindow => "context_window",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

impl std::str::FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "model" => Ok(Self::Model),
            "api_key_id" => Ok(Self::ApiKeyId),
            "workspace_id" => Ok(Self::WorkspaceId),
            "service_tier" => Ok(Self::ServiceTier),
            "context_window" => Ok(Self::ContextWindow),
            _ => Err(format!("Invalid grouping dimension: {s}")),
        }
    }
}

/// The window a report covers, at day granularity
///
/// `start` is `days` days before `end`; both ends are inclusive.
///
/// # Examples
/// ```
/// use apiusage_core::types::ReportPeriod;
/// use chrono::NaiveDate;
///
/// let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
/// let period = ReportPeriod::ending_on(end, 30).unwrap();
/// assert_eq!(period.starting_at(), "2025-01-01T00:00:00Z");
/// assert_eq!(period.ending_at(), "2025-01-31T23:59:59Z");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    /// First day of the window
    pub start: NaiveDate,
    /// Last day of the window
    pub end: NaiveDate,
    /// Lookback length in days
    pub days: u32,
}

impl ReportPeriod {
    /// Window of `days` days ending on `end`
    pub fn ending_on(end: NaiveDate, days: u32) -> Result<Self> {
        let start = end
            .checked_sub_days(Days::new(u64::from(days)))
            .ok_or_else(|| {
                ApiUsageError::InvalidArgument(format!("{days} days before {end} is out of range"))
            })?;
        Ok(Self { start, end, days })
    }

    /// Window of `days` days ending today (UTC)
    pub fn last_days(days: u32) -> Result<Self> {
        Self::ending_on(Utc::now().date_naive(), days)
    }

    /// `starting_at` query value: midnight UTC of the first day
    pub fn starting_at(&self) -> String {
        self.start.format("%Y-%m-%dT00:00:00Z").to_string()
    }

    /// `ending_at` query value: last second of the final day, UTC
    pub fn ending_at(&self) -> String {
        self.end.format("%Y-%m-%dT23:59:59Z").to_string()
    }
}
