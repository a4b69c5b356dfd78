//! Common test utilities and helpers for apiusage tests
//!
//! Usage-report body builders, a pinned report period, and an environment
//! guard for tests that touch process environment variables.

use apiusage::{
    config::{ApiKey, ReportConfig},
    types::ReportPeriod,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde_json::{Value, json};
use std::env;

// Global mutex to serialize environment variable modifications in tests
#[allow(dead_code)]
pub static ENV_MUTEX: Lazy<tokio::sync::Mutex<()>> = Lazy::new(|| tokio::sync::Mutex::new(()));

/// Key used by every test; never a real credential
pub const TEST_KEY: &str = "sk-ant-admin-test-key";

/// Fixed 30-day window ending 2025-01-31
#[allow(dead_code)]
pub fn test_period() -> ReportPeriod {
    ReportPeriod::ending_on(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(), 30).unwrap()
}

/// Config pointing at a mock server
#[allow(dead_code)]
pub fn config_for(base_url: &str) -> ReportConfig {
    ReportConfig::new(ApiKey::new(TEST_KEY).unwrap()).with_base_url(base_url)
}

/// Builder for flat `buckets` records
pub struct BucketBuilder {
    model: Option<String>,
    input_tokens: Value,
    output_tokens: Value,
    cached_input_tokens: Value,
    cache_creation_tokens: Value,
}

#[allow(dead_code)]
impl BucketBuilder {
    /// Create a new builder with zero counters
    pub fn new(model: &str) -> Self {
        Self {
            model: Some(model.to_string()),
            input_tokens: json!(0),
            output_tokens: json!(0),
            cached_input_tokens: json!(0),
            cache_creation_tokens: json!(0),
        }
    }

    /// A record with no model field
    pub fn without_model() -> Self {
        let mut builder = Self::new("");
        builder.model = None;
        builder
    }

    pub fn with_tokens(mut self, input: u64, output: u64) -> Self {
        self.input_tokens = json!(input);
        self.output_tokens = json!(output);
        self
    }

    pub fn with_cache(mut self, cached: u64, creation: u64) -> Self {
        self.cached_input_tokens = json!(cached);
        self.cache_creation_tokens = json!(creation);
        self
    }

    /// Send `null` for the output counter
    pub fn with_null_output(mut self) -> Self {
        self.output_tokens = Value::Null;
        self
    }

    pub fn build(self) -> Value {
        let mut record = json!({
            "input_tokens": self.input_tokens,
            "output_tokens": self.output_tokens,
            "cached_input_tokens": self.cached_input_tokens,
            "cache_creation_input_tokens": self.cache_creation_tokens,
        });
        if let Some(model) = self.model {
            record["model"] = json!(model);
        }
        record
    }
}

/// Response body in the flat `buckets` shape
#[allow(dead_code)]
pub fn flat_body(buckets: Vec<Value>) -> Value {
    json!({ "buckets": buckets })
}

/// Response body in the Admin API `data`/`results` shape
#[allow(dead_code)]
pub fn admin_body(days: Vec<(&str, Vec<Value>)>) -> Value {
    let data: Vec<Value> = days
        .into_iter()
        .map(|(day, results)| {
            json!({
                "starting_at": format!("{day}T00:00:00Z"),
                "ending_at": format!("{day}T23:59:59Z"),
                "results": results,
            })
        })
        .collect();
    json!({ "data": data, "has_more": false, "next_page": null })
}

/// One Admin API result row
#[allow(dead_code)]
pub fn admin_result(model: &str, uncached: u64, cache_read: u64, creation: u64, output: u64) -> Value {
    json!({
        "model": model,
        "uncached_input_tokens": uncached,
        "cache_read_input_tokens": cache_read,
        "cache_creation": {
            "ephemeral_1h_input_tokens": 0,
            "ephemeral_5m_input_tokens": creation,
        },
        "output_tokens": output,
        "server_tool_use": { "web_search_requests": 0 },
    })
}

/// Restores environment variables on drop
pub struct EnvVarGuard {
    vars: Vec<(String, Option<String>)>,
}

#[allow(dead_code)]
impl EnvVarGuard {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    /// Set an environment variable and save its original value for restoration
    pub fn set(&mut self, key: &str, value: &str) {
        self.vars.push((key.to_string(), env::var(key).ok()));
        // SAFETY: callers hold ENV_MUTEX
        unsafe {
            env::set_var(key, value);
        }
    }

    /// Remove an environment variable and save its original value for restoration
    pub fn remove(&mut self, key: &str) {
        self.vars.push((key.to_string(), env::var(key).ok()));
        // SAFETY: callers hold ENV_MUTEX
        unsafe {
            env::remove_var(key);
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, original) in self.vars.drain(..).rev() {
            // SAFETY: callers hold ENV_MUTEX
            unsafe {
                match original {
                    Some(value) => env::set_var(&key, value),
                    None => env::remove_var(&key),
                }
            }
        }
    }
}
