//! Anthropic Admin usage-report client
//!
//! Issues exactly one GET per [`UsageFetcher::fetch`] call with daily buckets
//! and returns the parsed records. There is no retry and no caching; a
//! non-success status is returned to the caller as [`FetchError::Status`].

use crate::models::UsageReportResponse;
use apiusage_core::config::{ApiKey, ReportConfig};
use apiusage_core::error::{ApiUsageError, FetchError, Result};
use apiusage_core::types::{GroupBy, ReportPeriod, UsageBucket};
use reqwest::{Client, Url};
use tracing::{debug, info, warn};

/// Usage-report endpoint, relative to the API origin
pub const USAGE_REPORT_PATH: &str = "/v1/organizations/usage_report/messages";

/// Value of the `anthropic-version` header
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Bucket width requested from the endpoint
pub const BUCKET_WIDTH: &str = "1d";

/// Fetches usage buckets from the Admin API
#[derive(Debug, Clone)]
pub struct UsageFetcher {
    client: Client,
    api_key: ApiKey,
    endpoint: Url,
}

impl UsageFetcher {
    /// Create a fetcher from the run configuration
    ///
    /// The HTTP client carries the configured request timeout.
    pub fn new(config: &ReportConfig) -> Result<Self> {
        let endpoint = Url::parse(&format!("{}{}", config.base_url, USAGE_REPORT_PATH))
            .map_err(|e| {
                ApiUsageError::Config(format!("invalid base URL '{}': {e}", config.base_url))
            })?;

        let client = Client::builder()
            .user_agent(concat!("apiusage/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiUsageError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            endpoint,
        })
    }

    /// Full request URL for a window and grouping
    pub fn request_url(&self, period: &ReportPeriod, group_by: &[GroupBy]) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("starting_at", &period.starting_at())
                .append_pair("ending_at", &period.ending_at())
                .append_pair("bucket_width", BUCKET_WIDTH);
            for dimension in group_by {
                query.append_pair("group_by[]", dimension.as_api_str());
            }
        }
        url
    }

    /// Fetch the usage buckets for `period`
    ///
    /// # Errors
    ///
    /// - [`FetchError::Status`] when the endpoint answers with a non-2xx status
    /// - [`FetchError::Transport`] when no response arrives (including timeout)
    /// - [`FetchError::Decode`] when a 2xx body is not a usage report
    pub async fn fetch(
        &self,
        period: &ReportPeriod,
        group_by: &[GroupBy],
    ) -> std::result::Result<Vec<UsageBucket>, FetchError> {
        let url = self.request_url(period, group_by);
        debug!(url = %url, "Requesting usage report");

        let response = self
            .client
            .get(url)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("x-api-key", self.api_key.expose())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let report: UsageReportResponse = serde_json::from_str(&body)?;
        if report.has_more == Some(true) {
            warn!("Usage report has more pages; only the first page is included");
        }

        let buckets = report.into_buckets();
        info!("Fetched {} usage records", buckets.len());
        Ok(buckets)
    }
}
