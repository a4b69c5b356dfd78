//! User-facing failure and setup messages

use apiusage_core::error::FetchError;

/// Where admin keys are created
pub const ADMIN_KEYS_URL: &str = "https://console.anthropic.com/settings/admin-keys";

/// Text shown when the usage report could not be fetched
///
/// # Examples
///
/// ```
/// use apiusage_core::error::FetchError;
/// use apiusage_terminal::messages::format_fetch_failure;
///
/// let error = FetchError::Status { status: 403, body: "forbidden".to_string() };
/// let text = format_fetch_failure(&error);
/// assert!(text.starts_with("Error 403: forbidden"));
/// assert!(text.contains("Troubleshooting:"));
/// ```
pub fn format_fetch_failure(error: &FetchError) -> String {
    format!(
        "{error}\n\
         Failed to fetch usage data.\n\
         \n\
         Troubleshooting:\n\
         1. Make sure you're using an ADMIN API key (sk-ant-admin-...)\n\
         2. Check if your key has the right permissions\n\
         3. Get admin key from: {ADMIN_KEYS_URL}\n"
    )
}

/// Text shown when no admin key is configured
pub fn format_missing_key_help(env_var: &str) -> String {
    format!(
        "⚠️  No Admin API key configured!\n\
         \n\
         To get an Admin API key:\n\
         1. Go to https://console.anthropic.com\n\
         2. Navigate to Settings → Admin Keys\n\
         3. Create a new Admin API key\n\
         4. Export it as {env_var} (or pass --api-key)\n"
    )
}
