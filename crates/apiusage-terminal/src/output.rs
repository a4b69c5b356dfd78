//! Output formatting module for apiusage
//!
//! This module provides formatters for displaying a usage report:
//! - Text format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! # Examples
//!
//! ```
//! use apiusage_core::report::UsageReport;
//! use apiusage_core::types::ReportPeriod;
//! use apiusage_terminal::get_formatter;
//! use chrono::NaiveDate;
//!
//! let period = ReportPeriod::ending_on(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(), 30).unwrap();
//! let report = UsageReport::empty(period);
//!
//! let text = get_formatter(false, false).format_report(&report);
//! assert!(text.contains("TOTALS"));
//!
//! let json = get_formatter(true, false).format_report(&report);
//! assert!(json.contains("\"totals\""));
//! ```

use crate::format::{format_tokens, round_cents};
use apiusage_core::report::{ModelReport, UsageReport};
use apiusage_core::types::TokenCounts;
use colored::Colorize;
use serde_json::json;
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

/// Trait for report formatters
pub trait ReportFormatter {
    /// Render a complete report
    fn format_report(&self, report: &UsageReport) -> String;
}

/// Text formatter for human-readable output
///
/// Sections are separated by 60-column rules; token counts use K/M
/// suffixes and costs are rounded to cents.
pub struct TextFormatter {
    /// Whether to emit ANSI colors
    pub colored: bool,
}

impl TextFormatter {
    /// Create a new TextFormatter
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn heading(&self, text: &str) -> String {
        if self.colored {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn money(&self, text: String) -> String {
        if self.colored {
            text.green().to_string()
        } else {
            text
        }
    }

    fn write_header(&self, out: &mut String, report: &UsageReport) {
        let double = "=".repeat(RULE_WIDTH);
        let _ = writeln!(out, "{double}");
        let _ = writeln!(out, "{}", self.heading("           CLAUDE API USAGE REPORT"));
        let _ = writeln!(out, "{double}");
        let _ = writeln!(
            out,
            "Period: {} to {}",
            report.period.start.format("%Y-%m-%d"),
            report.period.end.format("%Y-%m-%d")
        );
        let _ = writeln!(out, "Days: {}", report.period.days);
        let _ = writeln!(out, "{double}");
    }

    fn write_model(&self, out: &mut String, model: &ModelReport) {
        let tokens = &model.tokens;
        let _ = writeln!(out);
        let _ = writeln!(out, "🤖 {}", self.heading(model.model.as_str()));
        let _ = writeln!(out, "   Input tokens:    {:>12}", format_tokens(tokens.input_tokens));
        let _ = writeln!(out, "   Output tokens:   {:>12}", format_tokens(tokens.output_tokens));
        if tokens.cached_input_tokens > 0 {
            let _ = writeln!(
                out,
                "   Cached input:    {:>12}",
                format_tokens(tokens.cached_input_tokens)
            );
        }
        if tokens.cache_creation_tokens > 0 {
            let _ = writeln!(
                out,
                "   Cache creation:  {:>12}",
                format_tokens(tokens.cache_creation_tokens)
            );
        }
        let cost = self.money(format!("${:>11.2}", round_cents(model.cost)));
        let _ = writeln!(out, "   Est. cost:       {cost}");
    }

    fn write_totals(&self, out: &mut String, tokens: &TokenCounts, cost: f64) {
        let double = "=".repeat(RULE_WIDTH);
        let _ = writeln!(out);
        let _ = writeln!(out, "{double}");
        let _ = writeln!(out, "📈 {}", self.heading("TOTALS"));
        let _ = writeln!(out, "{double}");
        let _ = writeln!(
            out,
            "   Total input tokens:   {:>12}",
            format_tokens(tokens.input_tokens)
        );
        let _ = writeln!(
            out,
            "   Total output tokens:  {:>12}",
            format_tokens(tokens.output_tokens)
        );
        if tokens.cached_input_tokens > 0 {
            let _ = writeln!(
                out,
                "   Total cached:         {:>12}",
                format_tokens(tokens.cached_input_tokens)
            );
        }
        if tokens.cache_creation_tokens > 0 {
            let _ = writeln!(
                out,
                "   Total cache creation: {:>12}",
                format_tokens(tokens.cache_creation_tokens)
            );
        }
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        let total = self.money(format!("${:>10.2}", round_cents(cost)));
        let _ = writeln!(out, "   💰 ESTIMATED TOTAL COST:  {total}");
        let _ = writeln!(out, "{double}");
    }
}

impl ReportFormatter for TextFormatter {
    fn format_report(&self, report: &UsageReport) -> String {
        let mut out = String::new();
        self.write_header(&mut out, report);

        let _ = writeln!(out);
        let _ = writeln!(out, "📊 {}", self.heading("USAGE BY MODEL"));
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        if report.models.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "   No usage recorded in this period.");
        }
        for model in &report.models {
            self.write_model(&mut out, model);
        }

        self.write_totals(&mut out, &report.totals.tokens, report.totals.cost);

        let _ = writeln!(out);
        let _ = writeln!(out, "⚠️  Note: Costs are estimates based on standard pricing.");
        let _ = writeln!(out, "   Actual billing may differ (caching discounts, etc.)");
        let _ = writeln!(out, "   Check console.anthropic.com for official billing.");
        out
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

fn tokens_json(tokens: &TokenCounts) -> serde_json::Value {
    json!({
        "input_tokens": tokens.input_tokens,
        "output_tokens": tokens.output_tokens,
        "cached_input_tokens": tokens.cached_input_tokens,
        "cache_creation_tokens": tokens.cache_creation_tokens,
        "total": tokens.total(),
    })
}

impl ReportFormatter for JsonFormatter {
    fn format_report(&self, report: &UsageReport) -> String {
        let output = json!({
            "period": {
                "start": report.period.start.format("%Y-%m-%d").to_string(),
                "end": report.period.end.format("%Y-%m-%d").to_string(),
                "days": report.period.days,
            },
            "models": report.models.iter().map(|m| json!({
                "model": m.model.as_str(),
                "tokens": tokens_json(&m.tokens),
                "cost": m.cost,
            })).collect::<Vec<_>>(),
            "totals": {
                "tokens": tokens_json(&report.totals.tokens),
                "cost": report.totals.cost,
            },
        });

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| output.to_string())
    }
}

/// Get the appropriate formatter based on output format preference
pub fn get_formatter(json: bool, colored: bool) -> Box<dyn ReportFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TextFormatter::new(colored))
    }
}
