//! Static pricing table with ordered substring rules
//!
//! Prices are a reviewable artifact: the default table is embedded from
//! `embedded/pricing.json` and can be replaced by a file of the same shape.
//! A model matches every rule whose pattern occurs in its lower-cased
//! identifier; the longest pattern wins, and among equally long patterns the
//! one listed first. Models matching nothing use the fallback tier.

use apiusage_core::error::{ApiUsageError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Embedded pricing data
const EMBEDDED_PRICING: &str = include_str!("../embedded/pricing.json");

/// Price pair applied per million tokens, in USD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    /// USD per million input tokens
    pub input_per_million: f64,
    /// USD per million output tokens
    pub output_per_million: f64,
}

impl PricingTier {
    pub fn new(input_per_million: f64, output_per_million: f64) -> Self {
        Self {
            input_per_million,
            output_per_million,
        }
    }
}

/// A model-name pattern and the tier it selects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRule {
    /// Substring looked up in the lower-cased model identifier
    pub pattern: String,
    #[serde(flatten)]
    pub tier: PricingTier,
}

impl PricingRule {
    pub fn new(pattern: impl Into<String>, tier: PricingTier) -> Self {
        Self {
            pattern: pattern.into(),
            tier,
        }
    }
}

/// On-disk shape of a pricing table
#[derive(Debug, Deserialize)]
struct PricingFile {
    /// Pattern of the rule used when nothing matches
    fallback: String,
    rules: Vec<PricingRule>,
}

/// Ordered pricing rules plus a fallback tier
#[derive(Debug, Clone, PartialEq)]
pub struct PricingTable {
    rules: Vec<PricingRule>,
    fallback: PricingRule,
}

impl PricingTable {
    /// Build a table from ordered rules
    ///
    /// `fallback` must be the pattern of one of the rules. Patterns are
    /// lower-cased; prices must be finite and non-negative.
    pub fn new(rules: Vec<PricingRule>, fallback: &str) -> Result<Self> {
        let mut normalized = Vec::with_capacity(rules.len());
        for rule in rules {
            let pattern = rule.pattern.trim().to_lowercase();
            if pattern.is_empty() {
                return Err(ApiUsageError::Pricing(
                    "rule with an empty pattern".to_string(),
                ));
            }
            for price in [rule.tier.input_per_million, rule.tier.output_per_million] {
                if !price.is_finite() || price < 0.0 {
                    return Err(ApiUsageError::Pricing(format!(
                        "rule '{pattern}' has an invalid price: {price}"
                    )));
                }
            }
            normalized.push(PricingRule::new(pattern, rule.tier));
        }

        let fallback = fallback.trim().to_lowercase();
        let fallback = normalized
            .iter()
            .find(|rule| rule.pattern == fallback)
            .cloned()
            .ok_or_else(|| {
                ApiUsageError::Pricing(format!("fallback '{fallback}' is not one of the rules"))
            })?;

        Ok(Self {
            rules: normalized,
            fallback,
        })
    }

    /// Parse a table from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: PricingFile = serde_json::from_str(json)?;
        Self::new(file.rules, &file.fallback)
    }

    /// The table shipped with the binary
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_PRICING)
    }

    /// Read a table from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The table from `path` when given, the embedded one otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                info!("Loading pricing table from {}", path.display());
                Self::from_path(path)
            }
            None => {
                debug!("Using embedded pricing table");
                Self::embedded()
            }
        }
    }

    /// Rules in declaration order
    pub fn rules(&self) -> &[PricingRule] {
        &self.rules
    }

    /// Rule applied when no pattern matches
    pub fn fallback(&self) -> &PricingRule {
        &self.fallback
    }

    /// Most specific rule matching `model`, if any
    ///
    /// # Examples
    /// ```
    /// use apiusage_pricing::PricingTable;
    ///
    /// let table = PricingTable::embedded().unwrap();
    /// let rule = table.find_rule("claude-sonnet-4-5-20250929").unwrap();
    /// assert_eq!(rule.pattern, "claude-sonnet-4-5");
    /// ```
    pub fn find_rule(&self, model: &str) -> Option<&PricingRule> {
        let model = model.to_lowercase();
        let mut best: Option<&PricingRule> = None;
        for rule in &self.rules {
            if model.contains(&rule.pattern)
                && best.is_none_or(|b| rule.pattern.len() > b.pattern.len())
            {
                best = Some(rule);
            }
        }
        best
    }

    /// Rule used to price `model`, falling back when nothing matches
    pub fn rule_for(&self, model: &str) -> &PricingRule {
        match self.find_rule(model) {
            Some(rule) => {
                debug!("Pricing {} with tier {}", model, rule.pattern);
                rule
            }
            None => {
                debug!(
                    "No pricing rule matches {}, using fallback {}",
                    model, self.fallback.pattern
                );
                &self.fallback
            }
        }
    }

    /// Tier used to price `model`
    pub fn tier_for(&self, model: &str) -> &PricingTier {
        &self.rule_for(model).tier
    }
}
