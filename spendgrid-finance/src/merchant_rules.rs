//! Ordered merchant keyword rules.
//!
//! A description belongs to the first rule (in table order) that has a
//! keyword contained in it, compared case-insensitively. Later rules never
//! see a description an earlier rule matched.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantRule {
    pub label: String,
    pub keywords: Vec<String>,
}

impl MerchantRule {
    pub fn new<I, S>(label: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// `upper_description` must already be uppercased
    fn matches(&self, upper_description: &str) -> bool {
        self.keywords.iter().any(|k| {
            let k = k.trim();
            !k.is_empty() && upper_description.contains(&k.to_uppercase())
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerchantRules {
    rules: Vec<MerchantRule>,
}

impl Default for MerchantRules {
    fn default() -> Self {
        Self::new(vec![
            MerchantRule::new("Swiggy", ["SWIGGY"]),
            MerchantRule::new("Zomato", ["ZOMATO"]),
            MerchantRule::new("Blinkit", ["BLINKIT"]),
        ])
    }
}

impl MerchantRules {
    pub fn new(rules: Vec<MerchantRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[MerchantRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Merchant labels in priority order
    pub fn labels(&self) -> Vec<String> {
        self.rules.iter().map(|r| r.label.clone()).collect()
    }

    /// Every keyword of every rule
    pub fn keywords(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules
            .iter()
            .flat_map(|r| r.keywords.iter().map(String::as_str))
    }

    /// Position of the first rule matching `description`
    pub fn match_index(&self, description: &str) -> Option<usize> {
        let upper = description.to_uppercase();
        self.rules.iter().position(|r| r.matches(&upper))
    }

    /// Label of the first rule matching `description`
    pub fn categorize(&self, description: &str) -> Option<&str> {
        self.match_index(description)
            .map(|i| self.rules[i].label.as_str())
    }
}
