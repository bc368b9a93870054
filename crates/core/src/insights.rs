//! Normalized conversation insights.
//!
//! These are the *post-normalization* value types: whatever the external
//! model returned has already been coerced into this fixed schema by the
//! time one of these values exists. Field casing on the wire is camelCase
//! to match the public API surface.

use serde::{Deserialize, Serialize};

/// Overall conversation tone.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Lenient parse: case-insensitive; anything unrecognized is `Neutral`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            _ => Self::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

/// Sentiment with model confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub overall: SentimentLabel,
    pub score: f64,
}

impl Default for Sentiment {
    fn default() -> Self {
        Self {
            overall: SentimentLabel::Neutral,
            score: 0.5,
        }
    }
}

/// A topic discussed in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub label: String,
    pub confidence: f64,
}

/// An actionable follow-up mentioned in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub description: String,
}

/// Risk severity ladder.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskSeverity {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskSeverity {
    /// Lenient parse: case-insensitive; anything unrecognized is `Low`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Low,
        }
    }
}

/// Risk flag category.
///
/// The normalizer only ever emits `Other`; the remaining variants mirror the
/// public schema and are reserved for richer classification.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskKind {
    Churn,
    Escalation,
    Compliance,
    #[default]
    Other,
}

/// A potential risk or issue surfaced by the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFlag {
    #[serde(rename = "type")]
    pub kind: RiskKind,
    pub severity: RiskSeverity,
    pub details: Option<String>,
}

/// The full normalized analysis result for one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub summary: String,
    pub sentiment: Sentiment,
    pub topics: Vec<Topic>,
    pub action_items: Vec<ActionItem>,
    pub risk_flags: Vec<RiskFlag>,
}
