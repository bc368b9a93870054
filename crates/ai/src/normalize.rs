//! Response normalization: arbitrary model output -> [`Insights`].
//!
//! The external model is instructed to return strict JSON, but nothing
//! guarantees it does. Every rule here is defensive: this function is total
//! over any `serde_json::Value`, returning a valid `Insights` for empty
//! objects, wrong-typed fields, nested garbage, or non-object roots.

use serde_json::Value as JsonValue;

use insights_core::{
    ActionItem, Insights, RiskFlag, RiskKind, RiskSeverity, Sentiment, SentimentLabel, Topic,
};

/// Max characters of conversation text used for the fallback summary.
const SUMMARY_EXCERPT_CHARS: usize = 200;

/// Summary of last resort, when both the model and the transcript are empty.
const EMPTY_SUMMARY: &str = "No content provided";

/// Map raw model output into a well-typed `Insights` value.
///
/// `fallback` is the joined conversation text (including the generated
/// reply), used when the model provides no usable summary.
pub fn normalize_insights(raw: &JsonValue, fallback: &str) -> Insights {
    Insights {
        summary: normalize_summary(raw.get("summary"), fallback),
        sentiment: Sentiment {
            overall: normalize_sentiment_label(raw.get("sentiment")),
            score: normalize_score(raw.get("sentimentScore")),
        },
        topics: elements(raw.get("topics"))
            .iter()
            .map(|t| Topic {
                label: coerce_string(t),
                // The model is not asked for per-topic confidence.
                confidence: 1.0,
            })
            .collect(),
        action_items: elements(raw.get("actionItems"))
            .iter()
            .map(coerce_string)
            .filter(|d| !d.trim().is_empty())
            .map(|description| ActionItem { description })
            .collect(),
        risk_flags: elements(raw.get("riskFlags"))
            .iter()
            .map(normalize_risk_flag)
            .collect(),
    }
}

fn normalize_sentiment_label(value: Option<&JsonValue>) -> SentimentLabel {
    match value {
        Some(v) => SentimentLabel::parse_lenient(&coerce_string(v)),
        None => SentimentLabel::Neutral,
    }
}

/// Parse a score from a number or numeric string; 0.5 when unparsable or
/// non-finite, always clamped into `[0, 1]`.
fn normalize_score(value: Option<&JsonValue>) -> f64 {
    let parsed = match value {
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    let score = parsed.filter(|f| f.is_finite()).unwrap_or(0.5);
    score.clamp(0.0, 1.0)
}

fn normalize_risk_flag(value: &JsonValue) -> RiskFlag {
    match value {
        JsonValue::Object(obj) => RiskFlag {
            kind: RiskKind::Other,
            severity: obj
                .get("severity")
                .map(|s| RiskSeverity::parse_lenient(&coerce_string(s)))
                .unwrap_or_default(),
            details: obj.get("reason").and_then(|r| match r {
                JsonValue::Null => None,
                JsonValue::String(s) => Some(s.clone()),
                other => Some(coerce_string(other)),
            }),
        },
        // Bare strings (or anything else) become a low-severity flag with
        // the stringified element as details.
        other => RiskFlag {
            kind: RiskKind::Other,
            severity: RiskSeverity::Low,
            details: Some(coerce_string(other)),
        },
    }
}

fn normalize_summary(value: Option<&JsonValue>, fallback: &str) -> String {
    if let Some(v) = value {
        if is_truthy(v) {
            return coerce_string(v);
        }
    }
    let excerpt = excerpt(fallback);
    if excerpt.is_empty() {
        EMPTY_SUMMARY.to_string()
    } else {
        excerpt
    }
}

/// First 200 characters of the transcript, with an ellipsis marker when
/// anything was cut off.
fn excerpt(text: &str) -> String {
    let mut out: String = text.chars().take(SUMMARY_EXCERPT_CHARS).collect();
    if text.chars().count() > SUMMARY_EXCERPT_CHARS {
        out.push_str("...");
    }
    out
}

/// Absent, null, or non-array fields are treated as empty sequences.
fn elements(value: Option<&JsonValue>) -> &[JsonValue] {
    match value {
        Some(JsonValue::Array(items)) => items,
        _ => &[],
    }
}

/// Best-effort string coercion: strings pass through, everything else gets
/// its JSON representation.
fn coerce_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(items) => !items.is_empty(),
        JsonValue::Object(fields) => !fields.is_empty(),
    }
}
