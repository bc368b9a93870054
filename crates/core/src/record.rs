//! Analysis lifecycle record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::id::AnalysisId;
use crate::insights::Insights;

/// Lifecycle status of one analysis request.
///
/// `Processing` and `Failed` are reserved: the current flow only ever moves
/// `Pending` -> `Completed`, and an upstream failure leaves the record
/// `Pending` (the error surfaces to the caller instead).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl AnalysisStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisStatus::Completed | AnalysisStatus::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Pending => "pending",
            AnalysisStatus::Processing => "processing",
            AnalysisStatus::Completed => "completed",
            AnalysisStatus::Failed => "failed",
        }
    }

    /// Strict parse of the wire value. `None` for anything unrecognized.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(AnalysisStatus::Pending),
            "processing" => Some(AnalysisStatus::Processing),
            "completed" => Some(AnalysisStatus::Completed),
            "failed" => Some(AnalysisStatus::Failed),
            _ => None,
        }
    }
}

/// Fields applied on the single pending -> terminal transition.
#[derive(Debug, Clone)]
pub struct CompletionUpdate {
    pub status: AnalysisStatus,
    pub insights: Option<Insights>,
    pub metadata: Option<JsonMap<String, JsonValue>>,
    pub latency_ms: Option<u64>,
    pub error: Option<String>,
    pub assistant_message: Option<String>,
}

/// One analysis request, from submission to completion.
///
/// Immutable after creation except for the one terminal transition applied
/// via [`AnalysisRecord::with_completion`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: AnalysisId,
    pub conversation_id: String,
    pub status: AnalysisStatus,
    pub insights: Option<Insights>,
    pub metadata: Option<JsonMap<String, JsonValue>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub latency_ms: Option<u64>,
    pub error: Option<String>,
    pub assistant_message: Option<String>,
}

impl AnalysisRecord {
    /// Freshly created record: status pending, all optional fields empty.
    pub fn pending(conversation_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: AnalysisId::new(),
            conversation_id: conversation_id.into(),
            status: AnalysisStatus::Pending,
            insights: None,
            metadata: None,
            created_at: now,
            updated_at: now,
            latency_ms: None,
            error: None,
            assistant_message: None,
        }
    }

    /// Produce the terminal version of this record. `updated_at` is
    /// refreshed; `id`, `conversation_id` and `created_at` are preserved.
    pub fn with_completion(self, update: CompletionUpdate, now: DateTime<Utc>) -> Self {
        Self {
            status: update.status,
            insights: update.insights,
            metadata: update.metadata,
            updated_at: now,
            latency_ms: update.latency_ms,
            error: update.error,
            assistant_message: update.assistant_message,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::Sentiment;

    fn completed_update() -> CompletionUpdate {
        CompletionUpdate {
            status: AnalysisStatus::Completed,
            insights: Some(Insights {
                summary: "short call".to_string(),
                sentiment: Sentiment::default(),
                topics: vec![],
                action_items: vec![],
                risk_flags: vec![],
            }),
            metadata: None,
            latency_ms: Some(42),
            error: None,
            assistant_message: Some("Thanks for reaching out!".to_string()),
        }
    }

    #[test]
    fn pending_record_has_empty_optionals() {
        let now = Utc::now();
        let record = AnalysisRecord::pending("c1", now);
        assert_eq!(record.status, AnalysisStatus::Pending);
        assert_eq!(record.created_at, record.updated_at);
        assert!(record.insights.is_none());
        assert!(record.latency_ms.is_none());
        assert!(record.error.is_none());
    }

    #[test]
    fn completion_preserves_identity_and_refreshes_updated_at() {
        let created = Utc::now();
        let record = AnalysisRecord::pending("c1", created);
        let id = record.id;

        let later = created + chrono::Duration::milliseconds(5);
        let done = record.with_completion(completed_update(), later);

        assert_eq!(done.id, id);
        assert_eq!(done.conversation_id, "c1");
        assert_eq!(done.created_at, created);
        assert_eq!(done.updated_at, later);
        assert!(done.updated_at >= done.created_at);
        assert_eq!(done.status, AnalysisStatus::Completed);
        assert!(done.insights.is_some());
        assert_eq!(done.latency_ms, Some(42));
    }

    #[test]
    fn record_serializes_camel_case_with_z_timestamps() {
        let record = AnalysisRecord::pending("c1", Utc::now());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("conversationId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json["createdAt"].as_str().unwrap().ends_with('Z'));
        assert_eq!(json["status"], "pending");
        assert!(json["insights"].is_null());
    }

    #[test]
    fn reserved_statuses_parse_but_are_terminal_only_when_expected() {
        assert_eq!(AnalysisStatus::parse("processing"), Some(AnalysisStatus::Processing));
        assert_eq!(AnalysisStatus::parse("bogus"), None);
        assert!(AnalysisStatus::Completed.is_terminal());
        assert!(AnalysisStatus::Failed.is_terminal());
        assert!(!AnalysisStatus::Processing.is_terminal());
    }
}
