use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

use insights_core::{AnalysisRecord, ConversationMessage};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInsightsRequest {
    pub conversation_id: Option<String>,
    pub messages: Vec<ConversationMessage>,
    pub metadata: Option<JsonMap<String, JsonValue>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListInsightsQuery {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    pub status: Option<String>,
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    20
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListInsightsResponse {
    pub items: Vec<AnalysisRecord>,
    pub page: usize,
    pub page_size: usize,
    /// Count after status filtering, before pagination.
    pub total: usize,
}

// -------------------------
// Validation helpers
// -------------------------

pub fn validate_messages(messages: &[ConversationMessage]) -> Result<(), String> {
    if messages.is_empty() {
        return Err("messages must contain at least one entry".to_string());
    }
    if messages.iter().any(|m| m.content.is_empty()) {
        return Err("message content must be non-empty".to_string());
    }
    Ok(())
}
