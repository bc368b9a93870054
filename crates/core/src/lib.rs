//! `insights-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** types (no infrastructure concerns):
//! identifiers, the conversation message shape, the normalized [`Insights`]
//! value, and the [`AnalysisRecord`] lifecycle entity.

pub mod error;
pub mod id;
pub mod insights;
pub mod message;
pub mod record;

pub use error::{DomainError, DomainResult};
pub use id::AnalysisId;
pub use insights::{
    ActionItem, Insights, RiskFlag, RiskKind, RiskSeverity, Sentiment, SentimentLabel, Topic,
};
pub use message::{ConversationMessage, Role};
pub use record::{AnalysisRecord, AnalysisStatus, CompletionUpdate};
