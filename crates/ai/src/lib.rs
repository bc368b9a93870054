//! `insights-ai`
//!
//! **Responsibility:** everything that faces the external model API.
//!
//! This crate owns:
//! - the chat-completion client port and its reqwest implementation,
//! - the fixed prompts sent with each step,
//! - the response normalizer (untrusted JSON -> [`insights_core::Insights`]),
//! - the analysis engine sequencing reply generation and structured analysis.
//!
//! It does not touch storage or HTTP routing; those live in `insights-infra`
//! and `insights-api`.

pub mod client;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod prompt;

pub use client::{ChatCompletion, GrokClient, WireMessage};
pub use engine::{AnalysisEngine, AnalysisOutcome};
pub use error::AnalysisError;
pub use normalize::normalize_insights;
