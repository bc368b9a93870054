//! Failure taxonomy for the analysis flow.

use thiserror::Error;

/// Why an analysis request failed.
///
/// Every variant is a single-attempt, synchronously surfaced failure: there
/// is no retry anywhere in this flow, and a failure leaves the lifecycle
/// record pending.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Configuration error: checked before any network I/O.
    #[error("GROK_API_KEY environment variable is not set")]
    MissingApiKey,

    /// Network-level failure (connect, timeout, TLS).
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The model API answered with a non-success status.
    #[error("upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The model API answered 2xx but the payload was not usable
    /// (non-JSON body, empty choices, non-JSON analysis content).
    #[error("upstream payload malformed: {0}")]
    UpstreamPayload(String),
}

impl AnalysisError {
    /// True for failures of our own configuration rather than the upstream.
    pub fn is_configuration(&self) -> bool {
        matches!(self, AnalysisError::MissingApiKey)
    }
}
