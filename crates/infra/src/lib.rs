//! `insights-infra` — infrastructure adapters.
//!
//! Currently this is just the in-memory lifecycle store. The store trait is
//! the seam a durable implementation would slot into; today's contents are
//! intentionally lost on shutdown.

pub mod store;

pub use store::{AnalysisStore, InMemoryAnalysisStore, StoreError};
