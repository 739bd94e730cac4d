//! # Services Layer
//!
//! Stateful services the editor session is composed of:
//!
//! - [`debounce::Debouncer`] coalesces buffer changes into one deferred trigger
//! - [`orchestrator::RequestOrchestrator`] runs analysis requests and merges results
//! - [`analysis::AnalysisClient`] is the seam to the remote analysis service

pub mod analysis;
pub mod debounce;
pub mod orchestrator;

pub use analysis::{AnalysisClient, AnalysisError, HttpAnalysisClient};
pub use debounce::{ChangeOutcome, Debouncer, DEFAULT_QUIESCENCE};
pub use orchestrator::{Completion, RequestOrchestrator};
