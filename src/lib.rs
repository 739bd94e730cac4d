//! # Codeline - Terminal Code Editor with Live Analysis
//!
//! A small editor that asks a remote analysis service to explain the code
//! after each pause in typing, and runs it on demand.
//!
//! ```text
//! ┌─────────────┐   keys    ┌──────────────┐  CommandEvents  ┌───────────────┐
//! │ EventStream │──────────▶│  Commands    │────────────────▶│ AppController │
//! └─────────────┘           └──────────────┘                 └───────┬───────┘
//!                                                                    │
//!        ┌───────────────────────────────────────────────────────────┘
//!        ▼
//! ┌───────────────┐  snapshot  ┌────────────┐  spawn  ┌────────────────┐
//! │ EditorSession │───────────▶│ Debouncer  │────────▶│ Orchestrator   │──▶ AnalysisClient
//! └───────────────┘            └────────────┘         └────────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod repl;

pub use repl::*;
