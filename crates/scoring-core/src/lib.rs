#![deny(unsafe_code)]

//! Orchestration of the two pipeline stages.
//!
//! Stage one ([`ScoringPipeline::detect`]) ranks candidate country and
//! indicator columns. Stage two ([`ScoringPipeline::process`]) resolves each
//! row's country, normalizes the configured indicator columns and emits one
//! [`ScoreRecord`](scoring_model::ScoreRecord) per African row and indicator.
//! Neither stage keeps state between calls.

pub mod pipeline;
pub mod summary;

pub use pipeline::{ProcessOutput, ScoringPipeline, round_score};
pub use summary::ProcessSummary;
