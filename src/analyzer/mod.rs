//! Workflow Analyzer Module
//!
//! One-shot request/response adapter between a finished frame sequence and
//! the multimodal inference service. The frames are submitted in capture
//! order as independent base64 JPEG inputs, the output schema is imposed on
//! the service up front, and the response is strictly validated into
//! [`WorkflowSuggestion`]s. No retries and no partial results.

pub mod client;
pub mod prompt;
pub mod suggestion;

pub use client::WorkflowAnalyzer;
pub use suggestion::{assign_ids, AutomationType, Complexity, WorkflowSuggestion};

use crate::capture::types::FrameSequence;
use std::future::Future;

/// Transform a frame sequence into suggestions via one inference call (the
/// second of the two suspension points in the capture flow).
pub trait AnalyzeFrames {
    /// Analyze the frames. Called at most once per completed recording, with
    /// a non-empty sequence. Every failure mode surfaces as a single error
    /// with a human-readable message.
    fn analyze(
        &self,
        frames: &FrameSequence,
    ) -> impl Future<Output = crate::Result<Vec<WorkflowSuggestion>>> + Send;
}
