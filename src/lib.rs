//! # AutoFlow
//!
//! Turns a recorded screen workflow into executable automation scripts.
//!
//! ## Overview
//!
//! While the user performs a repetitive task, a sampler extracts one still
//! frame from the live video source every two seconds, JPEG-encodes it, and
//! appends it to a bounded sequence. When recording stops the frames are sent,
//! in capture order, as one multimodal inference request; the structured
//! response is validated into a list of [`WorkflowSuggestion`]s ready for
//! display.
//!
//! ## Quick Start
//!
//! ```no_run
//! use autoflow::analyzer::WorkflowAnalyzer;
//! use autoflow::capture::ImageDirSource;
//! use autoflow::session::{drive_session, CaptureSession};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> autoflow::Result<()> {
//! let mut session = CaptureSession::new();
//! let provider = ImageDirSource::provider("./screenshots");
//! let analyzer = WorkflowAnalyzer::new();
//!
//! drive_session(&mut session, &provider, &analyzer, CancellationToken::new()).await?;
//!
//! for suggestion in session.suggestions() {
//!     println!("{}: {}", suggestion.id, suggestion.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`capture`]: video source seam, frame sampling, and JPEG encoding
//! - [`session`]: capture lifecycle state machine and the async driver
//! - [`analyzer`]: multimodal prompt construction and strict response validation
//! - [`app`]: CLI, configuration, and result rendering
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │ FrameSource │───▶│   Sampler   │───▶│  FrameSeq   │───▶│  Analyzer   │
//! │ (2s ticks)  │    │ (JPEG 0.6)  │    │ (≤20 frames)│    │ (one call)  │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!                                                                 │
//!                                                                 ▼
//!                                                          ┌─────────────┐
//!                                                          │ Suggestions │
//!                                                          └─────────────┘
//! ```

pub mod analyzer;
pub mod app;
pub mod capture;
pub mod session;

// Re-export commonly used types
pub use analyzer::{AutomationType, Complexity, WorkflowAnalyzer, WorkflowSuggestion};
pub use capture::{Frame, FrameSampler, FrameSequence, FrameSource, ImageDirSource};
pub use session::{CaptureSession, SessionState};

/// Result type alias for autoflow
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for autoflow
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Session state error: {0}")]
    Session(String),

    #[error("Source acquisition error: {0}")]
    Acquisition(String),

    #[error("Frame capture error: {0}")]
    Capture(String),

    #[error("Image encoding error: {0}")]
    Encoding(String),

    #[error("API key is missing: set the {0} environment variable")]
    MissingApiKey(&'static str),

    #[error("Inference request failed: {0}")]
    Transport(String),

    #[error("Inference response invalid: {0}")]
    Response(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
