//! Capture Session Module
//!
//! Owns the recording lifecycle: the [`CaptureSession`] state machine and the
//! async [`drive_session`] driver that runs the sampling timer, converges the
//! three stop triggers, and hands the frames to the analyzer.

pub mod recorder;
pub mod state;

pub use recorder::{drive_session, StopReason};
pub use state::{CaptureSession, SessionState, StopOutcome};
