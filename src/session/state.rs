//! Capture Session State Machine
//!
//! The lifecycle of one recording: idle → recording → analyzing →
//! (results | error), with reset returning to idle. Exactly one session is
//! live at a time; it is constructed explicitly and passed by reference to
//! the sampler and the driver rather than living in ambient global state.
//!
//! Frames may only be recorded while the state is [`SessionState::Recording`],
//! and the stop action hands the authoritative frame sequence to the caller
//! by value, so the analyzer never re-reads mutable session state.

use crate::analyzer::WorkflowSuggestion;
use crate::capture::types::{Frame, FrameSequence, PushOutcome};
use tracing::{debug, info};
use uuid::Uuid;

/// Lifecycle states of a capture session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No recording in progress
    Idle,
    /// Frames are being sampled from a live source
    Recording,
    /// The frame sequence has been handed to the analyzer
    Analyzing,
    /// Analysis produced a non-empty suggestion list
    Results,
    /// Recording or analysis failed; an error message is set
    Error,
}

/// What the stop action produced
#[derive(Debug)]
pub enum StopOutcome {
    /// Frames were captured; the session is `Analyzing` and the sequence is
    /// transferred to the caller for exactly one analyzer invocation
    Analyze(FrameSequence),
    /// Zero frames were captured; the session is `Error` and the analyzer
    /// must not be invoked
    NoFrames,
}

/// The end-to-end lifecycle object for one recording.
#[derive(Debug)]
pub struct CaptureSession {
    id: Uuid,
    state: SessionState,
    frames: FrameSequence,
    suggestions: Vec<WorkflowSuggestion>,
    error: Option<String>,
}

impl CaptureSession {
    /// Create a new idle session
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::Idle,
            frames: FrameSequence::new(),
            suggestions: Vec::new(),
            error: None,
        }
    }

    /// Session id
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Frames captured so far
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Suggestions produced by a completed analysis
    pub fn suggestions(&self) -> &[WorkflowSuggestion] {
        &self.suggestions
    }

    /// Display message for the `Error` state
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Transition `Idle → Recording` once a video source has been acquired.
    pub fn begin_recording(&mut self) -> crate::Result<()> {
        if self.state != SessionState::Idle {
            return Err(crate::Error::Session(format!(
                "cannot start recording from {:?}",
                self.state
            )));
        }
        self.state = SessionState::Recording;
        info!(session = %self.id, "recording started");
        Ok(())
    }

    /// Append a sampled frame. Only valid while `Recording`.
    pub fn record_frame(&mut self, frame: Frame) -> crate::Result<PushOutcome> {
        if self.state != SessionState::Recording {
            return Err(crate::Error::Session(format!(
                "cannot record a frame in {:?}",
                self.state
            )));
        }
        Ok(self.frames.push(frame))
    }

    /// Transition out of `Recording`. All three stop triggers (manual stop,
    /// source ended, cap reached) converge here.
    ///
    /// With at least one frame captured the session moves to `Analyzing` and
    /// the frame sequence is transferred to the caller; with zero frames the
    /// session moves straight to `Error` and the analyzer is bypassed.
    pub fn finish_recording(&mut self) -> crate::Result<StopOutcome> {
        if self.state != SessionState::Recording {
            return Err(crate::Error::Session(format!(
                "cannot stop recording from {:?}",
                self.state
            )));
        }
        if self.frames.is_empty() {
            self.state = SessionState::Error;
            self.error = Some("No frames were captured.".to_string());
            return Ok(StopOutcome::NoFrames);
        }
        self.state = SessionState::Analyzing;
        Ok(StopOutcome::Analyze(std::mem::take(&mut self.frames)))
    }

    /// Record the analyzer's outcome: `Analyzing → Results` on a non-empty
    /// suggestion list, `Analyzing → Error` otherwise.
    ///
    /// The inference call has no cancellation path, so a result can arrive
    /// after the user has already reset the session; such stale results are
    /// discarded.
    pub fn complete_analysis(&mut self, result: crate::Result<Vec<WorkflowSuggestion>>) {
        if self.state != SessionState::Analyzing {
            debug!(session = %self.id, state = ?self.state, "discarding stale analysis result");
            return;
        }
        match result {
            Ok(suggestions) if !suggestions.is_empty() => {
                info!(session = %self.id, count = suggestions.len(), "analysis complete");
                self.suggestions = suggestions;
                self.state = SessionState::Results;
            }
            Ok(_) => {
                self.error = Some("Analysis produced no suggestions.".to_string());
                self.state = SessionState::Error;
            }
            Err(e) => {
                info!(session = %self.id, error = %e, "analysis failed");
                self.error = Some(e.to_string());
                self.state = SessionState::Error;
            }
        }
    }

    /// Return to `Idle`, clearing frames, suggestions, and the error message.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.frames = FrameSequence::new();
        self.suggestions.clear();
        self.error = None;
    }
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AutomationType, Complexity};

    fn make_frame() -> Frame {
        Frame::new(vec![0xFF, 0xD8, 0xFF, 0xD9])
    }

    fn make_suggestion(id: &str) -> WorkflowSuggestion {
        WorkflowSuggestion {
            id: id.to_string(),
            title: "Automate the export".to_string(),
            description: "Exports the report".to_string(),
            complexity: Complexity::Low,
            automation: AutomationType::ShellScript,
            steps: vec!["Open the page".to_string()],
            code: "echo export".to_string(),
        }
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = CaptureSession::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.frame_count(), 0);
        assert!(session.suggestions().is_empty());
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_begin_recording_from_idle() {
        let mut session = CaptureSession::new();
        session.begin_recording().unwrap();
        assert_eq!(session.state(), SessionState::Recording);
    }

    #[test]
    fn test_begin_recording_is_not_reentrant() {
        let mut session = CaptureSession::new();
        session.begin_recording().unwrap();
        assert!(session.begin_recording().is_err());
        assert_eq!(session.state(), SessionState::Recording);
    }

    #[test]
    fn test_record_frame_requires_recording_state() {
        let mut session = CaptureSession::new();
        assert!(session.record_frame(make_frame()).is_err());
    }

    #[test]
    fn test_stop_with_frames_moves_to_analyzing() {
        let mut session = CaptureSession::new();
        session.begin_recording().unwrap();
        session.record_frame(make_frame()).unwrap();
        session.record_frame(make_frame()).unwrap();

        match session.finish_recording().unwrap() {
            StopOutcome::Analyze(frames) => assert_eq!(frames.len(), 2),
            StopOutcome::NoFrames => panic!("expected frames"),
        }
        assert_eq!(session.state(), SessionState::Analyzing);
        // Ownership transferred: the session no longer holds the frames
        assert_eq!(session.frame_count(), 0);
    }

    #[test]
    fn test_stop_with_zero_frames_is_an_error() {
        let mut session = CaptureSession::new();
        session.begin_recording().unwrap();

        match session.finish_recording().unwrap() {
            StopOutcome::NoFrames => {}
            StopOutcome::Analyze(_) => panic!("expected no frames"),
        }
        assert_eq!(session.state(), SessionState::Error);
        assert!(session.error_message().unwrap().contains("No frames"));
    }

    #[test]
    fn test_stop_requires_recording_state() {
        let mut session = CaptureSession::new();
        assert!(session.finish_recording().is_err());
    }

    #[test]
    fn test_successful_analysis_moves_to_results() {
        let mut session = CaptureSession::new();
        session.begin_recording().unwrap();
        session.record_frame(make_frame()).unwrap();
        session.finish_recording().unwrap();

        session.complete_analysis(Ok(vec![make_suggestion("sugg-0"), make_suggestion("sugg-1")]));
        assert_eq!(session.state(), SessionState::Results);
        assert_eq!(session.suggestions().len(), 2);
    }

    #[test]
    fn test_failed_analysis_moves_to_error() {
        let mut session = CaptureSession::new();
        session.begin_recording().unwrap();
        session.record_frame(make_frame()).unwrap();
        session.finish_recording().unwrap();

        session.complete_analysis(Err(crate::Error::Transport("connection reset".to_string())));
        assert_eq!(session.state(), SessionState::Error);
        assert!(session.error_message().unwrap().contains("connection reset"));
    }

    #[test]
    fn test_empty_suggestion_list_is_an_error() {
        let mut session = CaptureSession::new();
        session.begin_recording().unwrap();
        session.record_frame(make_frame()).unwrap();
        session.finish_recording().unwrap();

        session.complete_analysis(Ok(Vec::new()));
        assert_eq!(session.state(), SessionState::Error);
    }

    #[test]
    fn test_stale_analysis_result_is_discarded() {
        let mut session = CaptureSession::new();
        session.begin_recording().unwrap();
        session.record_frame(make_frame()).unwrap();
        session.finish_recording().unwrap();

        // User resets while the inference call is still in flight
        session.reset();
        assert_eq!(session.state(), SessionState::Idle);

        // The eventual response must not resurrect the session
        session.complete_analysis(Ok(vec![make_suggestion("sugg-0")]));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.suggestions().is_empty());
    }

    #[test]
    fn test_reset_from_results_clears_everything() {
        let mut session = CaptureSession::new();
        session.begin_recording().unwrap();
        session.record_frame(make_frame()).unwrap();
        session.finish_recording().unwrap();
        session.complete_analysis(Ok(vec![make_suggestion("sugg-0")]));
        assert_eq!(session.state(), SessionState::Results);

        session.reset();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.frame_count(), 0);
        assert!(session.suggestions().is_empty());
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_reset_from_error_clears_message() {
        let mut session = CaptureSession::new();
        session.begin_recording().unwrap();
        session.finish_recording().unwrap();
        assert_eq!(session.state(), SessionState::Error);

        session.reset();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.error_message().is_none());

        // A fresh recording can start after reset
        session.begin_recording().unwrap();
        assert_eq!(session.state(), SessionState::Recording);
    }
}
