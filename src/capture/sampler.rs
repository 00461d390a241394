//! Fixed-Rate Frame Sampler
//!
//! One [`FrameSampler::sample_tick`] call captures the source's current
//! visual content, encodes it, and appends it to the session's frame
//! sequence. Ticks are driven by the session driver's interval timer; each
//! tick runs to completion before the next can fire.
//!
//! A transient capture or encode failure drops that tick's frame and sampling
//! continues on the next tick. Dropped samples are counted and logged at
//! debug level so frame loss is observable.

use crate::capture::encode::encode_jpeg;
use crate::capture::source::FrameSource;
use crate::capture::types::{Frame, PushOutcome};
use crate::session::{CaptureSession, SessionState};
use tracing::debug;

/// Result of one sampler tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A frame was captured and appended
    Appended,
    /// A frame was appended and the sequence reached its cap; the caller
    /// must run the same stop path as a manual stop
    CapReached,
    /// No frame was produced this tick (source initializing, capture or
    /// encode failure, or session not recording)
    Skipped,
}

/// Samples one still per tick from a live video source.
#[derive(Debug, Default)]
pub struct FrameSampler {
    dropped: u64,
}

impl FrameSampler {
    /// Create a sampler with no dropped samples
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks that failed to produce a frame due to a capture or
    /// encode error
    pub fn dropped_samples(&self) -> u64 {
        self.dropped
    }

    /// Sample the source once and append the frame to the session.
    ///
    /// A no-op while the session is not recording, or while the source has
    /// not yet reported nonzero dimensions.
    pub fn sample_tick(
        &mut self,
        source: &mut impl FrameSource,
        session: &mut CaptureSession,
    ) -> TickOutcome {
        if session.state() != SessionState::Recording {
            return TickOutcome::Skipped;
        }

        // Source still initializing: skip, never queue
        match source.dimensions() {
            Some((w, h)) if w > 0 && h > 0 => {}
            _ => return TickOutcome::Skipped,
        }

        let image = match source.capture() {
            Ok(image) => image,
            Err(e) => {
                self.dropped += 1;
                debug!(error = %e, dropped = self.dropped, "sample dropped: capture failed");
                return TickOutcome::Skipped;
            }
        };

        let jpeg = match encode_jpeg(&image) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.dropped += 1;
                debug!(error = %e, dropped = self.dropped, "sample dropped: encode failed");
                return TickOutcome::Skipped;
            }
        };

        match session.record_frame(Frame::new(jpeg)) {
            Ok(PushOutcome::Appended) => TickOutcome::Appended,
            Ok(PushOutcome::AppendedFull) => TickOutcome::CapReached,
            Ok(PushOutcome::Rejected) | Err(_) => TickOutcome::Skipped,
        }
    }
}
