//! Frame Data Structures
//!
//! A [`Frame`] is one timestamped JPEG still sampled from the live video
//! source. A [`FrameSequence`] is the ordered, append-only, bounded collection
//! of frames for a single recording.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum frames per recording. Reaching the cap stops the recording
/// through the same path as a manual stop.
pub const MAX_FRAMES: usize = 20;

/// Sampling cadence in milliseconds
pub const CAPTURE_INTERVAL_MS: u64 = 2000;

/// JPEG quality for captured stills, on a 0 to 1 scale
pub const JPEG_QUALITY: f32 = 0.6;

/// One still image sampled from the video source during recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    /// Capture time
    pub captured_at: DateTime<Utc>,
    /// JPEG-encoded image bytes
    pub jpeg: Vec<u8>,
}

impl Frame {
    /// Create a frame captured now
    pub fn new(jpeg: Vec<u8>) -> Self {
        Self {
            captured_at: Utc::now(),
            jpeg,
        }
    }

    /// Capture time as milliseconds since the Unix epoch
    pub fn timestamp_ms(&self) -> i64 {
        self.captured_at.timestamp_millis()
    }
}

/// Outcome of appending a frame to a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// Frame appended, capacity remains
    Appended,
    /// Frame appended and the sequence is now at capacity
    AppendedFull,
    /// Sequence was already at capacity; frame discarded
    Rejected,
}

/// Ordered, append-only, bounded sequence of frames for one recording.
///
/// Invariant: length never exceeds [`MAX_FRAMES`]. Order is capture order and
/// is significant (it represents the temporal sequence of the workflow).
#[derive(Debug, Clone, Default)]
pub struct FrameSequence {
    frames: Vec<Frame>,
}

impl FrameSequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Append a frame in capture order.
    ///
    /// Returns [`PushOutcome::Rejected`] without appending once the sequence
    /// holds [`MAX_FRAMES`] frames.
    pub fn push(&mut self, frame: Frame) -> PushOutcome {
        if self.frames.len() >= MAX_FRAMES {
            return PushOutcome::Rejected;
        }
        self.frames.push(frame);
        if self.frames.len() == MAX_FRAMES {
            PushOutcome::AppendedFull
        } else {
            PushOutcome::Appended
        }
    }

    /// Number of frames captured so far
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if no frames have been captured
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Whether the sequence has reached [`MAX_FRAMES`]
    pub fn is_full(&self) -> bool {
        self.frames.len() >= MAX_FRAMES
    }

    /// Iterate frames in capture order
    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// Frames in capture order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

impl<'a> IntoIterator for &'a FrameSequence {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
