//! Frame capture module
//!
//! Provides the video source seam, the fixed-rate frame sampler, and JPEG
//! encoding for captured stills. Sampling only produces frames while the
//! owning session is recording; the sequence is bounded at [`MAX_FRAMES`].

pub mod encode;
pub mod sampler;
pub mod source;
pub mod types;

pub use encode::{encode_jpeg, from_data_url, to_data_url};
pub use sampler::{FrameSampler, TickOutcome};
pub use source::{AcquireSource, Acquisition, FrameSource, ImageDirSource};
pub use types::{Frame, FrameSequence, PushOutcome, CAPTURE_INTERVAL_MS, JPEG_QUALITY, MAX_FRAMES};
