//! Session Driver
//!
//! Runs one capture session end to end: acquire the video source, sample on a
//! fixed-rate timer until a stop trigger fires, then hand the frames to the
//! analyzer and record its outcome on the session.
//!
//! The three stop triggers (manual cancellation, the source ending itself,
//! and the frame cap) converge on one exit path that drops the timer and
//! releases the source before the handoff. Analyzer failures are caught here
//! and converted to the session's `Error` state; they never propagate up.

use crate::analyzer::AnalyzeFrames;
use crate::capture::sampler::{FrameSampler, TickOutcome};
use crate::capture::source::{AcquireSource, Acquisition, FrameSource};
use crate::capture::types::CAPTURE_INTERVAL_MS;
use crate::session::state::{CaptureSession, StopOutcome};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Which trigger ended the recording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// User-initiated stop (the cancellation token fired)
    Manual,
    /// The video source ended itself
    SourceEnded,
    /// The frame sequence reached its cap
    CapReached,
}

/// Drive one session from acquisition through analysis.
///
/// Cancelling `stop` is the user-initiated stop. If acquisition is declined
/// or fails, the session stays `Idle` and this returns `Ok(())`; acquisition
/// cancellation is a non-error condition.
pub async fn drive_session<P, A>(
    session: &mut CaptureSession,
    provider: &P,
    analyzer: &A,
    stop: CancellationToken,
) -> crate::Result<()>
where
    P: AcquireSource,
    A: AnalyzeFrames,
{
    let mut source = match provider.acquire().await {
        Ok(Acquisition::Granted(source)) => source,
        Ok(Acquisition::Cancelled) => {
            info!("source acquisition cancelled; session stays idle");
            return Ok(());
        }
        Err(e) => {
            warn!(error = %e, "source acquisition failed; session stays idle");
            return Ok(());
        }
    };

    if let Err(e) = session.begin_recording() {
        source.release();
        return Err(e);
    }

    let mut sampler = FrameSampler::new();
    let mut ticker = tokio::time::interval(Duration::from_millis(CAPTURE_INTERVAL_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // Consume the interval's immediate first tick so sampling starts one
    // full period after recording begins
    ticker.tick().await;

    let reason = loop {
        tokio::select! {
            _ = stop.cancelled() => break StopReason::Manual,
            _ = ticker.tick() => {
                if source.has_ended() {
                    break StopReason::SourceEnded;
                }
                if sampler.sample_tick(&mut source, session) == TickOutcome::CapReached {
                    break StopReason::CapReached;
                }
            }
        }
    };

    // Common exit path for every trigger: timer cancelled, source released
    drop(ticker);
    source.release();
    info!(
        ?reason,
        frames = session.frame_count(),
        dropped = sampler.dropped_samples(),
        "recording stopped"
    );

    match session.finish_recording()? {
        StopOutcome::NoFrames => Ok(()),
        StopOutcome::Analyze(frames) => {
            let result = analyzer.analyze(&frames).await;
            session.complete_analysis(result);
            Ok(())
        }
    }
}
