//! Async step loop on tokio
//!
//! Runs an animator's active run to completion on the current task: sleeps
//! until each step is due and applies manual-interaction signals arriving on
//! a channel in between. Everything happens on one task, so the lock flag is
//! always read and written serially.

use tokio::sync::mpsc;
use tracing::debug;

use super::animation::{ScrollAnimator, StopReason, TickOutcome};
use super::clock::Clock;
use super::viewport::{Interaction, Viewport};

/// Summary of a driven run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveReport {
    /// Steps that moved the viewport (excluding the immediate first step)
    pub steps: usize,
    /// Signals received while the run was active
    pub signals: usize,
    pub stop: Option<StopReason>,
    pub final_offset: f64,
}

/// Drive the animator's active run until it stops
///
/// Returns immediately when no run is active. A closed signal channel is
/// treated as "no more signals".
pub async fn drive<C, V>(
    animator: &mut ScrollAnimator<C>,
    viewport: &mut V,
    signals: &mut mpsc::UnboundedReceiver<Interaction>,
) -> DriveReport
where
    C: Clock,
    V: Viewport + ?Sized,
{
    let mut steps = 0;
    let mut received = 0;

    while let Some(wait) = animator.time_until_next_tick() {
        tokio::select! {
            biased;

            Some(signal) = signals.recv() => {
                received += 1;
                animator.handle_interaction(signal);
            }
            _ = tokio::time::sleep(wait) => {
                match animator.poll(viewport) {
                    TickOutcome::Stepped { .. } => steps += 1,
                    TickOutcome::Stopped(_) | TickOutcome::Idle => break,
                    TickOutcome::NotDue | TickOutcome::Stale => {}
                }
            }
        }
    }

    let report = DriveReport {
        steps,
        signals: received,
        stop: animator.last_stop(),
        final_offset: viewport.scroll_y(),
    };
    debug!(?report, "Drive finished");
    report
}
