//! Interruptible smooth scrolling
//!
//! Animates a viewport to a target vertical offset with linear
//! interpolation over at most `max_duration_ms`, stepping every
//! [`POLL_INTERVAL_MS`]. A wheel or touch-start signal locks the animator and
//! the next step stops the run; starting a new run unlocks it again.
//!
//! ## Building blocks
//! - `clock` - time sources (system, tokio, manual)
//! - `viewport` - the scrolled surface and interaction signals
//! - `timing` - pure progress/interpolation helpers and the step timer
//!
//! ## Controllers
//! - `animation` - the animator state machine, polled by the host event loop
//! - `driver` - an async step loop for tokio hosts
//!
//! # Usage
//!
//! ```ignore
//! use smoothscroll_core::scroll::{ScrollAnimator, Interaction};
//!
//! let mut animator = ScrollAnimator::new(500.0);
//! animator.scroll_to_target(&mut viewport, 1000.0);
//!
//! // In the host loop
//! if let Some(wait) = animator.time_until_next_tick() {
//!     // wait for input at most `wait`, then:
//!     animator.poll(&mut viewport);
//! }
//!
//! // On wheel input
//! animator.handle_interaction(Interaction::Wheel);
//! ```

pub mod clock;
pub mod timing;
pub mod viewport;

pub mod animation;
pub mod driver;

pub use animation::{
    AnimatorState, RunId, ScrollAnimator, ScrollRun, StopReason, TickOutcome, POLL_INTERVAL_MS,
};
pub use clock::{Clock, ManualClock, SystemClock, TokioClock};
pub use driver::{drive, DriveReport};
pub use viewport::{Interaction, MemoryViewport, Viewport};
