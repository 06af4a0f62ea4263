//! Scroll animation controller
//!
//! Animates a viewport's vertical offset towards a target and stops as soon
//! as the user takes over (wheel or touch) or the safety timeout elapses.
//! The host owns the event loop: it asks [`ScrollAnimator::time_until_next_tick`]
//! how long it may sleep and calls [`ScrollAnimator::poll`] when it wakes.

use std::time::Duration;

use tracing::{debug, trace};

use super::clock::{Clock, SystemClock};
use super::timing::{animation_duration, lerp, ms_to_duration, progress, Ticker};
use super::viewport::{Interaction, Viewport};
use crate::config::ScrollConfig;

/// Delay between animation steps, in milliseconds
pub const POLL_INTERVAL_MS: f64 = 10.0;

/// Generation id of an animation run; later runs have larger ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(pub u64);

/// Immutable parameters of one scroll-to-target animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRun {
    pub id: RunId,
    /// Clock time when the run started
    pub start_ms: f64,
    pub start_offset: f64,
    pub target_offset: f64,
    pub distance: f64,
    pub duration_ms: f64,
}

impl ScrollRun {
    fn new(id: RunId, start_ms: f64, start_offset: f64, target_offset: f64, max_ms: f64) -> Self {
        let distance = target_offset - start_offset;
        Self {
            id,
            start_ms,
            start_offset,
            target_offset,
            distance,
            duration_ms: animation_duration(distance, max_ms),
        }
    }

    /// Runs with nothing to animate arrive in a single step
    #[inline]
    pub fn is_instant(&self) -> bool {
        self.duration_ms <= 0.0
    }

    /// Fraction of the distance covered after `elapsed_ms`
    #[inline]
    pub fn fraction(&self, elapsed_ms: f64) -> f64 {
        progress(elapsed_ms, self.duration_ms)
    }

    /// Vertical offset after `elapsed_ms`
    #[inline]
    pub fn offset_at(&self, elapsed_ms: f64) -> f64 {
        if self.is_instant() {
            return self.target_offset;
        }
        lerp(self.start_offset, self.target_offset, self.fraction(elapsed_ms))
    }
}

/// Coarse animator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    Idle,
    Animating,
    Locked,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The safety timeout elapsed
    Timeout,
    /// A manual interaction locked the animator
    Locked,
    /// Nothing to animate; the target was written in one step
    Arrived,
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// No run is active
    Idle,
    /// The next step is not due yet
    NotDue,
    /// The tick belongs to a superseded run and was ignored
    Stale,
    /// The viewport was moved and another step is scheduled
    Stepped { offset: f64, fraction: f64 },
    /// The run ended on this tick
    Stopped(StopReason),
}

/// Scroll animation controller
///
/// Holds at most one [`ScrollRun`]. Starting a new run replaces the previous
/// one, so a superseded run can never write to the viewport again.
#[derive(Debug)]
pub struct ScrollAnimator<C: Clock = SystemClock> {
    clock: C,
    max_duration_ms: f64,
    timeout_ms: f64,
    /// When false every run is instant
    smooth: bool,
    locked: bool,
    run: Option<ScrollRun>,
    ticker: Ticker,
    next_run_id: u64,
    last_stop: Option<StopReason>,
}

impl ScrollAnimator<SystemClock> {
    /// Create an animator on the system clock
    ///
    /// `max_duration_ms` must be finite and greater than zero.
    pub fn new(max_duration_ms: f64) -> Self {
        Self::with_clock(max_duration_ms, SystemClock::new())
    }

    /// Create an animator from (validated) configuration
    pub fn from_config(config: &ScrollConfig) -> Self {
        Self::from_config_with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> ScrollAnimator<C> {
    pub fn with_clock(max_duration_ms: f64, clock: C) -> Self {
        debug_assert!(
            max_duration_ms.is_finite() && max_duration_ms > 0.0,
            "max_duration_ms must be finite and positive"
        );
        Self {
            clock,
            max_duration_ms,
            timeout_ms: max_duration_ms + 2.0 * POLL_INTERVAL_MS,
            smooth: true,
            locked: false,
            run: None,
            ticker: Ticker::new(POLL_INTERVAL_MS),
            next_run_id: 0,
            last_stop: None,
        }
    }

    pub fn from_config_with_clock(config: &ScrollConfig, clock: C) -> Self {
        let mut animator = Self::with_clock(config.max_duration_ms, clock);
        animator.smooth = config.enabled;
        animator
    }

    #[inline]
    pub fn max_duration_ms(&self) -> f64 {
        self.max_duration_ms
    }

    #[inline]
    pub fn poll_interval_ms(&self) -> f64 {
        self.ticker.interval_ms()
    }

    /// Safety cutoff after which a run stops regardless of progress
    #[inline]
    pub fn timeout_ms(&self) -> f64 {
        self.timeout_ms
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The active run, if any
    pub fn current_run(&self) -> Option<&ScrollRun> {
        self.run.as_ref()
    }

    /// Why the most recent run ended
    pub fn last_stop(&self) -> Option<StopReason> {
        self.last_stop
    }

    pub fn state(&self) -> AnimatorState {
        if self.locked {
            AnimatorState::Locked
        } else if self.run.is_some() {
            AnimatorState::Animating
        } else {
            AnimatorState::Idle
        }
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock_scrolling(&mut self) {
        if !self.locked {
            debug!(run = ?self.run.map(|r| r.id), "Scrolling locked");
        }
        self.locked = true;
    }

    pub fn unlock_scrolling(&mut self) {
        self.locked = false;
    }

    /// React to a manual-interaction signal; the payload is ignored
    pub fn handle_interaction(&mut self, signal: Interaction) {
        match signal {
            Interaction::Wheel | Interaction::TouchStart => self.lock_scrolling(),
        }
    }

    /// Start animating the viewport's vertical offset towards `target_offset`
    ///
    /// Unlocks the animator, supersedes any active run and performs the
    /// first step immediately. Returns the new run's id.
    pub fn scroll_to_target<V: Viewport + ?Sized>(
        &mut self,
        viewport: &mut V,
        target_offset: f64,
    ) -> RunId {
        self.unlock_scrolling();

        self.next_run_id += 1;
        let id = RunId(self.next_run_id);
        let max_ms = if self.smooth { self.max_duration_ms } else { 0.0 };
        let run = ScrollRun::new(
            id,
            self.clock.now_ms(),
            viewport.scroll_y(),
            target_offset,
            max_ms,
        );

        if let Some(previous) = self.run.replace(run) {
            debug!(superseded = previous.id.0, by = id.0, "Scroll run superseded");
        }
        self.last_stop = None;
        debug!(
            run = id.0,
            from = run.start_offset,
            to = run.target_offset,
            duration_ms = run.duration_ms,
            "Scroll run started"
        );

        self.tick_for(id, viewport);
        id
    }

    /// Time the host may wait before calling [`poll`](Self::poll) again
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.run?;
        self.ticker
            .remaining_ms(self.clock.now_ms())
            .map(ms_to_duration)
    }

    /// Run the scheduled step if it is due
    pub fn poll<V: Viewport + ?Sized>(&mut self, viewport: &mut V) -> TickOutcome {
        let Some(run) = self.run else {
            return TickOutcome::Idle;
        };
        if !self.ticker.is_due(self.clock.now_ms()) {
            return TickOutcome::NotDue;
        }
        self.tick_for(run.id, viewport)
    }

    /// Execute one step of the run `run_id`
    ///
    /// For hosts that schedule ticks themselves and cannot cancel them: a
    /// tick scheduled for a run that has since been superseded is ignored.
    pub fn tick_for<V: Viewport + ?Sized>(&mut self, run_id: RunId, viewport: &mut V) -> TickOutcome {
        let Some(run) = self.run else {
            return TickOutcome::Idle;
        };
        if run.id != run_id {
            trace!(stale = run_id.0, current = run.id.0, "Ignoring stale tick");
            return TickOutcome::Stale;
        }

        let now = self.clock.now_ms();
        let elapsed = now - run.start_ms;

        if elapsed > self.timeout_ms {
            return self.stop(StopReason::Timeout);
        }
        if self.locked {
            return self.stop(StopReason::Locked);
        }

        let fraction = run.fraction(elapsed);
        let offset = run.offset_at(elapsed);
        let x = viewport.scroll_x();
        viewport.scroll_to(x, offset);
        trace!(run = run.id.0, elapsed, fraction, offset, "Scroll step");

        if run.is_instant() {
            return self.stop(StopReason::Arrived);
        }

        self.ticker.arm(now);
        TickOutcome::Stepped { offset, fraction }
    }

    fn stop(&mut self, reason: StopReason) -> TickOutcome {
        if let Some(run) = self.run.take() {
            debug!(run = run.id.0, ?reason, "Scroll run stopped");
        }
        self.ticker.disarm();
        self.last_stop = Some(reason);
        TickOutcome::Stopped(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::clock::ManualClock;
    use crate::scroll::viewport::MemoryViewport;

    fn animator(max_ms: f64) -> (ScrollAnimator<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (ScrollAnimator::with_clock(max_ms, clock.clone()), clock)
    }

    /// Advance the clock one poll interval at a time, polling after each step,
    /// until `until_ms` has elapsed or the run ends
    fn run_until(
        animator: &mut ScrollAnimator<ManualClock>,
        clock: &ManualClock,
        viewport: &mut MemoryViewport,
        until_ms: f64,
    ) -> Vec<TickOutcome> {
        let mut outcomes = Vec::new();
        while clock.now_ms() < until_ms && animator.current_run().is_some() {
            clock.advance(POLL_INTERVAL_MS);
            outcomes.push(animator.poll(viewport));
        }
        outcomes
    }

    #[test]
    fn test_construction() {
        let (animator, _) = animator(500.0);
        assert_eq!(animator.max_duration_ms(), 500.0);
        assert_eq!(animator.poll_interval_ms(), 10.0);
        assert_eq!(animator.timeout_ms(), 520.0);
        assert_eq!(animator.state(), AnimatorState::Idle);
        assert!(!animator.is_locked());
    }

    #[test]
    fn test_first_step_is_immediate() {
        let (mut animator, _) = animator(500.0);
        let mut vp = MemoryViewport::new(0.0, 0.0);
        animator.scroll_to_target(&mut vp, 1000.0);

        assert_eq!(vp.writes().len(), 1);
        assert_eq!(vp.scroll_y(), 0.0);
        assert_eq!(animator.state(), AnimatorState::Animating);
        let run = animator.current_run().unwrap();
        assert_eq!(run.duration_ms, 500.0);
        assert_eq!(run.distance, 1000.0);
    }

    #[test]
    fn test_halfway_scenario() {
        let (mut animator, clock) = animator(500.0);
        let mut vp = MemoryViewport::new(0.0, 0.0);
        animator.scroll_to_target(&mut vp, 1000.0);

        run_until(&mut animator, &clock, &mut vp, 250.0);
        assert!((vp.scroll_y() - 500.0).abs() < 1e-6);
    }

    #[test]
    fn test_converges_then_stops_after_timeout() {
        let (mut animator, clock) = animator(500.0);
        let mut vp = MemoryViewport::new(0.0, 0.0);
        animator.scroll_to_target(&mut vp, 1000.0);

        let outcomes = run_until(&mut animator, &clock, &mut vp, 600.0);
        assert!((vp.scroll_y() - 1000.0).abs() < 1e-6);
        assert_eq!(
            outcomes.last(),
            Some(&TickOutcome::Stopped(StopReason::Timeout))
        );
        assert_eq!(animator.state(), AnimatorState::Idle);
        assert!(!animator.is_locked());
        assert_eq!(animator.time_until_next_tick(), None);
    }

    #[test]
    fn test_no_mutation_after_timeout() {
        let (mut animator, clock) = animator(100.0);
        let mut vp = MemoryViewport::new(0.0, 0.0);
        animator.scroll_to_target(&mut vp, 300.0);

        // Jump well past the timeout in one go (heavy scheduler delay)
        clock.advance(1000.0);
        let writes_before = vp.writes().len();
        assert_eq!(
            animator.poll(&mut vp),
            TickOutcome::Stopped(StopReason::Timeout)
        );
        assert_eq!(vp.writes().len(), writes_before);
        assert_eq!(animator.poll(&mut vp), TickOutcome::Idle);
    }

    #[test]
    fn test_short_distance_keeps_reasserting_target_until_timeout() {
        let (mut animator, clock) = animator(500.0);
        let mut vp = MemoryViewport::new(0.0, 100.0);
        animator.scroll_to_target(&mut vp, 140.0);
        assert_eq!(animator.current_run().unwrap().duration_ms, 20.0);

        run_until(&mut animator, &clock, &mut vp, 100.0);
        assert!(animator.current_run().is_some());
        assert!((vp.scroll_y() - 140.0).abs() < 1e-6);

        let outcomes = run_until(&mut animator, &clock, &mut vp, 1000.0);
        assert_eq!(
            outcomes.last(),
            Some(&TickOutcome::Stopped(StopReason::Timeout))
        );
        assert!(clock.now_ms() <= animator.timeout_ms() + POLL_INTERVAL_MS);
    }

    #[test]
    fn test_wheel_signal_freezes_offset() {
        let (mut animator, clock) = animator(500.0);
        let mut vp = MemoryViewport::new(0.0, 0.0);
        animator.scroll_to_target(&mut vp, 1000.0);

        run_until(&mut animator, &clock, &mut vp, 100.0);
        let frozen = vp.scroll_y();
        assert!((frozen - 200.0).abs() < 1e-6);

        animator.handle_interaction(Interaction::Wheel);
        assert_eq!(animator.state(), AnimatorState::Locked);

        let writes_before = vp.writes().len();
        let outcomes = run_until(&mut animator, &clock, &mut vp, 600.0);
        assert_eq!(outcomes, vec![TickOutcome::Stopped(StopReason::Locked)]);
        assert_eq!(vp.writes().len(), writes_before);
        assert_eq!(vp.scroll_y(), frozen);
        assert_eq!(animator.last_stop(), Some(StopReason::Locked));
        assert_eq!(animator.state(), AnimatorState::Locked);
    }

    #[test]
    fn test_touch_start_locks() {
        let (mut animator, _) = animator(500.0);
        animator.handle_interaction(Interaction::TouchStart);
        assert!(animator.is_locked());
    }

    #[test]
    fn test_scroll_to_target_unlocks_and_restarts() {
        let (mut animator, clock) = animator(500.0);
        let mut vp = MemoryViewport::new(0.0, 0.0);
        animator.scroll_to_target(&mut vp, 1000.0);
        run_until(&mut animator, &clock, &mut vp, 50.0);
        animator.lock_scrolling();
        run_until(&mut animator, &clock, &mut vp, 100.0);
        assert_eq!(animator.state(), AnimatorState::Locked);

        let at_lock = vp.scroll_y();
        animator.scroll_to_target(&mut vp, 0.0);
        assert!(!animator.is_locked());
        assert_eq!(animator.state(), AnimatorState::Animating);

        run_until(&mut animator, &clock, &mut vp, 1000.0);
        assert!(at_lock > 0.0);
        assert!(vp.scroll_y().abs() < 1e-6);
    }

    #[test]
    fn test_horizontal_offset_preserved() {
        let (mut animator, clock) = animator(200.0);
        let mut vp = MemoryViewport::new(37.0, 10.0);
        animator.scroll_to_target(&mut vp, 410.0);
        run_until(&mut animator, &clock, &mut vp, 400.0);

        assert!(!vp.writes().is_empty());
        assert!(vp.writes().iter().all(|&(x, _)| x == 37.0));
    }

    #[test]
    fn test_horizontal_offset_read_fresh_each_step() {
        let (mut animator, clock) = animator(200.0);
        let mut vp = MemoryViewport::new(0.0, 0.0);
        animator.scroll_to_target(&mut vp, 400.0);
        clock.advance(POLL_INTERVAL_MS);
        animator.poll(&mut vp);

        let y = vp.scroll_y();
        vp.set_manual(12.0, y);
        clock.advance(POLL_INTERVAL_MS);
        animator.poll(&mut vp);
        assert_eq!(vp.writes().last().map(|w| w.0), Some(12.0));
    }

    #[test]
    fn test_zero_distance_arrives_in_one_step() {
        let (mut animator, clock) = animator(500.0);
        let mut vp = MemoryViewport::new(0.0, 250.0);
        animator.scroll_to_target(&mut vp, 250.0);

        assert_eq!(vp.writes(), &[(0.0, 250.0)]);
        assert_eq!(animator.last_stop(), Some(StopReason::Arrived));
        assert_eq!(animator.state(), AnimatorState::Idle);

        clock.advance(POLL_INTERVAL_MS);
        assert_eq!(animator.poll(&mut vp), TickOutcome::Idle);
        assert_eq!(vp.writes().len(), 1);
    }

    #[test]
    fn test_target_outside_range_left_to_viewport() {
        let (mut animator, clock) = animator(500.0);
        let mut vp = MemoryViewport::new(0.0, 50.0).with_max_y(100.0);
        animator.scroll_to_target(&mut vp, -400.0);
        run_until(&mut animator, &clock, &mut vp, 1000.0);

        assert_eq!(vp.scroll_y(), 0.0);
        assert!(vp.writes().iter().any(|&(_, y)| y < 0.0));
    }

    #[test]
    fn test_new_run_supersedes_old() {
        let (mut animator, clock) = animator(500.0);
        let mut vp = MemoryViewport::new(0.0, 0.0);
        let first = animator.scroll_to_target(&mut vp, 1000.0);
        run_until(&mut animator, &clock, &mut vp, 100.0);

        let second = animator.scroll_to_target(&mut vp, 0.0);
        assert!(second > first);
        assert_eq!(animator.current_run().unwrap().start_offset, 200.0);

        // A tick the host had already queued for the first run
        let writes_before = vp.writes().len();
        clock.advance(POLL_INTERVAL_MS);
        assert_eq!(animator.tick_for(first, &mut vp), TickOutcome::Stale);
        assert_eq!(vp.writes().len(), writes_before);

        run_until(&mut animator, &clock, &mut vp, 1000.0);
        assert!(vp.scroll_y().abs() < 1e-6);
    }

    #[test]
    fn test_poll_waits_for_interval() {
        let (mut animator, clock) = animator(500.0);
        let mut vp = MemoryViewport::new(0.0, 0.0);
        animator.scroll_to_target(&mut vp, 1000.0);

        clock.advance(4.0);
        assert_eq!(animator.poll(&mut vp), TickOutcome::NotDue);
        assert_eq!(
            animator.time_until_next_tick(),
            Some(Duration::from_millis(6))
        );
        clock.advance(6.0);
        assert!(matches!(animator.poll(&mut vp), TickOutcome::Stepped { .. }));
    }

    #[test]
    fn test_jittery_scheduling_still_converges() {
        let (mut animator, clock) = animator(500.0);
        let mut vp = MemoryViewport::new(0.0, 0.0);
        animator.scroll_to_target(&mut vp, -800.0);

        for delay in [37.0, 80.0, 12.0, 250.0, 90.0] {
            clock.advance(delay);
            animator.poll(&mut vp);
        }
        assert!((vp.scroll_y() + 800.0).abs() < 1e-6);
    }

    #[test]
    fn test_disabled_smooth_scroll_jumps() {
        let config = ScrollConfig {
            enabled: false,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::from_config_with_clock(&config, ManualClock::new());
        let mut vp = MemoryViewport::new(0.0, 0.0);
        animator.scroll_to_target(&mut vp, 640.0);

        assert_eq!(vp.scroll_y(), 640.0);
        assert_eq!(animator.last_stop(), Some(StopReason::Arrived));
        assert_eq!(animator.state(), AnimatorState::Idle);
    }
}
